use crate::loader::{AssetJob, TextureBinding};
use crate::model::Transform;
use nalgebra_glm as glm;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetId {
    Phone,
    Computer,
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetId::Phone => write!(f, "phone"),
            AssetId::Computer => write!(f, "computer"),
        }
    }
}

/// Per-asset placement and texturing data. Anything that differs between
/// device models lives here instead of being inferred from the file name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetCalibration {
    pub path: String,
    /// Logical pixel size of the embedded surface.
    pub screen_size: [f32; 2],
    /// Extra rotation of the surface about +Y, in degrees.
    pub surface_yaw_degrees: f32,
    pub model_scale: f32,
    pub model_offset: [f32; 3],
    pub textures: Vec<TextureBinding>,
}

impl AssetCalibration {
    pub fn phone() -> Self {
        Self {
            path: "model/phone-model.glb".into(),
            screen_size: [720.0, 1280.0],
            surface_yaw_degrees: 90.0,
            model_scale: 1.0,
            model_offset: [0.0, -0.3, 0.0],
            textures: vec![
                TextureBinding::new(&["phone"], "model/textures/phone-texture.png"),
                TextureBinding::new(&["home-button"], "model/textures/middle-button-texture.png"),
                TextureBinding::new(&["switch-button"], "model/textures/phone-button-texture.png"),
            ],
        }
    }

    pub fn computer() -> Self {
        Self {
            path: "model/final-computer-model.gltf".into(),
            screen_size: [1280.0, 1024.0],
            surface_yaw_degrees: 0.0,
            model_scale: 1.0,
            model_offset: [0.0, -0.5, 0.0],
            textures: vec![
                TextureBinding::new(
                    &["mouse", "desktop", "keyboard", "computer"],
                    "model/textures/computer-texture.001.png",
                ),
                TextureBinding::new(&["table"], "model/textures/table-texture.png"),
                TextureBinding::new(
                    &["home-button", "switch-button"],
                    "model/textures/button-texture.png",
                ),
            ],
        }
    }

    pub fn surface_correction(&self) -> glm::Quat {
        glm::quat_angle_axis(
            self.surface_yaw_degrees.to_radians(),
            &glm::vec3(0.0, 1.0, 0.0),
        )
    }

    pub fn root_transform(&self) -> Transform {
        Transform {
            translation: glm::make_vec3(&self.model_offset),
            rotation: glm::quat_identity(),
            scale: glm::vec3(self.model_scale, self.model_scale, self.model_scale),
        }
    }

    pub fn job(&self, root: &Path) -> AssetJob {
        AssetJob {
            path: root.join(&self.path),
            textures: self
                .textures
                .iter()
                .map(|b| (b.nodes.clone(), root.join(&b.texture)))
                .collect(),
            root_transform: self.root_transform(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetCatalog {
    pub phone: AssetCalibration,
    pub computer: AssetCalibration,
}

impl AssetCatalog {
    pub fn get(&self, id: AssetId) -> &AssetCalibration {
        match id {
            AssetId::Phone => &self.phone,
            AssetId::Computer => &self.computer,
        }
    }
}

impl Default for AssetCatalog {
    fn default() -> Self {
        Self {
            phone: AssetCalibration::phone(),
            computer: AssetCalibration::computer(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_phone_carries_a_quarter_turn() {
        let catalog = AssetCatalog::default();
        let phone = catalog.get(AssetId::Phone).surface_correction();
        let computer = catalog.get(AssetId::Computer).surface_correction();

        let x = glm::vec3(1.0, 0.0, 0.0);
        let turned = glm::quat_rotate_vec3(&phone, &x);
        assert!((turned - glm::vec3(0.0, 0.0, -1.0)).norm() < 1e-5);
        assert!((glm::quat_rotate_vec3(&computer, &x) - x).norm() < 1e-6);
    }

    #[test]
    fn job_resolves_paths_under_root() {
        let job = AssetCalibration::computer().job(Path::new("assets"));
        assert_eq!(job.path, Path::new("assets/model/final-computer-model.gltf"));
        assert_eq!(job.textures.len(), 3);
        assert_eq!(job.textures[1].0, vec!["table".to_string()]);
        assert_eq!(job.root_transform.translation, glm::vec3(0.0, -0.5, 0.0));
    }
}
