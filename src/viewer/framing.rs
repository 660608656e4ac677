use crate::geometry::Aabb;
use crate::loader::TextureBinding;
use crate::model::Model;
use nalgebra_glm as glm;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Asset and camera setup for the model viewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AboutCalibration {
    pub path: String,
    pub fov_y_degrees: f32,
    pub far: f32,
    /// Extra distance on top of the tight fit.
    pub margin: f32,
    pub textures: Vec<TextureBinding>,
}

impl Default for AboutCalibration {
    fn default() -> Self {
        Self {
            path: "model/my-model.glb".into(),
            fov_y_degrees: 75.0,
            far: 1000.0,
            margin: 1.2,
            textures: vec![
                TextureBinding::new(&["pants"], "model/textures/pants-texture.png"),
                TextureBinding::new(&["hair"], "model/textures/hair-texture.png"),
                TextureBinding::new(&["head"], "model/textures/face-texture.png"),
                TextureBinding::new(&["body"], "model/textures/body-texture.png"),
            ],
        }
    }
}

impl AboutCalibration {
    pub fn job(&self, root: &Path) -> crate::loader::AssetJob {
        crate::loader::AssetJob {
            path: root.join(&self.path),
            textures: self
                .textures
                .iter()
                .map(|b| (b.nodes.clone(), root.join(&b.texture)))
                .collect(),
            root_transform: crate::model::Transform::identity(),
        }
    }
}

/// Where to move the model and the camera so the model sits centered at
/// the origin and fills the view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Framing {
    pub model_offset: glm::Vec3,
    pub camera_position: glm::Vec3,
}

pub fn frame_bounds(bounds: &Aabb, fov_y_degrees: f32, margin: f32) -> Framing {
    let half_fov = fov_y_degrees.to_radians() * 0.5;
    let distance = bounds.max_dimension() / (2.0 * half_fov.tan());
    Framing {
        model_offset: -bounds.center(),
        camera_position: glm::vec3(0.0, 0.0, distance * margin),
    }
}

/// Shift `model` so its bounds are centered on the origin. Returns the
/// framing used, or `None` for a model with no geometry.
pub fn center_model(model: &mut Model, fov_y_degrees: f32, margin: f32) -> Option<Framing> {
    let framing = frame_bounds(&model.bounds()?, fov_y_degrees, margin);
    model.root_transform.translation += framing.model_offset;
    model.update_world_matrices();
    Some(framing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Node, Transform, test_box};

    #[test]
    fn centers_and_backs_off_by_largest_extent() {
        let bounds = Aabb::new(glm::vec3(1.0, 0.0, -1.0), glm::vec3(3.0, 4.0, 1.0));
        let framing = frame_bounds(&bounds, 90.0, 1.2);
        assert_eq!(framing.model_offset, glm::vec3(-2.0, -2.0, 0.0));
        // max dim 4, tan(45deg) = 1 -> 2 * 1.2
        assert!((framing.camera_position.z - 2.4).abs() < 1e-5);
        assert_eq!(framing.camera_position.x, 0.0);
    }

    #[test]
    fn centered_model_bounds_sit_on_the_origin() {
        let mut model = Model::new("me");
        let mut node = Node::new(Some("body".into()), Transform::identity());
        node.primitives.push(test_box([0.0, 0.0, 0.0], [1.0, 2.0, 1.0]));
        model.add_node(node, None);
        model.update_world_matrices();

        let framing = center_model(&mut model, 75.0, 1.2).expect("has geometry");
        let bounds = model.bounds().expect("has geometry");
        assert!(glm::length(&bounds.center()) < 1e-5);
        // max dim 2 at 75 degrees: 2 / (2 tan 37.5deg) * 1.2
        let expected = 2.0 / (2.0 * 37.5f32.to_radians().tan()) * 1.2;
        assert!((framing.camera_position.z - expected).abs() < 1e-4);
        assert!((framing.camera_position.z - 1.564).abs() < 1e-3);

        assert!(center_model(&mut Model::new("empty"), 75.0, 1.2).is_none());
    }

    #[test]
    fn default_job_points_at_the_portrait_model() {
        let job = AboutCalibration::default().job(Path::new("assets"));
        assert_eq!(job.path, Path::new("assets/model/my-model.glb"));
        assert_eq!(job.textures.len(), 4);
        assert_eq!(job.textures[2].0, vec!["head".to_string()]);
    }
}
