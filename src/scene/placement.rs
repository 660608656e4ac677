use crate::model::{Model, NodeId};
use nalgebra_glm as glm;

/// World pose of the embedded surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfacePlacement {
    pub position: glm::Vec3,
    pub rotation: glm::Quat,
    /// World units per logical pixel.
    pub scale: f32,
    pub pixel_size: [f32; 2],
}

impl SurfacePlacement {
    /// Corners of the surface rectangle in world space: top-left, top-right,
    /// bottom-right, bottom-left.
    pub fn world_corners(&self) -> [glm::Vec3; 4] {
        let hw = self.pixel_size[0] * self.scale * 0.5;
        let hh = self.pixel_size[1] * self.scale * 0.5;
        [
            glm::vec3(-hw, hh, 0.0),
            glm::vec3(hw, hh, 0.0),
            glm::vec3(hw, -hh, 0.0),
            glm::vec3(-hw, -hh, 0.0),
        ]
        .map(|c| self.position + glm::quat_rotate_vec3(&self.rotation, &c))
    }
}

/// Fit a surface of `target` logical pixels onto the screen node: uniform
/// scale from the node's world box, centered on it, oriented like it, with
/// the asset's `correction` applied last. `None` when the node has no area.
pub fn place_surface(
    model: &Model,
    screen: NodeId,
    target: [f32; 2],
    correction: &glm::Quat,
) -> Option<SurfacePlacement> {
    let bounds = model.world_bounds(screen)?;
    let size = bounds.size();
    if size.x <= f32::EPSILON || size.y <= f32::EPSILON {
        log::warn!("Screen node of {} has no area; surface not placed", model.name);
        return None;
    }

    let factor = (target[0] / size.x).min(target[1] / size.y);
    let rotation = world_rotation(&model.node(screen).world) * correction;

    Some(SurfacePlacement {
        position: bounds.center(),
        rotation: glm::quat_normalize(&rotation),
        scale: 1.0 / factor,
        pixel_size: target,
    })
}

/// Rotation part of a world matrix with any scale divided out.
pub fn world_rotation(world: &glm::Mat4) -> glm::Quat {
    let m = glm::mat4_to_mat3(world);
    let normalize = |i: usize| {
        let c: glm::Vec3 = m.column(i).into();
        let len = glm::length(&c);
        if len < 1e-12 { c } else { c / len }
    };
    let basis = glm::Mat3::from_columns(&[normalize(0), normalize(1), normalize(2)]);
    glm::mat3_to_quat(&basis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Node, Transform, test_box};

    fn screen_model(rotation: glm::Quat) -> (Model, NodeId) {
        let mut model = Model::new("device");
        let mut node = Node::new(
            Some("screen".into()),
            Transform {
                translation: glm::vec3(0.0, 1.0, 0.0),
                rotation,
                scale: glm::vec3(1.0, 1.0, 1.0),
            },
        );
        node.primitives.push(test_box([-0.4, -0.3, -0.01], [0.4, 0.3, 0.01]));
        let id = model.add_node(node, None);
        model.update_world_matrices();
        (model, id)
    }

    #[test]
    fn fits_uniformly_to_the_tighter_axis() {
        let (model, screen) = screen_model(glm::quat_identity());
        let placed = place_surface(&model, screen, [1280.0, 1024.0], &glm::quat_identity())
            .expect("placed");

        // 1280 / 0.8 = 1600, 1024 / 0.6 = 1706.67 -> width is tighter.
        assert!((placed.scale - 1.0 / 1600.0).abs() < 1e-7);
        assert!((placed.position - glm::vec3(0.0, 1.0, 0.0)).norm() < 1e-6);

        let [tl, tr, _, bl] = placed.world_corners();
        assert!((glm::distance(&tl, &tr) - 0.8).abs() < 1e-5);
        assert!((glm::distance(&tl, &bl) - 0.64).abs() < 1e-5);
    }

    #[test]
    fn carries_node_rotation_and_correction() {
        let tilt = glm::quat_angle_axis(0.3, &glm::vec3(1.0, 0.0, 0.0));
        let (model, screen) = screen_model(tilt);
        let quarter = glm::quat_angle_axis(std::f32::consts::FRAC_PI_2, &glm::vec3(0.0, 1.0, 0.0));
        let placed = place_surface(&model, screen, [720.0, 1280.0], &quarter).expect("placed");

        let expected = tilt * quarter;
        let x = glm::vec3(1.0, 0.0, 0.0);
        let got = glm::quat_rotate_vec3(&placed.rotation, &x);
        let want = glm::quat_rotate_vec3(&expected, &x);
        assert!((got - want).norm() < 1e-5);
    }

    #[test]
    fn world_rotation_ignores_scale() {
        let q = glm::quat_angle_axis(0.7, &glm::vec3(0.0, 0.0, 1.0));
        let m = glm::quat_to_mat4(&q) * glm::scaling(&glm::vec3(2.0, 3.0, 4.0));
        let back = world_rotation(&m);
        let v = glm::vec3(1.0, 0.0, 0.0);
        assert!((glm::quat_rotate_vec3(&back, &v) - glm::quat_rotate_vec3(&q, &v)).norm() < 1e-5);
    }

    #[test]
    fn flat_screen_without_area_is_not_placed() {
        let mut model = Model::new("flat");
        let mut node = Node::new(Some("screen".into()), Transform::identity());
        node.primitives.push(test_box([0.0, -1.0, -1.0], [0.0, 1.0, 1.0]));
        let id = model.add_node(node, None);
        model.update_world_matrices();
        assert!(place_surface(&model, id, [100.0, 100.0], &glm::quat_identity()).is_none());
    }
}
