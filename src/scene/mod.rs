mod asset;
mod breakpoint;
mod controller;
mod page;
mod picking;
mod placement;
mod regions;
mod state;
mod surface;
mod tween;

pub use asset::*;
pub use breakpoint::*;
pub use controller::*;
pub use page::DeviceScenePage;
pub use picking::*;
pub use placement::*;
pub use regions::*;
pub use state::*;
pub use surface::*;
pub use tween::*;

/// Device with a screen and, optionally, a switch left of it and a home
/// button right of it.
#[cfg(test)]
pub(crate) fn test_device(with_buttons: bool) -> crate::model::Model {
    use crate::model::{Model, Node, Transform, test_box};
    use nalgebra_glm as glm;

    let mut model = Model::new("device");
    let root = model.add_node(Node::new(Some("device".into()), Transform::identity()), None);

    let mut screen = Node::new(Some("screen".into()), Transform::identity());
    screen.primitives.push(test_box([-0.8, 0.4, -0.02], [0.8, 1.6, 0.0]));
    model.add_node(screen, Some(root));

    if with_buttons {
        for (name, x) in [("switch-button", -1.5), ("home-button", 1.5)] {
            let mut node = Node::new(
                Some(name.into()),
                Transform::from_translation(glm::vec3(x, 1.0, 0.0)),
            );
            node.primitives.push(test_box([-0.1, -0.1, -0.05], [0.1, 0.1, 0.05]));
            model.add_node(node, Some(root));
        }
    }
    model.update_world_matrices();
    model
}
