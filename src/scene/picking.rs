use super::{RegionMap, RegionRole};
use crate::geometry::Ray;
use crate::model::{Model, NodeId};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub role: RegionRole,
    pub node: NodeId,
    pub distance: f32,
}

/// Nearest clickable region along `ray`, if any.
pub fn pick(model: &Model, regions: &RegionMap, ray: &Ray) -> Option<Hit> {
    let mut best: Option<Hit> = None;
    for (role, node) in regions.clickable() {
        let Some(distance) = nearest_triangle(model, node, ray) else {
            continue;
        };
        if best.is_none_or(|b| distance < b.distance) {
            best = Some(Hit { role, node, distance });
        }
    }
    best
}

fn nearest_triangle(model: &Model, node: NodeId, ray: &Ray) -> Option<f32> {
    // Cheap reject before walking triangles.
    let bounds = model.world_bounds(node)?;
    ray.intersect_aabb(&bounds)?;

    model
        .world_triangles(node)
        .iter()
        .filter_map(|[a, b, c]| ray.intersect_triangle(a, b, c))
        .min_by(|a, b| a.total_cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Node, Transform, test_box};
    use nalgebra_glm as glm;

    fn buttons(switch_z: f32, home_z: f32) -> Model {
        let mut model = Model::new("buttons");
        let root = model.add_node(Node::new(None, Transform::identity()), None);
        for (name, z) in [("switch-button", switch_z), ("home-button", home_z)] {
            let mut node = Node::new(
                Some(name.into()),
                Transform::from_translation(glm::vec3(0.0, 0.0, z)),
            );
            node.primitives.push(test_box([-0.5, -0.5, -0.05], [0.5, 0.5, 0.05]));
            model.add_node(node, Some(root));
        }
        model.update_world_matrices();
        model
    }

    fn forward_ray() -> Ray {
        Ray::new(glm::vec3(0.0, 0.0, 10.0), glm::vec3(0.0, 0.0, -1.0))
    }

    #[test]
    fn overlapping_regions_resolve_to_the_nearest() {
        let model = buttons(1.0, 0.0);
        let regions = RegionMap::resolve(&model);
        let hit = pick(&model, &regions, &forward_ray()).expect("hit");
        assert_eq!(hit.role, RegionRole::SwitchButton);
        assert!((hit.distance - 8.95).abs() < 1e-4);

        let model = buttons(0.0, 1.0);
        let regions = RegionMap::resolve(&model);
        let hit = pick(&model, &regions, &forward_ray()).expect("hit");
        assert_eq!(hit.role, RegionRole::HomeButton);
    }

    #[test]
    fn misses_return_none() {
        let model = buttons(0.0, 1.0);
        let regions = RegionMap::resolve(&model);
        let ray = Ray::new(glm::vec3(3.0, 0.0, 10.0), glm::vec3(0.0, 0.0, -1.0));
        assert_eq!(pick(&model, &regions, &ray), None);
    }

    #[test]
    fn screen_is_never_clickable() {
        let mut model = Model::new("screen-only");
        let mut node = Node::new(Some("screen".into()), Transform::identity());
        node.primitives.push(test_box([-1.0, -1.0, -0.1], [1.0, 1.0, 0.1]));
        model.add_node(node, None);
        model.update_world_matrices();
        let regions = RegionMap::resolve(&model);
        assert_eq!(pick(&model, &regions, &forward_ray()), None);
    }
}
