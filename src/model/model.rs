use super::{Node, NodeId, TextureImage, Transform};
use crate::geometry::Aabb;
use nalgebra_glm as glm;

/// A loaded scene graph: node hierarchy, meshes, and the texture images the
/// meshes reference.
#[derive(Debug, Clone, Default)]
pub struct Model {
    pub name: String,
    pub nodes: Vec<Node>,
    pub roots: Vec<NodeId>,
    pub textures: Vec<TextureImage>,
    /// Placement of the whole model in the scene.
    pub root_transform: Transform,
}

impl Model {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn add_node(&mut self, node: Node, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        let mut node = node;
        node.parent = parent;
        self.nodes.push(node);
        match parent {
            Some(p) => self.nodes[p.0].children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn add_texture(&mut self, image: TextureImage) -> usize {
        self.textures.push(image);
        self.textures.len() - 1
    }

    /// Depth-first pre-order walk from `id`, including `id` itself.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.nodes[current.0].children.iter().rev().copied());
        }
        out
    }

    /// Every node in depth-first pre-order across all roots.
    pub fn walk(&self) -> Vec<NodeId> {
        self.roots
            .iter()
            .flat_map(|&root| self.descendants(root))
            .collect()
    }

    /// First node with this exact name in depth-first order.
    pub fn find_node(&self, name: &str) -> Option<NodeId> {
        self.walk()
            .into_iter()
            .find(|&id| self.nodes[id.0].is_named(name))
    }

    /// Recompute cached world matrices for every node.
    pub fn update_world_matrices(&mut self) {
        let root = self.root_transform.matrix();
        let mut stack: Vec<(NodeId, glm::Mat4)> =
            self.roots.iter().rev().map(|&id| (id, root)).collect();
        while let Some((id, parent_world)) = stack.pop() {
            let world = parent_world * self.nodes[id.0].transform.matrix();
            self.nodes[id.0].world = world;
            for &child in self.nodes[id.0].children.iter().rev() {
                stack.push((child, world));
            }
        }
    }

    /// World-space bounds of the subtree rooted at `id`, or `None` when it
    /// holds no geometry.
    pub fn world_bounds(&self, id: NodeId) -> Option<Aabb> {
        let mut aabb = Aabb::empty();
        for node_id in self.descendants(id) {
            let node = &self.nodes[node_id.0];
            for prim in &node.primitives {
                for p in &prim.positions {
                    aabb.expand_point(&transform_point(&node.world, p));
                }
            }
        }
        (!aabb.is_empty()).then_some(aabb)
    }

    /// World-space bounds of the whole model.
    pub fn bounds(&self) -> Option<Aabb> {
        let mut aabb = Aabb::empty();
        for &root in &self.roots {
            if let Some(b) = self.world_bounds(root) {
                aabb.expand_aabb(&b);
            }
        }
        (!aabb.is_empty()).then_some(aabb)
    }

    /// World-space triangles of the subtree rooted at `id`.
    pub fn world_triangles(&self, id: NodeId) -> Vec<[glm::Vec3; 3]> {
        let mut out = Vec::new();
        for node_id in self.descendants(id) {
            let node = &self.nodes[node_id.0];
            for prim in &node.primitives {
                for [a, b, c] in prim.triangles() {
                    out.push([
                        transform_point(&node.world, &prim.positions[a]),
                        transform_point(&node.world, &prim.positions[b]),
                        transform_point(&node.world, &prim.positions[c]),
                    ]);
                }
            }
        }
        out
    }

    /// Point every primitive under the named nodes at texture `slot`.
    /// Returns how many primitives were updated; unknown names are skipped.
    pub fn assign_texture(&mut self, names: &[String], slot: usize) -> usize {
        let mut updated = 0;
        for name in names {
            let Some(id) = self.find_node(name) else {
                log::debug!("No node named '{}' in {}", name, self.name);
                continue;
            };
            for node_id in self.descendants(id) {
                for prim in &mut self.nodes[node_id.0].primitives {
                    prim.texture = Some(slot);
                    updated += 1;
                }
            }
        }
        updated
    }

    pub fn primitive_count(&self) -> usize {
        self.nodes.iter().map(|n| n.primitives.len()).sum()
    }
}

fn transform_point(m: &glm::Mat4, p: &[f32; 3]) -> glm::Vec3 {
    (m * glm::vec4(p[0], p[1], p[2], 1.0)).xyz()
}

/// Box mesh helper shared by tests across modules.
#[cfg(test)]
pub(crate) fn test_box(min: [f32; 3], max: [f32; 3]) -> crate::model::Primitive {
    let [x0, y0, z0] = min;
    let [x1, y1, z1] = max;
    let positions = vec![
        [x0, y0, z0],
        [x1, y0, z0],
        [x1, y1, z0],
        [x0, y1, z0],
        [x0, y0, z1],
        [x1, y0, z1],
        [x1, y1, z1],
        [x0, y1, z1],
    ];
    let indices = vec![
        0, 1, 2, 0, 2, 3, // back
        4, 6, 5, 4, 7, 6, // front
        0, 4, 5, 0, 5, 1, // bottom
        3, 2, 6, 3, 6, 7, // top
        0, 3, 7, 0, 7, 4, // left
        1, 5, 6, 1, 6, 2, // right
    ];
    crate::model::Primitive::new(positions, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Model, NodeId, NodeId) {
        let mut model = Model::new("sample");
        let root = model.add_node(
            Node::new(
                Some("root".into()),
                Transform::from_translation(glm::vec3(0.0, 1.0, 0.0)),
            ),
            None,
        );
        let mut child = Node::new(
            Some("screen".into()),
            Transform::from_translation(glm::vec3(2.0, 0.0, 0.0)),
        );
        child.primitives.push(test_box([-1.0, -1.0, 0.0], [1.0, 1.0, 0.1]));
        let child = model.add_node(child, Some(root));
        model.update_world_matrices();
        (model, root, child)
    }

    #[test]
    fn find_node_matches_exact_names_only() {
        let (model, root, child) = sample();
        assert_eq!(model.find_node("root"), Some(root));
        assert_eq!(model.find_node("screen"), Some(child));
        assert_eq!(model.find_node("scr"), None);
    }

    #[test]
    fn world_bounds_follow_parent_chain_and_root_transform() {
        let (mut model, root, child) = sample();
        let b = model.world_bounds(child).expect("geometry");
        assert_eq!(b.min, glm::vec3(1.0, 0.0, 0.0));
        assert_eq!(b.max, glm::vec3(3.0, 2.0, 0.1));
        assert_eq!(model.world_bounds(root), Some(b));

        model.root_transform = Transform::from_translation(glm::vec3(0.0, -0.5, 0.0));
        model.update_world_matrices();
        let b = model.world_bounds(child).expect("geometry");
        assert_eq!(b.min, glm::vec3(1.0, -0.5, 0.0));
    }

    #[test]
    fn assign_texture_reaches_descendant_primitives() {
        let (mut model, _, child) = sample();
        let updated = model.assign_texture(&["root".to_string(), "missing".to_string()], 0);
        assert_eq!(updated, 1);
        assert_eq!(model.node(child).primitives[0].texture, Some(0));
    }

    #[test]
    fn world_triangles_cover_every_face() {
        let (model, _, child) = sample();
        assert_eq!(model.world_triangles(child).len(), 12);
        assert_eq!(model.primitive_count(), 1);
    }
}
