use super::Primitive;
use nalgebra_glm as glm;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

/// Local translation / rotation / scale, composed as T * R * S.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: glm::Vec3,
    pub rotation: glm::Quat,
    pub scale: glm::Vec3,
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            translation: glm::Vec3::zeros(),
            rotation: glm::quat_identity(),
            scale: glm::vec3(1.0, 1.0, 1.0),
        }
    }

    #[cfg(test)]
    pub fn from_translation(translation: glm::Vec3) -> Self {
        Self {
            translation,
            ..Self::identity()
        }
    }

    pub fn matrix(&self) -> glm::Mat4 {
        glm::translation(&self.translation)
            * glm::quat_to_mat4(&self.rotation)
            * glm::scaling(&self.scale)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub name: Option<String>,
    pub transform: Transform,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub primitives: Vec<Primitive>,
    /// Cached by `Model::update_world_matrices`.
    pub world: glm::Mat4,
}

impl Node {
    pub fn new(name: Option<String>, transform: Transform) -> Self {
        Self {
            name,
            transform,
            parent: None,
            children: Vec::new(),
            primitives: Vec::new(),
            world: glm::Mat4::identity(),
        }
    }

    pub fn is_named(&self, name: &str) -> bool {
        self.name.as_deref() == Some(name)
    }
}
