use nalgebra_glm as glm;

/// Axis-aligned bounding box in whatever space its points came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: glm::Vec3,
    pub max: glm::Vec3,
}

impl Aabb {
    pub fn new(min: glm::Vec3, max: glm::Vec3) -> Self {
        Self { min, max }
    }

    /// Inverted box that any point expands into.
    pub fn empty() -> Self {
        Self::new(
            glm::vec3(f32::INFINITY, f32::INFINITY, f32::INFINITY),
            glm::vec3(f32::NEG_INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    pub fn expand_point(&mut self, point: &glm::Vec3) {
        self.min = glm::min2(&self.min, point);
        self.max = glm::max2(&self.max, point);
    }

    pub fn expand_aabb(&mut self, other: &Aabb) {
        if other.is_empty() {
            return;
        }
        self.expand_point(&other.min);
        self.expand_point(&other.max);
    }

    pub fn center(&self) -> glm::Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> glm::Vec3 {
        if self.is_empty() {
            return glm::Vec3::zeros();
        }
        self.max - self.min
    }

    pub fn max_dimension(&self) -> f32 {
        let size = self.size();
        size.x.max(size.y).max(size.z)
    }

    /// The eight corners, bottom face first (counter-clockwise), then top face.
    pub fn corners(&self) -> [glm::Vec3; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            glm::vec3(lo.x, lo.y, lo.z),
            glm::vec3(hi.x, lo.y, lo.z),
            glm::vec3(hi.x, lo.y, hi.z),
            glm::vec3(lo.x, lo.y, hi.z),
            glm::vec3(lo.x, hi.y, lo.z),
            glm::vec3(hi.x, hi.y, lo.z),
            glm::vec3(hi.x, hi.y, hi.z),
            glm::vec3(lo.x, hi.y, hi.z),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_box_grows_to_cover_points() {
        let mut aabb = Aabb::empty();
        assert!(aabb.is_empty());
        assert_eq!(aabb.size(), glm::Vec3::zeros());

        aabb.expand_point(&glm::vec3(-1.0, 2.0, 0.5));
        aabb.expand_point(&glm::vec3(3.0, -2.0, 1.5));

        assert!(!aabb.is_empty());
        assert_eq!(aabb.size(), glm::vec3(4.0, 4.0, 1.0));
        assert_eq!(aabb.center(), glm::vec3(1.0, 0.0, 1.0));
        assert_eq!(aabb.max_dimension(), 4.0);
    }

    #[test]
    fn expanding_by_empty_box_is_a_no_op() {
        let mut aabb = Aabb::new(glm::vec3(0.0, 0.0, 0.0), glm::vec3(1.0, 1.0, 1.0));
        aabb.expand_aabb(&Aabb::empty());
        assert_eq!(aabb, Aabb::new(glm::vec3(0.0, 0.0, 0.0), glm::vec3(1.0, 1.0, 1.0)));
    }
}
