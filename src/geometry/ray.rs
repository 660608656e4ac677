use super::Aabb;
use nalgebra_glm as glm;

/// A world-space ray with a normalized direction.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: glm::Vec3,
    pub direction: glm::Vec3,
}

impl Ray {
    pub fn new(origin: glm::Vec3, direction: glm::Vec3) -> Self {
        let len = glm::length(&direction);
        let direction = if len < 1e-10 {
            glm::vec3(0.0, 0.0, -1.0)
        } else {
            direction / len
        };
        Self { origin, direction }
    }

    /// Unproject normalized device coordinates (x, y in [-1, 1], y up) through
    /// the inverse of a zero-to-one depth view-projection matrix.
    pub fn from_ndc(ndc_x: f32, ndc_y: f32, inv_view_proj: &glm::Mat4) -> Self {
        let near = unproject(inv_view_proj, glm::vec4(ndc_x, ndc_y, 0.0, 1.0));
        let far = unproject(inv_view_proj, glm::vec4(ndc_x, ndc_y, 1.0, 1.0));
        Self::new(near, far - near)
    }

    /// Möller–Trumbore, double sided. Returns the distance along the ray.
    pub fn intersect_triangle(&self, a: &glm::Vec3, b: &glm::Vec3, c: &glm::Vec3) -> Option<f32> {
        let edge1 = b - a;
        let edge2 = c - a;
        let p = glm::cross(&self.direction, &edge2);
        let det = glm::dot(&edge1, &p);
        // det scales with the edge lengths, so the parallel cutoff does too.
        let parallel = f32::EPSILON * glm::length(&edge1) * glm::length(&edge2);
        if det.abs() <= parallel {
            return None;
        }

        let inv_det = 1.0 / det;
        let s = self.origin - a;
        let u = glm::dot(&s, &p) * inv_det;
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = glm::cross(&s, &edge1);
        let v = glm::dot(&self.direction, &q) * inv_det;
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = glm::dot(&edge2, &q) * inv_det;
        (t > 1e-7).then_some(t)
    }

    /// Slab test; returns the entry distance, zero when starting inside.
    pub fn intersect_aabb(&self, aabb: &Aabb) -> Option<f32> {
        let mut t_min = 0.0f32;
        let mut t_max = f32::INFINITY;
        for axis in 0..3 {
            let origin = self.origin[axis];
            let dir = self.direction[axis];
            let (lo, hi) = (aabb.min[axis], aabb.max[axis]);
            if dir.abs() < 1e-8 {
                if origin < lo || origin > hi {
                    return None;
                }
                continue;
            }
            let inv = 1.0 / dir;
            let (mut t0, mut t1) = ((lo - origin) * inv, (hi - origin) * inv);
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_min > t_max {
                return None;
            }
        }
        Some(t_min)
    }
}

fn unproject(inv_view_proj: &glm::Mat4, ndc: glm::Vec4) -> glm::Vec3 {
    let world = inv_view_proj * ndc;
    if world.w.abs() < 1e-10 {
        world.xyz()
    } else {
        world.xyz() / world.w
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_triangle(z: f32) -> [glm::Vec3; 3] {
        [
            glm::vec3(-1.0, -1.0, z),
            glm::vec3(1.0, -1.0, z),
            glm::vec3(0.0, 1.0, z),
        ]
    }

    #[test]
    fn hits_triangle_in_front() {
        let ray = Ray::new(glm::vec3(0.0, 0.0, 5.0), glm::vec3(0.0, 0.0, -1.0));
        let [a, b, c] = unit_triangle(1.0);
        let t = ray.intersect_triangle(&a, &b, &c).expect("hit");
        assert!((t - 4.0).abs() < 1e-5);
        assert!((ray.origin + ray.direction * t - glm::vec3(0.0, 0.0, 1.0)).norm() < 1e-5);
    }

    #[test]
    fn tiny_triangles_still_hit() {
        let ray = Ray::new(glm::vec3(0.0, 0.0, 5.0), glm::vec3(0.0, 0.0, -1.0));
        let [a, b, c] = unit_triangle(0.0).map(|v| v * 1e-4);
        let t = ray.intersect_triangle(&a, &b, &c).expect("sub-millimetre hit");
        assert!((t - 5.0).abs() < 1e-4);

        // Edge-on stays a miss at any size.
        let side = Ray::new(glm::vec3(-5.0, 0.0, 0.0), glm::vec3(1.0, 0.0, 0.0));
        assert!(side.intersect_triangle(&a, &b, &c).is_none());
    }

    #[test]
    fn ignores_triangles_behind_origin_and_off_axis() {
        let ray = Ray::new(glm::vec3(0.0, 0.0, 5.0), glm::vec3(0.0, 0.0, -1.0));
        let [a, b, c] = unit_triangle(6.0);
        assert!(ray.intersect_triangle(&a, &b, &c).is_none());

        let off = Ray::new(glm::vec3(3.0, 0.0, 5.0), glm::vec3(0.0, 0.0, -1.0));
        let [a, b, c] = unit_triangle(0.0);
        assert!(off.intersect_triangle(&a, &b, &c).is_none());
    }

    #[test]
    fn center_of_screen_unprojects_along_view_direction() {
        let eye = glm::vec3(0.0, 1.0, 3.0);
        let view = glm::look_at(&eye, &glm::vec3(0.0, 1.0, 0.0), &glm::vec3(0.0, 1.0, 0.0));
        let proj = glm::perspective_rh_zo(1.5, 60f32.to_radians(), 0.1, 100.0);
        let inv = glm::inverse(&(proj * view));

        let ray = Ray::from_ndc(0.0, 0.0, &inv);
        assert!((ray.direction - glm::vec3(0.0, 0.0, -1.0)).norm() < 1e-4);
        assert!((ray.origin.x).abs() < 1e-4 && (ray.origin.y - 1.0).abs() < 1e-4);
    }

    #[test]
    fn slab_test_handles_axis_parallel_rays() {
        let aabb = Aabb::new(glm::vec3(-1.0, -1.0, -1.0), glm::vec3(1.0, 1.0, 1.0));
        let ray = Ray::new(glm::vec3(0.0, 0.0, 10.0), glm::vec3(0.0, 0.0, -1.0));
        assert_eq!(ray.intersect_aabb(&aabb), Some(9.0));

        let outside = Ray::new(glm::vec3(2.0, 0.0, 10.0), glm::vec3(0.0, 0.0, -1.0));
        assert_eq!(outside.intersect_aabb(&aabb), None);

        let inside = Ray::new(glm::Vec3::zeros(), glm::vec3(1.0, 0.0, 0.0));
        assert_eq!(inside.intersect_aabb(&aabb), Some(0.0));
    }
}
