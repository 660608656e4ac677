use crate::geometry::Ray;
use nalgebra_glm as glm;

/// Perspective camera with an explicit position and look-target, Y up.
#[derive(Debug, Clone)]
pub struct CameraState {
    pub position: glm::Vec3,
    pub target: glm::Vec3,
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl CameraState {
    pub fn new(fov_y_degrees: f32, near: f32, far: f32, position: glm::Vec3, target: glm::Vec3) -> Self {
        Self {
            position,
            target,
            fov_y_degrees,
            near,
            far,
        }
    }

    pub fn fov_y(&self) -> f32 {
        self.fov_y_degrees.to_radians()
    }

    pub fn view(&self) -> glm::Mat4 {
        glm::look_at(&self.position, &self.target, &glm::vec3(0.0, 1.0, 0.0))
    }

    pub fn projection(&self, aspect: f32) -> glm::Mat4 {
        glm::perspective_rh_zo(aspect.max(1e-4), self.fov_y(), self.near, self.far)
    }

    pub fn view_proj(&self, aspect: f32) -> glm::Mat4 {
        self.projection(aspect) * self.view()
    }

    /// Ray through a point given in normalized device coordinates.
    pub fn ray_through(&self, ndc: [f32; 2], aspect: f32) -> Ray {
        let inv = glm::inverse(&self.view_proj(aspect));
        Ray::from_ndc(ndc[0], ndc[1], &inv)
    }

    /// Project a world point to window pixels (origin top-left). `None` when
    /// the point is behind the camera.
    pub fn project(&self, point: &glm::Vec3, width: f32, height: f32) -> Option<[f32; 2]> {
        let clip = self.view_proj(width / height) * glm::vec4(point.x, point.y, point.z, 1.0);
        if clip.w <= 1e-6 {
            return None;
        }
        let ndc = clip.xyz() / clip.w;
        Some([
            (ndc.x + 1.0) * 0.5 * width,
            (1.0 - ndc.y) * 0.5 * height,
        ])
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self::new(
            60.0,
            0.1,
            100.0,
            glm::vec3(0.0, 1.0, 3.25),
            glm::vec3(0.0, 0.0, 0.0),
        )
    }
}

/// Convert a window pixel position to normalized device coordinates.
pub fn pixel_to_ndc(x: f32, y: f32, width: f32, height: f32) -> [f32; 2] {
    [(x / width) * 2.0 - 1.0, -(y / height) * 2.0 + 1.0]
}
