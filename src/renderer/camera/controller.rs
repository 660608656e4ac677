use super::CameraState;
use nalgebra_glm as glm;
use std::f32::consts::PI;

const MIN_POLAR: f32 = 1e-4;

/// Orbit navigation around `target`: left drag rotates, right or middle drag
/// pans, the wheel dollies. Motion is damped when `enable_damping` is set.
pub struct OrbitController {
    state: CameraState,
    pub enabled: bool,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    delta_theta: f32,
    delta_phi: f32,
    pan_offset: glm::Vec3,
    scale: f32,
    viewport_height: f32,
    left_mouse_pressed: bool,
    middle_mouse_pressed: bool,
    right_mouse_pressed: bool,
    last_mouse_pos: Option<(f64, f64)>,
}

impl OrbitController {
    pub fn new(state: CameraState) -> Self {
        Self {
            state,
            enabled: true,
            enable_damping: true,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            delta_theta: 0.0,
            delta_phi: 0.0,
            pan_offset: glm::Vec3::zeros(),
            scale: 1.0,
            viewport_height: 1.0,
            left_mouse_pressed: false,
            middle_mouse_pressed: false,
            right_mouse_pressed: false,
            last_mouse_pos: None,
        }
    }

    pub fn state(&self) -> &CameraState {
        &self.state
    }

    pub fn set_viewport_height(&mut self, height: f32) {
        self.viewport_height = height.max(1.0);
    }

    /// Jump to a pose, dropping any motion still being damped out.
    pub fn set_pose(&mut self, position: glm::Vec3, target: glm::Vec3) {
        self.state.position = position;
        self.state.target = target;
        self.stop();
    }

    pub fn set_target(&mut self, target: glm::Vec3) {
        self.state.target = target;
        self.stop();
    }

    pub fn stop(&mut self) {
        self.delta_theta = 0.0;
        self.delta_phi = 0.0;
        self.pan_offset = glm::Vec3::zeros();
        self.scale = 1.0;
        self.last_mouse_pos = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.left_mouse_pressed || self.middle_mouse_pressed || self.right_mouse_pressed
    }

    /// Handle mouse button press/release
    pub fn on_mouse_button(&mut self, button: winit::event::MouseButton, pressed: bool) {
        match button {
            winit::event::MouseButton::Left => self.left_mouse_pressed = pressed,
            winit::event::MouseButton::Middle => self.middle_mouse_pressed = pressed,
            winit::event::MouseButton::Right => self.right_mouse_pressed = pressed,
            _ => {}
        }
        if !pressed {
            self.last_mouse_pos = None;
        }
    }

    /// Handle mouse movement; returns true when the camera was driven.
    pub fn on_mouse_move(&mut self, position: (f64, f64)) -> bool {
        if !self.enabled || !self.is_dragging() {
            self.last_mouse_pos = None;
            return false;
        }

        let Some(last) = self.last_mouse_pos.replace(position) else {
            return false;
        };
        let dx = (position.0 - last.0) as f32;
        let dy = (position.1 - last.1) as f32;

        if self.left_mouse_pressed {
            self.rotate(dx, dy);
        } else {
            self.pan(dx, dy);
        }
        true
    }

    pub fn on_scroll(&mut self, delta: f32) {
        if !self.enabled || delta == 0.0 {
            return;
        }
        let step = 0.95f32.powf(self.zoom_speed);
        if delta > 0.0 {
            self.scale *= step;
        } else {
            self.scale /= step;
        }
    }

    fn rotate(&mut self, dx: f32, dy: f32) {
        self.delta_theta -= 2.0 * PI * dx / self.viewport_height * self.rotate_speed;
        self.delta_phi -= 2.0 * PI * dy / self.viewport_height * self.rotate_speed;
    }

    fn pan(&mut self, dx: f32, dy: f32) {
        let offset = self.state.position - self.state.target;
        let distance = glm::length(&offset) * (self.state.fov_y() * 0.5).tan();
        let view = self.state.view();
        // Rows of the view matrix are the camera axes in world space.
        let right = glm::vec3(view[(0, 0)], view[(0, 1)], view[(0, 2)]);
        let up = glm::vec3(view[(1, 0)], view[(1, 1)], view[(1, 2)]);
        let pixels = 2.0 * distance / self.viewport_height;
        self.pan_offset += -right * dx * pixels + up * dy * pixels;
    }

    /// Advance one frame. Returns true when the pose changed.
    pub fn update(&mut self) -> bool {
        let offset = self.state.position - self.state.target;
        let mut radius = glm::length(&offset);
        if radius < 1e-6 {
            self.stop();
            return false;
        }
        let mut theta = offset.x.atan2(offset.z);
        let mut phi = (offset.y / radius).clamp(-1.0, 1.0).acos();

        let factor = if self.enable_damping { self.damping_factor } else { 1.0 };
        theta += self.delta_theta * factor;
        phi = (phi + self.delta_phi * factor).clamp(MIN_POLAR, PI - MIN_POLAR);
        radius = (radius * self.scale).clamp(self.min_distance, self.max_distance);
        let target = self.state.target + self.pan_offset * factor;

        let new_offset = glm::vec3(
            radius * phi.sin() * theta.sin(),
            radius * phi.cos(),
            radius * phi.sin() * theta.cos(),
        );
        let position = target + new_offset;
        let changed = glm::distance(&position, &self.state.position) > 1e-6
            || glm::distance(&target, &self.state.target) > 1e-6;

        self.state.position = position;
        self.state.target = target;

        if self.enable_damping {
            self.delta_theta *= 1.0 - self.damping_factor;
            self.delta_phi *= 1.0 - self.damping_factor;
            self.pan_offset *= 1.0 - self.damping_factor;
        } else {
            self.delta_theta = 0.0;
            self.delta_phi = 0.0;
            self.pan_offset = glm::Vec3::zeros();
        }
        self.scale = 1.0;

        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::event::MouseButton;

    fn controller() -> OrbitController {
        let mut c = OrbitController::new(CameraState::new(
            60.0,
            0.1,
            100.0,
            glm::vec3(0.0, 0.0, 5.0),
            glm::vec3(0.0, 0.0, 0.0),
        ));
        c.set_viewport_height(600.0);
        c
    }

    #[test]
    fn update_without_input_keeps_pose() {
        let mut c = controller();
        assert!(!c.update());
        assert!((c.state().position - glm::vec3(0.0, 0.0, 5.0)).norm() < 1e-5);
    }

    #[test]
    fn drag_rotates_around_target_at_constant_distance() {
        let mut c = controller();
        c.enable_damping = false;
        c.on_mouse_button(MouseButton::Left, true);
        c.on_mouse_move((100.0, 100.0));
        assert!(c.on_mouse_move((160.0, 100.0)));
        assert!(c.update());

        let p = c.state().position;
        assert!((glm::length(&p) - 5.0).abs() < 1e-4);
        assert!(p.x.abs() > 0.1);
    }

    #[test]
    fn disabled_controller_ignores_input() {
        let mut c = controller();
        c.enabled = false;
        c.on_mouse_button(MouseButton::Left, true);
        c.on_mouse_move((0.0, 0.0));
        assert!(!c.on_mouse_move((300.0, 0.0)));
        c.on_scroll(1.0);
        assert!(!c.update());
    }

    #[test]
    fn damped_motion_decays() {
        let mut c = controller();
        c.on_mouse_button(MouseButton::Left, true);
        c.on_mouse_move((0.0, 0.0));
        c.on_mouse_move((50.0, 0.0));
        c.on_mouse_button(MouseButton::Left, false);

        let before = c.state().position;
        assert!(c.update());
        let first_step = glm::distance(&before, &c.state().position);
        let mid = c.state().position;
        c.update();
        let second_step = glm::distance(&mid, &c.state().position);
        assert!(second_step < first_step);
    }

    #[test]
    fn scroll_dollies_toward_target() {
        let mut c = controller();
        c.on_scroll(1.0);
        c.update();
        assert!(glm::length(&c.state().position) < 5.0);
    }

    #[test]
    fn set_pose_drops_pending_motion() {
        let mut c = controller();
        c.on_mouse_button(MouseButton::Left, true);
        c.on_mouse_move((0.0, 0.0));
        c.on_mouse_move((80.0, 40.0));
        c.set_pose(glm::vec3(0.0, 1.0, 4.0), glm::vec3(0.0, 1.0, 3.0));
        assert!(!c.update());
        assert_eq!(c.state().target, glm::vec3(0.0, 1.0, 3.0));
    }
}
