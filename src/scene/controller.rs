use super::{
    AssetCatalog, AssetId, Breakpoint, CameraPreset, EmbeddedSurface, LoadedDevice, OrbitMode,
    PressTween, RegionMap, RegionRole, ViewerState, pick, place_surface, select_model,
};
use crate::error::FolioError;
use crate::geometry::Ray;
use crate::loader::AssetJob;
use crate::model::{Model, NodeId};
use crate::renderer::camera::{CameraState, OrbitController, pixel_to_ndc};
use nalgebra_glm as glm;
use std::path::PathBuf;

pub const FOV_Y_DEGREES: f32 = 60.0;
pub const NEAR: f32 = 0.1;
pub const FAR: f32 = 100.0;

/// A load the caller should start on the loader.
#[derive(Debug, Clone)]
pub struct LoadRequest {
    pub asset: AssetId,
    pub generation: u64,
    pub job: AssetJob,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    Stale,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    None,
    OrbitToggled(OrbitMode),
    HomeReset,
}

struct ActivePress {
    node: NodeId,
    base_scale: glm::Vec3,
    tween: PressTween,
}

/// Owns the device scene: which model is shown, where the surface sits,
/// and how the camera behaves.
pub struct DeviceSceneController {
    state: ViewerState,
    catalog: AssetCatalog,
    asset_root: PathBuf,
    camera: OrbitController,
    viewport: [f32; 2],
    pointer: Option<[f32; 2]>,
    hovered: Option<RegionRole>,
    press: Option<ActivePress>,
}

impl DeviceSceneController {
    pub fn new(catalog: AssetCatalog, asset_root: PathBuf, home_address: impl Into<String>) -> Self {
        let preset = Breakpoint::Standard.camera_preset();
        let mut camera = OrbitController::new(CameraState::new(
            FOV_Y_DEGREES,
            NEAR,
            FAR,
            preset.position,
            preset.target,
        ));
        camera.enabled = false;
        Self {
            state: ViewerState::new(home_address, preset),
            catalog,
            asset_root,
            camera,
            viewport: [1.0, 1.0],
            pointer: None,
            hovered: None,
            press: None,
        }
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    pub fn camera(&self) -> &CameraState {
        self.camera.state()
    }

    pub fn surface_mut(&mut self) -> &mut EmbeddedSurface {
        &mut self.state.surface
    }

    pub fn loaded(&self) -> Option<&LoadedDevice> {
        self.state.loaded.as_ref()
    }

    pub fn hovered(&self) -> Option<RegionRole> {
        self.hovered
    }

    pub fn viewport(&self) -> [f32; 2] {
        self.viewport
    }

    pub fn aspect(&self) -> f32 {
        self.viewport[0] / self.viewport[1]
    }

    /// New window size in logical pixels.
    pub fn resize(&mut self, width: f32, height: f32) -> Option<LoadRequest> {
        self.viewport = [width.max(1.0), height.max(1.0)];
        self.camera.set_viewport_height(self.viewport[1]);
        self.check_breakpoint(width)
    }

    /// Re-derive the preset and the asset for `width`. Returns a load
    /// request only when the asset differs from the last one requested.
    pub fn check_breakpoint(&mut self, width: f32) -> Option<LoadRequest> {
        let breakpoint = Breakpoint::from_width(width);
        self.state.preset = breakpoint.camera_preset();
        if !self.state.orbit.is_enabled() {
            self.apply_preset();
        }

        let asset = select_model(width);
        if self.state.requested == Some(asset) {
            return None;
        }
        let generation = self.state.begin_request(asset);
        log::info!("Breakpoint {:?} selects {} (generation {})", breakpoint, asset, generation);
        Some(LoadRequest {
            asset,
            generation,
            job: self.catalog.get(asset).job(&self.asset_root),
        })
    }

    /// Install a finished load if it is still the latest request.
    pub fn on_load_complete(
        &mut self,
        asset: AssetId,
        generation: u64,
        result: Result<Model, FolioError>,
    ) -> LoadOutcome {
        if !self.state.is_current(generation) {
            log::debug!(
                "Dropping {} load generation {} (latest is {})",
                asset,
                generation,
                self.state.generation
            );
            return LoadOutcome::Stale;
        }
        let model = match result {
            Ok(model) => model,
            Err(e) => {
                log::error!("Failed to load {}: {}", asset, e);
                return LoadOutcome::Failed;
            }
        };

        let regions = RegionMap::resolve(&model);
        let calibration = self.catalog.get(asset);
        let placement = regions.get(RegionRole::Screen).and_then(|screen| {
            place_surface(
                &model,
                screen,
                calibration.screen_size,
                &calibration.surface_correction(),
            )
        });

        log::info!(
            "Showing {} ({} nodes, {} primitives)",
            asset,
            model.nodes.len(),
            model.primitive_count()
        );
        self.press = None;
        self.hovered = None;
        self.state.surface.placement = placement;
        self.state.surface.reset_home();
        self.state.loaded = Some(LoadedDevice {
            asset,
            model,
            regions,
        });
        LoadOutcome::Applied
    }

    pub fn ray_at(&self, pixel: [f32; 2]) -> Ray {
        let ndc = pixel_to_ndc(pixel[0], pixel[1], self.viewport[0], self.viewport[1]);
        self.camera.state().ray_through(ndc, self.aspect())
    }

    /// Handle a click along `ray`.
    pub fn on_click(&mut self, ray: &Ray) -> ClickOutcome {
        let Some(device) = self.state.loaded.as_ref() else {
            return ClickOutcome::None;
        };
        if !device.regions.has_clickable() {
            return ClickOutcome::None;
        }
        let Some(hit) = pick(&device.model, &device.regions, ray) else {
            return ClickOutcome::None;
        };

        match hit.role {
            RegionRole::SwitchButton => {
                self.start_press(hit.node);
                let mode = self.state.orbit.toggled();
                self.set_orbit(mode);
                log::info!("Switch pressed, orbit {:?}", mode);
                ClickOutcome::OrbitToggled(mode)
            }
            RegionRole::HomeButton => {
                self.state.surface.reset_home();
                ClickOutcome::HomeReset
            }
            RegionRole::Screen => ClickOutcome::None,
        }
    }

    pub fn set_orbit(&mut self, mode: OrbitMode) {
        self.state.orbit = mode;
        self.camera.enabled = mode.is_enabled();
        match mode {
            OrbitMode::Enabled => self.camera.set_target(glm::Vec3::zeros()),
            OrbitMode::Disabled => self.apply_preset(),
        }
    }

    pub fn set_pointer(&mut self, pixel: Option<[f32; 2]>) {
        self.pointer = pixel;
    }

    pub fn on_mouse_button(&mut self, button: winit::event::MouseButton, pressed: bool) {
        self.camera.on_mouse_button(button, pressed);
    }

    pub fn on_mouse_move(&mut self, position: (f64, f64)) -> bool {
        self.set_pointer(Some([position.0 as f32, position.1 as f32]));
        self.camera.on_mouse_move(position)
    }

    pub fn on_scroll(&mut self, delta: f32) {
        self.camera.on_scroll(delta);
    }

    /// Recompute which clickable region sits under the pointer.
    pub fn update_hover(&mut self) -> Option<RegionRole> {
        self.hovered = match (self.pointer, self.state.loaded.as_ref()) {
            (Some(pixel), Some(device)) if device.regions.has_clickable() => {
                let ray = self.ray_at(pixel);
                pick(&device.model, &device.regions, &ray).map(|h| h.role)
            }
            _ => None,
        };
        self.hovered
    }

    /// Per-frame step: camera damping, press animation, hover.
    pub fn update(&mut self, dt: f32) {
        if self.state.orbit.is_enabled() {
            self.camera.update();
        }
        self.advance_press(dt);
        self.update_hover();
    }

    fn apply_preset(&mut self) {
        let CameraPreset { position, target } = self.state.preset;
        self.camera.set_pose(position, target);
    }

    fn start_press(&mut self, node: NodeId) {
        self.finish_press();
        let Some(device) = self.state.loaded.as_ref() else {
            return;
        };
        self.press = Some(ActivePress {
            node,
            base_scale: device.model.node(node).transform.scale,
            tween: PressTween::new(),
        });
    }

    fn advance_press(&mut self, dt: f32) {
        let (Some(press), Some(device)) = (self.press.as_mut(), self.state.loaded.as_mut()) else {
            return;
        };
        let factor = press.tween.advance(dt);
        device.model.node_mut(press.node).transform.scale = press.base_scale * factor;
        device.model.update_world_matrices();
        if press.tween.finished() {
            self.press = None;
        }
    }

    fn finish_press(&mut self) {
        if let (Some(press), Some(device)) = (self.press.take(), self.state.loaded.as_mut()) {
            device.model.node_mut(press.node).transform.scale = press.base_scale;
            device.model.update_world_matrices();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::test_device as device;

    fn ray_to(x: f32, y: f32) -> Ray {
        Ray::new(glm::vec3(x, y, 5.0), glm::vec3(0.0, 0.0, -1.0))
    }

    fn loaded_controller(width: f32) -> DeviceSceneController {
        let mut scene =
            DeviceSceneController::new(AssetCatalog::default(), "assets".into(), "html/screen.html");
        let request = scene.resize(width, 900.0).expect("first check loads");
        let outcome = scene.on_load_complete(request.asset, request.generation, Ok(device(true)));
        assert_eq!(outcome, LoadOutcome::Applied);
        scene
    }

    #[test]
    fn repeated_checks_at_one_width_load_once() {
        let mut scene =
            DeviceSceneController::new(AssetCatalog::default(), "assets".into(), "html/screen.html");
        assert!(scene.check_breakpoint(1500.0).is_some());
        assert!(scene.check_breakpoint(1500.0).is_none());
        assert!(scene.check_breakpoint(1200.0).is_none());
    }

    #[test]
    fn shrinking_to_phone_reloads_once_and_moves_camera() {
        let mut scene = loaded_controller(2100.0);
        assert_eq!(scene.camera().position, glm::vec3(0.0, 1.0, 3.0));

        let request = scene.resize(900.0, 900.0).expect("phone load");
        assert_eq!(request.asset, AssetId::Phone);
        assert!(request.job.path.ends_with("model/phone-model.glb"));
        assert!(scene.resize(900.0, 800.0).is_none());

        assert_eq!(scene.camera().position, glm::vec3(0.0, 2.5, 5.2));
        assert_eq!(scene.camera().target, glm::vec3(0.0, 2.5, 4.2));
    }

    #[test]
    fn stale_completion_is_discarded() {
        let mut scene =
            DeviceSceneController::new(AssetCatalog::default(), "assets".into(), "html/screen.html");
        let computer = scene.check_breakpoint(2000.0).expect("computer");
        let phone = scene.check_breakpoint(500.0).expect("phone");

        let late = scene.on_load_complete(computer.asset, computer.generation, Ok(device(true)));
        assert_eq!(late, LoadOutcome::Stale);
        assert!(scene.loaded().is_none());

        let fresh = scene.on_load_complete(phone.asset, phone.generation, Ok(device(true)));
        assert_eq!(fresh, LoadOutcome::Applied);
        assert_eq!(scene.state().loaded_asset(), Some(AssetId::Phone));
    }

    #[test]
    fn failed_load_keeps_prior_model() {
        let mut scene = loaded_controller(2000.0);
        let phone = scene.check_breakpoint(500.0).expect("phone");
        let outcome = scene.on_load_complete(
            phone.asset,
            phone.generation,
            Err(FolioError::new("asset-load")),
        );
        assert_eq!(outcome, LoadOutcome::Failed);
        assert_eq!(scene.state().loaded_asset(), Some(AssetId::Computer));
        assert!(scene.state().surface.placement.is_some());
    }

    #[test]
    fn switch_click_toggles_orbit_and_retargets() {
        let mut scene = loaded_controller(1500.0);
        let outcome = scene.on_click(&ray_to(-1.5, 1.0));
        assert_eq!(outcome, ClickOutcome::OrbitToggled(OrbitMode::Enabled));
        assert_eq!(scene.camera().target, glm::Vec3::zeros());

        // Let the press animation run out before clicking again.
        scene.update(1.0);
        let outcome = scene.on_click(&ray_to(-1.5, 1.0));
        assert_eq!(outcome, ClickOutcome::OrbitToggled(OrbitMode::Disabled));
        assert_eq!(scene.camera().position, glm::vec3(0.0, 1.0, 3.25));
        assert_eq!(scene.camera().target, glm::vec3(0.0, 1.0, 2.25));
    }

    #[test]
    fn home_click_resets_address_without_touching_camera() {
        let mut scene = loaded_controller(1500.0);
        scene.surface_mut().navigate("html/projects.html");
        let before = scene.camera().clone();

        assert_eq!(scene.on_click(&ray_to(1.5, 1.0)), ClickOutcome::HomeReset);
        assert_eq!(scene.state().surface.address(), "html/screen.html");
        assert_eq!(scene.state().orbit, OrbitMode::Disabled);
        assert_eq!(scene.camera().position, before.position);
        assert_eq!(scene.camera().target, before.target);
    }

    #[test]
    fn clicks_without_buttons_do_nothing() {
        let mut scene =
            DeviceSceneController::new(AssetCatalog::default(), "assets".into(), "html/screen.html");
        let request = scene.resize(1500.0, 900.0).expect("load");
        scene.on_load_complete(request.asset, request.generation, Ok(device(false)));

        assert_eq!(scene.on_click(&ray_to(-1.5, 1.0)), ClickOutcome::None);
        assert!(scene.state().surface.placement.is_some());
    }

    #[test]
    fn resize_while_orbiting_keeps_user_pose() {
        let mut scene = loaded_controller(1500.0);
        scene.on_click(&ray_to(-1.5, 1.0));
        let pose = scene.camera().position;

        assert!(scene.resize(2100.0, 900.0).is_none());
        assert_eq!(scene.camera().position, pose);
        assert_eq!(scene.state().preset.position, glm::vec3(0.0, 1.0, 3.0));
    }

    #[test]
    fn press_animation_scales_switch_and_restores_it() {
        let mut scene = loaded_controller(1500.0);
        scene.on_click(&ray_to(-1.5, 1.0));
        let switch = scene
            .loaded()
            .and_then(|d| d.regions.get(RegionRole::SwitchButton))
            .expect("switch");

        scene.update(0.2);
        let scale = scene.loaded().expect("loaded").model.node(switch).transform.scale;
        assert!((scale.x - 0.7).abs() < 1e-5);

        scene.update(0.2);
        let scale = scene.loaded().expect("loaded").model.node(switch).transform.scale;
        assert!((scale.x - 1.0).abs() < 1e-5);
    }

    #[test]
    fn hover_reports_region_under_pointer() {
        let mut scene = loaded_controller(1500.0);
        scene.set_pointer(Some([750.0, 450.0]));
        // Straight ahead from the preset hits neither button.
        assert_eq!(scene.update_hover(), None);
        scene.set_pointer(None);
        assert_eq!(scene.update_hover(), None);
    }

    #[test]
    fn hover_finds_each_button_under_the_pointer() {
        let mut scene = loaded_controller(1500.0);
        for (x, role) in [(-1.5, RegionRole::SwitchButton), (1.5, RegionRole::HomeButton)] {
            let pixel = scene
                .camera()
                .project(&glm::vec3(x, 1.0, 0.05), 1500.0, 900.0)
                .expect("button in front of camera");
            scene.set_pointer(Some(pixel));
            assert_eq!(scene.update_hover(), Some(role));
            assert_eq!(scene.hovered(), Some(role));
        }
    }
}
