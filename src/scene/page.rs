use super::{
    AssetId, ClickOutcome, DeviceSceneController, LoadOutcome, LoadRequest, OrbitMode, RegionRole,
};
use crate::geometry::Aabb;
use crate::loader::AssetLoader;
use crate::renderer::{Frame, GpuModel, Renderer};
use crate::settings::{AssetSettings, DisplaySettings};
use egui::{Align2, Color32, FontId, Pos2, Stroke};
use tokio::runtime::Handle;
use winit::event::MouseButton;

/// Pointer travel, in logical pixels, below which a press and release count
/// as a click rather than a drag.
const CLICK_SLOP: f32 = 4.0;
const SURFACE_FONT_PX: f32 = 32.0;

pub fn is_click(pressed_at: [f32; 2], released_at: [f32; 2]) -> bool {
    let dx = released_at[0] - pressed_at[0];
    let dy = released_at[1] - pressed_at[1];
    dx * dx + dy * dy <= CLICK_SLOP * CLICK_SLOP
}

/// The interactive device page: wires window input, async loads and GPU
/// resources to a [`DeviceSceneController`].
pub struct DeviceScenePage {
    controller: DeviceSceneController,
    loader: AssetLoader<AssetId>,
    gpu: Option<GpuModel>,
    address_input: String,
    pointer: Option<[f32; 2]>,
    pressed_at: Option<[f32; 2]>,
}

impl DeviceScenePage {
    pub fn new(runtime: Handle, assets: &AssetSettings) -> Self {
        let controller = DeviceSceneController::new(
            assets.devices.clone(),
            assets.root_path(),
            assets.home_address.clone(),
        );
        Self {
            address_input: controller.state().surface.address().to_string(),
            controller,
            loader: AssetLoader::new(runtime),
            gpu: None,
            pointer: None,
            pressed_at: None,
        }
    }

    /// Window resized to `width` x `height` logical pixels.
    pub fn resize(&mut self, width: f32, height: f32) {
        if let Some(request) = self.controller.resize(width, height) {
            self.start_load(request);
        }
    }

    fn start_load(&mut self, request: LoadRequest) {
        let LoadRequest {
            asset,
            generation,
            job,
        } = request;
        self.loader.request(asset, generation, job);
    }

    pub fn on_cursor_moved(&mut self, position: [f32; 2]) {
        self.pointer = Some(position);
        self.controller
            .on_mouse_move((position[0] as f64, position[1] as f64));
    }

    pub fn on_cursor_left(&mut self) {
        self.pointer = None;
        self.pressed_at = None;
        self.controller.set_pointer(None);
    }

    pub fn on_mouse_input(&mut self, button: MouseButton, pressed: bool) {
        self.controller.on_mouse_button(button, pressed);
        if button != MouseButton::Left {
            return;
        }
        if pressed {
            self.pressed_at = self.pointer;
            return;
        }
        let (Some(start), Some(end)) = (self.pressed_at.take(), self.pointer) else {
            return;
        };
        if is_click(start, end) {
            self.click_at(end);
        }
    }

    fn click_at(&mut self, pixel: [f32; 2]) {
        let ray = self.controller.ray_at(pixel);
        match self.controller.on_click(&ray) {
            ClickOutcome::HomeReset | ClickOutcome::OrbitToggled(_) => self.sync_address(),
            ClickOutcome::None => {}
        }
    }

    fn sync_address(&mut self) {
        self.address_input = self.controller.state().surface.address().to_string();
    }

    pub fn on_scroll(&mut self, delta: f32) {
        self.controller.on_scroll(delta);
    }

    /// Per-frame step: install finished loads, advance the controller and
    /// push transforms to the GPU.
    pub fn update(&mut self, renderer: &mut Renderer, dt: f32, display: &DisplaySettings) {
        for done in self.loader.poll() {
            let outcome = self
                .controller
                .on_load_complete(done.key, done.generation, done.result);
            if outcome == LoadOutcome::Applied {
                self.gpu = self
                    .controller
                    .loaded()
                    .and_then(|device| renderer.upload_model(&device.model));
                self.sync_address();
            }
        }

        self.controller.update(dt);

        if let (Some(gpu), Some(device)) = (&self.gpu, self.controller.loaded()) {
            gpu.update_transforms(renderer.queue(), &device.model);
        }

        if display.show_region_bounds {
            renderer.set_bounding_boxes(&self.region_bounds(), display.region_bounds_color);
        }
    }

    /// World boxes of every resolved region of the current model.
    pub fn region_bounds(&self) -> Vec<Aabb> {
        let Some(device) = self.controller.loaded() else {
            return Vec::new();
        };
        RegionRole::ALL
            .into_iter()
            .filter_map(|role| device.regions.get(role))
            .filter_map(|node| device.model.world_bounds(node))
            .collect()
    }

    pub fn frame(&self, display: &DisplaySettings) -> Frame<'_> {
        Frame {
            model: self.gpu.as_ref(),
            view_proj: self.controller.camera().view_proj(self.controller.aspect()),
            clear_color: display.background,
            exposure: display.exposure,
            pixel_scale: 1,
            show_bounding_boxes: display.show_region_bounds,
        }
    }

    pub fn show(&mut self, ctx: &egui::Context) {
        if self.controller.hovered().is_some() {
            ctx.set_cursor_icon(egui::CursorIcon::PointingHand);
        }
        self.paint_surface(ctx);
        self.address_bar(ctx);
    }

    fn paint_surface(&self, ctx: &egui::Context) {
        let Some(placement) = self.controller.state().surface.placement else {
            return;
        };
        let [width, height] = self.controller.viewport();
        let camera = self.controller.camera();
        let projected: Option<Vec<Pos2>> = placement
            .world_corners()
            .iter()
            .map(|corner| camera.project(corner, width, height).map(|[x, y]| Pos2::new(x, y)))
            .collect();
        let Some(quad) = projected else {
            return;
        };

        let painter = ctx.layer_painter(egui::LayerId::new(
            egui::Order::Background,
            egui::Id::new("device_surface"),
        ));
        painter.add(egui::Shape::convex_polygon(
            quad.clone(),
            Color32::from_rgb(245, 245, 245),
            Stroke::new(1.0, Color32::from_gray(40)),
        ));

        let on_screen_height = quad[0].distance(quad[3]);
        let font_size = (SURFACE_FONT_PX * on_screen_height / placement.pixel_size[1]).max(6.0);
        let center = quad
            .iter()
            .fold(egui::Vec2::ZERO, |acc, p| acc + p.to_vec2())
            / 4.0;
        painter.text(
            center.to_pos2(),
            Align2::CENTER_CENTER,
            self.controller.state().surface.address(),
            FontId::proportional(font_size),
            Color32::from_gray(30),
        );
    }

    fn address_bar(&mut self, ctx: &egui::Context) {
        let state = self.controller.state();
        let has_surface = state.surface.placement.is_some();
        let at_home = state.surface.is_home();
        let orbit = state.orbit;
        let device = state.loaded_asset();
        let loading = self.loader.in_flight() > 0;
        let mut navigate = false;
        let mut go_home = false;

        egui::Area::new(egui::Id::new("device_address_bar"))
            .anchor(Align2::CENTER_BOTTOM, [0.0, -12.0])
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.horizontal(|ui| {
                        if loading {
                            ui.spinner();
                        }
                        if let Some(device) = device {
                            ui.label(device.to_string());
                        }
                        ui.label(match orbit {
                            OrbitMode::Enabled => "Orbit: on",
                            OrbitMode::Disabled => "Orbit: off",
                        });
                        ui.separator();
                        ui.add_enabled_ui(has_surface, |ui| {
                            let response = ui.add(
                                egui::TextEdit::singleline(&mut self.address_input)
                                    .desired_width(260.0),
                            );
                            if response.lost_focus()
                                && ui.input(|i| i.key_pressed(egui::Key::Enter))
                            {
                                navigate = true;
                            }
                            navigate |= ui.button("Go").clicked();
                            go_home = ui.add_enabled(!at_home, egui::Button::new("Home")).clicked();
                        });
                    });
                });
            });

        let surface = self.controller.surface_mut();
        if go_home {
            surface.reset_home();
        } else if navigate {
            surface.navigate(self.address_input.clone());
        } else {
            return;
        }
        self.sync_address();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::test_device;
    use nalgebra_glm as glm;

    #[test]
    fn small_travel_is_a_click_and_a_drag_is_not() {
        assert!(is_click([100.0, 100.0], [102.0, 103.0]));
        assert!(!is_click([100.0, 100.0], [110.0, 100.0]));
    }

    #[test]
    fn resize_across_the_breakpoint_queues_one_load_each_way() {
        let runtime = tokio::runtime::Runtime::new().expect("runtime");
        let mut assets = AssetSettings::default();
        assets.root = "nowhere".into();
        let mut page = DeviceScenePage::new(runtime.handle().clone(), &assets);

        page.resize(2000.0, 900.0);
        page.resize(2000.0, 900.0);
        assert_eq!(page.loader.in_flight(), 1);
        page.resize(900.0, 900.0);
        assert_eq!(page.loader.in_flight(), 2);
        assert_eq!(page.controller.state().requested, Some(AssetId::Phone));
        assert!(page.region_bounds().is_empty());
    }

    #[test]
    fn clicking_the_home_button_resyncs_the_address_bar() {
        let runtime = tokio::runtime::Runtime::new().expect("runtime");
        let mut assets = AssetSettings::default();
        assets.root = "nowhere".into();
        let mut page = DeviceScenePage::new(runtime.handle().clone(), &assets);

        page.resize(1500.0, 900.0);
        let generation = page.controller.state().generation;
        let outcome =
            page.controller
                .on_load_complete(AssetId::Computer, generation, Ok(test_device(true)));
        assert_eq!(outcome, LoadOutcome::Applied);

        page.controller.surface_mut().navigate("html/projects.html");
        page.sync_address();
        assert_eq!(page.address_input, "html/projects.html");

        let pixel = page
            .controller
            .camera()
            .project(&glm::vec3(1.5, 1.0, 0.05), 1500.0, 900.0)
            .expect("home button in view");
        page.on_cursor_moved(pixel);
        page.on_mouse_input(MouseButton::Left, true);
        page.on_mouse_input(MouseButton::Left, false);

        assert_eq!(page.controller.state().surface.address(), "html/screen.html");
        assert_eq!(page.address_input, "html/screen.html");
    }
}
