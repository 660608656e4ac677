use super::{AboutCalibration, center_model};
use crate::loader::AssetLoader;
use crate::renderer::camera::{CameraState, OrbitController};
use crate::renderer::{Frame, GpuModel, Renderer};
use crate::settings::{AssetSettings, DisplaySettings};
use nalgebra_glm as glm;
use tokio::runtime::Handle;
use winit::event::MouseButton;

const NEAR: f32 = 0.1;

enum LoadStatus {
    Loading,
    Ready,
    Failed(String),
}

/// Rotatable portrait model, framed from its bounds and rendered through
/// the pixelated pass.
pub struct AboutPage {
    calibration: AboutCalibration,
    loader: AssetLoader<()>,
    camera: OrbitController,
    gpu: Option<GpuModel>,
    status: LoadStatus,
    aspect: f32,
}

impl AboutPage {
    pub fn new(runtime: Handle, assets: &AssetSettings) -> Self {
        let calibration = assets.about.clone();
        let camera = OrbitController::new(CameraState::new(
            calibration.fov_y_degrees,
            NEAR,
            calibration.far,
            glm::vec3(2.0, 2.0, 5.0),
            glm::Vec3::zeros(),
        ));
        let mut loader = AssetLoader::new(runtime);
        loader.request((), 1, calibration.job(&assets.root_path()));
        Self {
            calibration,
            loader,
            camera,
            gpu: None,
            status: LoadStatus::Loading,
            aspect: 1.0,
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.aspect = width.max(1.0) / height.max(1.0);
        self.camera.set_viewport_height(height);
    }

    pub fn on_cursor_moved(&mut self, position: [f32; 2]) {
        self.camera
            .on_mouse_move((position[0] as f64, position[1] as f64));
    }

    pub fn on_mouse_input(&mut self, button: MouseButton, pressed: bool) {
        self.camera.on_mouse_button(button, pressed);
    }

    pub fn on_scroll(&mut self, delta: f32) {
        self.camera.on_scroll(delta);
    }

    pub fn update(&mut self, renderer: &mut Renderer) {
        for done in self.loader.poll() {
            let mut model = match done.result {
                Ok(model) => model,
                Err(e) => {
                    log::error!("Failed to load {}: {}", self.calibration.path, e);
                    self.status = LoadStatus::Failed(e.to_string());
                    continue;
                }
            };
            match center_model(
                &mut model,
                self.calibration.fov_y_degrees,
                self.calibration.margin,
            ) {
                Some(framing) => {
                    self.camera
                        .set_pose(framing.camera_position, glm::Vec3::zeros());
                }
                None => log::warn!("{} has no geometry to frame", self.calibration.path),
            }
            self.gpu = renderer.upload_model(&model);
            self.status = LoadStatus::Ready;
        }
        self.camera.update();
    }

    pub fn frame(&self, display: &DisplaySettings) -> Frame<'_> {
        Frame {
            model: self.gpu.as_ref(),
            view_proj: self.camera.state().view_proj(self.aspect),
            clear_color: display.about_background,
            exposure: display.exposure,
            pixel_scale: display.pixel_scale.max(1),
            show_bounding_boxes: false,
        }
    }

    pub fn show(&self, ctx: &egui::Context) {
        let text = match &self.status {
            LoadStatus::Ready => return,
            LoadStatus::Loading => format!("Loading {}...", self.calibration.path),
            LoadStatus::Failed(e) => format!("Could not load model: {}", e),
        };
        egui::Area::new(egui::Id::new("about_status"))
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(text);
            });
    }
}
