use crate::error::FolioError;
use crate::gallery::GalleryPage;
use crate::renderer::{Frame, Renderer};
use crate::scene::DeviceScenePage;
use crate::settings::Settings;
use crate::ui::{Page, Ui, UiResponse};
use crate::viewer::AboutPage;
use egui_wgpu::ScreenDescriptor;
use egui_winit::State;
use std::sync::Arc;
use std::time::Instant;
use tokio::runtime::Handle;
use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::window::Window;

pub struct EventResponse {
    pub repaint: bool,
    pub exit: bool,
}

pub struct App {
    pub window: Arc<Window>,
    renderer: Renderer,
    egui_state: State,
    egui_wants_pointer: bool,
    ui: Ui,
    settings: Settings,
    about: AboutPage,
    gallery: GalleryPage,
    device: DeviceScenePage,
    last_frame: Instant,
}

impl App {
    pub async fn new(
        window: Arc<Window>,
        runtime: Handle,
        start_page: Option<Page>,
    ) -> Result<Self, FolioError> {
        let renderer = Renderer::new(window.clone()).await?;

        let egui_ctx = renderer.egui_context();
        let egui_state = State::new(
            egui_ctx,
            egui::viewport::ViewportId::ROOT,
            &window,
            None,
            None,
            None,
        );

        let mut settings = Settings::load();
        if let Some(page) = start_page {
            settings.ui.last_page = page;
        }
        log::info!(
            "Assets under '{}', opening {}",
            settings.assets.root,
            settings.ui.last_page.label()
        );

        let about = AboutPage::new(runtime.clone(), &settings.assets);
        let gallery = GalleryPage::new(
            runtime.clone(),
            settings.assets.root_path(),
            &settings.assets.gallery_manifest,
        );
        let device = DeviceScenePage::new(runtime, &settings.assets);

        let mut app = Self {
            window,
            renderer,
            egui_state,
            egui_wants_pointer: false,
            ui: Ui::new(),
            settings,
            about,
            gallery,
            device,
            last_frame: Instant::now(),
        };
        app.resize_pages();
        Ok(app)
    }

    fn page(&self) -> Page {
        self.settings.ui.last_page
    }

    /// Every page follows the window size, hidden ones included.
    fn resize_pages(&mut self) {
        let size = self
            .window
            .inner_size()
            .to_logical::<f32>(self.window.scale_factor());
        self.about.resize(size.width, size.height);
        self.gallery.resize(size.width);
        self.device.resize(size.width, size.height);
    }

    pub fn handle_event(&mut self, event: &WindowEvent) -> EventResponse {
        // Let egui handle the event first
        let egui_response = self.egui_state.on_window_event(&self.window, event);
        let ignored = EventResponse {
            repaint: egui_response.repaint,
            exit: false,
        };

        match event {
            WindowEvent::CloseRequested => {
                return EventResponse {
                    repaint: false,
                    exit: true,
                };
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if egui_response.consumed {
                    return ignored;
                }
                if event.logical_key
                    == winit::keyboard::Key::Named(winit::keyboard::NamedKey::Escape)
                {
                    return EventResponse {
                        repaint: false,
                        exit: true,
                    };
                }
            }
            WindowEvent::Resized(size) => {
                self.renderer.resize(*size);
                self.resize_pages();
            }
            WindowEvent::ScaleFactorChanged { .. } => {
                self.resize_pages();
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let pressed = *state == ElementState::Pressed;
                // Releases always go through so a drag never sticks.
                if pressed && self.egui_wants_pointer {
                    return ignored;
                }
                match self.page() {
                    Page::About => self.about.on_mouse_input(*button, pressed),
                    Page::Computer => self.device.on_mouse_input(*button, pressed),
                    Page::Gallery => {}
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if self.egui_wants_pointer {
                    self.device.on_cursor_left();
                    return ignored;
                }
                let logical = position.to_logical::<f32>(self.window.scale_factor());
                let pixel = [logical.x, logical.y];
                match self.page() {
                    Page::About => self.about.on_cursor_moved(pixel),
                    Page::Computer => self.device.on_cursor_moved(pixel),
                    Page::Gallery => {}
                }
            }
            WindowEvent::CursorLeft { .. } => {
                self.device.on_cursor_left();
            }
            WindowEvent::MouseWheel { delta, .. } => {
                if self.egui_wants_pointer {
                    return ignored;
                }
                let amount = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32,
                };
                match self.page() {
                    Page::About => self.about.on_scroll(amount),
                    Page::Computer => self.device.on_scroll(amount),
                    Page::Gallery => {}
                }
            }
            _ => {}
        }

        EventResponse {
            repaint: false,
            exit: false,
        }
    }

    pub fn reconfigure(&mut self) {
        self.renderer.reconfigure();
    }

    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        match self.page() {
            Page::About => self.about.update(&mut self.renderer),
            Page::Computer => self
                .device
                .update(&mut self.renderer, dt, &self.settings.display),
            Page::Gallery => {}
        }

        let raw_input = self.egui_state.take_egui_input(&self.window);
        let egui_ctx = self.renderer.egui_context();

        let mut response = UiResponse::default();
        let full_output = egui_ctx.run(raw_input, |ctx| {
            response = self.ui.show(ctx, &mut self.settings);
            match self.settings.ui.last_page {
                Page::About => self.about.show(ctx),
                Page::Gallery => self.gallery.show(ctx),
                Page::Computer => self.device.show(ctx),
            }
        });

        // Update egui pointer state for next frame
        self.egui_wants_pointer = egui_ctx.wants_pointer_input() || egui_ctx.is_pointer_over_area();

        if response.page_changed {
            log::info!("Switched to {}", self.page().label());
            self.device.on_cursor_left();
        }
        if response.display_changed && !self.settings.display.show_region_bounds {
            self.renderer
                .set_bounding_boxes(&[], self.settings.display.region_bounds_color);
        }

        self.egui_state
            .handle_platform_output(&self.window, full_output.platform_output);

        let paint_jobs = egui_ctx.tessellate(full_output.shapes, full_output.pixels_per_point);

        let screen_descriptor = ScreenDescriptor {
            size_in_pixels: [self.window.inner_size().width, self.window.inner_size().height],
            pixels_per_point: self.window.scale_factor() as f32,
        };

        let display = &self.settings.display;
        let frame = match self.settings.ui.last_page {
            Page::About => self.about.frame(display),
            Page::Computer => self.device.frame(display),
            Page::Gallery => Frame::empty(display.background),
        };

        self.renderer
            .render(frame, paint_jobs, full_output.textures_delta, screen_descriptor)
    }
}
