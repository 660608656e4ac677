use crate::settings::Settings;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Page {
    #[default]
    About,
    Gallery,
    Computer,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::About, Page::Gallery, Page::Computer];

    /// Page named on the command line.
    pub fn from_arg(arg: &str) -> Option<Self> {
        match arg.trim().to_ascii_lowercase().as_str() {
            "about" => Some(Page::About),
            "gallery" => Some(Page::Gallery),
            "computer" => Some(Page::Computer),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Page::About => "About",
            Page::Gallery => "Gallery",
            Page::Computer => "Computer",
        }
    }
}

#[derive(Default)]
pub struct UiResponse {
    pub page_changed: bool,
    pub display_changed: bool,
}

pub struct Ui {
    show_display_settings: bool,
}

impl Ui {
    pub fn new() -> Self {
        Self {
            show_display_settings: false,
        }
    }

    pub fn show(&mut self, ctx: &egui::Context, settings: &mut Settings) -> UiResponse {
        let mut response = UiResponse::default();

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            ui.horizontal_wrapped(|ui| {
                for page in Page::ALL {
                    if ui
                        .selectable_label(settings.ui.last_page == page, page.label())
                        .clicked()
                        && settings.ui.last_page != page
                    {
                        settings.ui.last_page = page;
                        settings.ui.save();
                        response.page_changed = true;
                    }
                }

                ui.separator();

                if ui
                    .button(if self.show_display_settings {
                        "✅ Display"
                    } else {
                        "⬜ Display"
                    })
                    .clicked()
                {
                    self.show_display_settings = !self.show_display_settings;
                }
            });
        });

        if self.show_display_settings {
            response.display_changed = self.show_display_settings_window(ctx, settings);
        }

        response
    }

    fn show_display_settings_window(&mut self, ctx: &egui::Context, settings: &mut Settings) -> bool {
        let mut changed = false;

        egui::Window::new("🎨 Display Settings")
            .default_width(300.0)
            .resizable(true)
            .open(&mut self.show_display_settings)
            .show(ctx, |ui| {
                let display = &mut settings.display;

                ui.label("Device Scene Background:");
                changed |= ui.color_edit_button_rgb(&mut display.background).changed();

                ui.label("Model Viewer Background:");
                changed |= ui
                    .color_edit_button_rgb(&mut display.about_background)
                    .changed();

                ui.label("Exposure:");
                changed |= ui
                    .add(egui::Slider::new(&mut display.exposure, 0.1..=4.0))
                    .changed();

                ui.label("Pixel Scale (model viewer):");
                changed |= ui
                    .add(egui::Slider::new(&mut display.pixel_scale, 1..=8))
                    .changed();

                ui.separator();
                changed |= ui
                    .checkbox(&mut display.show_region_bounds, "Show Region Bounds")
                    .changed();
                changed |= ui
                    .color_edit_button_rgb(&mut display.region_bounds_color)
                    .changed();

                ui.separator();
                if ui.button("Reset to Defaults").clicked() {
                    *display = crate::settings::DisplaySettings::default();
                    changed = true;
                }

                if changed {
                    display.save();
                }
            });

        changed
    }
}
