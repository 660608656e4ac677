use crate::CONFY_APP_NAME;
use crate::renderer::hex_to_srgb;
use crate::scene::AssetCatalog;
use crate::ui::Page;
use crate::viewer::AboutCalibration;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// sRGB clear color of the device scene.
    pub background: [f32; 3],
    /// sRGB clear color of the model viewer; the egui panel fill by default.
    pub about_background: [f32; 3],
    pub exposure: f32,
    /// Downscale factor of the model viewer's pixelated pass; 1 disables it.
    pub pixel_scale: u32,
    pub show_region_bounds: bool,
    pub region_bounds_color: [f32; 3],
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            background: hex_to_srgb(0x202020),
            about_background: panel_fill(),
            exposure: 1.4,
            pixel_scale: 4,
            show_region_bounds: false,
            region_bounds_color: [1.0, 1.0, 0.0],
        }
    }
}

fn panel_fill() -> [f32; 3] {
    let fill = egui::Visuals::dark().panel_fill;
    [fill.r(), fill.g(), fill.b()].map(|c| c as f32 / 255.0)
}

impl DisplaySettings {
    pub fn load() -> Self {
        confy::load(CONFY_APP_NAME, "display").unwrap_or_default()
    }

    pub fn save(&self) {
        if let Err(e) = confy::store(CONFY_APP_NAME, "display", self) {
            log::warn!("Failed to save display settings: {}", e);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetSettings {
    pub root: String,
    /// Address the embedded surface starts on and returns to.
    pub home_address: String,
    pub gallery_manifest: String,
    pub about: AboutCalibration,
    pub devices: AssetCatalog,
}

impl Default for AssetSettings {
    fn default() -> Self {
        Self {
            root: "assets".into(),
            home_address: "html/screen.html".into(),
            gallery_manifest: "gallery.json".into(),
            about: AboutCalibration::default(),
            devices: AssetCatalog::default(),
        }
    }
}

impl AssetSettings {
    pub fn load() -> Self {
        confy::load(CONFY_APP_NAME, "assets").unwrap_or_default()
    }

    pub fn root_path(&self) -> PathBuf {
        PathBuf::from(&self.root)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UiSettings {
    pub last_page: Page,
}

impl UiSettings {
    pub fn load() -> Self {
        confy::load(CONFY_APP_NAME, "ui").unwrap_or_default()
    }

    pub fn save(&self) {
        if let Err(e) = confy::store(CONFY_APP_NAME, "ui", self) {
            log::warn!("Failed to save ui settings: {}", e);
        }
    }
}

// Aggregate struct for convenience
pub struct Settings {
    pub display: DisplaySettings,
    pub assets: AssetSettings,
    pub ui: UiSettings,
}

impl Settings {
    pub fn load() -> Self {
        Self {
            display: DisplaySettings::load(),
            assets: AssetSettings::load(),
            ui: UiSettings::load(),
        }
    }
}
