use super::AssetId;
use nalgebra_glm as glm;

/// Widths below this get the phone.
pub const NARROW_BELOW: f32 = 954.0;
pub const COMPACT_BELOW: f32 = 1300.0;
pub const STANDARD_BELOW: f32 = 2030.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Breakpoint {
    Narrow,
    Compact,
    Standard,
    Wide,
}

impl Breakpoint {
    pub fn from_width(width: f32) -> Self {
        if width < NARROW_BELOW {
            Self::Narrow
        } else if width < COMPACT_BELOW {
            Self::Compact
        } else if width < STANDARD_BELOW {
            Self::Standard
        } else {
            Self::Wide
        }
    }

    pub fn asset(self) -> AssetId {
        match self {
            Self::Narrow => AssetId::Phone,
            Self::Compact | Self::Standard | Self::Wide => AssetId::Computer,
        }
    }

    pub fn camera_preset(self) -> CameraPreset {
        let position = match self {
            Self::Narrow => glm::vec3(0.0, 2.5, 5.2),
            Self::Compact => glm::vec3(0.0, 1.0, 4.0),
            Self::Standard => glm::vec3(0.0, 1.0, 3.25),
            Self::Wide => glm::vec3(0.0, 1.0, 3.0),
        };
        CameraPreset::looking_ahead(position)
    }
}

/// Which device model a viewport of this width shows.
pub fn select_model(width: f32) -> AssetId {
    Breakpoint::from_width(width).asset()
}

/// Fixed camera pose used while orbiting is off.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPreset {
    pub position: glm::Vec3,
    pub target: glm::Vec3,
}

impl CameraPreset {
    /// A preset that looks straight down -Z from `position`.
    pub fn looking_ahead(position: glm::Vec3) -> Self {
        Self {
            position,
            target: position - glm::vec3(0.0, 0.0, 1.0),
        }
    }
}
