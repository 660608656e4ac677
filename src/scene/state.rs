use super::{AssetId, CameraPreset, EmbeddedSurface, RegionMap};
use crate::model::Model;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrbitMode {
    /// Camera locked to the breakpoint preset.
    #[default]
    Disabled,
    Enabled,
}

impl OrbitMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Disabled => Self::Enabled,
            Self::Enabled => Self::Disabled,
        }
    }

    pub fn is_enabled(self) -> bool {
        self == Self::Enabled
    }
}

/// The model currently on screen with the regions resolved against it.
/// Both are swapped together.
#[derive(Debug, Clone)]
pub struct LoadedDevice {
    pub asset: AssetId,
    pub model: Model,
    pub regions: RegionMap,
}

#[derive(Debug, Clone)]
pub struct ViewerState {
    /// Asset of the most recent load request, whether or not it finished.
    pub requested: Option<AssetId>,
    /// Generation of the most recent load request.
    pub generation: u64,
    pub loaded: Option<LoadedDevice>,
    pub surface: EmbeddedSurface,
    pub orbit: OrbitMode,
    pub preset: CameraPreset,
}

impl ViewerState {
    pub fn new(home_address: impl Into<String>, preset: CameraPreset) -> Self {
        Self {
            requested: None,
            generation: 0,
            loaded: None,
            surface: EmbeddedSurface::new(home_address),
            orbit: OrbitMode::Disabled,
            preset,
        }
    }

    /// Record a new request and return its generation.
    pub fn begin_request(&mut self, asset: AssetId) -> u64 {
        self.requested = Some(asset);
        self.generation += 1;
        self.generation
    }

    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    pub fn loaded_asset(&self) -> Option<AssetId> {
        self.loaded.as_ref().map(|d| d.asset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra_glm as glm;

    #[test]
    fn only_the_latest_generation_is_current() {
        let preset = CameraPreset::looking_ahead(glm::vec3(0.0, 1.0, 3.0));
        let mut state = ViewerState::new("html/screen.html", preset);
        let first = state.begin_request(AssetId::Computer);
        let second = state.begin_request(AssetId::Phone);

        assert!(!state.is_current(first));
        assert!(state.is_current(second));
        assert_eq!(state.requested, Some(AssetId::Phone));
        assert_eq!(state.loaded_asset(), None);
    }

    #[test]
    fn orbit_mode_toggles_both_ways() {
        assert_eq!(OrbitMode::default(), OrbitMode::Disabled);
        assert!(OrbitMode::Disabled.toggled().is_enabled());
        assert!(!OrbitMode::Enabled.toggled().is_enabled());
    }
}
