use super::SurfacePlacement;

/// The document panel shown on the device's screen. Only its address and
/// pose are tracked here; the page itself is drawn by the overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddedSurface {
    address: String,
    home: String,
    pub placement: Option<SurfacePlacement>,
}

impl EmbeddedSurface {
    pub fn new(home: impl Into<String>) -> Self {
        let home = home.into();
        Self {
            address: home.clone(),
            home,
            placement: None,
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn is_home(&self) -> bool {
        self.address == self.home
    }

    pub fn navigate(&mut self, address: impl Into<String>) {
        let address = address.into();
        let trimmed = address.trim();
        if trimmed.is_empty() {
            return;
        }
        log::debug!("Surface navigates to {}", trimmed);
        self.address = trimmed.to_string();
    }

    pub fn reset_home(&mut self) {
        log::info!("Surface reset to {}", self.home);
        self.address = self.home.clone();
    }
}
