mod controller;
mod state;

pub use controller::OrbitController;
pub use state::{CameraState, pixel_to_ndc};
