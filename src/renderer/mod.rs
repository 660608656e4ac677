mod bounding_box;
pub mod camera;
mod gpu_model;
mod lighting;
mod line_vertex;
mod render;
mod renderer;
mod target;
mod vertex;

pub use gpu_model::GpuModel;
pub use lighting::hex_to_srgb;
pub use render::Frame;
pub use renderer::Renderer;
