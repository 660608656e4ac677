pub mod gltf;
pub mod image;

pub use self::gltf::load_gltf;
pub use self::image::load_image;
