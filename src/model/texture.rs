/// Decoded RGBA8 image ready for upload.
#[derive(Debug, Clone)]
pub struct TextureImage {
    pub label: String,
    pub rgba: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl TextureImage {
    pub fn new(label: impl Into<String>, rgba: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            label: label.into(),
            rgba,
            width,
            height,
        }
    }
}
