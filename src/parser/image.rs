use crate::error::FolioError;
use crate::model::TextureImage;
use std::path::Path;

/// Decode an image file to RGBA8. Rows stay in file order (no vertical flip),
/// matching glTF's top-left UV origin.
pub fn load_image(path: &Path) -> Result<TextureImage, FolioError> {
    let bytes = std::fs::read(path).map_err(|e| {
        FolioError::new("image-read")
            .with_arg("path", path.display())
            .push_std(e)
    })?;
    decode_image(&path.display().to_string(), &bytes)
}

/// Decode an in-memory encoded image (PNG, JPEG, ...).
pub fn decode_image(label: &str, bytes: &[u8]) -> Result<TextureImage, FolioError> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| FolioError::new("image-decode").with_arg("path", label).push_std(e))?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(TextureImage::new(label, rgba.into_raw(), width, height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn decodes_png_bytes_to_rgba() {
        let mut png = Vec::new();
        image::RgbaImage::from_pixel(2, 3, image::Rgba([1, 2, 3, 4]))
            .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .expect("encode");

        let tex = decode_image("mem.png", &png).expect("decode");
        assert_eq!((tex.width, tex.height), (2, 3));
        assert_eq!(&tex.rgba[..4], &[1, 2, 3, 4]);
        assert_eq!(tex.rgba.len(), 2 * 3 * 4);
    }

    #[test]
    fn garbage_bytes_are_an_image_error() {
        let err = decode_image("junk.png", b"not an image").unwrap_err();
        assert_eq!(err.key, "image-decode");
    }
}
