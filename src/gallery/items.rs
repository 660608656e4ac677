use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaKind {
    #[serde(rename = "img")]
    Image,
    #[serde(rename = "video")]
    Video,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub src: String,
}

#[derive(Debug, Error)]
pub enum GalleryError {
    #[error("cannot read manifest {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid manifest: {0}")]
    Parse(#[from] serde_json::Error),
}

pub fn parse_manifest(json: &str) -> Result<Vec<MediaItem>, GalleryError> {
    Ok(serde_json::from_str(json)?)
}

pub fn load_manifest(path: &Path) -> Result<Vec<MediaItem>, GalleryError> {
    let json = std::fs::read_to_string(path).map_err(|source| GalleryError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_manifest(&json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_image_and_video_records() {
        let items = parse_manifest(
            r#"[{"type":"img","src":"gallery/a.png"},{"type":"video","src":"gallery/b.mp4"}]"#,
        )
        .expect("valid manifest");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].kind, MediaKind::Image);
        assert_eq!(items[1].kind, MediaKind::Video);
        assert_eq!(items[1].src, "gallery/b.mp4");
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let err = parse_manifest(r#"[{"type":"gif","src":"x.gif"}]"#).unwrap_err();
        assert!(matches!(err, GalleryError::Parse(_)));
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = load_manifest(Path::new("nowhere/gallery.json")).unwrap_err();
        assert!(err.to_string().contains("nowhere/gallery.json"));
    }
}
