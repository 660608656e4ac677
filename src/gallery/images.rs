use crate::model::TextureImage;
use crate::parser::load_image;
use std::path::PathBuf;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

#[derive(Debug, Clone, PartialEq)]
pub enum ImageStatus {
    NotLoaded,
    Loading,
    Loaded,
    Error(String),
}

pub struct ImageInfo {
    pub src: String,
    pub status: ImageStatus,
    pub width: u32,
    pub height: u32,
    pub texture: Option<egui::TextureHandle>,
}

impl ImageInfo {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            status: ImageStatus::NotLoaded,
            width: 0,
            height: 0,
            texture: None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.status, ImageStatus::Loaded)
    }

    pub fn status_text(&self) -> String {
        match &self.status {
            ImageStatus::NotLoaded => "Not loaded".to_string(),
            ImageStatus::Loading => "Loading...".to_string(),
            ImageStatus::Loaded => format!("{}x{}", self.width, self.height),
            ImageStatus::Error(err) => format!("Error: {}", err),
        }
    }

    pub fn status_color(&self) -> egui::Color32 {
        match &self.status {
            ImageStatus::NotLoaded => egui::Color32::GRAY,
            ImageStatus::Loading => egui::Color32::YELLOW,
            ImageStatus::Loaded => egui::Color32::GREEN,
            ImageStatus::Error(_) => egui::Color32::RED,
        }
    }
}

pub enum ImageLoadResult {
    Success { index: usize, image: TextureImage },
    Error { index: usize, error: String },
}

/// Gallery images by item index, decoded on the blocking pool and turned
/// into egui textures when they arrive.
pub struct ImageCache {
    pub images: Vec<Option<ImageInfo>>,
    root: PathBuf,
    runtime: Handle,
    sender: UnboundedSender<ImageLoadResult>,
    receiver: UnboundedReceiver<ImageLoadResult>,
}

impl ImageCache {
    pub fn new(runtime: Handle, root: PathBuf, len: usize) -> Self {
        let (sender, receiver) = unbounded_channel();
        Self {
            images: (0..len).map(|_| None).collect(),
            root,
            runtime,
            sender,
            receiver,
        }
    }

    pub fn get(&self, index: usize) -> Option<&ImageInfo> {
        self.images.get(index).and_then(Option::as_ref)
    }

    /// Start loading `src` for `index` unless it is already known.
    pub fn request(&mut self, index: usize, src: &str) {
        let Some(slot) = self.images.get_mut(index) else {
            return;
        };
        if slot.is_some() {
            return;
        }
        let mut info = ImageInfo::new(src);
        info.status = ImageStatus::Loading;
        *slot = Some(info);

        let path = self.root.join(src);
        let sender = self.sender.clone();
        self.runtime.spawn(async move {
            log::debug!("Loading gallery image {}: {}", index, path.display());
            let result = match tokio::task::spawn_blocking(move || load_image(&path)).await {
                Ok(Ok(image)) => ImageLoadResult::Success { index, image },
                Ok(Err(e)) => ImageLoadResult::Error {
                    index,
                    error: e.to_string(),
                },
                Err(e) => ImageLoadResult::Error {
                    index,
                    error: e.to_string(),
                },
            };
            let _ = sender.send(result);
        });
    }

    /// Apply finished loads. Returns how many arrived.
    pub fn poll(&mut self, ctx: &egui::Context) -> usize {
        let mut arrived = 0;
        while let Ok(result) = self.receiver.try_recv() {
            arrived += 1;
            self.apply(ctx, result);
        }
        arrived
    }

    fn apply(&mut self, ctx: &egui::Context, result: ImageLoadResult) {
        match result {
            ImageLoadResult::Success { index, image } => {
                let Some(info) = self.images.get_mut(index).and_then(Option::as_mut) else {
                    return;
                };
                let color = egui::ColorImage::from_rgba_unmultiplied(
                    [image.width as usize, image.height as usize],
                    &image.rgba,
                );
                info.texture = Some(ctx.load_texture(
                    format!("gallery-{}", index),
                    color,
                    egui::TextureOptions::LINEAR,
                ));
                info.width = image.width;
                info.height = image.height;
                info.status = ImageStatus::Loaded;
            }
            ImageLoadResult::Error { index, error } => {
                log::warn!("Gallery image {} failed: {}", index, error);
                if let Some(info) = self.images.get_mut(index).and_then(Option::as_mut) {
                    // A late error never replaces a finished image.
                    if !info.is_loaded() {
                        info.status = ImageStatus::Error(error);
                    }
                }
            }
        }
    }
}
