use super::{Carousel, GalleryLayout, ImageCache, MediaItem, MediaKind, layout, load_manifest};
use std::path::{Path, PathBuf};
use tokio::runtime::Handle;

const CONTROL_WIDTH: f32 = 48.0;

/// Media carousel: one item with prev/next on wide windows, the whole
/// list on narrow ones.
pub struct GalleryPage {
    items: Vec<MediaItem>,
    carousel: Carousel,
    images: ImageCache,
    width: f32,
}

impl GalleryPage {
    pub fn new(runtime: Handle, root: PathBuf, manifest: &str) -> Self {
        let items = Self::read_items(&root.join(manifest));
        Self::with_items(runtime, root, items)
    }

    pub fn with_items(runtime: Handle, root: PathBuf, items: Vec<MediaItem>) -> Self {
        Self {
            carousel: Carousel::new(items.len()),
            images: ImageCache::new(runtime, root, items.len()),
            items,
            width: 0.0,
        }
    }

    fn read_items(path: &Path) -> Vec<MediaItem> {
        match load_manifest(path) {
            Ok(items) => {
                log::info!("Gallery has {} items", items.len());
                items
            }
            Err(e) => {
                log::error!("{}; gallery is empty", e);
                Vec::new()
            }
        }
    }

    pub fn resize(&mut self, width: f32) {
        self.width = width;
    }

    pub fn layout(&self) -> GalleryLayout {
        layout(self.width, self.carousel.index(), self.items.len())
    }

    pub fn prev(&mut self) {
        self.carousel.prev();
    }

    pub fn next(&mut self) {
        self.carousel.next();
    }

    pub fn show(&mut self, ctx: &egui::Context) {
        self.images.poll(ctx);
        let view = self.layout();
        for index in view.visible() {
            if self.items[index].kind == MediaKind::Image {
                let src = self.items[index].src.clone();
                self.images.request(index, &src);
            }
        }

        egui::CentralPanel::default().show(ctx, |ui| match view {
            GalleryLayout::Empty => {
                ui.centered_and_justified(|ui| ui.label("No gallery items"));
            }
            GalleryLayout::All(indices) => {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let width = ui.available_width();
                    for index in indices {
                        self.item_ui(ui, index, width);
                        ui.add_space(12.0);
                    }
                });
            }
            GalleryLayout::Single(index) => {
                ui.horizontal_centered(|ui| {
                    if ui.add_sized([CONTROL_WIDTH, CONTROL_WIDTH], egui::Button::new("◀")).clicked() {
                        self.prev();
                    }
                    let width = (ui.available_width() - CONTROL_WIDTH - 16.0).max(64.0);
                    self.item_ui(ui, index, width);
                    if ui.add_sized([CONTROL_WIDTH, CONTROL_WIDTH], egui::Button::new("▶")).clicked() {
                        self.next();
                    }
                });
            }
        });
    }

    fn item_ui(&self, ui: &mut egui::Ui, index: usize, max_width: f32) {
        let item = &self.items[index];
        match item.kind {
            MediaKind::Image => match self.images.get(index) {
                Some(info) if info.is_loaded() => {
                    if let Some(texture) = &info.texture {
                        let aspect = info.height as f32 / info.width.max(1) as f32;
                        let width = max_width.min(info.width as f32);
                        ui.add(egui::Image::new(texture).fit_to_exact_size(egui::vec2(width, width * aspect)));
                    }
                }
                Some(info) => {
                    ui.colored_label(info.status_color(), format!("{}: {}", info.src, info.status_text()));
                }
                None => {
                    ui.label(item.src.as_str());
                }
            },
            MediaKind::Video => {
                // No decoder; show where the clip lives.
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.set_min_width(max_width.min(480.0));
                    ui.label(egui::RichText::new("▶ Video").strong());
                    ui.label(item.src.as_str());
                });
            }
        }
    }
}
