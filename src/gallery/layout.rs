/// Widths up to and including this show the whole list.
pub const ALL_ITEMS_UP_TO: f32 = 954.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryLayout {
    /// Every item, in order.
    All(Vec<usize>),
    /// One item with prev/next controls.
    Single(usize),
    Empty,
}

impl GalleryLayout {
    pub fn visible(&self) -> Vec<usize> {
        match self {
            Self::All(items) => items.clone(),
            Self::Single(index) => vec![*index],
            Self::Empty => Vec::new(),
        }
    }
}

/// Render mode for a viewport `width`, carousel `index` and item count.
pub fn layout(width: f32, index: usize, len: usize) -> GalleryLayout {
    if len == 0 {
        GalleryLayout::Empty
    } else if width <= ALL_ITEMS_UP_TO {
        GalleryLayout::All((0..len).collect())
    } else {
        GalleryLayout::Single(index.min(len - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrow_viewport_renders_everything() {
        let view = layout(500.0, 1, 4);
        assert_eq!(view.visible(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn wide_viewport_renders_current_item_with_controls() {
        let view = layout(1200.0, 2, 4);
        assert_eq!(view, GalleryLayout::Single(2));
        assert_eq!(view.visible(), vec![2]);
    }

    #[test]
    fn switches_just_above_954() {
        assert!(matches!(layout(953.0, 0, 2), GalleryLayout::All(_)));
        assert!(matches!(layout(954.0, 0, 2), GalleryLayout::All(_)));
        assert!(matches!(layout(954.5, 0, 2), GalleryLayout::Single(0)));
    }

    #[test]
    fn empty_list_renders_nothing() {
        assert_eq!(layout(1200.0, 0, 0), GalleryLayout::Empty);
        assert!(layout(500.0, 0, 0).visible().is_empty());
    }
}
