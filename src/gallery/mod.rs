mod carousel;
mod images;
mod items;
mod layout;
mod page;

pub use carousel::*;
pub use images::*;
pub use items::*;
pub use layout::*;
pub use page::GalleryPage;
