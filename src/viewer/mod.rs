mod framing;
mod page;

pub use framing::*;
pub use page::AboutPage;
