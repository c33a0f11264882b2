//! Common imports for typical use.
//!
//! ```
//! use rpage::prelude::*;
//! ```

pub use crate::ebook::chapter::ChapterContent;
pub use crate::ebook::epub::{Epub, EpubSettings, TocFormat};
pub use crate::ebook::errors::{EbookError, EbookResult};
pub use crate::reader::{
    ColumnMode, LayoutConfig, Navigation, ReaderSession, RenderSurface, StyleConfig, TextProbe,
    Theme,
};
pub use crate::search::{SearchOptions, SearchResult, TextIndexer};
