//! # rpage
//!
//! A paginating EPUB reader core with full-book search.
//!
//! `rpage` opens EPUB containers (zip files or unpacked directories), parses
//! their metadata and table of contents, and prepares chapter markup for a
//! host-provided rendering surface. Layout is never computed here: the host
//! renders and measures, and `rpage` turns those measurements into pages.
//!
//! # Features
//! `rpage` supports the following feature flags:
//!
//! | Feature       | Description                                                         |
//! |---------------|---------------------------------------------------------------------|
//! | `threadsafe`  | Enables `Send + Sync` for [`Epub`]. *Enabled by default.*           |
//! | `prelude`     | Convenience prelude re-exporting common types. *Enabled by default.* |
//! | `async-tokio` | Background index building on a tokio blocking task.                 |
//!
//! # Modules
//! - [`ebook`]: Loading, metadata, navigation and chapter processing.
//! - [`reader`]: Pagination and navigation over a [`RenderSurface`](reader::RenderSurface).
//! - [`search`]: Full-book text indexing and search.
//!
//! # Examples
//! Opening an epub and indexing it for search:
//! ```
//! use rpage::Epub;
//! use rpage::search::{SearchOptions, TextIndexer};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//!
//! let epub = Epub::open("tests/ebooks/example_epub")?;
//! println!("{:?} by {:?}", epub.metadata().title(), epub.metadata().creator());
//!
//! for entry in epub.toc() {
//!     println!("{} -> {}", entry.label(), entry.path());
//! }
//!
//! let mut indexer = TextIndexer::new();
//! indexer.build_index(&epub);
//! let results = indexer.search("example", &SearchOptions::default())?;
//! # Ok(())
//! # }
//! ```

mod parser;
mod util;

pub mod ebook;
#[cfg(feature = "prelude")]
pub mod prelude;
pub mod reader;
pub mod search;

pub use self::ebook::epub;
pub use self::ebook::epub::Epub;
pub use self::util::uri::resolve_path;
