//! Chapter entries recovered from the navigation document.

use crate::util::uri;
use std::borrow::Cow;

/// One chapter of the book.
///
/// The position of an entry within [`Epub::toc`](super::Epub::toc) is its
/// chapter index. Nested navigation entries are flattened into the same list,
/// in document order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TocEntry {
    pub(crate) label: String,
    pub(crate) directory: String,
    pub(crate) file: String,
}

impl TocEntry {
    pub(crate) fn new(label: String, target: &str) -> Self {
        let (directory, file) = uri::split_dir_file(target);

        Self {
            label,
            directory: directory.to_owned(),
            file: file.to_owned(),
        }
    }

    /// Human-readable chapter title.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Archive directory containing the chapter document.
    pub fn directory(&self) -> &str {
        &self.directory
    }

    /// File name as written in the navigation document (possibly percent-encoded).
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Decoded archive path of the chapter document.
    ///
    /// ```
    /// # use rpage::epub::Epub;
    /// # fn main() -> rpage::ebook::errors::EbookResult<()> {
    /// let epub = Epub::open("tests/ebooks/example_epub")?;
    /// let last = epub.toc().last().unwrap();
    ///
    /// assert_eq!("chapter%20three.xhtml", last.file());
    /// assert_eq!("OEBPS/Text/chapter three.xhtml", last.path());
    /// # Ok(())
    /// # }
    /// ```
    pub fn path(&self) -> Cow<'_, str> {
        let file = uri::decode(&self.file);

        if self.directory.is_empty() {
            file
        } else {
            Cow::Owned(format!("{}/{file}", self.directory))
        }
    }
}
