//! Error-related types for an [`Epub`](crate::Epub) and the components built on it.

pub use crate::ebook::archive::errors::ArchiveError;
pub use crate::ebook::archive::errors::ArchiveResult;
use crate::ebook::epub::errors::EpubError;
use crate::reader::errors::ReaderError;
use crate::search::errors::SearchError;
use std::error::Error;
use std::string::{FromUtf8Error, FromUtf16Error};
use thiserror::Error;

/// Alias for `Result<T, EbookError>`.
pub type EbookResult<T> = Result<T, EbookError>;

/// Unified error type.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum EbookError {
    /// File access within an ebook archive has failed.
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    /// Essential files are missing or their contents are malformed.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// A [`ReaderSession`](crate::reader::ReaderSession) could not lay out or navigate.
    #[error(transparent)]
    Reader(#[from] ReaderError),

    /// A [`TextIndexer`](crate::search::TextIndexer) query or build failed.
    #[error(transparent)]
    Search(#[from] SearchError),
}

/// Possible format errors for an [`Epub`](crate::Epub).
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum FormatError {
    /// File content unexpectedly causes an internal parser error.
    ///
    /// This may originate from malformed content within a file, such as improper XML
    /// in the package document or a chapter.
    #[error(transparent)]
    Unparsable(#[from] Box<dyn Error + Send + Sync + 'static>),

    /// Format errors specific to an [`Epub`](crate::Epub).
    #[error(transparent)]
    Epub(#[from] EpubError),
}

/// Specific error details regarding `UTF`.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum UtfError {
    /// Uneven byte count of UTF-16 data.
    #[error("UTF-16 data needs to contain an even amount of bytes (found {0})")]
    UnevenByteCount(usize),

    /// Invalid UTF-8 data.
    #[error(transparent)]
    InvalidUtf8(#[from] FromUtf8Error),

    /// Invalid UTF-16 data.
    #[error(transparent)]
    InvalidUtf16(#[from] FromUtf16Error),
}
