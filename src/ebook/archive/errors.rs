use crate::ebook::errors::UtfError;
use std::io;
use std::path::PathBuf;

/// Alias for `Result<T, ArchiveError>`.
pub type ArchiveResult<T> = Result<T, ArchiveError>;

/// Possible errors from the archive backing an [`Epub`](crate::Epub).
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum ArchiveError {
    /// The resource exists, although is unable to be read as text.
    ///
    /// This can occur when requesting to read a resource by string.
    #[error("[InvalidUtf8Resource - `{path}`]: Resource value cannot be read as UTF-8")]
    InvalidUtf8Resource {
        /// The root cause of the error.
        source: UtfError,
        /// The archive path responsible for triggering the error.
        path: String,
    },

    /// No entry exists at the requested archive path.
    #[error("[ResourceNotFound - `{path}`]: {source}")]
    ResourceNotFound {
        /// The root cause of the error.
        source: io::Error,
        /// The archive path that was requested.
        path: String,
    },

    /// The resource exists, although is unable to be read, typically I/O.
    #[error("[CannotRead - `{path}`]: {source}")]
    CannotRead {
        /// The root cause of the error.
        source: io::Error,
        /// The archive path responsible for triggering the error.
        path: String,
    },

    /// The archive itself is unreadable due to not existing,
    /// not being a zip container, or being malformed.
    ///
    /// Path is [`None`] when the archive was supplied as a reader
    /// through [`Epub::read`](crate::Epub::read).
    #[error("[CorruptArchive - `{path:?}`]: {source}")]
    CorruptArchive {
        /// The root cause of this error.
        source: io::Error,
        /// The path responsible for triggering the error, if applicable.
        path: Option<PathBuf>,
    },
}
