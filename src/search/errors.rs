//! Error-related types for a [`TextIndexer`](super::TextIndexer).

use thiserror::Error;

/// Possible errors from a [`TextIndexer`](super::TextIndexer).
///
/// # Variants
/// ## Input Errors
/// - [`InvalidChapterScope`](SearchError::InvalidChapterScope)
/// ## Task Errors
/// - [`IndexTask`](SearchError::IndexTask) (`async-tokio` feature)
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum SearchError {
    /// A search was limited to a chapter that is not part of the index.
    #[error("[InvalidChapterScope Error]: The chapter scope `{scope}` must be less than the length `{len}`")]
    InvalidChapterScope {
        /// The requested chapter index.
        scope: usize,
        /// The number of indexed chapters.
        len: usize,
    },

    /// The background indexing task panicked or was cancelled.
    #[cfg(feature = "async-tokio")]
    #[error("[IndexTask Error]: {0}")]
    IndexTask(#[from] tokio::task::JoinError),
}
