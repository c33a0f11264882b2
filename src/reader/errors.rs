//! Error-related types for a [`ReaderSession`](super::ReaderSession).

use std::error::Error;
use thiserror::Error;

/// Alias for `Result<T, ReaderError>`.
pub type ReaderResult<T> = Result<T, ReaderError>;

/// Error type reported by a [`RenderSurface`](super::RenderSurface) implementation.
pub type SurfaceError = Box<dyn Error + Send + Sync + 'static>;

/// Possible errors from a [`ReaderSession`](super::ReaderSession).
///
/// # Variants
/// ## Input Errors
/// Indicates the caller provided invalid arguments which can be corrected.
/// - [`ChapterOutOfBounds`](ReaderError::ChapterOutOfBounds)
/// - [`NotRendered`](ReaderError::NotRendered)
/// ## Layout Errors
/// Raised while rendering or measuring a chapter.
/// - [`InvalidPageWidth`](ReaderError::InvalidPageWidth)
/// - [`Surface`](ReaderError::Surface)
/// - [`Superseded`](ReaderError::Superseded)
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ReaderError {
    /// A chapter index is beyond the chapter count of the book.
    #[error("[ChapterOutOfBounds Error]: The chapter `{index}` must be less than the length `{len}`")]
    ChapterOutOfBounds {
        /// The requested out-of-bounds chapter index.
        index: usize,
        /// The chapter count that `index` must be less than.
        len: usize,
    },

    /// The measured page width is not positive, so no page can be computed.
    ///
    /// Occurs when the surface margins consume the whole client width.
    #[error("[InvalidPageWidth Error]: Measured page width `{0}` must be greater than zero")]
    InvalidPageWidth(f64),

    /// Page navigation was requested before any chapter was rendered.
    #[error("[NotRendered Error]: No chapter has been rendered yet")]
    NotRendered,

    /// A newer navigation was issued while the requested chapter was being rendered.
    #[error("[Superseded Error]: The render of chapter `{0}` was superseded")]
    Superseded(usize),

    /// The rendering surface failed to display the chapter.
    #[error("[Surface Error]: {0}")]
    Surface(#[source] SurfaceError),
}
