//! Error-related types for an [`Epub`](super::Epub).

/// Possible format errors from an [`Epub`](super::Epub).
///
/// # Variants
/// When parsing, error variants flagged with `*` are only raised when
/// [`EpubSettings::strict`](super::EpubSettings::strict) is enabled.
///
/// ## Container Errors (`container.xml`)
/// - [`MissingRootfile`](EpubError::MissingRootfile)
/// ## Package Errors (`.opf`)
/// - [`MissingManifestItem`](EpubError::MissingManifestItem)
/// - [`MissingTitle`](EpubError::MissingTitle)*
/// ## Navigation Errors (`.ncx/.xhtml`)
/// - [`EmptyNavigation`](EpubError::EmptyNavigation)*
/// ## General Errors
/// - [`MissingAttribute`](EpubError::MissingAttribute)*
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum EpubError {
    /// A required attribute is missing from an element.
    #[error("Required attribute missing: {0}")]
    MissingAttribute(String),

    /// The container does not declare a `rootfile` pointing to a package document,
    /// or `META-INF/container.xml` could not be parsed.
    ///
    /// Error Source: `META-INF/container.xml`
    #[error("Missing `rootfile` element referencing an `.opf` file in `META-INF/container.xml`")]
    MissingRootfile,

    /// A manifest `item` required to continue loading is absent.
    ///
    /// Raised when no navigation document can be located.
    ///
    /// Error Source: `.opf` file
    #[error("Missing manifest item: {0}")]
    MissingManifestItem(String),

    /// The `dc:title` metadata entry is missing.
    ///
    /// Error Source: `.opf` file
    #[error("Missing `dc:title` metadata entry")]
    MissingTitle,

    /// The navigation document declares no chapters.
    ///
    /// Error Source: `.ncx` or `.xhtml` navigation file
    #[error("Navigation document `{0}` contains no entries")]
    EmptyNavigation(String),
}
