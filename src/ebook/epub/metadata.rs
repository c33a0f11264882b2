//! Book-level metadata recovered from the package document.

/// Descriptive details of a loaded [`Epub`](super::Epub).
///
/// Each field holds the first matching Dublin Core element of the package
/// `<metadata>` section. Absent elements are [`None`].
///
/// Created once per load and never modified afterward.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BookMetadata {
    pub(crate) title: Option<String>,
    pub(crate) creator: Option<String>,
    pub(crate) publisher: Option<String>,
    pub(crate) identifier: Option<String>,
    pub(crate) date: Option<String>,
    pub(crate) language: Option<String>,
    pub(crate) cover_path: Option<String>,
    pub(crate) byte_size: u64,
}

impl BookMetadata {
    /// The main title (`dc:title`).
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// The first listed author (`dc:creator`).
    pub fn creator(&self) -> Option<&str> {
        self.creator.as_deref()
    }

    /// `dc:publisher`
    pub fn publisher(&self) -> Option<&str> {
        self.publisher.as_deref()
    }

    /// `dc:identifier`, such as an ISBN or UUID URN.
    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    /// `dc:date`, as written in the package document.
    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    /// `dc:language`
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Archive path of the cover image, resolved against the package directory.
    ///
    /// [`None`] when the package declares no cover or the declared
    /// cover id has no manifest item.
    ///
    /// # See Also
    /// - [`Epub::cover`](super::Epub::cover) to read the image itself.
    pub fn cover_path(&self) -> Option<&str> {
        self.cover_path.as_deref()
    }

    /// Size of the container in bytes.
    ///
    /// For a directory, the sum of all contained files.
    pub fn byte_size(&self) -> u64 {
        self.byte_size
    }
}
