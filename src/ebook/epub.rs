//! The Electronic Publication ([`Epub`]) module.
//!
//! Supports EPUB versions `2` and `3`, with navigation read from either
//! an NCX document or an XHTML `nav` document.
//!
//! For more information regarding the EPUB spec, see:
//! <https://www.w3.org/TR/epub>

pub(crate) mod consts;
pub mod errors;
pub mod manifest;
pub mod metadata;
mod parser;
pub mod spine;
pub mod toc;

use crate::ebook::archive::zip::ZipArchive;
use crate::ebook::archive::{self, Archive};
use crate::ebook::chapter::{self, ChapterContent};
use crate::ebook::epub::manifest::Manifest;
use crate::ebook::epub::metadata::BookMetadata;
use crate::ebook::epub::parser::EpubParser;
use crate::ebook::epub::spine::SpineEntry;
use crate::ebook::epub::toc::TocEntry;
use crate::ebook::errors::{EbookError, EbookResult};
use crate::reader::errors::ReaderError;
use crate::util::uri;
use std::fmt::{Debug, Formatter};
use std::io::{Read, Seek};
use std::path::Path;

/// A loaded EPUB.
///
/// Provides access to the following contents of an epub:
/// - [`BookMetadata`]: Title, creator, cover and other details
/// - [`TocEntry`]: The ordered chapter list (the table of contents)
/// - [`Manifest`]: Resources declared by the package (read-only)
/// - [`SpineEntry`]: The package spine (read-only, never used for ordering)
///
/// Everything is parsed once on load and immutable afterward.
/// Chapter markup is read lazily with [`Self::load_chapter`] or
/// [`Self::chapter`].
///
/// # Configuration
/// Parsing can be configured using [`EpubSettings`].
///
/// Enabling `threadsafe` (default) makes [`Epub`] implement `Send + Sync`.
///
/// # Examples
/// - Listing the chapters of an epub:
/// ```
/// # use rpage::ebook::errors::EbookResult;
/// # use rpage::Epub;
/// # fn main() -> EbookResult<()> {
/// let epub = Epub::open("tests/ebooks/example_epub")?;
///
/// assert_eq!(Some("The Example Book"), epub.metadata().title());
///
/// for (index, entry) in epub.toc().iter().enumerate() {
///     println!("{index}: {} ({})", entry.label(), entry.path());
/// }
/// # Ok(())
/// # }
/// ```
pub struct Epub {
    archive: Box<dyn Archive>,
    package_file: String,
    metadata: BookMetadata,
    manifest: Manifest,
    spine: Vec<SpineEntry>,
    toc: Vec<TocEntry>,
}

impl Epub {
    /// Opens an [`Epub`] from the given [`Path`] with default [`EpubSettings`].
    ///
    /// The provided path may be an EPUB **file** or **directory** containing the
    /// contents of an unzipped EPUB.
    ///
    /// # Errors
    /// - [`ArchiveError`](EbookError::Archive): Missing or invalid EPUB files.
    /// - [`FormatError`](EbookError::Format): Malformed EPUB content.
    ///
    /// # See Also
    /// - [`Self::open_with`] to specify settings.
    /// - [`Self::read`] to open from a byte buffer.
    pub fn open(path: impl AsRef<Path>) -> EbookResult<Self> {
        Self::open_with(path, EpubSettings::default())
    }

    /// Opens an [`Epub`] from the given [`Path`] with the specified [`EpubSettings`].
    ///
    /// See [`Self::open`] for more details.
    pub fn open_with(
        path: impl AsRef<Path>,
        settings: impl Into<EpubSettings>,
    ) -> EbookResult<Self> {
        let path = path.as_ref();
        log::info!("opening epub at `{}`", path.display());

        Self::new(settings.into(), archive::get_archive(path)?)
    }

    /// With the specified [`EpubSettings`],
    /// opens an EPUB from any implementation of [`Read`] + [`Seek`]
    /// (and [`Send`] + [`Sync`] if the `threadsafe` feature is enabled).
    ///
    /// # Errors
    /// - [`ArchiveError::CorruptArchive`](crate::ebook::errors::ArchiveError::CorruptArchive):
    ///   The data is not a zip container.
    /// - [`FormatError`](EbookError::Format): Malformed EPUB content.
    ///
    /// # Examples
    /// - Opening from a [`Cursor`](std::io::Cursor) with an underlying [`Vec`] containing bytes:
    /// ```no_run
    /// # use rpage::ebook::errors::EbookResult;
    /// # use rpage::epub::{Epub, EpubSettings};
    /// # fn main() -> EbookResult<()> {
    /// # let epub_bytes = b"";
    /// let cursor = std::io::Cursor::new(Vec::from(epub_bytes));
    /// let epub = Epub::read(cursor, EpubSettings::default())?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn read<
        #[cfg(feature = "threadsafe")] R: 'static + Read + Seek + Send + Sync,
        #[cfg(not(feature = "threadsafe"))] R: 'static + Read + Seek,
    >(
        reader: R,
        settings: impl Into<EpubSettings>,
    ) -> EbookResult<Self> {
        Self::new(settings.into(), Box::new(ZipArchive::new(reader, None)?))
    }

    fn new(settings: EpubSettings, archive: Box<dyn Archive>) -> EbookResult<Self> {
        let parser = EpubParser::new(&settings, archive.as_ref());
        let mut data = parser.parse()?;
        data.metadata.byte_size = archive.byte_size();

        log::info!(
            "loaded `{}`: {} chapters, {} manifest items",
            data.metadata.title().unwrap_or_default(),
            data.toc.len(),
            data.manifest.len(),
        );

        Ok(Self {
            archive,
            package_file: data.package_file,
            metadata: data.metadata,
            manifest: data.manifest,
            spine: data.spine,
            toc: data.toc,
        })
    }

    /// Archive location of the package `.opf` file (e.g., `OEBPS/content.opf`).
    pub fn package_file(&self) -> &str {
        &self.package_file
    }

    /// The directory [`Self::package_file`] resides in.
    ///
    /// Manifest and cover paths are resolved relative to it.
    pub fn package_directory(&self) -> &str {
        uri::parent(&self.package_file)
    }

    pub fn metadata(&self) -> &BookMetadata {
        &self.metadata
    }

    /// The ordered chapter list; an entry's position is its chapter index.
    pub fn toc(&self) -> &[TocEntry] {
        &self.toc
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn spine(&self) -> &[SpineEntry] {
        &self.spine
    }

    /// Number of chapters in [`Self::toc`].
    pub fn chapter_count(&self) -> usize {
        self.toc.len()
    }

    /// Reads the cover image, if the book declares a resolvable one.
    ///
    /// # Errors
    /// - [`ArchiveError`](EbookError::Archive): The declared cover is absent from the archive.
    pub fn cover(&self) -> EbookResult<Option<Vec<u8>>> {
        self.metadata
            .cover_path()
            .map(|path| self.read_resource_bytes(path))
            .transpose()
    }

    /// Reads the raw bytes of the archive entry at `path`.
    pub fn read_resource_bytes(&self, path: &str) -> EbookResult<Vec<u8>> {
        self.archive.read_bytes(path).map_err(EbookError::Archive)
    }

    /// Reads the archive entry at `path` as text.
    ///
    /// UTF-16 content with a byte order mark is converted to UTF-8.
    pub fn read_resource_str(&self, path: &str) -> EbookResult<String> {
        self.archive.read_str(path).map_err(EbookError::Archive)
    }

    /// Reads the raw markup of the chapter at `index`.
    ///
    /// # Errors
    /// - [`ReaderError::ChapterOutOfBounds`]: `index` is not a chapter.
    /// - [`ArchiveError::ResourceNotFound`](crate::ebook::errors::ArchiveError::ResourceNotFound):
    ///   The chapter document is absent from the archive.
    pub fn load_chapter(&self, index: usize) -> EbookResult<String> {
        let entry = self.toc.get(index).ok_or(ReaderError::ChapterOutOfBounds {
            index,
            len: self.toc.len(),
        })?;

        self.read_resource_str(&entry.path())
    }

    /// Loads the chapter at `index` and rewrites its stylesheet and image
    /// references into [`ResourceHandle`](crate::ebook::resource::ResourceHandle) URIs.
    ///
    /// # See Also
    /// - [`chapter::process_chapter`] for details regarding the rewrite.
    pub fn chapter(&self, index: usize) -> EbookResult<ChapterContent> {
        let markup = self.load_chapter(index)?;
        let path = self.toc[index].path();
        let (markup, resources) = chapter::process_chapter(self, &markup, uri::parent(&path))?;

        Ok(ChapterContent::new(index, path.into_owned(), markup, resources))
    }
}

impl Debug for Epub {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> std::fmt::Result {
        fmt.debug_struct("Epub")
            .field("package_file", &self.package_file)
            .field("metadata", &self.metadata)
            .field("manifest", &self.manifest)
            .field("spine", &self.spine)
            .field("toc", &self.toc)
            .finish_non_exhaustive()
    }
}

impl PartialEq for Epub {
    fn eq(&self, other: &Self) -> bool {
        self.metadata.title == other.metadata.title
            && self.manifest == other.manifest
            && self.toc == other.toc
    }
}

/// Navigation document formats.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TocFormat {
    /// EPUB 2 `toc.ncx` (`navMap`).
    Ncx,
    /// EPUB 3 XHTML `nav` with `epub:type="toc"`.
    Xhtml,
}

/// EPUB-specific settings upon parsing an [`Epub`].
///
/// To create a mutable settings instance, see
/// [`EpubSettings::builder`] or [`EpubSettings::default`].
#[non_exhaustive]
#[derive(Clone, Debug)]
pub struct EpubSettings {
    /// Navigation format tried first when a book ships both.
    ///
    /// If the preferred format is not available,
    /// the other format is used instead.
    ///
    /// Default: [`TocFormat::Ncx`]
    pub preferred_toc: TocFormat,
    /// When set to `true`, ensures an EPUB conforms to the following:
    /// - Has a **title**.
    /// - Has at least one navigation entry.
    /// - Elements (i.e., `item`, `itemref`, NCX `content`) have their
    ///   required attributes present.
    ///
    /// When disabled, offending elements are skipped instead.
    ///
    /// Default: `false`
    pub strict: bool,
}

impl EpubSettings {
    /// Returns a builder to create an [`EpubSettings`] instance.
    pub fn builder() -> EpubSettingsBuilder {
        EpubSettingsBuilder(Self::default())
    }
}

impl Default for EpubSettings {
    fn default() -> Self {
        Self {
            preferred_toc: TocFormat::Ncx,
            strict: false,
        }
    }
}

impl From<EpubSettingsBuilder> for EpubSettings {
    fn from(value: EpubSettingsBuilder) -> Self {
        value.build()
    }
}

/// Builder to construct an [`EpubSettings`] instance.
///
/// # Examples
/// - Passing a builder to open an [`Epub`] with:
/// ```
/// # use rpage::ebook::errors::EbookResult;
/// # use rpage::epub::{Epub, EpubSettings, TocFormat};
/// # fn main() -> EbookResult<()> {
/// let epub = Epub::open_with(
///     "tests/ebooks/example_epub",
///     EpubSettings::builder()
///         .strict(true)
///         .preferred_toc(TocFormat::Xhtml)
/// )?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct EpubSettingsBuilder(EpubSettings);

impl EpubSettingsBuilder {
    /// Turn this builder into an [`EpubSettings`] instance.
    pub fn build(self) -> EpubSettings {
        self.0
    }

    /// See [`EpubSettings::preferred_toc`].
    pub fn preferred_toc(mut self, format: TocFormat) -> Self {
        self.0.preferred_toc = format;
        self
    }

    /// See [`EpubSettings::strict`].
    pub fn strict(mut self, strict: bool) -> Self {
        self.0.strict = strict;
        self
    }
}
