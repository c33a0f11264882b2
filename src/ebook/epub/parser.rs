mod container;
mod package;
mod toc;

use crate::ebook::archive::Archive;
use crate::ebook::epub::consts;
use crate::ebook::epub::errors::EpubError;
use crate::ebook::epub::manifest::Manifest;
use crate::ebook::epub::metadata::BookMetadata;
use crate::ebook::epub::parser::package::PackageData;
use crate::ebook::epub::spine::SpineEntry;
use crate::ebook::epub::toc::TocEntry;
use crate::ebook::epub::{EpubSettings, TocFormat};
use crate::ebook::errors::EbookResult;
use crate::parser::ParserResult;
use crate::util::uri;

pub(super) struct ParsedContent {
    pub(super) package_file: String,
    pub(super) metadata: BookMetadata,
    pub(super) manifest: Manifest,
    pub(super) spine: Vec<SpineEntry>,
    pub(super) toc: Vec<TocEntry>,
}

/// Location of the navigation document within the archive.
struct NavLocation {
    href: String,
    format: TocFormat,
}

pub(super) struct EpubParser<'a> {
    settings: &'a EpubSettings,
    archive: &'a dyn Archive,
}

impl<'a> EpubParser<'a> {
    pub(super) fn new(settings: &'a EpubSettings, archive: &'a dyn Archive) -> Self {
        Self { settings, archive }
    }

    pub(super) fn parse(&self) -> EbookResult<ParsedContent> {
        // Parse "META-INF/container.xml"
        let container = self.archive.read_str(consts::CONTAINER)?;
        let package_file = self.parse_container(&container)?;

        // Parse "package.opf"
        let package = self.archive.read_str(&package_file)?;
        let PackageData {
            metadata,
            manifest,
            spine,
            spine_toc,
        } = self.parse_package(uri::parent(&package_file), &package)?;

        // Parse "toc.ncx/xhtml"
        let nav = self.locate_navigation(&manifest, spine_toc.as_deref())?;
        log::debug!("navigation document: `{}` ({:?})", nav.href, nav.format);
        let nav_content = self.archive.read_str(&nav.href)?;
        let toc = self.parse_toc(nav.format, &nav.href, &nav_content)?;

        log_spine_divergence(&manifest, &spine, &toc);

        Ok(ParsedContent {
            package_file,
            metadata,
            manifest,
            spine,
            toc,
        })
    }

    /// The navigation document is looked up in the following order,
    /// with the [`EpubSettings::preferred_toc`] format tried first:
    /// - NCX: the item with id `ncx`, any item of the NCX media type,
    ///   then the item named by the spine `toc` attribute.
    /// - XHTML: the item with the `nav` property.
    fn locate_navigation(
        &self,
        manifest: &Manifest,
        spine_toc: Option<&str>,
    ) -> ParserResult<NavLocation> {
        let ncx = || {
            manifest
                .by_id(consts::NCX_ID)
                .or_else(|| manifest.by_media_type(consts::NCX_TYPE))
                .or_else(|| spine_toc.and_then(|id| manifest.by_id(id)))
                .map(|item| NavLocation {
                    href: item.href.clone(),
                    format: TocFormat::Ncx,
                })
        };
        let xhtml = || {
            manifest
                .by_property(consts::NAV_PROPERTY)
                .map(|item| NavLocation {
                    href: item.href.clone(),
                    format: TocFormat::Xhtml,
                })
        };

        match self.settings.preferred_toc {
            TocFormat::Ncx => ncx().or_else(xhtml),
            TocFormat::Xhtml => xhtml().or_else(ncx),
        }
        .ok_or_else(|| {
            EpubError::MissingManifestItem(String::from(
                "navigation document (`ncx` item or `nav` property)",
            ))
            .into()
        })
    }

    /// Required attribute value.
    ///
    /// If `attribute_value` is [`None`], returns an error when `strict`
    /// mode is enabled. Otherwise, returns [`None`] so the caller can skip
    /// the element.
    fn require_attribute<T>(
        &self,
        attribute_value: Option<T>,
        error_message: &'static str,
    ) -> ParserResult<Option<T>> {
        if self.settings.strict && attribute_value.is_none() {
            Err(EpubError::MissingAttribute(String::from(error_message)).into())
        } else {
            Ok(attribute_value)
        }
    }
}

/// Navigation order is canonical; a spine that disagrees is only reported.
fn log_spine_divergence(manifest: &Manifest, spine: &[SpineEntry], toc: &[TocEntry]) {
    let spine_paths = spine
        .iter()
        .filter(|entry| entry.linear)
        .filter_map(|entry| manifest.by_id(&entry.idref))
        .map(|item| item.href.as_str());
    let mut toc_paths = toc.iter().map(TocEntry::path).collect::<Vec<_>>();
    toc_paths.dedup();

    if !spine_paths.eq(toc_paths.iter().map(|path| path.as_ref())) {
        log::debug!(
            "spine order differs from navigation order ({} spine items, {} chapters); using navigation order",
            spine.len(),
            toc.len(),
        );
    }
}
