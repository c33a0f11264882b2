use crate::ebook::epub::consts::{self, bytes};
use crate::ebook::epub::errors::EpubError;
use crate::ebook::epub::manifest::{Manifest, ManifestItem};
use crate::ebook::epub::metadata::BookMetadata;
use crate::ebook::epub::parser::EpubParser;
use crate::ebook::epub::spine::SpineEntry;
use crate::parser::ParserResult;
use crate::parser::xml::{XmlElement, XmlReader};
use crate::util::uri;
use quick_xml::events::{BytesStart, Event};

pub(super) struct PackageData {
    pub(super) metadata: BookMetadata,
    pub(super) manifest: Manifest,
    pub(super) spine: Vec<SpineEntry>,
    /// Value of the spine `toc` attribute (EPUB 2 NCX reference).
    pub(super) spine_toc: Option<String>,
}

impl EpubParser<'_> {
    /// Parses the package `.opf` file.
    ///
    /// Manifest hrefs are resolved against `package_dir`.
    pub(super) fn parse_package(&self, package_dir: &str, data: &str) -> ParserResult<PackageData> {
        let mut reader = XmlReader::from_str(data);
        let mut metadata = BookMetadata::default();
        let mut manifest = Vec::new();
        let mut spine = Vec::new();
        let mut spine_toc = None;
        let mut cover_id = None;
        let mut in_metadata = false;

        while let Some(event) = reader.next() {
            match event? {
                Event::Start(el) if el.is_local_name(bytes::METADATA) => in_metadata = true,
                Event::End(el) if el.local_name().as_ref() == bytes::METADATA => {
                    in_metadata = false;
                }
                Event::Start(el) if in_metadata => {
                    if el.is_local_name(bytes::META) {
                        cover_id = cover_id.or_else(|| Self::cover_meta(&el));
                    } else if let Some(field) = Self::metadata_field(&mut metadata, &el) {
                        *field = Some(reader.get_element_text(&el)?).filter(|s| !s.is_empty());
                    }
                }
                Event::Empty(el) if in_metadata && el.is_local_name(bytes::META) => {
                    cover_id = cover_id.or_else(|| Self::cover_meta(&el));
                }
                Event::Start(el) | Event::Empty(el) => match el.local_name().as_ref() {
                    bytes::ITEM => manifest.extend(self.parse_manifest_item(package_dir, &el)?),
                    bytes::ITEMREF => spine.extend(self.parse_spine_item(&el)?),
                    bytes::SPINE => spine_toc = el.get_attribute(consts::TOC),
                    _ => {}
                },
                _ => {}
            }
        }

        if self.settings.strict && metadata.title.is_none() {
            return Err(EpubError::MissingTitle.into());
        }

        let manifest = Manifest(manifest);
        metadata.cover_path = Self::resolve_cover(&manifest, cover_id.as_deref());

        Ok(PackageData {
            metadata,
            manifest,
            spine,
            spine_toc,
        })
    }

    /// Returns the unfilled metadata slot the element `el` belongs to.
    ///
    /// Only the first occurrence of each element is retained.
    fn metadata_field<'m>(
        metadata: &'m mut BookMetadata,
        el: &BytesStart,
    ) -> Option<&'m mut Option<String>> {
        let field = match el.local_name().as_ref() {
            bytes::TITLE => &mut metadata.title,
            bytes::CREATOR => &mut metadata.creator,
            bytes::PUBLISHER => &mut metadata.publisher,
            bytes::IDENTIFIER => &mut metadata.identifier,
            bytes::DATE => &mut metadata.date,
            bytes::LANGUAGE => &mut metadata.language,
            _ => return None,
        };
        field.is_none().then_some(field)
    }

    /// `<meta name="cover" content="cover-id"/>`
    fn cover_meta(el: &BytesStart) -> Option<String> {
        el.get_attribute(consts::NAME)
            .filter(|name| name == consts::COVER)
            .and_then(|_| el.get_attribute(consts::CONTENT))
    }

    /// The EPUB 2 cover meta takes precedence over the EPUB 3 `cover-image` property.
    ///
    /// A declared cover id without a manifest item yields no cover.
    fn resolve_cover(manifest: &Manifest, cover_id: Option<&str>) -> Option<String> {
        let item = match cover_id {
            Some(id) => {
                let item = manifest.by_id(id);
                if item.is_none() {
                    log::warn!("cover meta references non-existent manifest item `{id}`");
                }
                item
            }
            None => manifest.by_property(consts::COVER_IMAGE),
        };
        item.map(|item| item.href.clone())
    }

    fn parse_manifest_item(
        &self,
        package_dir: &str,
        el: &BytesStart,
    ) -> ParserResult<Option<ManifestItem>> {
        let id = self.require_attribute(el.get_attribute(consts::ID), "item[*id]")?;
        let href = self.require_attribute(el.get_attribute(consts::HREF), "item[*href]")?;
        let (Some(id), Some(href)) = (id, href) else {
            return Ok(None);
        };
        let resolved = uri::resolve_path(package_dir, uri::strip_fragment(&href));

        Ok(Some(ManifestItem {
            id,
            href: uri::decode(&resolved).into_owned(),
            media_type: el.get_attribute(consts::MEDIA_TYPE).unwrap_or_default(),
            properties: el
                .get_attribute(consts::PROPERTIES)
                .map(|value| value.split_whitespace().map(str::to_owned).collect())
                .unwrap_or_default(),
        }))
    }

    fn parse_spine_item(&self, el: &BytesStart) -> ParserResult<Option<SpineEntry>> {
        let idref = self.require_attribute(el.get_attribute(consts::IDREF), "itemref[*idref]")?;

        Ok(idref.map(|idref| SpineEntry {
            idref,
            linear: el.get_attribute(consts::LINEAR).is_none_or(|linear| linear != "no"),
        }))
    }
}
