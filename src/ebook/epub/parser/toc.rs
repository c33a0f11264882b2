mod ncx;
mod xhtml;

use crate::ebook::epub::TocFormat;
use crate::ebook::epub::errors::EpubError;
use crate::ebook::epub::parser::EpubParser;
use crate::ebook::epub::toc::TocEntry;
use crate::parser::ParserResult;
use crate::util::uri;

/// A navigation entry before its target is resolved.
#[derive(Default)]
struct RawTocEntry {
    label: String,
    href: Option<String>,
}

impl EpubParser<'_> {
    /// Parses the navigation document located at `toc_location` into an
    /// ordered, flattened list of chapters.
    ///
    /// Targets are resolved against the directory of the navigation document.
    pub(super) fn parse_toc(
        &self,
        format: TocFormat,
        toc_location: &str,
        data: &str,
    ) -> ParserResult<Vec<TocEntry>> {
        let raw_entries = match format {
            TocFormat::Ncx => ncx::parse_ncx(data)?,
            TocFormat::Xhtml => xhtml::parse_nav(data)?,
        };
        let base = uri::parent(toc_location);
        let mut entries = Vec::with_capacity(raw_entries.len());

        for RawTocEntry { label, href } in raw_entries {
            let Some(href) = self.require_attribute(href, "content[*src]")? else {
                log::debug!("skipping navigation entry without a target: `{label}`");
                continue;
            };
            let target = uri::strip_fragment(&href);

            if target.is_empty() {
                log::debug!("skipping fragment-only navigation entry: `{label}`");
                continue;
            }
            entries.push(TocEntry::new(label, &uri::resolve_path(base, target)));
        }

        if self.settings.strict && entries.is_empty() {
            return Err(EpubError::EmptyNavigation(toc_location.to_owned()).into());
        }
        Ok(entries)
    }
}
