use crate::ebook::epub::consts::{self, bytes};
use crate::ebook::epub::parser::toc::RawTocEntry;
use crate::parser::ParserResult;
use crate::parser::xml::{XmlElement, XmlReader};
use quick_xml::events::Event;

/// Collects every `navPoint` of an NCX document in document order.
///
/// A parent `navPoint` always precedes its children.
pub(super) fn parse_ncx(data: &str) -> ParserResult<Vec<RawTocEntry>> {
    let mut reader = XmlReader::from_str(data);
    let mut entries = Vec::new();
    // Indices into `entries` of the currently open navPoints
    let mut stack = Vec::new();

    while let Some(event) = reader.next() {
        match event? {
            Event::Start(el) if el.is_local_name(bytes::NAV_POINT) => {
                stack.push(entries.len());
                entries.push(RawTocEntry::default());
            }
            Event::Start(el) if el.is_local_name(bytes::NAV_LABEL) => {
                let label = reader.get_element_text(&el)?;

                if let Some(entry) = stack.last().and_then(|&i| entries.get_mut(i)) {
                    entry.label = label;
                }
            }
            Event::Start(el) | Event::Empty(el) if el.is_local_name(bytes::NAV_CONTENT) => {
                if let Some(entry) = stack.last().and_then(|&i| entries.get_mut(i))
                    && entry.href.is_none()
                {
                    entry.href = el.get_attribute(consts::SRC);
                }
            }
            Event::End(el) if el.local_name().as_ref() == bytes::NAV_POINT => {
                stack.pop();
            }
            _ => {}
        }
    }
    Ok(entries)
}
