use crate::ebook::epub::consts::{self, bytes};
use crate::ebook::epub::parser::toc::RawTocEntry;
use crate::parser::ParserResult;
use crate::parser::xml::{XmlElement, XmlReader};
use quick_xml::events::Event;

struct NavGroup {
    is_toc: bool,
    entries: Vec<RawTocEntry>,
}

/// Collects the anchors of the EPUB 3 `nav` whose `epub:type` is `toc`.
///
/// When no `nav` is typed as `toc`, the first `nav` is used.
pub(super) fn parse_nav(data: &str) -> ParserResult<Vec<RawTocEntry>> {
    let mut reader = XmlReader::from_str(data);
    let mut groups: Vec<NavGroup> = Vec::new();
    let mut nav_depth = 0_usize;

    while let Some(event) = reader.next() {
        match event? {
            Event::Start(el) if el.is_local_name(bytes::NAV) => {
                if nav_depth == 0 {
                    let is_toc = el
                        .get_attribute(consts::EPUB_TYPE)
                        .is_some_and(|kind| kind.split_whitespace().any(|kind| kind == "toc"));

                    groups.push(NavGroup {
                        is_toc,
                        entries: Vec::new(),
                    });
                }
                nav_depth += 1;
            }
            Event::End(el) if el.local_name().as_ref() == bytes::NAV => {
                nav_depth = nav_depth.saturating_sub(1);
            }
            Event::Start(el) if nav_depth > 0 && el.is_local_name(bytes::ANCHOR) => {
                let href = el.get_attribute(consts::HREF);
                let label = reader.get_element_text(&el)?;

                if let Some(group) = groups.last_mut() {
                    group.entries.push(RawTocEntry { label, href });
                }
            }
            _ => {}
        }
    }

    let index = groups
        .iter()
        .position(|group| group.is_toc)
        .unwrap_or_default();

    Ok(if index < groups.len() {
        groups.swap_remove(index).entries
    } else {
        Vec::new()
    })
}
