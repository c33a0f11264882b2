use crate::ebook::epub::Epub;
use crate::ebook::epub::consts::bytes;
use crate::parser::ParserResult;
use crate::parser::xml::{self, XmlReader};
use crate::search::TextIndexEntry;
use crate::util::str::StrExt;
use quick_xml::events::Event;

/// Extracts the searchable text of every chapter of `epub`, in order.
///
/// A chapter that cannot be read or parsed yields an entry with empty text.
pub(super) fn extract_all(epub: &Epub) -> Vec<TextIndexEntry> {
    epub.toc()
        .iter()
        .enumerate()
        .map(|(chapter_index, entry)| {
            let (markup, searchable_text) = match epub.load_chapter(chapter_index) {
                Ok(markup) => match searchable_text(&markup) {
                    Ok(text) => (markup, text),
                    Err(error) => {
                        log::warn!("indexing chapter {chapter_index} without text: {error}");
                        (markup, String::new())
                    }
                },
                Err(error) => {
                    log::warn!("indexing chapter {chapter_index} without text: {error}");
                    (String::new(), String::new())
                }
            };

            TextIndexEntry {
                chapter_index,
                chapter_title: entry.label().to_owned(),
                markup,
                searchable_text,
            }
        })
        .collect()
}

/// Text content of the `body` of `markup`, or of the whole document if it
/// has no body, with `script` and `style` contents removed and whitespace
/// runs collapsed.
pub(super) fn searchable_text(markup: &str) -> ParserResult<String> {
    let mut reader = XmlReader::from_str(markup);
    let mut document = String::new();
    let mut body = String::new();
    let mut body_depth = 0_usize;
    let mut skip_depth = 0_usize;
    let mut has_body = false;

    while let Some(event) = reader.next() {
        let event = event?;

        match &event {
            Event::Start(el) => {
                let name = el.local_name();

                if skip_depth > 0 || matches!(name.as_ref(), bytes::SCRIPT | bytes::STYLE) {
                    skip_depth += 1;
                } else if body_depth > 0 || name.as_ref() == bytes::BODY {
                    has_body = true;
                    body_depth += 1;
                }
            }
            Event::End(_) if skip_depth > 0 => skip_depth -= 1,
            Event::End(_) => body_depth = body_depth.saturating_sub(1),
            _ if skip_depth > 0 => {}
            event => {
                if body_depth > 0 {
                    xml::push_text(&mut body, event);
                }
                xml::push_text(&mut document, event);
            }
        }
    }

    let text = if has_body { body } else { document };
    Ok(text.collapse_whitespace())
}
