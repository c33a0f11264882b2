use crate::ebook::errors::FormatError;
use crate::parser::ParserResult;
use crate::util::str::StrExt;
use quick_xml::Reader;
use quick_xml::events::{BytesCData, BytesRef, BytesStart, BytesText, Event};
use std::borrow::Cow;

/// Thin wrapper over a [`quick_xml::Reader`] reading from a byte slice.
///
/// End tags are not checked against their start tags, as
/// chapter markup in the wild is frequently not well-formed.
pub(crate) struct XmlReader<'a>(Reader<&'a [u8]>);

impl<'a> XmlReader<'a> {
    pub(crate) fn from_bytes(data: &'a [u8]) -> Self {
        let mut reader = Reader::from_reader(data);
        reader.config_mut().check_end_names = false;
        Self(reader)
    }

    pub(crate) fn from_str(data: &'a str) -> Self {
        Self::from_bytes(data.as_bytes())
    }

    /// Iterator-like method to read the next [`Event`].
    ///
    /// Returns [`None`] once the end of the document is reached.
    pub(crate) fn next(&mut self) -> Option<ParserResult<Event<'a>>> {
        match self.0.read_event() {
            Ok(Event::Eof) => None,
            result => Some(result.map_err(unparsable)),
        }
    }

    /// Consolidated text of the element `start` up to its end tag.
    ///
    /// Whitespace runs are collapsed into single spaces and the result is trimmed.
    pub(crate) fn get_element_text(&mut self, start: &BytesStart) -> ParserResult<String> {
        let mut value = String::new();
        let mut depth = 0_usize;

        while let Some(event) = self.next() {
            match event? {
                Event::Start(el) if el.name() == start.name() => depth += 1,
                Event::End(el) if el.name() == start.name() => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                }
                event => push_text(&mut value, &event),
            }
        }
        Ok(value.collapse_whitespace())
    }
}

/// Appends the character data carried by `event` (if any) to `value`.
pub(crate) fn push_text(value: &mut String, event: &Event) {
    match event {
        Event::Text(text) => value.push_str(&text_to_str(text)),
        Event::CData(cdata) => value.push_str(&cdata_to_str(cdata)),
        Event::GeneralRef(reference) => push_reference(value, reference),
        _ => {}
    }
}

pub(crate) fn unparsable(error: impl std::error::Error + Send + Sync + 'static) -> FormatError {
    FormatError::Unparsable(Box::new(error))
}

pub(crate) trait XmlElement {
    fn is_local_name(&self, local_name: impl AsRef<[u8]>) -> bool;

    /// Retrieves the unescaped value of the attribute with the exact (qualified) name `key`.
    fn get_attribute(&self, key: impl AsRef<[u8]>) -> Option<String>;

    /// Retrieves an attribute by its local name, ignoring any namespace prefix.
    fn get_attribute_local(&self, local_name: impl AsRef<[u8]>) -> Option<String>;
}

impl XmlElement for BytesStart<'_> {
    fn is_local_name(&self, target_local_name: impl AsRef<[u8]>) -> bool {
        self.local_name().as_ref() == target_local_name.as_ref()
    }

    fn get_attribute(&self, key: impl AsRef<[u8]>) -> Option<String> {
        self.attributes()
            .flatten()
            .find(|attribute| attribute.key.as_ref() == key.as_ref())
            .map(|attribute| unescape_value(&attribute.value))
    }

    fn get_attribute_local(&self, local_name: impl AsRef<[u8]>) -> Option<String> {
        self.attributes()
            .flatten()
            .find(|attribute| attribute.key.local_name().as_ref() == local_name.as_ref())
            .map(|attribute| unescape_value(&attribute.value))
    }
}

fn unescape_value(raw: &[u8]) -> String {
    let raw = String::from_utf8_lossy(raw);

    match quick_xml::escape::unescape(&raw) {
        Ok(value) => value.into_owned(),
        // Unknown (HTML) entities are kept verbatim
        Err(_) => raw.into_owned(),
    }
}

fn text_to_str<'b>(text: &'b BytesText) -> Cow<'b, str> {
    String::from_utf8_lossy(text)
}

fn cdata_to_str<'b>(cdata: &'b BytesCData) -> Cow<'b, str> {
    String::from_utf8_lossy(cdata)
}

fn push_reference(value: &mut String, reference: &BytesRef) {
    let name = String::from_utf8_lossy(reference);

    match resolve_entity(&name) {
        Some(resolved) => value.push(resolved),
        None => {
            value.push('&');
            value.push_str(&name);
            value.push(';');
        }
    }
}

/// Resolves a character reference (`#38`, `#x26`) or a named entity.
///
/// Besides the five XML entities, the HTML entities
/// commonly found in e-book markup are recognized.
fn resolve_entity(name: &str) -> Option<char> {
    if let Some(number) = name.strip_prefix('#') {
        let code = match number.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => number.parse().ok()?,
        };
        return char::from_u32(code);
    }

    Some(match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        "shy" => '\u{ad}',
        "ensp" => '\u{2002}',
        "emsp" => '\u{2003}',
        "thinsp" => '\u{2009}',
        "ndash" => '\u{2013}',
        "mdash" => '\u{2014}',
        "lsquo" => '\u{2018}',
        "rsquo" => '\u{2019}',
        "ldquo" => '\u{201c}',
        "rdquo" => '\u{201d}',
        "laquo" => '\u{ab}',
        "raquo" => '\u{bb}',
        "hellip" => '\u{2026}',
        "bull" => '\u{2022}',
        "middot" => '\u{b7}',
        "copy" => '\u{a9}',
        "reg" => '\u{ae}',
        "trade" => '\u{2122}',
        "deg" => '\u{b0}',
        "times" => '\u{d7}',
        "eacute" => '\u{e9}',
        "egrave" => '\u{e8}',
        "agrave" => '\u{e0}',
        "ccedil" => '\u{e7}',
        "ouml" => '\u{f6}',
        "uuml" => '\u{fc}',
        "auml" => '\u{e4}',
        "szlig" => '\u{df}',
        _ => return None,
    })
}
