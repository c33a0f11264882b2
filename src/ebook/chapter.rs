//! Chapter loading and reference rewriting.

use crate::ebook::epub::Epub;
use crate::ebook::epub::consts::{self, bytes};
use crate::ebook::errors::EbookResult;
use crate::ebook::resource::ResourceScope;
use crate::ebook::resource::consts::mime;
use crate::parser::ParserResult;
use crate::parser::xml::{self, XmlElement, XmlReader};
use crate::util::str::StrExt;
use crate::util::uri;
use quick_xml::Writer;
use quick_xml::events::{BytesStart, Event};

/// Processed markup of one chapter, ready to be handed to a
/// [`RenderSurface`](crate::reader::RenderSurface).
///
/// Owns the [`ResourceScope`] its rewritten references point into.
/// Dropping the content releases every blob of the chapter.
#[derive(Debug)]
pub struct ChapterContent {
    index: usize,
    path: String,
    markup: String,
    resources: ResourceScope,
}

impl ChapterContent {
    pub(crate) fn new(index: usize, path: String, markup: String, resources: ResourceScope) -> Self {
        Self {
            index,
            path,
            markup,
            resources,
        }
    }

    /// Chapter index within [`Epub::toc`].
    pub fn index(&self) -> usize {
        self.index
    }

    /// Archive path of the chapter document.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Markup with stylesheet and image references replaced by resource handle URIs.
    pub fn markup(&self) -> &str {
        &self.markup
    }

    pub fn resources(&self) -> &ResourceScope {
        &self.resources
    }
}

/// Rewrites the resource references of chapter `markup` located in the directory `base`.
///
/// The following references are resolved with
/// [`resolve_path`](crate::util::uri::resolve_path) and replaced by the URI of a
/// [`ResourceHandle`](crate::ebook::resource::ResourceHandle):
/// - `<link rel="stylesheet" href="...">`
/// - `<img src="...">`
/// - SVG `<image xlink:href="...">` (or plain `href`)
///
/// External references (`https:`, `data:`, ...) are left untouched.
/// A reference whose resource is missing from the archive keeps its
/// original value; this never fails the chapter.
///
/// # Errors
/// - [`FormatError::Unparsable`](crate::ebook::errors::FormatError::Unparsable):
///   The chapter markup cannot be tokenized.
pub fn process_chapter(
    epub: &Epub,
    markup: &str,
    base: &str,
) -> EbookResult<(String, ResourceScope)> {
    let mut processor = ChapterProcessor {
        epub,
        base,
        resources: ResourceScope::new(),
    };
    let markup = processor.rewrite(markup)?;

    log::debug!(
        "processed chapter in `{base}`: {} resources attached",
        processor.resources.len()
    );
    Ok((markup, processor.resources))
}

struct ChapterProcessor<'a> {
    epub: &'a Epub,
    base: &'a str,
    resources: ResourceScope,
}

impl ChapterProcessor<'_> {
    fn rewrite(&mut self, markup: &str) -> ParserResult<String> {
        let mut reader = XmlReader::from_str(markup);
        let mut writer = Writer::new(Vec::with_capacity(markup.len()));

        while let Some(event) = reader.next() {
            let event = match event? {
                Event::Start(el) => Event::Start(self.rewrite_element(el)),
                Event::Empty(el) => Event::Empty(self.rewrite_element(el)),
                event => event,
            };
            writer.write_event(event).map_err(xml::unparsable)?;
        }

        String::from_utf8(writer.into_inner()).map_err(xml::unparsable)
    }

    /// Returns `el` with its resource reference replaced, if it has one.
    fn rewrite_element<'b>(&mut self, el: BytesStart<'b>) -> BytesStart<'b> {
        let Some(key) = Self::reference_key(&el) else {
            return el;
        };
        let Some(original) = el.get_attribute_local(key) else {
            return el;
        };
        let Some(uri) = self.attach(&original) else {
            return el;
        };

        let mut rewritten = BytesStart::new(String::from_utf8_lossy(el.name().as_ref()).into_owned());
        for attribute in el.attributes().flatten() {
            if attribute.key.local_name().as_ref() == key {
                rewritten.push_attribute((attribute.key.as_ref(), uri.as_bytes()));
            } else {
                rewritten.push_attribute(attribute);
            }
        }
        rewritten
    }

    /// Local name of the attribute holding the resource reference of `el`.
    fn reference_key(el: &BytesStart) -> Option<&'static [u8]> {
        match el.local_name().as_ref() {
            bytes::IMG => Some(consts::SRC.as_bytes()),
            bytes::IMAGE => Some(consts::HREF.as_bytes()),
            bytes::LINK
                if el.get_attribute(consts::REL).is_some_and(|rel| {
                    rel.split_whitespace()
                        .any(|rel| rel.starts_with_ignore_case(consts::STYLESHEET))
                }) =>
            {
                Some(consts::HREF.as_bytes())
            }
            _ => None,
        }
    }

    /// Reads the resource `href` points to into the scope and returns its handle URI.
    fn attach(&mut self, href: &str) -> Option<String> {
        if href.is_empty() || uri::is_external(href) {
            return None;
        }
        let path = uri::decode(&uri::resolve_path(self.base, uri::strip_fragment(href))).into_owned();
        let epub = self.epub;
        let media_type = || {
            epub.manifest()
                .by_href(&path)
                .map(|item| item.media_type().to_owned())
                .unwrap_or_else(|| mime::from_extension(&path).to_owned())
        };

        match self
            .resources
            .get_or_insert_with(&path, media_type, || epub.read_resource_bytes(&path))
        {
            Ok(handle) => Some(handle.uri()),
            Err(error) => {
                log::warn!("keeping unresolved reference `{href}`: {error}");
                None
            }
        }
    }
}
