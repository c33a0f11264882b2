//! Path helpers for locations inside an archive.
//!
//! Archive paths are always relative to the archive root and use
//! forward slashes (`OEBPS/Text/c1.xhtml`).

use std::borrow::Cow;

/// Resolves `relative` against the directory `base`.
///
/// Segments of `relative` are applied one at a time:
/// `.` and empty segments are ignored, `..` removes the last
/// segment of the accumulated path, anything else is appended.
/// A `..` that would climb above the archive root is dropped.
///
/// ```text
/// resolve_path("OEBPS/Text", "../Images/a.png") == "OEBPS/Images/a.png"
/// resolve_path("", "OEBPS/content.opf")          == "OEBPS/content.opf"
/// ```
pub fn resolve_path(base: &str, relative: &str) -> String {
    let mut stack: Vec<&str> = base.split('/').filter(|segment| !segment.is_empty()).collect();

    for segment in relative.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                stack.pop();
            }
            _ => stack.push(segment),
        }
    }
    stack.join("/")
}

/// Directory portion of `path`, without a trailing slash.
pub(crate) fn parent(path: &str) -> &str {
    path.rfind('/').map_or("", |index| &path[..index])
}

/// Splits a resolved path into `(directory, file)`.
pub(crate) fn split_dir_file(path: &str) -> (&str, &str) {
    match path.rfind('/') {
        Some(index) => (&path[..index], &path[index + 1..]),
        None => ("", path),
    }
}

/// Removes a trailing `?query` and/or `#fragment`.
pub(crate) fn strip_fragment(href: &str) -> &str {
    href.find(['?', '#']).map_or(href, |position| &href[..position])
}

pub(crate) fn decode(encoded: &str) -> Cow<'_, str> {
    percent_encoding::percent_decode_str(encoded).decode_utf8_lossy()
}

/// `true` when `href` points outside the archive
/// (`https:`, `data:`, ...) or is absolute.
pub(crate) fn is_external(href: &str) -> bool {
    let href = strip_fragment(href);

    // A colon before the first slash indicates a scheme
    let scheme_end = href.find(':');
    let slash = href.find('/');
    href.starts_with('/')
        || href.starts_with("//")
        || match (scheme_end, slash) {
            (Some(colon), Some(slash)) => colon < slash,
            (Some(_), None) => true,
            _ => false,
        }
}
