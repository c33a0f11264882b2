//! Host-provided rendering and text inspection capabilities.
//!
//! The reader never lays out text itself. A host (a webview, a terminal
//! renderer, a test double, ...) implements [`RenderSurface`] to display
//! chapter markup and report measurements, and optionally [`TextProbe`] to
//! expose the rendered text nodes.

use crate::reader::errors::SurfaceError;

/// Geometry of the rendered chapter as reported by a [`RenderSurface`].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Measurement {
    /// Visible width of the content area.
    pub client_width: f64,
    pub margin_left: f64,
    pub margin_right: f64,
    /// Total laid-out width, spanning every column.
    pub scroll_width: f64,
    /// Total laid-out height; meaningful in single-column mode.
    pub scroll_height: f64,
}

/// A surface able to display chapter markup with an injected stylesheet.
pub trait RenderSurface {
    /// Width available to the surface before any chapter is rendered.
    fn viewport_width(&self) -> f64;

    /// Replaces the displayed document with `markup` styled by `stylesheet`.
    fn render(&mut self, markup: &str, stylesheet: &str) -> Result<(), SurfaceError>;

    /// Blocks until every image of the rendered document has loaded or failed.
    fn wait_for_images(&mut self);

    fn measure(&self) -> Measurement;

    /// Appends an empty block one full column tall at the end of the document.
    fn append_filler(&mut self);

    /// Scrolls horizontally so that `offset` is the left edge of the view.
    fn scroll_to(&mut self, offset: f64);

    /// Hides or shows the content; hidden while a chapter is being laid out.
    fn set_visible(&mut self, visible: bool);

    /// Resizes the surface to `height` in single-column mode.
    fn set_height(&mut self, height: f64);
}

/// Position of a text node relative to the start of the rendered document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeOffset {
    pub top: f64,
    pub left: f64,
    /// Id of the nearest enclosing element carrying one.
    pub element_id: Option<String>,
}

/// Read access to the text of a rendered document.
pub trait TextProbe {
    /// Contents of every text node in document order.
    fn text_nodes(&self) -> Vec<String>;

    /// Offset of the text node at `index` within [`Self::text_nodes`].
    ///
    /// Returns [`None`] when the node has no layout box.
    fn measure_node(&mut self, index: usize) -> Option<NodeOffset>;

    /// Wraps every case-insensitive occurrence of `query` in an element of
    /// class [`HIGHLIGHT_CLASS`], after removing previous highlights.
    ///
    /// Returns the number of highlighted occurrences.
    /// Implementations may locate occurrences with [`highlight_ranges`].
    fn highlight(&mut self, query: &str) -> usize;
}

/// Class name of elements wrapping highlighted search matches.
pub const HIGHLIGHT_CLASS: &str = "rpage-highlight";

/// Inline style applied to highlighted search matches.
pub const HIGHLIGHT_STYLE: &str =
    "background-color: #C6E1FB; color: #439DF1; padding: 1px 2px; border-radius: 2px;";

/// Byte ranges of the non-overlapping, case-insensitive occurrences of
/// `query` within `text`.
///
/// ```
/// # use rpage::reader::highlight_ranges;
/// assert_eq!(vec![0..3, 8..11], highlight_ranges("The cat the end", "the"));
/// assert!(highlight_ranges("anything", " ").is_empty());
/// ```
pub fn highlight_ranges(text: &str, query: &str) -> Vec<std::ops::Range<usize>> {
    let query = query.trim();
    if query.is_empty() {
        return Vec::new();
    }
    let needle = query.chars().flat_map(char::to_lowercase).collect::<Vec<_>>();
    let mut ranges = Vec::new();
    let mut start = 0;

    while start < text.len() {
        match match_at(&text[start..], &needle) {
            Some(len) => {
                ranges.push(start..start + len);
                start += len;
            }
            None => {
                start += text[start..].chars().next().map_or(1, char::len_utf8);
            }
        }
    }
    ranges
}

/// Length in bytes of the prefix of `text` matching `needle` case-insensitively.
fn match_at(text: &str, needle: &[char]) -> Option<usize> {
    let mut needle = needle.iter();
    let mut pending = needle.len();
    let mut len = 0;

    for c in text.chars() {
        if pending == 0 {
            break;
        }
        for folded in c.to_lowercase() {
            if needle.next() != Some(&folded) {
                return None;
            }
            pending -= 1;
        }
        len += c.len_utf8();
    }
    (pending == 0).then_some(len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_ranges() {
        #[rustfmt::skip]
        let expected = [
            (vec![0..2, 2..4], "aaaaa", "aa"),
            (vec![4..9], "The Whale", "WHALE"),
            (vec![0..3], "Ärger", "är"),
            (vec![], "short", "shorter"),
            (vec![], "", "a"),
        ];

        for (expected, text, query) in expected {
            assert_eq!(expected, highlight_ranges(text, query), "{text:?} / {query:?}");
        }
    }
}
