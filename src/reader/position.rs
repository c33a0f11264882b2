//! Mapping of rendered text to the page it appears on.

use crate::reader::surface::TextProbe;
use crate::util::str::StrExt;

/// A rendered text node and its position within the chapter.
#[derive(Clone, Debug, PartialEq)]
pub struct TextPosition {
    /// Trimmed content of the text node.
    pub text: String,
    /// `0`-based page the node starts on.
    pub page_index: usize,
    pub offset_top: f64,
    pub offset_left: f64,
    pub element_id: Option<String>,
}

/// Positions of every non-blank text node of a rendered chapter.
///
/// Built with [`TextPositionMapper::analyze`] once a chapter is laid out;
/// stale as soon as the layout changes.
#[derive(Clone, Debug)]
pub struct TextPositionMapper {
    page_width: f64,
    column_gap: f64,
    positions: Vec<TextPosition>,
}

impl TextPositionMapper {
    /// Walks the text nodes exposed by `probe` and records their positions.
    ///
    /// The page of a node is `floor(left / (page_width + column_gap))`.
    pub fn analyze<P: TextProbe + ?Sized>(probe: &mut P, page_width: f64, column_gap: f64) -> Self {
        let mut mapper = Self {
            page_width,
            column_gap,
            positions: Vec::new(),
        };

        for (index, text) in probe.text_nodes().into_iter().enumerate() {
            let text = text.trim();

            if text.is_empty() {
                continue;
            }
            let Some(offset) = probe.measure_node(index) else {
                log::trace!("skipping unmeasurable text node {index}");
                continue;
            };
            mapper.positions.push(TextPosition {
                text: text.to_owned(),
                page_index: mapper.page_index(offset.left),
                offset_top: offset.top,
                offset_left: offset.left,
                element_id: offset.element_id,
            });
        }
        mapper
    }

    /// `0`-based page containing the horizontal offset `left`.
    pub fn page_index(&self, left: f64) -> usize {
        let stride = self.page_width + self.column_gap;

        if stride <= 0.0 || left <= 0.0 {
            0
        } else {
            (left / stride).floor() as usize
        }
    }

    /// The first node whose text contains `text`, ignoring case.
    ///
    /// `text` is trimmed beforehand; blank input finds nothing.
    pub fn find_position(&self, text: &str) -> Option<&TextPosition> {
        let text = text.trim();

        if text.is_empty() {
            return None;
        }
        self.positions
            .iter()
            .find(|position| position.text.contains_ignore_case(text))
    }

    /// Nodes starting on the `0`-based page `page_index`.
    pub fn positions_on_page(&self, page_index: usize) -> impl Iterator<Item = &TextPosition> {
        self.positions
            .iter()
            .filter(move |position| position.page_index == page_index)
    }

    pub fn positions(&self) -> &[TextPosition] {
        &self.positions
    }
}
