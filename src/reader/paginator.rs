//! Layout-driven pagination of a single rendered chapter.

use crate::ebook::chapter::ChapterContent;
use crate::reader::errors::{ReaderError, ReaderResult};
use crate::reader::layout::{ColumnMode, LayoutConfig, StyleConfig};
use crate::reader::surface::RenderSurface;

/// Divisor applied to the viewport width to cap image widths.
const IMAGE_WIDTH_DIVISOR: f64 = 3.5;

/// Progress of the most recent [`Paginator::layout`] call.
///
/// A failed layout leaves the phase at the step that failed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PaginatorPhase {
    /// Nothing is rendered, or markup is being handed to the surface.
    #[default]
    Loading,
    /// Markup is rendered; geometry is being measured.
    Measuring,
    /// Pagination state is valid and the surface is visible.
    Ready,
}

/// The page of a chapter that is shown once it is laid out.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Landing {
    #[default]
    FirstPage,
    /// Used when moving backward into the previous chapter.
    LastPage,
}

/// Pagination of the currently rendered chapter.
///
/// Pages are `1`-based; `1 <= current_page <= page_count` always holds.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PaginationState {
    /// Horizontal distance between the starts of consecutive pages.
    pub page_width: f64,
    pub page_count: usize,
    pub current_page: usize,
    pub current_chapter: usize,
    /// Set while a backward chapter transition is being laid out.
    pub land_on_last_page: bool,
}

impl PaginationState {
    /// Scroll offset of the left edge of `page`.
    pub fn offset_of(&self, page: usize) -> f64 {
        page.saturating_sub(1) as f64 * self.page_width
    }

    pub fn is_first_page(&self) -> bool {
        self.current_page == 1
    }

    pub fn is_last_page(&self) -> bool {
        self.current_page == self.page_count
    }
}

/// Returns `true` if a filler column must be appended so the final page is
/// fully occupied: the fractional part of `scroll_width / page_width` is at
/// most one half.
///
/// ```
/// # use rpage::reader::needs_filler;
/// assert!(needs_filler(340.0, 100.0));
/// assert!(needs_filler(300.0, 100.0));
/// assert!(!needs_filler(380.0, 100.0));
/// ```
pub fn needs_filler(scroll_width: f64, page_width: f64) -> bool {
    (scroll_width / page_width).fract() <= 0.5
}

/// Number of pages spanned by `scroll_width`; at least one.
///
/// ```
/// # use rpage::reader::page_count;
/// assert_eq!(4, page_count(400.0, 100.0));
/// assert_eq!(4, page_count(380.0, 100.0));
/// assert_eq!(1, page_count(0.0, 100.0));
/// ```
pub fn page_count(scroll_width: f64, page_width: f64) -> usize {
    ((scroll_width / page_width).ceil() as usize).max(1)
}

/// Lays out chapters on a [`RenderSurface`] and moves between their pages.
#[derive(Debug, Default)]
pub struct Paginator {
    phase: PaginatorPhase,
    state: Option<PaginationState>,
}

impl Paginator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> PaginatorPhase {
        self.phase
    }

    /// The pagination of the chapter on display.
    ///
    /// [`None`] until a layout succeeds, and again after a layout fails.
    pub fn state(&self) -> Option<&PaginationState> {
        self.state.as_ref()
    }

    /// Renders `content` on `surface` and computes its pagination.
    ///
    /// The surface stays hidden between rendering and the final scroll.
    /// In [`ColumnMode::Double`], a filler column is appended when
    /// [`needs_filler`] holds, and the page count is measured afterward.
    /// In [`ColumnMode::Single`], the surface is resized to the content
    /// height and the chapter is a single page.
    ///
    /// The previous pagination is discarded before the surface is touched,
    /// so a failed layout leaves nothing to navigate.
    ///
    /// # Errors
    /// - [`ReaderError::Surface`]: The surface could not render the markup.
    /// - [`ReaderError::InvalidPageWidth`]: The measured page width is not positive.
    pub fn layout<S: RenderSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        content: &ChapterContent,
        layout: &LayoutConfig,
        style: &StyleConfig,
        landing: Landing,
    ) -> ReaderResult<PaginationState> {
        self.phase = PaginatorPhase::Loading;
        self.state = None;
        surface.set_visible(false);

        let stylesheet = style.stylesheet(layout, surface.viewport_width() / IMAGE_WIDTH_DIVISOR);
        surface
            .render(content.markup(), &stylesheet)
            .map_err(ReaderError::Surface)?;
        surface.wait_for_images();

        self.phase = PaginatorPhase::Measuring;
        let measurement = surface.measure();
        let page_width = measurement.client_width - measurement.margin_left - measurement.margin_right
            + layout.column_gap;

        if page_width.is_nan() || page_width <= 0.0 {
            return Err(ReaderError::InvalidPageWidth(page_width));
        }

        let page_count = match layout.column_mode {
            ColumnMode::Double => {
                let mut scroll_width = measurement.scroll_width;

                if needs_filler(scroll_width, page_width) {
                    surface.append_filler();
                    scroll_width = surface.measure().scroll_width;
                }
                page_count(scroll_width, page_width)
            }
            ColumnMode::Single => {
                surface.set_height(measurement.scroll_height);
                1
            }
        };
        let current_page = match landing {
            Landing::FirstPage => 1,
            Landing::LastPage => page_count,
        };
        let state = PaginationState {
            page_width,
            page_count,
            current_page,
            current_chapter: content.index(),
            land_on_last_page: false,
        };

        surface.scroll_to(state.offset_of(current_page));
        surface.set_visible(true);
        self.phase = PaginatorPhase::Ready;
        self.state = Some(state);

        log::debug!(
            "laid out chapter {} in {page_count} pages of width {page_width}",
            content.index(),
        );
        Ok(state)
    }

    /// Advances one page within the chapter.
    ///
    /// Returns the new page, or [`None`] on the last page.
    pub fn next_page<S: RenderSurface + ?Sized>(&mut self, surface: &mut S) -> Option<usize> {
        let state = self.state.as_mut()?;

        if state.is_last_page() {
            return None;
        }
        state.current_page += 1;
        surface.scroll_to(state.offset_of(state.current_page));
        Some(state.current_page)
    }

    /// Goes back one page within the chapter.
    ///
    /// Returns the new page, or [`None`] on the first page.
    pub fn prev_page<S: RenderSurface + ?Sized>(&mut self, surface: &mut S) -> Option<usize> {
        let state = self.state.as_mut()?;

        if state.is_first_page() {
            return None;
        }
        state.current_page -= 1;
        surface.scroll_to(state.offset_of(state.current_page));
        Some(state.current_page)
    }

    /// Jumps to `page`, clamped to the page range of the chapter.
    ///
    /// Returns the page shown, or [`None`] if nothing is laid out.
    pub fn go_to_page<S: RenderSurface + ?Sized>(&mut self, surface: &mut S, page: usize) -> Option<usize> {
        let state = self.state.as_mut()?;

        state.current_page = page.clamp(1, state.page_count);
        surface.scroll_to(state.offset_of(state.current_page));
        Some(state.current_page)
    }

    /// Marks the pending layout as a backward transition.
    pub(crate) fn expect_landing(&mut self, landing: Landing) {
        if let Some(state) = self.state.as_mut() {
            state.land_on_last_page = landing == Landing::LastPage;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needs_filler() {
        #[rustfmt::skip]
        let expected = [
            (true, 300.0, 100.0),
            (true, 340.0, 100.0),
            (true, 350.0, 100.0),
            (false, 351.0, 100.0),
            (false, 399.0, 100.0),
            (true, 0.0, 100.0),
        ];

        for (expected, scroll_width, page_width) in expected {
            assert_eq!(expected, needs_filler(scroll_width, page_width), "{scroll_width}/{page_width}");
        }
    }

    #[test]
    fn test_page_count() {
        #[rustfmt::skip]
        let expected = [
            (1, 0.0, 100.0),
            (1, 100.0, 100.0),
            (2, 100.5, 100.0),
            (4, 400.0, 100.0),
            (3, 2160.0, 720.0),
        ];

        for (expected, scroll_width, page_width) in expected {
            assert_eq!(expected, page_count(scroll_width, page_width), "{scroll_width}/{page_width}");
        }
    }

    #[test]
    fn test_offset_of() {
        let state = PaginationState {
            page_width: 720.0,
            page_count: 3,
            current_page: 1,
            current_chapter: 0,
            land_on_last_page: false,
        };

        assert_eq!(0.0, state.offset_of(1));
        assert_eq!(1440.0, state.offset_of(3));
        assert_eq!(0.0, state.offset_of(0));
    }
}
