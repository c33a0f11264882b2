//! Paginated reading of an [`Epub`] on a host-provided surface.
//!
//! # Overview
//! A [`ReaderSession`] ties an [`Epub`] to a [`RenderSurface`] and keeps
//! track of the chapter and page on display. Chapters are taken in
//! [table of contents](crate::ebook::epub::Epub::toc) order.
//!
//! ## Components
//! - [`layout`]: Column and typography settings, and the injected stylesheet.
//! - [`paginator`]: Layout-driven page computation for one chapter.
//! - [`position`]: Mapping of rendered text to pages.
//! - [`surface`]: Traits implemented by the host.
//! - [`errors`]: Reader-related error types.
//!
//! ## Rendering and supersession
//! Navigating to a chapter happens in three steps so that slow loads can run
//! outside the session:
//! 1. [`ReaderSession::begin`] issues a [`RenderTicket`], superseding every
//!    ticket issued before it.
//! 2. [`ReaderSession::prepare`] loads and processes the chapter.
//! 3. [`ReaderSession::apply`] lays it out, unless a newer ticket exists,
//!    in which case the prepared chapter is discarded.
//!
//! [`ReaderSession::go_to_chapter`], [`ReaderSession::next`] and
//! [`ReaderSession::prev`] perform all three steps at once.

pub mod errors;
pub mod layout;
pub mod paginator;
pub mod position;
pub mod surface;

use crate::ebook::chapter::ChapterContent;
use crate::ebook::epub::Epub;
use crate::ebook::errors::EbookResult;
use crate::reader::errors::{ReaderError, ReaderResult};
use crate::search::SearchResult;

pub use self::layout::{ColumnMode, LayoutConfig, LayoutConfigBuilder, StyleConfig, StyleConfigBuilder, Theme};
pub use self::paginator::{Landing, PaginationState, Paginator, PaginatorPhase, needs_filler, page_count};
pub use self::position::{TextPosition, TextPositionMapper};
pub use self::surface::{
    HIGHLIGHT_CLASS, HIGHLIGHT_STYLE, Measurement, NodeOffset, RenderSurface, TextProbe,
    highlight_ranges,
};

/// Permission to lay out one chapter, issued by [`ReaderSession::begin`].
///
/// Only the most recently issued ticket of a session can be applied.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RenderTicket {
    generation: u64,
    chapter: usize,
    landing: Landing,
}

impl RenderTicket {
    pub fn chapter(&self) -> usize {
        self.chapter
    }

    pub fn landing(&self) -> Landing {
        self.landing
    }
}

/// A loaded and processed chapter awaiting [`ReaderSession::apply`].
#[derive(Debug)]
pub struct PreparedChapter {
    ticket: RenderTicket,
    content: ChapterContent,
}

impl PreparedChapter {
    pub fn ticket(&self) -> RenderTicket {
        self.ticket
    }

    pub fn content(&self) -> &ChapterContent {
        &self.content
    }
}

/// Outcome of [`ReaderSession::apply`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Applied {
    /// The chapter is laid out and displayed.
    Rendered(PaginationState),
    /// A newer ticket was issued; the prepared chapter was discarded.
    Stale,
}

/// Outcome of [`ReaderSession::next`] and [`ReaderSession::prev`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Navigation {
    /// Moved to the given `1`-based page of the current chapter.
    Page(usize),
    /// Moved into the chapter at the given index.
    Chapter(usize),
    /// Already at the first page of the first chapter, or the last page of
    /// the last chapter; nothing changed.
    Boundary,
}

/// A reading session displaying one chapter of an [`Epub`] at a time.
///
/// # Examples
/// ```no_run
/// # use rpage::reader::{Navigation, ReaderSession, RenderSurface};
/// # fn read<S: RenderSurface>(surface: S) -> rpage::ebook::errors::EbookResult<()> {
/// let epub = rpage::Epub::open("tests/ebooks/example_epub")?;
/// let mut session = ReaderSession::new(&epub, surface);
///
/// session.go_to_chapter(0)?;
/// while session.next()? != Navigation::Boundary {}
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ReaderSession<'ebook, S> {
    epub: &'ebook Epub,
    surface: S,
    layout: LayoutConfig,
    style: StyleConfig,
    paginator: Paginator,
    content: Option<ChapterContent>,
    generation: u64,
}

impl<'ebook, S: RenderSurface> ReaderSession<'ebook, S> {
    /// Creates a session with the default [`LayoutConfig`] and [`StyleConfig`].
    ///
    /// Nothing is rendered until a chapter is requested.
    pub fn new(epub: &'ebook Epub, surface: S) -> Self {
        Self::with_config(epub, surface, LayoutConfig::default(), StyleConfig::default())
    }

    pub fn with_config(epub: &'ebook Epub, surface: S, layout: LayoutConfig, style: StyleConfig) -> Self {
        Self {
            epub,
            surface,
            layout,
            style,
            paginator: Paginator::new(),
            content: None,
            generation: 0,
        }
    }

    pub fn epub(&self) -> &'ebook Epub {
        self.epub
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    pub fn phase(&self) -> PaginatorPhase {
        self.paginator.phase()
    }

    /// Pagination of the chapter on display, if any.
    pub fn state(&self) -> Option<&PaginationState> {
        self.paginator.state()
    }

    /// The chapter on display, if any.
    pub fn content(&self) -> Option<&ChapterContent> {
        self.content.as_ref()
    }

    /// Issues a ticket to render `chapter`, superseding all earlier tickets.
    ///
    /// # Errors
    /// - [`ReaderError::ChapterOutOfBounds`]: `chapter` is not a valid index.
    pub fn begin(&mut self, chapter: usize, landing: Landing) -> ReaderResult<RenderTicket> {
        let len = self.epub.chapter_count();

        if chapter >= len {
            return Err(ReaderError::ChapterOutOfBounds { index: chapter, len });
        }
        self.generation += 1;
        self.paginator.expect_landing(landing);

        Ok(RenderTicket {
            generation: self.generation,
            chapter,
            landing,
        })
    }

    /// Loads and processes the chapter of `ticket`.
    ///
    /// Does not touch the surface, and may be called for a ticket that has
    /// since been superseded.
    pub fn prepare(&self, ticket: RenderTicket) -> EbookResult<PreparedChapter> {
        Ok(PreparedChapter {
            ticket,
            content: self.epub.chapter(ticket.chapter)?,
        })
    }

    /// Returns `true` if `ticket` is the most recently issued ticket.
    pub fn is_current(&self, ticket: RenderTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Lays out a prepared chapter, replacing the chapter on display.
    ///
    /// The previous chapter and its resources are released. A stale
    /// `prepared` chapter is dropped without any effect.
    ///
    /// If the layout fails, the chapter still replaces [`Self::content`] but
    /// has no pagination, so navigation reports [`ReaderError::NotRendered`]
    /// until [`Self::relayout`] or another render succeeds.
    ///
    /// # Errors
    /// See [`Paginator::layout`].
    pub fn apply(&mut self, prepared: PreparedChapter) -> EbookResult<Applied> {
        if !self.is_current(prepared.ticket) {
            log::debug!(
                "discarding superseded render of chapter {}",
                prepared.ticket.chapter
            );
            return Ok(Applied::Stale);
        }
        let result = self.paginator.layout(
            &mut self.surface,
            &prepared.content,
            &self.layout,
            &self.style,
            prepared.ticket.landing,
        );

        self.content = Some(prepared.content);
        Ok(Applied::Rendered(result?))
    }

    fn render_chapter(&mut self, chapter: usize, landing: Landing) -> EbookResult<PaginationState> {
        let ticket = self.begin(chapter, landing)?;
        let prepared = self.prepare(ticket)?;

        match self.apply(prepared)? {
            Applied::Rendered(state) => Ok(state),
            Applied::Stale => Err(ReaderError::Superseded(chapter).into()),
        }
    }

    /// Renders `chapter` and shows its first page.
    ///
    /// # Errors
    /// - [`ReaderError::ChapterOutOfBounds`]: `chapter` is not a valid index.
    /// - Any error of [`Epub::chapter`] or [`Paginator::layout`].
    pub fn go_to_chapter(&mut self, chapter: usize) -> EbookResult<PaginationState> {
        self.render_chapter(chapter, Landing::FirstPage)
    }

    /// Moves forward one page, entering the next chapter after the last page.
    ///
    /// # Errors
    /// - [`ReaderError::NotRendered`]: No chapter is on display.
    /// - Any error of [`Self::go_to_chapter`].
    pub fn next(&mut self) -> EbookResult<Navigation> {
        let state = *self.state().ok_or(ReaderError::NotRendered)?;

        if let Some(page) = self.paginator.next_page(&mut self.surface) {
            return Ok(Navigation::Page(page));
        }
        let chapter = state.current_chapter + 1;

        if chapter < self.epub.chapter_count() {
            self.render_chapter(chapter, Landing::FirstPage)?;
            Ok(Navigation::Chapter(chapter))
        } else {
            Ok(Navigation::Boundary)
        }
    }

    /// Moves back one page, entering the previous chapter on its last page
    /// from the first page.
    ///
    /// # Errors
    /// - [`ReaderError::NotRendered`]: No chapter is on display.
    /// - Any error of [`Self::go_to_chapter`].
    pub fn prev(&mut self) -> EbookResult<Navigation> {
        let state = *self.state().ok_or(ReaderError::NotRendered)?;

        if let Some(page) = self.paginator.prev_page(&mut self.surface) {
            return Ok(Navigation::Page(page));
        }
        match state.current_chapter.checked_sub(1) {
            Some(chapter) => {
                self.render_chapter(chapter, Landing::LastPage)?;
                Ok(Navigation::Chapter(chapter))
            }
            None => Ok(Navigation::Boundary),
        }
    }

    /// Shows the `1`-based `page` of the current chapter, clamped to its page range.
    ///
    /// # Errors
    /// - [`ReaderError::NotRendered`]: No chapter is on display.
    pub fn go_to_page(&mut self, page: usize) -> ReaderResult<usize> {
        self.paginator
            .go_to_page(&mut self.surface, page)
            .ok_or(ReaderError::NotRendered)
    }

    /// Replaces the typography settings and lays the current chapter out again.
    ///
    /// Returns the new pagination, or [`None`] if nothing is on display.
    /// If the layout fails, the previous settings are restored; the chapter
    /// stays unpaginated until [`Self::relayout`] succeeds.
    pub fn set_style(&mut self, style: StyleConfig) -> ReaderResult<Option<PaginationState>> {
        let previous = std::mem::replace(&mut self.style, style);

        self.relayout().inspect_err(|_| self.style = previous)
    }

    /// Replaces the geometry settings and lays the current chapter out again.
    ///
    /// See [`Self::set_style`] regarding failures.
    pub fn set_layout(&mut self, layout: LayoutConfig) -> ReaderResult<Option<PaginationState>> {
        let previous = std::mem::replace(&mut self.layout, layout);

        self.relayout().inspect_err(|_| self.layout = previous)
    }

    /// See [`Self::set_layout`].
    pub fn set_column_mode(&mut self, column_mode: ColumnMode) -> ReaderResult<Option<PaginationState>> {
        self.set_layout(LayoutConfig {
            column_mode,
            ..self.layout.clone()
        })
    }

    /// See [`Self::set_layout`].
    pub fn set_column_gap(&mut self, column_gap: f64) -> ReaderResult<Option<PaginationState>> {
        self.set_layout(LayoutConfig {
            column_gap,
            ..self.layout.clone()
        })
    }

    /// Lays the chapter on display out again from its first page.
    ///
    /// Any pending ticket is superseded. On failure the chapter has no
    /// pagination until a later layout succeeds.
    pub fn relayout(&mut self) -> ReaderResult<Option<PaginationState>> {
        let Some(content) = &self.content else {
            return Ok(None);
        };
        self.generation += 1;

        self.paginator
            .layout(
                &mut self.surface,
                content,
                &self.layout,
                &self.style,
                Landing::FirstPage,
            )
            .map(Some)
    }
}

impl<S: RenderSurface + TextProbe> ReaderSession<'_, S> {
    /// Maps the rendered text of the current chapter to its pages.
    ///
    /// # Errors
    /// - [`ReaderError::NotRendered`]: No chapter is on display.
    pub fn text_positions(&mut self) -> ReaderResult<TextPositionMapper> {
        let state = *self.state().ok_or(ReaderError::NotRendered)?;
        // The page stride includes the gap already
        let column_gap = self.layout.column_gap;

        Ok(TextPositionMapper::analyze(
            &mut self.surface,
            state.page_width - column_gap,
            column_gap,
        ))
    }

    /// Navigates to the chapter and page containing a search `result` and
    /// highlights the matched text.
    ///
    /// Returns the `1`-based page shown, or [`None`] if the text could not be
    /// located in the rendered chapter, in which case nothing is highlighted.
    ///
    /// # Errors
    /// - Any error of [`Self::go_to_chapter`].
    pub fn reveal(&mut self, result: &SearchResult) -> EbookResult<Option<usize>> {
        let chapter = result.chapter_index();

        if self.state().is_none_or(|state| state.current_chapter != chapter) {
            self.go_to_chapter(chapter)?;
        }
        let mapper = self.text_positions()?;
        let Some(position) = mapper.find_position(result.match_text()) else {
            log::debug!("`{}` not found in chapter {chapter}", result.match_text());
            return Ok(None);
        };
        let page = self.go_to_page(position.page_index + 1)?;
        let highlighted = self.surface.highlight(result.match_text());

        log::trace!("highlighted {highlighted} occurrences on page {page}");
        Ok(Some(page))
    }
}
