use crate::reader::mock::{Call, MockSurface};
use crate::reader::{dangling_epub, open_example_epub, session, session_with};
use rpage::ebook::errors::{ArchiveError, EbookError};
use rpage::reader::errors::ReaderError;
use rpage::reader::{Applied, ColumnMode, Landing, Navigation, PaginatorPhase, StyleConfig};

#[test]
fn test_filler_page() {
    let epub = open_example_epub();
    let mut session = session(&epub);
    let state = session.go_to_chapter(0).unwrap();

    // 340 / 100 leaves half a page or less; a filler makes it 400 wide
    assert_eq!(100.0, state.page_width);
    assert_eq!(4, state.page_count);
    assert_eq!(1, state.current_page);
    assert_eq!(0, state.current_chapter);
    assert!(!state.land_on_last_page);
    assert_eq!(PaginatorPhase::Ready, session.phase());

    #[rustfmt::skip]
    let expected = [
        Call::SetVisible(false),
        Call::Render,
        Call::WaitForImages,
        Call::AppendFiller,
        Call::ScrollTo(0.0),
        Call::SetVisible(true),
    ];
    assert_eq!(expected.as_slice(), session.surface().calls.as_slice());
}

#[test]
fn test_no_filler() {
    let epub = open_example_epub();
    let mut session = session(&epub);
    let state = session.go_to_chapter(1).unwrap();

    assert_eq!(2, state.page_count);
    assert_eq!(0, session.surface().count(&Call::AppendFiller));
}

#[test]
fn test_stylesheet_is_injected() {
    let epub = open_example_epub();
    let mut session = session(&epub);
    session.go_to_chapter(0).unwrap();

    let stylesheet = &session.surface().stylesheet;
    assert!(stylesheet.contains("column-gap: 20px;"));
    assert!(stylesheet.contains("font-size: 20px"));
}

#[test]
fn test_next_prev_inverse() {
    let epub = open_example_epub();
    let mut session = session(&epub);
    session.go_to_chapter(0).unwrap();
    session.go_to_page(2).unwrap();

    assert_eq!(Navigation::Page(3), session.next().unwrap());
    assert_eq!(200.0, session.surface().scroll_left);
    assert_eq!(Navigation::Page(2), session.prev().unwrap());
    assert_eq!(100.0, session.surface().scroll_left);
    assert_eq!(2, session.state().unwrap().current_page);
    assert_eq!(0, session.state().unwrap().current_chapter);
}

#[test]
fn test_book_boundaries() {
    let epub = open_example_epub();
    let mut session = session(&epub);

    let first = session.go_to_chapter(0).unwrap();
    assert_eq!(Navigation::Boundary, session.prev().unwrap());
    assert_eq!(Some(&first), session.state());

    session.go_to_chapter(2).unwrap();
    session.go_to_page(usize::MAX).unwrap();
    let last = *session.state().unwrap();

    assert_eq!(2, last.page_count);
    assert_eq!(Navigation::Boundary, session.next().unwrap());
    assert_eq!(Some(&last), session.state());
}

#[test]
fn test_chapter_transitions() {
    let epub = open_example_epub();
    let mut session = session(&epub);
    session.go_to_chapter(0).unwrap();

    for page in 2..=4 {
        assert_eq!(Navigation::Page(page), session.next().unwrap());
    }
    assert_eq!(Navigation::Chapter(1), session.next().unwrap());
    assert_eq!(1, session.state().unwrap().current_page);
    assert_eq!(0.0, session.surface().scroll_left);
    assert_eq!(1, session.content().unwrap().index());

    // Moving backward lands on the last page of the previous chapter
    assert_eq!(Navigation::Chapter(0), session.prev().unwrap());
    let state = session.state().unwrap();
    assert_eq!(0, state.current_chapter);
    assert_eq!(4, state.current_page);
    assert!(!state.land_on_last_page);
    assert_eq!(300.0, session.surface().scroll_left);
}

#[test]
fn test_pagination_is_idempotent() {
    let epub = open_example_epub();
    let mut session = session(&epub);

    let first = session.go_to_chapter(0).unwrap();
    let second = session.go_to_chapter(0).unwrap();
    let relayout = session.relayout().unwrap().unwrap();

    assert_eq!(first, second);
    assert_eq!(first, relayout);
}

#[test]
fn test_go_to_page_is_clamped() {
    let epub = open_example_epub();
    let mut session = session(&epub);
    session.go_to_chapter(0).unwrap();

    #[rustfmt::skip]
    let expected = [
        (1, 0),
        (3, 3),
        (4, 9),
        (1, 1),
    ];

    for (expected, page) in expected {
        assert_eq!(expected, session.go_to_page(page).unwrap());
        assert_eq!((expected - 1) as f64 * 100.0, session.surface().scroll_left);
    }
}

#[test]
fn test_stale_render_is_discarded() {
    let epub = open_example_epub();
    let mut session = session(&epub);

    let slow = session.begin(1, Landing::FirstPage).unwrap();
    let fast = session.begin(2, Landing::FirstPage).unwrap();
    assert!(!session.is_current(slow));
    assert!(session.is_current(fast));

    let slow = session.prepare(slow).unwrap();
    let fast = session.prepare(fast).unwrap();

    assert_eq!(Applied::Stale, session.apply(slow).unwrap());
    assert!(session.state().is_none());
    assert_eq!(0, session.surface().count(&Call::Render));

    let Applied::Rendered(state) = session.apply(fast).unwrap() else {
        panic!("Expected the latest render to be applied");
    };
    assert_eq!(2, state.current_chapter);
    assert_eq!(2, session.content().unwrap().index());
}

#[test]
fn test_superseded_after_apply() {
    let epub = open_example_epub();
    let mut session = session(&epub);

    let ticket = session.begin(1, Landing::LastPage).unwrap();
    let prepared = session.prepare(ticket).unwrap();
    session.go_to_chapter(0).unwrap();

    assert_eq!(Applied::Stale, session.apply(prepared).unwrap());
    assert_eq!(0, session.state().unwrap().current_chapter);
}

#[test]
fn test_landing_flag_while_pending() {
    let epub = open_example_epub();
    let mut session = session(&epub);
    session.go_to_chapter(1).unwrap();

    let ticket = session.begin(0, Landing::LastPage).unwrap();
    assert!(session.state().unwrap().land_on_last_page);

    let prepared = session.prepare(ticket).unwrap();
    let Applied::Rendered(state) = session.apply(prepared).unwrap() else {
        panic!("Expected the render to be applied");
    };
    assert_eq!(4, state.current_page);
    assert!(!state.land_on_last_page);
}

#[test]
fn test_single_column() {
    let epub = open_example_epub();
    let mut session = session(&epub);
    session.go_to_chapter(0).unwrap();
    session.go_to_page(3).unwrap();

    let state = session.set_column_mode(ColumnMode::Single).unwrap().unwrap();

    assert_eq!(1, state.page_count);
    assert_eq!(1, state.current_page);
    assert_eq!(0, state.current_chapter);
    assert_eq!(1, session.surface().count(&Call::SetHeight(680.0)));
    assert!(!session.surface().stylesheet.contains("columns: 2;"));

    // Navigation is chapter-level only
    assert_eq!(Navigation::Chapter(1), session.next().unwrap());
    assert_eq!(Navigation::Chapter(0), session.prev().unwrap());
    assert_eq!(Navigation::Boundary, session.prev().unwrap());
}

#[test]
fn test_restyle_resets_page() {
    let epub = open_example_epub();
    let mut session = session(&epub);
    session.go_to_chapter(0).unwrap();
    session.go_to_page(4).unwrap();

    let style = StyleConfig::builder().font_size(28).build();
    let state = session.set_style(style).unwrap().unwrap();

    assert_eq!(1, state.current_page);
    assert_eq!(0, state.current_chapter);
    assert!(session.surface().stylesheet.contains("font-size: 28px"));

    let state = session.set_column_gap(40.0).unwrap().unwrap();
    assert_eq!(120.0, state.page_width);
}

#[test]
fn test_restyle_before_render() {
    let epub = open_example_epub();
    let mut session = session(&epub);

    assert_eq!(None, session.set_style(StyleConfig::default()).unwrap());
    assert_eq!(0, session.surface().count(&Call::Render));
}

#[test]
fn test_invalid_page_width() {
    let epub = open_example_epub();
    let mut surface = MockSurface::new();
    surface.client_width = 10.0;
    surface.margin = 20.0;
    let mut session = session_with(&epub, surface);

    assert!(matches!(
        session.go_to_chapter(0),
        Err(EbookError::Reader(ReaderError::InvalidPageWidth(width))) if width == -10.0
    ));
    assert_eq!(PaginatorPhase::Measuring, session.phase());
    assert!(session.state().is_none());
}

#[test]
fn test_failed_layout_discards_pagination() {
    let epub = open_example_epub();
    let mut session = session(&epub);
    session.go_to_chapter(0).unwrap();
    session.go_to_page(4).unwrap();

    // Page width becomes 100 - 140 + 20
    session.surface_mut().margin = 70.0;
    assert!(matches!(
        session.next(),
        Err(EbookError::Reader(ReaderError::InvalidPageWidth(width))) if width == -20.0
    ));

    // Chapter 1 is on the surface, but nothing of chapter 0 may drive navigation
    assert!(session.state().is_none());
    assert_eq!(1, session.content().unwrap().index());
    assert!(!session.surface().visible);
    assert!(matches!(
        session.prev(),
        Err(EbookError::Reader(ReaderError::NotRendered))
    ));
    assert!(matches!(
        session.next(),
        Err(EbookError::Reader(ReaderError::NotRendered))
    ));
    assert!(matches!(session.go_to_page(3), Err(ReaderError::NotRendered)));
    assert_eq!(300.0, session.surface().scroll_left);

    session.surface_mut().margin = 10.0;
    let state = session.relayout().unwrap().unwrap();

    assert_eq!(1, state.current_chapter);
    assert_eq!(1, state.current_page);
    assert_eq!(2, state.page_count);
    assert!(session.surface().visible);
    assert_eq!(Navigation::Page(2), session.next().unwrap());
}

#[test]
fn test_failed_restyle_restores_settings() {
    let epub = open_example_epub();
    let mut session = session(&epub);
    session.go_to_chapter(0).unwrap();

    // Page width becomes 100 - 400 + 20
    session.surface_mut().margin = 200.0;
    assert!(matches!(
        session.set_style(StyleConfig::builder().font_size(28).build()),
        Err(ReaderError::InvalidPageWidth(_))
    ));
    assert_eq!(20, session.style().font_size);
    assert!(session.state().is_none());

    assert!(matches!(
        session.set_column_gap(40.0),
        Err(ReaderError::InvalidPageWidth(_))
    ));
    assert_eq!(20.0, session.layout().column_gap);
    assert!(matches!(
        session.next(),
        Err(EbookError::Reader(ReaderError::NotRendered))
    ));

    session.surface_mut().margin = 10.0;
    let state = session.relayout().unwrap().unwrap();

    assert_eq!(100.0, state.page_width);
    assert_eq!(4, state.page_count);
    assert!(session.surface().stylesheet.contains("font-size: 20px"));
}

#[test]
fn test_surface_error() {
    let epub = open_example_epub();
    let mut surface = MockSurface::new();
    surface.fail_render = true;
    let mut session = session_with(&epub, surface);

    assert!(matches!(
        session.go_to_chapter(0),
        Err(EbookError::Reader(ReaderError::Surface(_)))
    ));
    assert_eq!(PaginatorPhase::Loading, session.phase());
    assert!(!session.surface().visible);
}

#[test]
fn test_navigation_requires_render() {
    let epub = open_example_epub();
    let mut session = session(&epub);

    assert!(matches!(
        session.next(),
        Err(EbookError::Reader(ReaderError::NotRendered))
    ));
    assert!(matches!(session.go_to_page(1), Err(ReaderError::NotRendered)));
}

#[test]
fn test_chapter_out_of_bounds() {
    let epub = open_example_epub();
    let mut session = session(&epub);

    assert!(matches!(
        session.go_to_chapter(3),
        Err(EbookError::Reader(ReaderError::ChapterOutOfBounds { index: 3, len: 3 }))
    ));
    assert!(matches!(
        session.begin(7, Landing::FirstPage),
        Err(ReaderError::ChapterOutOfBounds { index: 7, len: 3 })
    ));
}

#[test]
fn test_missing_chapter_document() {
    let epub = dangling_epub();
    let mut session = session(&epub);
    session.go_to_chapter(0).unwrap();
    session.go_to_page(4).unwrap();

    assert!(matches!(
        session.go_to_chapter(1),
        Err(EbookError::Archive(ArchiveError::ResourceNotFound { .. }))
    ));
    // The failure happens before the surface is touched
    assert_eq!(1, session.surface().count(&Call::Render));
    assert_eq!(0, session.content().unwrap().index());
    assert_eq!(4, session.state().unwrap().current_page);

    // Moving forward off the last page runs into the same chapter
    assert!(matches!(
        session.next(),
        Err(EbookError::Archive(ArchiveError::ResourceNotFound { .. }))
    ));

    let state = session.go_to_chapter(2).unwrap();
    assert_eq!(2, state.current_chapter);
    assert_eq!(2, state.page_count);
}
