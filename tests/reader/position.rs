use crate::reader::{open_example_epub, session};
use rpage::reader::errors::ReaderError;
use rpage::search::{SearchOptions, TextIndexer};

#[test]
fn test_text_positions() {
    let epub = open_example_epub();
    let mut session = session(&epub);
    let state = session.go_to_chapter(0).unwrap();
    let mapper = session.text_positions().unwrap();

    assert!(!mapper.positions().is_empty());
    assert!(mapper.positions().iter().all(|p| p.text == p.text.trim() && !p.text.is_empty()));
    assert!(
        mapper
            .positions()
            .iter()
            .all(|p| p.page_index < state.page_count)
    );

    let heading = mapper.find_position("loomings").unwrap();
    assert_eq!(0, heading.page_index);
    assert_eq!(heading, mapper.positions_on_page(0).next().unwrap());

    let total = (0..state.page_count)
        .map(|page| mapper.positions_on_page(page).count())
        .sum::<usize>();
    assert_eq!(mapper.positions().len(), total);
}

#[test]
fn test_text_positions_require_render() {
    let epub = open_example_epub();
    let mut session = session(&epub);

    assert!(matches!(session.text_positions(), Err(ReaderError::NotRendered)));
}

#[test]
fn test_reveal() {
    let epub = open_example_epub();
    let mut indexer = TextIndexer::new();
    indexer.build_index(&epub);

    let results = indexer.search("whale", &SearchOptions::default()).unwrap();
    let result = results.iter().find(|r| r.chapter_index() == 0).unwrap();

    let mut session = session(&epub);
    session.go_to_chapter(2).unwrap();

    let page = session.reveal(result).unwrap().unwrap();
    let expected = session
        .text_positions()
        .unwrap()
        .find_position(result.match_text())
        .map(|p| p.page_index + 1);

    assert_eq!(Some(page), expected);
    assert_eq!(0, session.state().unwrap().current_chapter);
    assert_eq!(page, session.state().unwrap().current_page);
    assert_eq!((page - 1) as f64 * 100.0, session.surface().scroll_left);
    assert_eq!(vec!["whale".to_owned()], session.surface().highlighted);
}

#[test]
fn test_reveal_across_case() {
    let epub = open_example_epub();
    let mut indexer = TextIndexer::new();
    indexer.build_index(&epub);

    let results = indexer.search("whale", &SearchOptions::default()).unwrap();
    let result = results.iter().find(|r| r.chapter_index() == 2).unwrap();
    assert_eq!("WHALE", result.match_text());

    let mut session = session(&epub);
    assert_eq!(Some(1), session.reveal(result).unwrap());
    assert_eq!(2, session.state().unwrap().current_chapter);
    assert_eq!(vec!["WHALE".to_owned()], session.surface().highlighted);
}
