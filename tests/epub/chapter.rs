use crate::epub::util::TestEpub::File;
use rpage::ebook::errors::EbookError;
use rpage::ebook::resource::ResourceHandle;
use rpage::reader::errors::ReaderError;

#[test]
fn test_chapter_references() {
    let epub = File.open();
    let chapter = epub.chapter(0).unwrap();
    let resources = chapter.resources();

    assert_eq!(0, chapter.index());
    assert_eq!("OEBPS/Text/c1.xhtml", chapter.path());
    // The stylesheet and the cover; the missing and remote images are kept as-is
    assert_eq!(2, resources.len());

    let css = resources.by_path("OEBPS/Styles/main.css").unwrap();
    let image = resources.by_path("OEBPS/Images/cover.png").unwrap();

    assert_eq!("text/css", css.media_type());
    assert_eq!("image/png", image.media_type());
    assert_eq!(epub.cover().unwrap().unwrap(), image.data());

    let markup = chapter.markup();
    assert!(!markup.contains("../Styles/main.css"));
    assert!(!markup.contains("../Images/cover.png"));
    assert!(markup.contains(r#"src="../Images/missing.png""#));
    assert!(markup.contains(r#"src="https://example.com/remote.png""#));
    assert!(markup.contains("Call me Ishmael."));

    let uris = markup
        .match_indices(ResourceHandle::SCHEME)
        .map(|(start, _)| {
            let end = start + markup[start..].find('"').unwrap();
            &markup[start..end]
        })
        .collect::<Vec<_>>();

    assert_eq!(2, uris.len());
    for uri in uris {
        assert!(!resources.resolve_uri(uri).unwrap().data().is_empty());
    }
}

#[test]
fn test_shared_resources_are_scoped_per_chapter() {
    let epub = File.open();
    let first = epub.chapter(1).unwrap();
    let second = epub.chapter(2).unwrap();

    assert_eq!(1, first.resources().len());
    assert_eq!(1, second.resources().len());
    assert_eq!(
        first.resources().by_path("OEBPS/Styles/main.css").unwrap().data(),
        second.resources().by_path("OEBPS/Styles/main.css").unwrap().data()
    );
}

#[test]
fn test_chapter_out_of_bounds() {
    let epub = File.open();

    assert!(matches!(
        epub.chapter(3),
        Err(EbookError::Reader(ReaderError::ChapterOutOfBounds { index: 3, len: 3 }))
    ));
}
