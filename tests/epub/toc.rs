use crate::epub::util::TestEpub::{Dir, File};
use rpage::epub::{EpubSettings, TocFormat};

#[rustfmt::skip]
const EXPECTED: [(&str, &str, &str, &str); 3] = [
    ("Loomings", "OEBPS/Text", "c1.xhtml", "OEBPS/Text/c1.xhtml"),
    ("The Carpet-Bag", "OEBPS/Text", "c2.xhtml", "OEBPS/Text/c2.xhtml"),
    ("The Spouter-Inn", "OEBPS/Text", "chapter%20three.xhtml", "OEBPS/Text/chapter three.xhtml"),
];

#[test]
fn test_toc() {
    for epub in [Dir.open(), File.open()] {
        let toc = epub.toc();

        assert_eq!(EXPECTED.len(), toc.len());
        for ((label, directory, file, path), entry) in EXPECTED.into_iter().zip(toc) {
            assert_eq!(label, entry.label());
            assert_eq!(directory, entry.directory());
            assert_eq!(file, entry.file());
            assert_eq!(path, entry.path());
        }
    }
}

#[test]
fn test_preference() {
    let ncx = File.open_with(EpubSettings::builder().preferred_toc(TocFormat::Ncx));
    let xhtml = File.open_with(EpubSettings::builder().preferred_toc(TocFormat::Xhtml));

    // Both navigation documents describe the same chapters;
    // the landmarks `nav` of the XHTML document is ignored
    assert_eq!(ncx.toc(), xhtml.toc());
}

#[test]
fn test_every_chapter_loads() {
    let epub = File.open();

    for index in 0..epub.chapter_count() {
        let markup = epub.load_chapter(index).unwrap();
        assert!(markup.contains("<body>"), "chapter {index}");
    }
}
