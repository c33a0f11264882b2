use crate::epub::util::TestEpub::{Dir, File};

#[test]
fn test_spine() {
    for epub in [Dir.open(), File.open()] {
        #[rustfmt::skip]
        let expected = [
            ("nav", false),
            ("c1", true),
            ("c2", true),
            ("c3", true),
        ];
        let spine = epub.spine();

        assert_eq!(expected.len(), spine.len());
        for ((idref, linear), entry) in expected.into_iter().zip(spine) {
            assert_eq!(idref, entry.idref());
            assert_eq!(linear, entry.is_linear());
        }
    }
}

#[test]
fn test_spine_does_not_order_chapters() {
    let epub = File.open();

    // The non-linear nav document leads the spine but is not a chapter
    assert_eq!(4, epub.spine().len());
    assert_eq!(3, epub.chapter_count());
    assert_eq!("Loomings", epub.toc()[0].label());
}
