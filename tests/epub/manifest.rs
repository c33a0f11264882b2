use crate::epub::util::TestEpub::File;

#[test]
fn test_manifest() {
    let epub = File.open();
    let manifest = epub.manifest();

    #[rustfmt::skip]
    let expected = [
        ("ncx", "OEBPS/toc.ncx", "application/x-dtbncx+xml"),
        ("nav", "OEBPS/nav.xhtml", "application/xhtml+xml"),
        ("c1", "OEBPS/Text/c1.xhtml", "application/xhtml+xml"),
        ("c2", "OEBPS/Text/c2.xhtml", "application/xhtml+xml"),
        ("c3", "OEBPS/Text/chapter three.xhtml", "application/xhtml+xml"),
        ("main-css", "OEBPS/Styles/main.css", "text/css"),
        ("cover-image", "OEBPS/Images/cover.png", "image/png"),
    ];

    assert_eq!(expected.len(), manifest.len());
    for ((id, href, media_type), item) in expected.into_iter().zip(manifest) {
        assert_eq!(id, item.id());
        assert_eq!(href, item.href());
        assert_eq!(media_type, item.media_type());
    }
}

#[test]
fn test_lookup() {
    let epub = File.open();
    let manifest = epub.manifest();

    assert_eq!("nav", manifest.by_property("nav").unwrap().id());
    assert_eq!("c3", manifest.by_href("OEBPS/Text/chapter three.xhtml").unwrap().id());
    assert_eq!("ncx", manifest.by_media_type("application/x-dtbncx+xml").unwrap().id());
    assert!(manifest.by_id("cover-image").unwrap().has_property("cover-image"));
    assert!(manifest.by_id("missing").is_none());
}
