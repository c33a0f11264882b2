use crate::epub::util::TestEpub::{Dir, File};

#[test]
fn test_metadata() {
    for epub in [Dir.open(), File.open()] {
        let metadata = epub.metadata();

        assert_eq!(Some("The Example Book"), metadata.title());
        // Whitespace runs are collapsed
        assert_eq!(Some("Jane Doe"), metadata.creator());
        assert_eq!(Some("Example & Sons"), metadata.publisher());
        assert_eq!(
            Some("urn:uuid:4f1b3a52-7d1e-4c9a-9b59-2f0b8f6d0c11"),
            metadata.identifier()
        );
        assert_eq!(Some("2024-05-01"), metadata.date());
        assert_eq!(Some("en"), metadata.language());
        assert_eq!(Some("OEBPS/Images/cover.png"), metadata.cover_path());
    }
}

#[test]
fn test_cover() {
    let epub = File.open();
    let cover = epub.cover().unwrap().unwrap();

    assert!(cover.starts_with(b"\x89PNG"));
    assert_eq!(cover, epub.read_resource_bytes("OEBPS/Images/cover.png").unwrap());
}

#[test]
fn test_byte_size() {
    let dir = Dir.open();
    let file = File.open();

    assert!(dir.metadata().byte_size() > 0);
    assert!(file.metadata().byte_size() > 0);
}
