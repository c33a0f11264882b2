use rpage::Epub;
use rpage::epub::EpubSettings;
use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;
use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

pub const EXAMPLE_EPUB: &str = "tests/ebooks/example_epub";

pub enum TestEpub {
    /// Unzipped directory
    ///
    /// Mapped to: [`EXAMPLE_EPUB`]
    Dir,
    /// The same directory, zipped in memory
    File,
}

impl TestEpub {
    pub fn open(self) -> Epub {
        self.open_with(EpubSettings::default())
    }

    pub fn open_with(self, settings: impl Into<EpubSettings>) -> Epub {
        match self {
            Self::Dir => Epub::open_with(EXAMPLE_EPUB, settings).unwrap(),
            Self::File => Epub::read(Cursor::new(zip_directory(EXAMPLE_EPUB)), settings).unwrap(),
        }
    }
}

/// Zips every file beneath `root`, storing `mimetype` first and uncompressed.
pub fn zip_directory(root: &str) -> Vec<u8> {
    let root = Path::new(root);
    let mut files = Vec::new();
    collect_files(root, root, &mut files);
    files.sort_by_key(|(name, _)| name != "mimetype");

    zip_entries(
        files
            .iter()
            .map(|(name, data)| (name.as_str(), data.as_slice())),
    )
}

/// Creates an in-memory zip archive from `(name, data)` pairs.
pub fn zip_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a [u8])>) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

    for (name, data) in entries {
        let method = if name == "mimetype" {
            CompressionMethod::Stored
        } else {
            CompressionMethod::Deflated
        };
        let options = SimpleFileOptions::default().compression_method(method);

        writer.start_file(name, options).unwrap();
        writer.write_all(data).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

fn collect_files(root: &Path, dir: &Path, files: &mut Vec<(String, Vec<u8>)>) {
    for entry in fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();

        if path.is_dir() {
            collect_files(root, &path, files);
        } else {
            let name = path
                .strip_prefix(root)
                .unwrap()
                .components()
                .map(|component| component.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            files.push((name, fs::read(&path).unwrap()));
        }
    }
}
