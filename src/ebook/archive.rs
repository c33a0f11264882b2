pub(super) mod directory;
pub(super) mod errors;
#[cfg(test)]
pub(crate) mod memory;
pub(super) mod zip;

use crate::ebook::archive::directory::DirectoryArchive;
use crate::ebook::archive::errors::{ArchiveError, ArchiveResult};
use crate::ebook::archive::zip::ZipArchive;
use crate::util;
use crate::util::sync::SendAndSync;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub(crate) trait Archive: SendAndSync {
    /// Reads the raw bytes of the entry at `path` (relative to the archive root).
    fn read_bytes(&self, path: &str) -> ArchiveResult<Vec<u8>>;

    /// Total size in bytes of the container.
    fn byte_size(&self) -> u64;

    fn read_str(&self, path: &str) -> ArchiveResult<String> {
        util::utf::into_utf8_str(self.read_bytes(path)?).map_err(|source| {
            ArchiveError::InvalidUtf8Resource {
                source,
                path: path.to_owned(),
            }
        })
    }
}

/// Archive entries are addressed without a leading slash.
///
/// `/OEBPS/toc.ncx` -> `OEBPS/toc.ncx`
fn entry_name(path: &str) -> &str {
    path.strip_prefix('/').unwrap_or(path)
}

/// Unzip the file if it is not directory.
///
/// If it is, the contents can be accessed directly,
/// which makes using a zip file unnecessary.
pub(super) fn get_archive(path: &Path) -> ArchiveResult<Box<dyn Archive>> {
    Ok(if path.is_file() {
        let file = File::open(path).map_err(|error| ArchiveError::CorruptArchive {
            source: error,
            path: Some(path.to_path_buf()),
        })?;
        Box::new(ZipArchive::new(BufReader::new(file), Some(path))?)
    } else {
        Box::new(DirectoryArchive::new(path)?)
    })
}
