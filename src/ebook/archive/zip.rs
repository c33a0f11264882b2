use crate::ebook::archive::errors::ArchiveResult;
use crate::ebook::archive::{self, Archive, ArchiveError};
use crate::util::sync::Lock;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;
use zip::ZipArchive as Zip;
use zip::result::ZipError;

pub(crate) struct ZipArchive<R> {
    zip: Lock<Zip<R>>,
    size: u64,
}

impl<R: Read + Seek> ZipArchive<R> {
    /// `reader` (and optional `path` for a more descriptive error message).
    pub(crate) fn new(mut reader: R, path: Option<&Path>) -> ArchiveResult<Self> {
        let corrupt = |source: io::Error| ArchiveError::CorruptArchive {
            source,
            path: path.map(Path::to_path_buf),
        };
        let size = reader
            .seek(SeekFrom::End(0))
            .and_then(|size| reader.rewind().map(|_| size))
            .map_err(corrupt)?;

        Zip::new(reader)
            .map(|zip| Self {
                zip: Lock::new(zip),
                size,
            })
            .map_err(|error| corrupt(io::Error::from(error)))
    }
}

impl<#[cfg(feature = "threadsafe")] R: Send + Sync, #[cfg(not(feature = "threadsafe"))] R> Archive
    for ZipArchive<R>
where
    R: Read + Seek + 'static,
{
    fn read_bytes(&self, path: &str) -> ArchiveResult<Vec<u8>> {
        let mut zip = self.zip.lock().map_err(|_| ArchiveError::CannotRead {
            source: io::Error::other("Poisoned ZipArchive"),
            path: path.to_owned(),
        })?;
        let mut file = zip
            .by_name(archive::entry_name(path))
            .map_err(|error| match error {
                ZipError::FileNotFound => ArchiveError::ResourceNotFound {
                    source: io::Error::from(error),
                    path: path.to_owned(),
                },
                error => ArchiveError::CannotRead {
                    source: io::Error::from(error),
                    path: path.to_owned(),
                },
            })?;
        let mut buf = Vec::with_capacity(usize::try_from(file.size()).unwrap_or_default());

        file.read_to_end(&mut buf)
            .map(|_| buf)
            .map_err(|error| ArchiveError::CannotRead {
                source: error,
                path: path.to_owned(),
            })
    }

    fn byte_size(&self) -> u64 {
        self.size
    }
}
