use crate::ebook::archive::Archive;
use crate::ebook::archive::errors::{ArchiveError, ArchiveResult};
use std::collections::HashMap;
use std::io;

/// Archive entries held in memory, keyed by archive path.
#[derive(Default)]
pub(crate) struct MemoryArchive(HashMap<String, Vec<u8>>);

impl MemoryArchive {
    pub(crate) fn with(mut self, path: &str, data: impl Into<Vec<u8>>) -> Self {
        self.0.insert(path.to_owned(), data.into());
        self
    }
}

impl Archive for MemoryArchive {
    fn read_bytes(&self, path: &str) -> ArchiveResult<Vec<u8>> {
        self.0
            .get(super::entry_name(path))
            .cloned()
            .ok_or_else(|| ArchiveError::ResourceNotFound {
                source: io::Error::new(io::ErrorKind::NotFound, "Requested resource does not exist"),
                path: path.to_owned(),
            })
    }

    fn byte_size(&self) -> u64 {
        self.0.values().map(|data| data.len() as u64).sum()
    }
}
