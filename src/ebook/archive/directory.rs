use crate::ebook::archive::errors::ArchiveResult;
use crate::ebook::archive::{self, Archive, ArchiveError};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// The contents of an unzipped EPUB.
#[derive(Debug)]
pub(crate) struct DirectoryArchive {
    root: PathBuf,
    size: u64,
}

impl DirectoryArchive {
    pub(crate) fn new(file: &Path) -> ArchiveResult<Self> {
        let root = match file.canonicalize() {
            Ok(dir) if dir.is_dir() => dir,
            Ok(_) => {
                return Err(ArchiveError::CorruptArchive {
                    path: Some(file.to_path_buf()),
                    source: io::Error::from(io::ErrorKind::NotADirectory),
                });
            }
            Err(source) => {
                return Err(ArchiveError::CorruptArchive {
                    path: Some(file.to_path_buf()),
                    source,
                });
            }
        };
        let size = directory_size(&root)?;

        Ok(Self { root, size })
    }

    fn get_path(&self, path: &str) -> ArchiveResult<PathBuf> {
        let not_found = |source| ArchiveError::ResourceNotFound {
            source,
            path: path.to_owned(),
        };
        let resolved = self
            .root
            .join(archive::entry_name(path))
            .canonicalize()
            .map_err(not_found)?;

        // Path traversal mitigation
        if resolved.starts_with(&self.root) && resolved.is_file() {
            Ok(resolved)
        } else {
            Err(not_found(io::Error::new(
                io::ErrorKind::NotFound,
                "Provided path is inaccessible or not a file",
            )))
        }
    }
}

impl Archive for DirectoryArchive {
    fn read_bytes(&self, path: &str) -> ArchiveResult<Vec<u8>> {
        fs::read(self.get_path(path)?).map_err(|source| ArchiveError::CannotRead {
            source,
            path: path.to_owned(),
        })
    }

    fn byte_size(&self) -> u64 {
        self.size
    }
}

fn directory_size(path: &Path) -> ArchiveResult<u64> {
    let unreadable = |source: io::Error, path: &Path| ArchiveError::CorruptArchive {
        path: Some(path.to_path_buf()),
        source,
    };
    let mut size = 0;

    for entry in path.read_dir().map_err(|err| unreadable(err, path))? {
        let entry = entry.map_err(|err| unreadable(err, path))?;
        let metadata = entry
            .metadata()
            .map_err(|err| unreadable(err, &entry.path()))?;

        // Symlinks are skipped to avoid escaping the root
        if metadata.is_symlink() {
            continue;
        }
        size += if metadata.is_dir() {
            directory_size(&entry.path())?
        } else {
            metadata.len()
        };
    }
    Ok(size)
}
