//! Resource blobs referenced by rendered chapter markup.
//!
//! Processing a chapter replaces each relative stylesheet and image reference
//! with the URI of a [`ResourceHandle`]. The bytes behind every handle live in
//! the [`ResourceScope`] owned by that chapter's
//! [`ChapterContent`](crate::ebook::chapter::ChapterContent), and are released
//! together when the content is dropped.

pub(crate) mod consts;

use crate::util::sync::Shared;
use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::slice::Iter as SliceIter;

/// Opaque reference to a blob within a [`ResourceScope`].
///
/// Rendered as a URI of the form `rpage-resource://<n>`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResourceHandle(usize);

impl ResourceHandle {
    pub const SCHEME: &'static str = "rpage-resource://";

    /// The URI substituted into chapter markup.
    pub fn uri(&self) -> String {
        self.to_string()
    }

    /// Parses a URI previously produced by [`Self::uri`].
    ///
    /// ```
    /// # use rpage::ebook::resource::ResourceHandle;
    /// assert!(ResourceHandle::parse("rpage-resource://0").is_some());
    /// assert!(ResourceHandle::parse("../Images/a.png").is_none());
    /// ```
    pub fn parse(uri: &str) -> Option<Self> {
        uri.strip_prefix(Self::SCHEME)?.parse().ok().map(Self)
    }
}

impl Display for ResourceHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", Self::SCHEME, self.0)
    }
}

/// The bytes of a single archive resource.
#[derive(Clone, Debug)]
pub struct ResourceBlob {
    path: String,
    media_type: String,
    data: Shared<[u8]>,
}

impl ResourceBlob {
    /// Archive path the blob was read from.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// A cheap, shared reference to the bytes.
    pub fn shared(&self) -> Shared<[u8]> {
        Shared::clone(&self.data)
    }
}

/// Path-keyed arena of [`ResourceBlob`]s belonging to one rendered chapter.
///
/// A path referenced several times is read and stored once.
#[derive(Debug, Default)]
pub struct ResourceScope {
    blobs: Vec<ResourceBlob>,
    by_path: HashMap<String, ResourceHandle>,
}

impl ResourceScope {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Returns the handle of `path`, calling `load` only if the path
    /// is not yet part of this scope.
    pub(crate) fn get_or_insert_with<E>(
        &mut self,
        path: &str,
        media_type: impl FnOnce() -> String,
        load: impl FnOnce() -> Result<Vec<u8>, E>,
    ) -> Result<ResourceHandle, E> {
        if let Some(handle) = self.by_path.get(path) {
            return Ok(*handle);
        }
        let handle = ResourceHandle(self.blobs.len());

        self.blobs.push(ResourceBlob {
            path: path.to_owned(),
            media_type: media_type(),
            data: Shared::from(load()?),
        });
        self.by_path.insert(path.to_owned(), handle);
        Ok(handle)
    }

    pub fn get(&self, handle: ResourceHandle) -> Option<&ResourceBlob> {
        self.blobs.get(handle.0)
    }

    /// Dereferences a `rpage-resource://` URI found in processed markup.
    pub fn resolve_uri(&self, uri: &str) -> Option<&ResourceBlob> {
        ResourceHandle::parse(uri).and_then(|handle| self.get(handle))
    }

    pub fn by_path(&self, path: &str) -> Option<&ResourceBlob> {
        self.by_path.get(path).and_then(|&handle| self.get(handle))
    }

    pub fn iter(&self) -> SliceIter<'_, ResourceBlob> {
        self.blobs.iter()
    }

    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

impl Drop for ResourceScope {
    fn drop(&mut self) {
        if !self.blobs.is_empty() {
            log::debug!("releasing {} chapter resources", self.blobs.len());
        }
    }
}
