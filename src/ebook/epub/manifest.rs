//! Manifest resources declared by the package document.

use std::slice::Iter as SliceIter;

/// A single `<item>` of the package manifest.
#[derive(Clone, Debug, PartialEq)]
pub struct ManifestItem {
    pub(crate) id: String,
    pub(crate) href: String,
    pub(crate) media_type: String,
    pub(crate) properties: Vec<String>,
}

impl ManifestItem {
    /// The unique `id` of the item.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Archive path of the resource, resolved against the package directory
    /// and percent-decoded.
    pub fn href(&self) -> &str {
        &self.href
    }

    /// Declared media type, such as `application/xhtml+xml`.
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// Whether the space-separated `properties` attribute contains `property`.
    pub fn has_property(&self, property: &str) -> bool {
        self.properties.iter().any(|value| value == property)
    }
}

/// Every resource declared within the package `<manifest>`, in document order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Manifest(pub(crate) Vec<ManifestItem>);

impl Manifest {
    /// Returns the item with the given `id`.
    pub fn by_id(&self, id: &str) -> Option<&ManifestItem> {
        self.0.iter().find(|item| item.id == id)
    }

    /// Returns the item located at the archive path `href`.
    pub fn by_href(&self, href: &str) -> Option<&ManifestItem> {
        self.0.iter().find(|item| item.href == href)
    }

    /// Returns the first item with the given media type.
    pub fn by_media_type(&self, media_type: &str) -> Option<&ManifestItem> {
        self.0
            .iter()
            .find(|item| item.media_type.eq_ignore_ascii_case(media_type))
    }

    /// Returns the first item whose `properties` contain `property`.
    pub fn by_property(&self, property: &str) -> Option<&ManifestItem> {
        self.0.iter().find(|item| item.has_property(property))
    }

    /// Iterates over all items in declaration order.
    pub fn iter(&self) -> SliceIter<'_, ManifestItem> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a Manifest {
    type Item = &'a ManifestItem;
    type IntoIter = SliceIter<'a, ManifestItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
