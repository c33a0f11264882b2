//! The package spine, exposed for inspection only.
//!
//! Chapter order always follows the navigation document
//! ([`Epub::toc`](super::Epub::toc)); the spine never reorders it.

/// An `<itemref>` of the package spine.
#[derive(Clone, Debug, PartialEq)]
pub struct SpineEntry {
    pub(crate) idref: String,
    pub(crate) linear: bool,
}

impl SpineEntry {
    /// The id of the manifest item this entry references.
    pub fn idref(&self) -> &str {
        &self.idref
    }

    /// `false` when declared with `linear="no"` (auxiliary content).
    pub fn is_linear(&self) -> bool {
        self.linear
    }
}
