// General
pub(crate) const ID: &str = "id";
pub(crate) const HREF: &str = "href";
pub(crate) const SRC: &str = "src";

// Paths
pub(crate) const CONTAINER: &str = "META-INF/container.xml";

// Container attributes
pub(crate) const FULL_PATH: &str = "full-path";

// Metadata attributes
pub(crate) const NAME: &str = "name";
pub(crate) const CONTENT: &str = "content";
pub(crate) const COVER: &str = "cover";

// Manifest attributes
pub(crate) const MEDIA_TYPE: &str = "media-type";
pub(crate) const PROPERTIES: &str = "properties";
pub(crate) const COVER_IMAGE: &str = "cover-image";
pub(crate) const NAV_PROPERTY: &str = "nav";
pub(crate) const NCX_ID: &str = "ncx";

// Spine attributes
pub(crate) const IDREF: &str = "idref";
pub(crate) const LINEAR: &str = "linear";
pub(crate) const TOC: &str = "toc";

// Toc attributes
pub(crate) const EPUB_TYPE: &str = "epub:type";

// Chapter attributes
pub(crate) const REL: &str = "rel";
pub(crate) const STYLESHEET: &str = "stylesheet";

// Media types
pub(crate) const NCX_TYPE: &str = "application/x-dtbncx+xml";

// constants where calling str.as_bytes() is not possible
pub(crate) mod bytes {
    pub(crate) const ROOT_FILE: &[u8] = b"rootfile";
    pub(crate) const METADATA: &[u8] = b"metadata";
    pub(crate) const SPINE: &[u8] = b"spine";
    pub(crate) const META: &[u8] = b"meta";

    // Dublin Core, matched by local name
    pub(crate) const TITLE: &[u8] = b"title";
    pub(crate) const CREATOR: &[u8] = b"creator";
    pub(crate) const PUBLISHER: &[u8] = b"publisher";
    pub(crate) const IDENTIFIER: &[u8] = b"identifier";
    pub(crate) const DATE: &[u8] = b"date";
    pub(crate) const LANGUAGE: &[u8] = b"language";

    pub(crate) const ITEM: &[u8] = b"item";
    pub(crate) const ITEMREF: &[u8] = b"itemref";

    pub(crate) const NAV: &[u8] = b"nav";
    pub(crate) const NAV_POINT: &[u8] = b"navPoint"; // NCX
    pub(crate) const NAV_LABEL: &[u8] = b"navLabel"; // NCX
    pub(crate) const NAV_CONTENT: &[u8] = b"content"; // NCX
    pub(crate) const ANCHOR: &[u8] = b"a";

    // Chapter markup
    pub(crate) const LINK: &[u8] = b"link";
    pub(crate) const IMG: &[u8] = b"img";
    pub(crate) const IMAGE: &[u8] = b"image"; // SVG
    pub(crate) const BODY: &[u8] = b"body";
    pub(crate) const SCRIPT: &[u8] = b"script";
    pub(crate) const STYLE: &[u8] = b"style";
}
