pub(crate) mod mime {
    pub(crate) const XHTML: &str = "application/xhtml+xml";
    pub(crate) const CSS: &str = "text/css";
    pub(crate) const OCTET_STREAM: &str = "application/octet-stream";

    /// Fallback media type for resources absent from the manifest.
    pub(crate) fn from_extension(path: &str) -> &'static str {
        let extension = path
            .rsplit_once('.')
            .map(|(_, extension)| extension.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "css" => CSS,
            "xhtml" | "html" | "htm" => XHTML,
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            "gif" => "image/gif",
            "svg" => "image/svg+xml",
            "webp" => "image/webp",
            "otf" => "font/otf",
            "ttf" => "font/ttf",
            "woff" => "font/woff",
            "woff2" => "font/woff2",
            _ => OCTET_STREAM,
        }
    }

}
