use crate::ebook::epub::consts::{self, bytes};
use crate::ebook::epub::errors::EpubError;
use crate::ebook::epub::parser::EpubParser;
use crate::parser::ParserResult;
use crate::parser::xml::{XmlElement, XmlReader};
use crate::util::uri;
use quick_xml::events::Event;

impl EpubParser<'_> {
    /// Parses `META-INF/container.xml` and retrieves the package `.opf` file location.
    ///
    /// Unparsable markup is treated the same as a missing `rootfile`.
    pub(super) fn parse_container(&self, data: &str) -> ParserResult<String> {
        let mut reader = XmlReader::from_str(data);

        while let Some(event) = reader.next() {
            let el = match event.map_err(|_| EpubError::MissingRootfile)? {
                Event::Start(el) | Event::Empty(el) if el.is_local_name(bytes::ROOT_FILE) => el,
                _ => continue,
            };
            // Although rare, multiple package.opf locations could exist.
            // Only accept the first path as it is the default
            let Some(package_file) = el.get_attribute(consts::FULL_PATH) else {
                continue;
            };
            let package_file = uri::resolve_path("", &uri::decode(&package_file));

            if !package_file.is_empty() {
                return Ok(package_file);
            }
        }
        Err(EpubError::MissingRootfile.into())
    }
}
