use crate::ebook::errors::UtfError;

const UTF_8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Decodes text resources into a [`String`].
///
/// UTF-16 is only recognized when a byte order mark is present.
/// A UTF-8 byte order mark is stripped.
pub(crate) fn into_utf8_str(mut data: Vec<u8>) -> Result<String, UtfError> {
    if is_utf16(&data) {
        return from_utf16(&data);
    }
    if data.starts_with(UTF_8_BOM) {
        data.drain(..UTF_8_BOM.len());
    }
    String::from_utf8(data).map_err(UtfError::InvalidUtf8)
}

/// Checks if a UTF-16 byte order mark (BOM) exists
fn is_utf16(data: &[u8]) -> bool {
    data.starts_with(b"\xFF\xFE") || data.starts_with(b"\xFE\xFF")
}

fn from_utf16(data: &[u8]) -> Result<String, UtfError> {
    let endian = if data.starts_with(b"\xFF") {
        u16::from_le_bytes
    } else {
        u16::from_be_bytes
    };

    let units = data[2..]
        .chunks(2)
        .map(|chunk| chunk.try_into().map(endian))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| UtfError::UnevenByteCount(data.len()))?;

    String::from_utf16(&units).map_err(UtfError::InvalidUtf16)
}
