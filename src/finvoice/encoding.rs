use std::borrow::Cow;

use encoding_rs::{Encoding, UTF_8};

/// Number of leading bytes searched for the XML declaration.
const DECLARATION_WINDOW: usize = 256;

/// Decode raw document bytes to text using the encoding named in the XML
/// declaration.
///
/// Finvoice files are often `ISO-8859-15`. Without a declaration the
/// document is read as UTF-8; a byte order mark overrides both.
pub fn decode_document(bytes: &[u8]) -> Cow<'_, str> {
    let encoding = declared_encoding(bytes).unwrap_or(UTF_8);
    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        tracing::warn!(
            encoding = used.name(),
            "document contains bytes invalid in its encoding, replaced"
        );
    }
    text
}

/// Encoding named by `encoding="..."` in the XML declaration, if any.
pub fn declared_encoding(bytes: &[u8]) -> Option<&'static Encoding> {
    let head = &bytes[..bytes.len().min(DECLARATION_WINDOW)];
    let head = String::from_utf8_lossy(head).to_lowercase();
    let start = head.find("<?xml")?;
    let declaration = &head[start..];
    let declaration = &declaration[..declaration.find("?>")?];
    let label = declaration
        .split("encoding=")
        .nth(1)?
        .split(['"', '\''])
        .nth(1)?;
    Encoding::for_label(label.trim().as_bytes())
}
