use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::Extractor;
use super::schema::{field_at_path, local_name};
use crate::core::{Field, FinvoiceError, RawFields, RawValue};

/// Extracts fields by their fixed nested path below the document root.
///
/// An element only counts when its full path matches; the same tag name
/// elsewhere in the document is ignored. The first matching element wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeExtractor;

/// Element currently being captured.
struct Capture {
    field: Field,
    depth: usize,
    value: RawValue,
}

impl Extractor for TreeExtractor {
    fn extract(&self, xml: &str) -> Result<RawFields, FinvoiceError> {
        let mut reader = Reader::from_str(xml);

        let mut fields = RawFields::new();
        let mut path: Vec<String> = Vec::new();
        let mut current: Option<Capture> = None;
        let mut seen_root = false;

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => {
                    seen_root = true;
                    path.push(local_name(e.name().as_ref()));
                    if current.is_none() {
                        if let Some(field) = field_at_path(&path) {
                            if !fields.contains(field) {
                                current = Some(Capture {
                                    field,
                                    depth: path.len(),
                                    value: RawValue {
                                        text: String::new(),
                                        attribute: read_attribute(e, field)?,
                                    },
                                });
                            }
                        }
                    }
                }
                Ok(Event::Empty(ref e)) => {
                    seen_root = true;
                    path.push(local_name(e.name().as_ref()));
                    if current.is_none() {
                        if let Some(field) = field_at_path(&path) {
                            let value = RawValue {
                                text: String::new(),
                                attribute: read_attribute(e, field)?,
                            };
                            fields.insert_if_absent(field, value);
                        }
                    }
                    path.pop();
                }
                Ok(Event::Text(ref e)) => {
                    if let Some(capture) = current.as_mut() {
                        if capture.depth == path.len() {
                            let text = e
                                .unescape()
                                .map_err(|e| FinvoiceError::XmlParse(e.to_string()))?;
                            capture.value.text.push_str(&text);
                        }
                    }
                }
                Ok(Event::CData(e)) => {
                    if let Some(capture) = current.as_mut() {
                        if capture.depth == path.len() {
                            capture
                                .value
                                .text
                                .push_str(&String::from_utf8_lossy(&e.into_inner()));
                        }
                    }
                }
                Ok(Event::End(_)) => {
                    if current.as_ref().is_some_and(|c| c.depth == path.len()) {
                        if let Some(capture) = current.take() {
                            fields.insert_if_absent(capture.field, capture.value);
                        }
                    }
                    path.pop();
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(FinvoiceError::XmlParse(format!(
                        "{e} (at byte {})",
                        reader.error_position()
                    )));
                }
                _ => {}
            }
        }

        finish(seen_root, &path)?;
        tracing::trace!(complete = fields.is_complete(), "tree extraction finished");
        Ok(fields)
    }
}

/// Attribute belonging to the field, `None` when absent.
pub(crate) fn read_attribute(e: &BytesStart<'_>, field: Field) -> Result<Option<String>, FinvoiceError> {
    let Some(name) = field.attribute_name() else {
        return Ok(None);
    };
    let attr = e
        .try_get_attribute(name)
        .map_err(|e| FinvoiceError::XmlParse(e.to_string()))?;
    attr.map(|a| {
        a.unescape_value()
            .map(|v| v.into_owned())
            .map_err(|e| FinvoiceError::XmlParse(e.to_string()))
    })
    .transpose()
}

/// Reject documents without a root element or with unclosed elements.
pub(crate) fn finish(seen_root: bool, open: &[String]) -> Result<(), FinvoiceError> {
    if !seen_root {
        return Err(FinvoiceError::XmlParse("document has no root element".into()));
    }
    if let Some(name) = open.last() {
        return Err(FinvoiceError::XmlParse(format!(
            "unexpected end of document inside <{name}>"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignores_tag_outside_its_path() {
        let xml = r#"<Finvoice>
            <InvoiceNumber>999</InvoiceNumber>
            <InvoiceDetails><InvoiceNumber>42</InvoiceNumber></InvoiceDetails>
        </Finvoice>"#;
        let fields = TreeExtractor.extract(xml).unwrap();
        assert_eq!(fields.get(Field::InvoiceNumber).unwrap().text, "42");
    }

    #[test]
    fn self_closing_element_is_present_but_empty() {
        let xml = "<Finvoice><InvoiceDetails><InvoiceNumber/></InvoiceDetails></Finvoice>";
        let fields = TreeExtractor.extract(xml).unwrap();
        assert_eq!(fields.get(Field::InvoiceNumber), Some(&RawValue::new("")));
    }

    #[test]
    fn unclosed_document_is_an_error() {
        let xml = "<Finvoice><InvoiceDetails><InvoiceNumber>1</InvoiceNumber>";
        assert!(matches!(
            TreeExtractor.extract(xml),
            Err(FinvoiceError::XmlParse(_))
        ));
    }

    #[test]
    fn empty_input_is_an_error() {
        assert!(matches!(TreeExtractor.extract(""), Err(FinvoiceError::XmlParse(_))));
    }

    #[test]
    fn comment_inside_text_keeps_spacing() {
        let xml = "<Finvoice><SellerPartyDetails>\
            <SellerOrganisationName>Acme<!-- x --> Oy</SellerOrganisationName>\
            </SellerPartyDetails></Finvoice>";
        let fields = TreeExtractor.extract(xml).unwrap();
        assert_eq!(fields.get(Field::SellerOrganisationName).unwrap().text, "Acme Oy");
    }
}
