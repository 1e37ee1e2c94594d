use quick_xml::Reader;
use quick_xml::events::Event;

use super::Extractor;
use super::schema::local_name;
use super::tree::{finish, read_attribute};
use crate::core::{DEFAULT_CURRENCY, DateFormat, Field, FinvoiceError, RawFields, RawValue, parse_integer};

/// Extracts fields by scanning elements in document order and matching
/// their local tag name, regardless of where they sit in the hierarchy.
///
/// The first element seen with each name is captured together with all
/// text inside it. Numeric fields are checked while capturing, and the
/// amount and date get their attribute defaults (`EUR`, `CCYYMMDD`).
#[derive(Debug, Clone, Copy, Default)]
pub struct StreamExtractor;

struct Capture {
    field: Field,
    depth: usize,
    value: RawValue,
}

impl Extractor for StreamExtractor {
    fn extract(&self, xml: &str) -> Result<RawFields, FinvoiceError> {
        let mut reader = Reader::from_str(xml);

        let mut fields = RawFields::new();
        let mut open: Vec<String> = Vec::new();
        // Captures can nest when a matched element contains another one.
        let mut active: Vec<Capture> = Vec::new();
        let mut seen_root = false;

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => {
                    seen_root = true;
                    let name = local_name(e.name().as_ref());
                    open.push(name);
                    if let Some(field) = dispatch(&open, &fields, &active) {
                        active.push(Capture {
                            field,
                            depth: open.len(),
                            value: RawValue {
                                text: String::new(),
                                attribute: read_attribute(e, field)?,
                            },
                        });
                    }
                }
                Ok(Event::Empty(ref e)) => {
                    seen_root = true;
                    open.push(local_name(e.name().as_ref()));
                    if let Some(field) = dispatch(&open, &fields, &active) {
                        let value = RawValue {
                            text: String::new(),
                            attribute: read_attribute(e, field)?,
                        };
                        capture(&mut fields, field, value)?;
                    }
                    open.pop();
                }
                Ok(Event::Text(ref e)) => {
                    if !active.is_empty() {
                        let text = e
                            .unescape()
                            .map_err(|e| FinvoiceError::XmlParse(e.to_string()))?;
                        for c in &mut active {
                            c.value.text.push_str(&text);
                        }
                    }
                }
                Ok(Event::CData(e)) => {
                    if !active.is_empty() {
                        let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                        for c in &mut active {
                            c.value.text.push_str(&text);
                        }
                    }
                }
                Ok(Event::End(_)) => {
                    if active.last().is_some_and(|c| c.depth == open.len()) {
                        if let Some(c) = active.pop() {
                            capture(&mut fields, c.field, c.value)?;
                        }
                    }
                    open.pop();
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

        finish(seen_root, &open)?;
        tracing::trace!(complete = fields.is_complete(), "stream extraction finished");
        Ok(fields)
    }
}

/// Field to start capturing for the element just opened, if any.
fn dispatch(open: &[String], fields: &RawFields, active: &[Capture]) -> Option<Field> {
    let field = Field::from_element_name(open.last()?)?;
    let already_active = active.iter().any(|c| c.field == field);
    (!fields.contains(field) && !already_active).then_some(field)
}

/// Store a finished capture, applying the per-field conversions.
fn capture(fields: &mut RawFields, field: Field, mut value: RawValue) -> Result<(), FinvoiceError> {
    match field {
        Field::InvoiceNumber | Field::EpiRemittanceInfoIdentifier => {
            // Blank values are left for the validator to report as empty.
            if !value.is_blank() {
                parse_integer(field, &value.text)?;
            }
        }
        Field::EpiInstructedAmount => {
            value
                .attribute
                .get_or_insert_with(|| DEFAULT_CURRENCY.to_string());
        }
        Field::EpiDateOptionDate => {
            value
                .attribute
                .get_or_insert_with(|| DateFormat::default().code().to_string());
        }
        _ => {}
    }
    fields.insert_if_absent(field, value);
    Ok(())
}
