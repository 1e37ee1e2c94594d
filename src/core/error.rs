use thiserror::Error;

use super::fields::Field;

/// Errors that can occur while turning one input file into an invoice.
///
/// Every variant is scoped to a single file: the batch runner records it
/// and moves on to the next file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum FinvoiceError {
    /// Input file is above the size limit and was not read.
    #[error("file is too large: {size} bytes (limit {limit} bytes)")]
    FileTooLarge { size: u64, limit: u64 },

    /// Input file could not be read.
    #[error("I/O error: {0}")]
    Io(String),

    /// Document is not well-formed XML.
    #[error("XML parse error: {0}")]
    XmlParse(String),

    /// A required element was not found.
    #[error("missing required value {0}")]
    MissingField(Field),

    /// A required element was found but holds no text.
    #[error("value for {0} is empty")]
    EmptyField(Field),

    /// Amount text is not a decimal number.
    #[error("invalid amount '{0}'")]
    InvalidAmount(String),

    /// Currency code is empty or not a three-letter code.
    #[error("invalid currency code '{0}'")]
    InvalidCurrency(String),

    /// Date text does not match the expected format or is not a calendar date.
    #[error("invalid date '{value}': {reason}")]
    InvalidDate { value: String, reason: String },

    /// Numeric field is not an integer.
    #[error("invalid integer '{value}' for {field}")]
    InvalidInteger { field: Field, value: String },
}

impl FinvoiceError {
    pub(crate) fn invalid_date(value: &str, reason: impl Into<String>) -> Self {
        Self::InvalidDate {
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// The field this error refers to, if any.
    pub fn field(&self) -> Option<Field> {
        match self {
            Self::MissingField(field)
            | Self::EmptyField(field)
            | Self::InvalidInteger { field, .. } => Some(*field),
            _ => None,
        }
    }
}
