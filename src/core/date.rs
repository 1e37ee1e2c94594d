use chrono::NaiveDate;

use super::error::FinvoiceError;

/// Date layouts accepted for the due date.
///
/// Finvoice only defines `CCYYMMDD`; the value still travels explicitly so
/// that a document declaring something else is rejected instead of being
/// read with the wrong layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateFormat {
    /// Four-digit year, two-digit month, two-digit day: `20240131`.
    #[default]
    Ccyymmdd,
}

impl DateFormat {
    /// Code as written in the Finvoice `Format` attribute.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Ccyymmdd => "CCYYMMDD",
        }
    }

    /// Resolve a `Format` attribute value.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "CCYYMMDD" | "YYYYMMDD" => Some(Self::Ccyymmdd),
            _ => None,
        }
    }
}

/// Parse a due date in the fixed `CCYYMMDD` layout.
pub fn parse_due_date(raw: &str) -> Result<NaiveDate, FinvoiceError> {
    parse_date_with_format(raw, DateFormat::Ccyymmdd)
}

/// Parse a date in the given layout.
pub fn parse_date_with_format(raw: &str, format: DateFormat) -> Result<NaiveDate, FinvoiceError> {
    let text = raw.trim();
    match format {
        DateFormat::Ccyymmdd => {
            if text.len() != 8 || !text.bytes().all(|b| b.is_ascii_digit()) {
                return Err(FinvoiceError::invalid_date(
                    raw,
                    format!("expected 8 digits in {} form", format.code()),
                ));
            }
            // All ASCII digits, so the slices below are in range and parse.
            let year: i32 = text[0..4]
                .parse()
                .map_err(|_| FinvoiceError::invalid_date(raw, "bad year"))?;
            let month: u32 = text[4..6]
                .parse()
                .map_err(|_| FinvoiceError::invalid_date(raw, "bad month"))?;
            let day: u32 = text[6..8]
                .parse()
                .map_err(|_| FinvoiceError::invalid_date(raw, "bad day"))?;
            NaiveDate::from_ymd_opt(year, month, day)
                .ok_or_else(|| FinvoiceError::invalid_date(raw, "not a calendar date"))
        }
    }
}
