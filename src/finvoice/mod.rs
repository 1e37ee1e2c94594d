//! Finvoice XML field extraction.
//!
//! Reads the seven payment fields out of a Finvoice document. Two
//! strategies exist because documents in the wild do not all follow the
//! nested structure of the schema:
//!
//! - [`TreeExtractor`] follows the fixed element paths (see [`tree_path`]).
//! - [`StreamExtractor`] scans elements in document order and matches by
//!   local tag name only.
//!
//! [`ExtractionStrategy`] selects one of them at runtime.
//!
//! # Example
//!
//! ```
//! use finvoice_payments::finvoice::{ExtractionStrategy, parse_invoice};
//!
//! let xml = r#"<Finvoice Version="3.0">
//!   <SellerPartyDetails>
//!     <SellerPartyIdentifier>1234567-8</SellerPartyIdentifier>
//!     <SellerOrganisationName>Acme Oy</SellerOrganisationName>
//!   </SellerPartyDetails>
//!   <InvoiceDetails><InvoiceNumber>1001</InvoiceNumber></InvoiceDetails>
//!   <EpiDetails>
//!     <EpiPartyDetails><EpiBeneficiaryPartyDetails>
//!       <EpiAccountID IdentificationSchemeName="IBAN">FI2112345600000785</EpiAccountID>
//!     </EpiBeneficiaryPartyDetails></EpiPartyDetails>
//!     <EpiPaymentInstructionDetails>
//!       <EpiRemittanceInfoIdentifier>13</EpiRemittanceInfoIdentifier>
//!       <EpiInstructedAmount AmountCurrencyIdentifier="EUR">99,90</EpiInstructedAmount>
//!       <EpiDateOptionDate Format="CCYYMMDD">20240131</EpiDateOptionDate>
//!     </EpiPaymentInstructionDetails>
//!   </EpiDetails>
//! </Finvoice>"#;
//!
//! let invoice = parse_invoice(xml, &ExtractionStrategy::Tree).unwrap();
//! assert_eq!(invoice.supplier_name(), "Acme Oy");
//! ```

mod encoding;
mod schema;
mod stream;
mod tree;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::{FinvoiceError, Invoice, RawFields, build_invoice, validate_fields};

pub use encoding::{declared_encoding, decode_document};
pub use schema::tree_path;
pub use stream::StreamExtractor;
pub use tree::TreeExtractor;

/// Pulls the raw field values out of one XML document.
///
/// Fields that are not found are left as `None` in the returned
/// [`RawFields`]; only malformed XML (or a conversion the strategy performs
/// while capturing) is an error.
pub trait Extractor {
    fn extract(&self, xml: &str) -> Result<RawFields, FinvoiceError>;
}

/// Runtime choice between the two extractors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionStrategy {
    /// Fixed nested paths below the root.
    #[default]
    Tree,
    /// Document-order scan by tag name.
    Stream,
}

impl ExtractionStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Tree => "tree",
            Self::Stream => "stream",
        }
    }
}

impl Extractor for ExtractionStrategy {
    fn extract(&self, xml: &str) -> Result<RawFields, FinvoiceError> {
        match self {
            Self::Tree => TreeExtractor.extract(xml),
            Self::Stream => StreamExtractor.extract(xml),
        }
    }
}

impl fmt::Display for ExtractionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExtractionStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tree" => Ok(Self::Tree),
            "stream" => Ok(Self::Stream),
            other => Err(format!("unknown extraction strategy '{other}' (expected 'tree' or 'stream')")),
        }
    }
}

/// Extract, validate and assemble one invoice from XML text.
pub fn parse_invoice<E: Extractor + ?Sized>(xml: &str, extractor: &E) -> Result<Invoice, FinvoiceError> {
    let raw = extractor.extract(xml)?;
    build_invoice(validate_fields(raw)?)
}

/// Like [`parse_invoice`], decoding the bytes with [`decode_document`] first.
pub fn parse_invoice_bytes<E: Extractor + ?Sized>(
    bytes: &[u8],
    extractor: &E,
) -> Result<Invoice, FinvoiceError> {
    parse_invoice(&decode_document(bytes), extractor)
}
