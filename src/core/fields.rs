use std::fmt;

use serde::Serialize;

/// The Finvoice elements an invoice record is built from.
///
/// Declaration order is the order in which fields are validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Field {
    /// Supplier business ID.
    SellerPartyIdentifier,
    /// Supplier name.
    SellerOrganisationName,
    /// Invoice number.
    InvoiceNumber,
    /// Beneficiary bank account (IBAN).
    EpiAccountId,
    /// Bank reference number.
    EpiRemittanceInfoIdentifier,
    /// Payment sum, with an optional `AmountCurrencyIdentifier` attribute.
    EpiInstructedAmount,
    /// Payment due date, with an optional `Format` attribute.
    EpiDateOptionDate,
}

impl Field {
    /// All fields in validation order.
    pub const ALL: [Field; 7] = [
        Field::SellerPartyIdentifier,
        Field::SellerOrganisationName,
        Field::InvoiceNumber,
        Field::EpiAccountId,
        Field::EpiRemittanceInfoIdentifier,
        Field::EpiInstructedAmount,
        Field::EpiDateOptionDate,
    ];

    /// Local element name in the Finvoice schema.
    pub fn element_name(&self) -> &'static str {
        match self {
            Self::SellerPartyIdentifier => "SellerPartyIdentifier",
            Self::SellerOrganisationName => "SellerOrganisationName",
            Self::InvoiceNumber => "InvoiceNumber",
            Self::EpiAccountId => "EpiAccountID",
            Self::EpiRemittanceInfoIdentifier => "EpiRemittanceInfoIdentifier",
            Self::EpiInstructedAmount => "EpiInstructedAmount",
            Self::EpiDateOptionDate => "EpiDateOptionDate",
        }
    }

    /// Look up a field by its local element name.
    pub fn from_element_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.element_name() == name)
    }

    /// Name of the attribute carried alongside the text, if the field has one.
    pub fn attribute_name(&self) -> Option<&'static str> {
        match self {
            Self::EpiInstructedAmount => Some("AmountCurrencyIdentifier"),
            Self::EpiDateOptionDate => Some("Format"),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.element_name())
    }
}

/// Text of one extracted element plus the value of its attribute, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawValue {
    pub text: String,
    pub attribute: Option<String>,
}

impl RawValue {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            attribute: None,
        }
    }

    pub fn with_attribute(text: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            attribute: Some(attribute.into()),
        }
    }

    /// True when the text is empty after trimming.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Extraction result: one slot per [`Field`], `None` meaning the element
/// was not found in the document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFields {
    values: [Option<RawValue>; 7],
}

impl RawFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: Field) -> Option<&RawValue> {
        self.values[field.index()].as_ref()
    }

    /// Store a value, replacing any previous one.
    pub fn set(&mut self, field: Field, value: RawValue) {
        self.values[field.index()] = Some(value);
    }

    /// Store a value unless one was already captured. Returns whether it was stored.
    pub fn insert_if_absent(&mut self, field: Field, value: RawValue) -> bool {
        let slot = &mut self.values[field.index()];
        if slot.is_some() {
            return false;
        }
        *slot = Some(value);
        true
    }

    pub fn remove(&mut self, field: Field) -> Option<RawValue> {
        self.values[field.index()].take()
    }

    pub fn contains(&self, field: Field) -> bool {
        self.values[field.index()].is_some()
    }

    /// True once every field has been captured.
    pub fn is_complete(&self) -> bool {
        self.values.iter().all(Option::is_some)
    }

    /// Builder-style setter.
    pub fn with(mut self, field: Field, value: RawValue) -> Self {
        self.set(field, value);
        self
    }
}
