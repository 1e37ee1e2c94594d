use super::error::FinvoiceError;
use super::fields::{Field, RawFields, RawValue};

/// Raw fields that passed the presence and non-emptiness checks.
///
/// Only [`validate_fields`] creates this type, so holding one means all
/// seven values are present and non-blank. Text values are trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedFields {
    pub(crate) seller_party_identifier: String,
    pub(crate) seller_organisation_name: String,
    pub(crate) invoice_number: String,
    pub(crate) account_id: String,
    pub(crate) remittance_info: String,
    pub(crate) instructed_amount: RawValue,
    pub(crate) date_option_date: RawValue,
}

impl ValidatedFields {
    pub fn seller_party_identifier(&self) -> &str {
        &self.seller_party_identifier
    }
}

/// Check that every field is present and non-empty.
///
/// Fields are checked in [`Field::ALL`] order and the first failure is
/// returned: [`FinvoiceError::MissingField`] when the element was not
/// found, [`FinvoiceError::EmptyField`] when it holds only whitespace.
pub fn validate_fields(mut raw: RawFields) -> Result<ValidatedFields, FinvoiceError> {
    for field in Field::ALL {
        match raw.get(field) {
            None => return Err(FinvoiceError::MissingField(field)),
            Some(value) if value.is_blank() => return Err(FinvoiceError::EmptyField(field)),
            Some(_) => {}
        }
    }

    let mut take = |field: Field| -> Result<RawValue, FinvoiceError> {
        let mut value = raw.remove(field).ok_or(FinvoiceError::MissingField(field))?;
        value.text = value.text.trim().to_string();
        Ok(value)
    };

    Ok(ValidatedFields {
        seller_party_identifier: take(Field::SellerPartyIdentifier)?.text,
        seller_organisation_name: take(Field::SellerOrganisationName)?.text,
        invoice_number: take(Field::InvoiceNumber)?.text,
        account_id: take(Field::EpiAccountId)?.text,
        remittance_info: take(Field::EpiRemittanceInfoIdentifier)?.text,
        instructed_amount: take(Field::EpiInstructedAmount)?,
        date_option_date: take(Field::EpiDateOptionDate)?,
    })
}
