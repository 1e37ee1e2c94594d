use chrono::NaiveDate;
use serde::Serialize;

use super::date::{DateFormat, parse_date_with_format};
use super::error::FinvoiceError;
use super::fields::Field;
use super::money::{Money, parse_money};
use super::validation::ValidatedFields;

/// One payable invoice, validated and typed.
///
/// Fields are private: an `Invoice` is only produced by [`build_invoice`]
/// (or [`InvoiceBuilder`](super::InvoiceBuilder), which goes through it) and
/// never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invoice {
    /// `SellerPartyIdentifier`: supplier business ID.
    supplier_business_id: String,
    /// `SellerOrganisationName`: supplier name.
    supplier_name: String,
    /// `InvoiceNumber`.
    invoice_number: u64,
    /// `EpiAccountID`: IBAN, stored verbatim.
    bank_account: String,
    /// `EpiRemittanceInfoIdentifier`: kept as text so leading zeros and
    /// non-numeric reference schemes survive.
    bank_reference: String,
    /// `EpiInstructedAmount`.
    payment_sum: Money,
    /// `EpiDateOptionDate`.
    due_date: NaiveDate,
}

/// Identity of an invoice for duplicate detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InvoiceKey<'a> {
    pub supplier_business_id: &'a str,
    pub invoice_number: u64,
}

impl Invoice {
    pub fn supplier_business_id(&self) -> &str {
        &self.supplier_business_id
    }

    pub fn supplier_name(&self) -> &str {
        &self.supplier_name
    }

    pub fn invoice_number(&self) -> u64 {
        self.invoice_number
    }

    pub fn bank_account(&self) -> &str {
        &self.bank_account
    }

    pub fn bank_reference(&self) -> &str {
        &self.bank_reference
    }

    pub fn payment_sum(&self) -> &Money {
        &self.payment_sum
    }

    pub fn due_date(&self) -> NaiveDate {
        self.due_date
    }

    /// The supplier + invoice number pair that identifies this invoice.
    pub fn key(&self) -> InvoiceKey<'_> {
        InvoiceKey {
            supplier_business_id: &self.supplier_business_id,
            invoice_number: self.invoice_number,
        }
    }

    /// Two invoices are duplicates when the same supplier issued the same
    /// invoice number; every other field is ignored.
    pub fn is_duplicate_of(&self, other: &Invoice) -> bool {
        self.key() == other.key()
    }
}

/// Assemble an [`Invoice`] from validated fields.
///
/// Parses the invoice number, the amount and the due date. The first
/// failure is returned and no record is produced.
pub fn build_invoice(fields: ValidatedFields) -> Result<Invoice, FinvoiceError> {
    let invoice_number = parse_integer(Field::InvoiceNumber, &fields.invoice_number)?;

    let payment_sum = parse_money(
        &fields.instructed_amount.text,
        fields.instructed_amount.attribute.as_deref(),
    )?;

    let date_format = match fields.date_option_date.attribute.as_deref() {
        None => DateFormat::default(),
        Some(code) => DateFormat::from_code(code).ok_or_else(|| {
            FinvoiceError::invalid_date(
                &fields.date_option_date.text,
                format!("unsupported date format '{code}'"),
            )
        })?,
    };
    let due_date = parse_date_with_format(&fields.date_option_date.text, date_format)?;

    Ok(Invoice {
        supplier_business_id: fields.seller_party_identifier,
        supplier_name: fields.seller_organisation_name,
        invoice_number,
        bank_account: fields.account_id,
        bank_reference: fields.remittance_info,
        payment_sum,
        due_date,
    })
}

/// Parse an unsigned integer field, reporting the field on failure.
pub fn parse_integer(field: Field, text: &str) -> Result<u64, FinvoiceError> {
    text.trim()
        .parse()
        .map_err(|_| FinvoiceError::InvalidInteger {
            field,
            value: text.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fields::{RawFields, RawValue};
    use crate::core::validation::validate_fields;
    use rust_decimal_macros::dec;

    fn raw() -> RawFields {
        RawFields::new()
            .with(Field::SellerPartyIdentifier, RawValue::new("1234567-8"))
            .with(Field::SellerOrganisationName, RawValue::new("Acme Oy"))
            .with(Field::InvoiceNumber, RawValue::new("42"))
            .with(Field::EpiAccountId, RawValue::new("FI2112345600000785"))
            .with(Field::EpiRemittanceInfoIdentifier, RawValue::new("00013"))
            .with(Field::EpiInstructedAmount, RawValue::new("1234,56"))
            .with(
                Field::EpiDateOptionDate,
                RawValue::with_attribute("20240131", "CCYYMMDD"),
            )
    }

    fn build(raw: RawFields) -> Result<Invoice, FinvoiceError> {
        build_invoice(validate_fields(raw)?)
    }

    #[test]
    fn builds_record() {
        let inv = build(raw()).unwrap();
        assert_eq!(inv.supplier_business_id(), "1234567-8");
        assert_eq!(inv.invoice_number(), 42);
        assert_eq!(inv.bank_reference(), "00013");
        assert_eq!(inv.payment_sum().amount(), dec!(1234.56));
        assert_eq!(inv.payment_sum().currency(), "EUR");
        assert_eq!(inv.due_date(), NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
    }

    #[test]
    fn non_numeric_invoice_number() {
        let err = build(raw().with(Field::InvoiceNumber, RawValue::new("INV-1"))).unwrap_err();
        assert_eq!(
            err,
            FinvoiceError::InvalidInteger {
                field: Field::InvoiceNumber,
                value: "INV-1".into()
            }
        );
    }

    #[test]
    fn unknown_date_format_is_rejected() {
        let err = build(raw().with(
            Field::EpiDateOptionDate,
            RawValue::with_attribute("31012024", "DDMMCCYY"),
        ))
        .unwrap_err();
        assert!(matches!(err, FinvoiceError::InvalidDate { reason, .. } if reason.contains("DDMMCCYY")));
    }

    #[test]
    fn duplicate_ignores_other_fields() {
        let a = build(raw()).unwrap();
        let b = build(
            raw()
                .with(Field::SellerOrganisationName, RawValue::new("Acme Renamed Oy"))
                .with(Field::EpiInstructedAmount, RawValue::new("1,00")),
        )
        .unwrap();
        let c = build(raw().with(Field::InvoiceNumber, RawValue::new("43"))).unwrap();
        assert!(a.is_duplicate_of(&b));
        assert!(!a.is_duplicate_of(&c));
    }
}
