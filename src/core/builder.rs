use super::error::FinvoiceError;
use super::fields::{Field, RawFields, RawValue};
use super::types::{Invoice, build_invoice};
use super::validation::validate_fields;

/// Builder for invoices from raw text values, as they would appear in a
/// Finvoice document.
///
/// `build()` runs the same validation and parsing as file processing, so a
/// builder cannot produce a record the extractors would reject.
///
/// ```
/// use finvoice_payments::core::*;
///
/// let invoice = InvoiceBuilder::new()
///     .supplier("1234567-8", "Acme Oy")
///     .invoice_number("1001")
///     .bank_account("FI2112345600000785")
///     .bank_reference("13")
///     .amount("99,90", None)
///     .due_date("20240131")
///     .build()
///     .unwrap();
///
/// assert_eq!(invoice.invoice_number(), 1001);
/// assert_eq!(invoice.payment_sum().currency(), "EUR");
/// ```
#[derive(Debug, Clone, Default)]
pub struct InvoiceBuilder {
    fields: RawFields,
}

impl InvoiceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn supplier(self, business_id: &str, name: &str) -> Self {
        self.set(Field::SellerPartyIdentifier, RawValue::new(business_id))
            .set(Field::SellerOrganisationName, RawValue::new(name))
    }

    pub fn invoice_number(self, number: &str) -> Self {
        self.set(Field::InvoiceNumber, RawValue::new(number))
    }

    pub fn bank_account(self, iban: &str) -> Self {
        self.set(Field::EpiAccountId, RawValue::new(iban))
    }

    pub fn bank_reference(self, reference: &str) -> Self {
        self.set(Field::EpiRemittanceInfoIdentifier, RawValue::new(reference))
    }

    /// Amount text plus optional currency code (EUR when `None`).
    pub fn amount(self, amount: &str, currency: Option<&str>) -> Self {
        let value = RawValue {
            text: amount.to_string(),
            attribute: currency.map(str::to_string),
        };
        self.set(Field::EpiInstructedAmount, value)
    }

    /// Due date in `CCYYMMDD` form.
    pub fn due_date(self, date: &str) -> Self {
        self.set(Field::EpiDateOptionDate, RawValue::new(date))
    }

    fn set(mut self, field: Field, value: RawValue) -> Self {
        self.fields.set(field, value);
        self
    }

    pub fn build(self) -> Result<Invoice, FinvoiceError> {
        build_invoice(validate_fields(self.fields)?)
    }
}
