use std::fmt::Write;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::core::Invoice;

/// A column of the payments CSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    SupplierBusinessId,
    SupplierName,
    InvoiceNumber,
    BankAccount,
    BankReference,
    PaymentSum,
    PaymentSumCurrency,
    DueDate,
}

impl Column {
    /// Default column set, in output order.
    pub const ALL: [Column; 8] = [
        Column::SupplierBusinessId,
        Column::SupplierName,
        Column::InvoiceNumber,
        Column::BankAccount,
        Column::BankReference,
        Column::PaymentSum,
        Column::PaymentSumCurrency,
        Column::DueDate,
    ];

    pub fn header(&self) -> &'static str {
        match self {
            Self::SupplierBusinessId => "Supplier Business ID",
            Self::SupplierName => "Supplier Name",
            Self::InvoiceNumber => "Invoice number",
            Self::BankAccount => "Bank account",
            Self::BankReference => "Bank reference number",
            Self::PaymentSum => "Payment sum",
            Self::PaymentSumCurrency => "Payment sum currency",
            Self::DueDate => "Payment/due date",
        }
    }

    fn value(&self, invoice: &Invoice, options: &CsvOptions) -> String {
        match self {
            Self::SupplierBusinessId => invoice.supplier_business_id().to_string(),
            Self::SupplierName => invoice.supplier_name().to_string(),
            Self::InvoiceNumber => invoice.invoice_number().to_string(),
            Self::BankAccount => invoice.bank_account().to_string(),
            Self::BankReference => invoice.bank_reference().to_string(),
            Self::PaymentSum => format_decimal(invoice.payment_sum().amount()),
            Self::PaymentSumCurrency => invoice.payment_sum().currency().to_string(),
            Self::DueDate => format_due_date(invoice.due_date(), &options.date_format),
        }
    }
}

/// Due date layout used when none is configured: `2024-01-31`.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Line terminator of the platform the binary was built for.
#[cfg(windows)]
pub const NATIVE_LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const NATIVE_LINE_ENDING: &str = "\n";

/// How the CSV is laid out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvOptions {
    /// Field separator, `;` by default.
    pub separator: String,
    /// Wraps every field (header included) when set. Occurrences inside a
    /// value are doubled.
    pub enclosure: Option<String>,
    /// Columns in output order.
    pub columns: Vec<Column>,
    /// `chrono` format string for the due date. A format that cannot be
    /// written for a plain date (see [`is_valid_date_format`]) renders as
    /// [`DEFAULT_DATE_FORMAT`].
    pub date_format: String,
    /// Terminator written after every row.
    pub line_ending: String,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            separator: ";".to_string(),
            enclosure: None,
            columns: Column::ALL.to_vec(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            line_ending: NATIVE_LINE_ENDING.to_string(),
        }
    }
}

impl CsvOptions {
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn enclosure(mut self, enclosure: impl Into<String>) -> Self {
        let enclosure = enclosure.into();
        self.enclosure = (!enclosure.is_empty()).then_some(enclosure);
        self
    }

    pub fn columns(mut self, columns: &[Column]) -> Self {
        self.columns = columns.to_vec();
        self
    }

    pub fn date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    pub fn line_ending(mut self, ending: impl Into<String>) -> Self {
        self.line_ending = ending.into();
        self
    }
}

/// Render a header row followed by one row per invoice, in the given order.
pub fn render_csv<'a, I>(invoices: I, options: &CsvOptions) -> String
where
    I: IntoIterator<Item = &'a Invoice>,
{
    let mut out = String::new();

    let headers = options.columns.iter().map(|c| c.header().to_string());
    write_row(&mut out, headers, options);

    for invoice in invoices {
        let values = options.columns.iter().map(|c| c.value(invoice, options));
        write_row(&mut out, values, options);
    }
    out
}

fn write_row(out: &mut String, values: impl Iterator<Item = String>, options: &CsvOptions) {
    for (i, value) in values.enumerate() {
        if i > 0 {
            out.push_str(&options.separator);
        }
        match &options.enclosure {
            Some(enc) => {
                out.push_str(enc);
                // Escape internal enclosures by doubling them
                out.push_str(&value.replace(enc.as_str(), &enc.repeat(2)));
                out.push_str(enc);
            }
            None => out.push_str(&value),
        }
    }
    out.push_str(&options.line_ending);
}

/// True when `format` can be written for a date without time or offset.
///
/// Unknown specifiers and time fields such as `%H` or `%z` are rejected.
pub fn is_valid_date_format(format: &str) -> bool {
    let mut out = String::new();
    write!(out, "{}", NaiveDate::default().format(format)).is_ok()
}

fn format_due_date(date: NaiveDate, format: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", date.format(format)).is_ok() {
        return out;
    }
    tracing::warn!(format, "date format cannot be written for a due date, using {DEFAULT_DATE_FORMAT}");
    date.format(DEFAULT_DATE_FORMAT).to_string()
}

/// Payment sum as written in the CSV: cents are always shown (`100.00`,
/// `99.90`), extra precision from the invoice is kept (`0.005`).
pub fn format_decimal(amount: Decimal) -> String {
    let mut text = amount.normalize().to_string();
    let decimals = text.split_once('.').map_or(0, |(_, frac)| frac.len());
    if decimals == 0 {
        text.push('.');
    }
    for _ in decimals..2 {
        text.push('0');
    }
    text
}
