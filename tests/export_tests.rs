#![cfg(feature = "export")]

use finvoice_payments::core::*;
use finvoice_payments::export::{Column, CsvOptions, render_csv};

fn invoice(supplier: &str, name: &str, number: &str, amount: &str, currency: Option<&str>, due: &str) -> Invoice {
    InvoiceBuilder::new()
        .supplier(supplier, name)
        .invoice_number(number)
        .bank_account("FI2112345600000785")
        .bank_reference("00013")
        .amount(amount, currency)
        .due_date(due)
        .build()
        .unwrap()
}

fn sorted_payments() -> InvoiceCollection {
    let mut payments = InvoiceCollection::new();
    payments.add(invoice("1234567-8", "Acme Oy", "1001", "99,9", None, "20240131"));
    payments.add(invoice("7654321-0", "Kauppa Ab", "7", "1234.56", Some("sek"), "20240315"));
    payments.add(invoice("1234567-8", "Acme Oy", "1002", "100", None, "20240131"));
    payments.sort_by_due_date_descending();
    payments
}

fn unix() -> CsvOptions {
    CsvOptions::default().line_ending("\n")
}

#[test]
fn default_layout() {
    let csv = render_csv(&sorted_payments(), &unix());
    insta::assert_snapshot!(csv, @r"
    Supplier Business ID;Supplier Name;Invoice number;Bank account;Bank reference number;Payment sum;Payment sum currency;Payment/due date
    7654321-0;Kauppa Ab;7;FI2112345600000785;00013;1234.56;SEK;2024-03-15
    1234567-8;Acme Oy;1001;FI2112345600000785;00013;99.90;EUR;2024-01-31
    1234567-8;Acme Oy;1002;FI2112345600000785;00013;100.00;EUR;2024-01-31
    ");
}

#[test]
fn every_row_is_terminated() {
    let csv = render_csv(&sorted_payments(), &unix());
    assert!(csv.ends_with('\n'));
    assert_eq!(csv.lines().count(), 4);
}

#[test]
fn windows_line_endings() {
    let csv = render_csv(&sorted_payments(), &unix().line_ending("\r\n"));
    assert_eq!(csv.matches("\r\n").count(), 4);
}

#[test]
fn enclosure_wraps_header_and_values() {
    let mut payments = InvoiceCollection::new();
    payments.add(invoice("1234567-8", "\"Paras\" Oy", "1", "5", None, "20240101"));

    let options = unix()
        .separator(",")
        .enclosure("\"")
        .columns(&[Column::SupplierName, Column::PaymentSum]);
    insta::assert_snapshot!(render_csv(&payments, &options), @r#"
    "Supplier Name","Payment sum"
    """Paras"" Oy","5.00"
    "#);
}

#[test]
fn column_subset_and_date_format() {
    let options = unix()
        .columns(&[Column::DueDate, Column::InvoiceNumber])
        .date_format("%d.%m.%Y");
    let csv = render_csv(&sorted_payments(), &options);
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Payment/due date;Invoice number",
            "15.03.2024;7",
            "31.01.2024;1001",
            "31.01.2024;1002",
        ]
    );
}

#[test]
fn header_only_for_empty_collection() {
    let csv = render_csv(&InvoiceCollection::new(), &unix());
    assert_eq!(csv.lines().count(), 1);
    assert!(csv.starts_with("Supplier Business ID;"));
}

#[test]
fn headers_match_column_order() {
    let headers: Vec<&str> = Column::ALL.iter().map(Column::header).collect();
    assert_eq!(
        headers,
        vec![
            "Supplier Business ID",
            "Supplier Name",
            "Invoice number",
            "Bank account",
            "Bank reference number",
            "Payment sum",
            "Payment sum currency",
            "Payment/due date",
        ]
    );
}

#[test]
fn time_date_format_renders_iso_date() {
    let options = unix()
        .columns(&[Column::InvoiceNumber, Column::DueDate])
        .date_format("%Y-%m-%d %H:%M");
    let csv = render_csv(&sorted_payments(), &options);
    assert_eq!(csv.lines().nth(1), Some("7;2024-03-15"));
}
