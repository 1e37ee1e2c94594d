//! # finvoice-payments
//!
//! Batch conversion of Finvoice XML invoices into a single payments CSV.
//!
//! Each XML file in a folder is reduced to the seven fields needed to pay it
//! (supplier, invoice number, account, reference, amount, due date),
//! validated, deduplicated on `(supplier business ID, invoice number)` and
//! sorted by due date, latest first.
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point.
//!
//! ## Quick Start
//!
//! ```rust
//! use finvoice_payments::core::*;
//! use finvoice_payments::export::{CsvOptions, render_csv};
//!
//! let invoice = InvoiceBuilder::new()
//!     .supplier("1234567-8", "Acme Oy")
//!     .invoice_number("1001")
//!     .bank_account("FI2112345600000785")
//!     .bank_reference("13")
//!     .amount("1234,56", None)
//!     .due_date("20240131")
//!     .build()
//!     .unwrap();
//!
//! let mut payments = InvoiceCollection::new();
//! assert_eq!(payments.insert(invoice), Insertion::Added);
//!
//! let csv = render_csv(&payments, &CsvOptions::default().line_ending("\n"));
//! assert!(csv.ends_with("1234567-8;Acme Oy;1001;FI2112345600000785;13;1234.56;EUR;2024-01-31\n"));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` | Invoice record, money/date values, validation, collection |
//! | `finvoice` | Finvoice XML extraction (tree and stream strategies) |
//! | `export` | Payments CSV rendering |
//! | `batch` | Folder scanning and per-file processing |
//! | `cli` (default) | The `finvoice2csv` binary |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "finvoice")]
pub mod finvoice;

#[cfg(feature = "export")]
pub mod export;

#[cfg(feature = "batch")]
pub mod batch;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
