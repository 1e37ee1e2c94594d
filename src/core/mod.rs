//! Core invoice types, field validation and the batch collection.
//!
//! This module knows nothing about XML: it turns raw field text into a
//! validated [`Invoice`] and keeps invoices in an [`InvoiceCollection`].

mod builder;
mod collection;
mod date;
mod error;
mod fields;
mod money;
mod types;
mod validation;

pub use builder::*;
pub use collection::*;
pub use date::*;
pub use error::*;
pub use fields::*;
pub use money::*;
pub use types::*;
pub use validation::*;
