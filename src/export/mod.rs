//! Payments CSV rendering.
//!
//! One header row, then one row per invoice in the order given. Layout
//! (separator, enclosure, columns, date format, line ending) comes from
//! [`CsvOptions`].

mod csv;

pub use csv::*;
