#![no_main]

use finvoice_payments::finvoice::{ExtractionStrategy, parse_invoice_bytes};
use libfuzzer_sys::fuzz_target;

// Raw bytes go through encoding detection first.
fuzz_target!(|data: &[u8]| {
    let _ = parse_invoice_bytes(data, &ExtractionStrategy::Tree);
    let _ = parse_invoice_bytes(data, &ExtractionStrategy::Stream);
});
