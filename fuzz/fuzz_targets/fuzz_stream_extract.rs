#![no_main]

use finvoice_payments::finvoice::{Extractor, StreamExtractor};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = StreamExtractor.extract(s);
    }
});
