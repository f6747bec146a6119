#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary decoded document text must not panic.
    if let Ok(xml) = std::str::from_utf8(data) {
        let _ = solaria::document::consecutive_number(xml);
    }
});
