//! Fuzz target for expiry normalization.
//!
//! Tests that expiry parsing never panics on arbitrary input.

#![no_main]

use cardview::expiry;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // These should never panic
    let _ = expiry::is_valid(data);
    let _ = expiry::from_date_str(data, "%Y-%m-%d");

    // If normalization succeeds, the result is canonical
    if let Ok(canonical) = expiry::normalize(data) {
        if data.is_empty() {
            assert!(canonical.is_empty());
        } else {
            assert_eq!(canonical.len(), 4, "Canonical expiry should be MMYY");
            assert!(canonical.bytes().all(|b| b.is_ascii_digit()));
            assert_eq!(expiry::normalize(canonical.as_str()).as_deref(), Ok(canonical.as_str()));
        }
        let _ = expiry::is_valid(&canonical);
    }
});
