//! Fuzz target for expiry validation.
//!
//! Tests that expiry updates never panic, for any text and any current month.

#![no_main]

use arbitrary::Arbitrary;
use card_entry::clock::FixedClock;
use card_entry::expiry::ExpiryValidator;
use card_entry::Validator;
use libfuzzer_sys::fuzz_target;
use std::sync::Arc;

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    year: u16,
    month: u8,
    text: &'a str,
}

fuzz_target!(|input: Input<'_>| {
    let clock = Arc::new(FixedClock::new(input.year, input.month));
    let mut v = ExpiryValidator::new(clock.clone());
    v.update(input.text);

    let valid = v.is_valid();
    if valid {
        assert!(v.has_full_length());
        assert!(v.month().is_some());
    }
    let _ = v.year();
    let _ = v.expiry_date();
    let _ = v.display_text();

    let seeded = ExpiryValidator::seeded(input.month, input.year, clock);
    let _ = seeded.is_valid();
});
