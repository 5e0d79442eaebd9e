//! Fuzz target for card number validation.
//!
//! Tests that number updates never panic and keep their invariants on
//! arbitrary input.

#![no_main]

use card_entry::number::CardNumberValidator;
use card_entry::{detect, luhn, mask, Validator};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let mut v = CardNumberValidator::new();
    v.update(data);

    assert!(v.value().bytes().all(|b| b.is_ascii_digit()));
    assert_eq!(v.brand(), detect::classify(v.value()));
    if v.is_valid() {
        assert!(v.has_full_length());
        assert!(luhn::passes(data));
    }

    let _ = v.remaining();
    let _ = mask::mask_number(data);
    let _ = format!("{:?}", v);
});
