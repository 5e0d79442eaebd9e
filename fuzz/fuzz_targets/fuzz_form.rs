//! Fuzz target for the form dispatcher.
//!
//! Replays arbitrary edit sequences and checks that readiness always equals
//! the conjunction of the field validities.

#![no_main]

use arbitrary::Arbitrary;
use card_entry::clock::FixedClock;
use card_entry::{CardEntryForm, FieldKind, FormConfig};
use libfuzzer_sys::fuzz_target;
use std::sync::Arc;

#[derive(Debug, Arbitrary)]
struct Input {
    require: [bool; 4],
    auto_accept: bool,
    edits: Vec<(u8, String)>,
}

fuzz_target!(|input: Input| {
    let config = FormConfig::new()
        .require_expiry(input.require[0])
        .require_cvv(input.require[1])
        .require_postal_code(input.require[2])
        .require_cardholder_name(input.require[3])
        .auto_accept(input.auto_accept);
    let mut form = CardEntryForm::with_clock(config, Arc::new(FixedClock::new(2024, 6)));

    for (field, text) in &input.edits {
        let kind = FieldKind::ALL[*field as usize % FieldKind::ALL.len()];
        let update = form.on_field_changed(kind, text);
        let expected = FieldKind::ALL.iter().all(|&k| form.state(k).is_valid());
        assert_eq!(update.ready, expected);
        if let Some(next) = update.focus {
            assert!(next > kind);
        }
    }

    let _ = form.submit();
});
