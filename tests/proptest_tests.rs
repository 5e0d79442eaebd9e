//! Property-based tests using proptest.
//!
//! These tests verify invariants that should hold for all inputs,
//! helping discover edge cases that manual tests might miss.

use card_entry::clock::{FixedClock, YearMonth};
use card_entry::cvv::FixedLengthValidator;
use card_entry::expiry::ExpiryValidator;
use card_entry::number::CardNumberValidator;
use card_entry::{detect, luhn, mask, CardBrand, CardEntryForm, FieldKind, FormConfig, Validator};
use proptest::prelude::*;
use std::sync::Arc;

// =============================================================================
// STRATEGIES
// =============================================================================

/// Generates a random digit string of a given length.
fn digit_string(len: usize) -> impl Strategy<Value = String> {
    proptest::collection::vec(prop::char::range('0', '9'), len)
        .prop_map(|chars| chars.into_iter().collect())
}

/// Appends the Luhn check digit to `payload`.
fn with_check_digit(payload: &str) -> String {
    let digits: Vec<u8> = payload.bytes().map(|b| b - b'0').collect();
    format!("{}{}", payload, luhn::generate_check_digit(&digits))
}

/// Generates a Luhn-valid 16-digit Visa number.
fn visa_strategy() -> impl Strategy<Value = String> {
    digit_string(14).prop_map(|body| with_check_digit(&format!("4{}", body)))
}

/// Generates a Luhn-valid number of the right length for a known brand.
fn valid_card_strategy() -> impl Strategy<Value = (CardBrand, String)> {
    prop_oneof![
        Just((CardBrand::Visa, "4")),
        Just((CardBrand::Mastercard, "51")),
        Just((CardBrand::Mastercard, "2221")),
        Just((CardBrand::Amex, "34")),
        Just((CardBrand::Amex, "37")),
        Just((CardBrand::Discover, "6011")),
        Just((CardBrand::Discover, "65")),
        Just((CardBrand::Jcb, "3528")),
        Just((CardBrand::DinersClub, "36")),
    ]
    .prop_flat_map(|(brand, prefix)| {
        let body = brand.number_length() - prefix.len() - 1;
        digit_string(body).prop_map(move |b| {
            (brand, with_check_digit(&format!("{}{}", prefix, b)))
        })
    })
}

/// Interleaves separators (spaces, dashes) into a number.
fn with_separators(card: String) -> impl Strategy<Value = String> {
    let len = card.len();
    proptest::collection::vec(
        prop_oneof![Just(""), Just(" "), Just("-"), Just(" - ")],
        len + 1,
    )
    .prop_map(move |seps| {
        let mut result = String::new();
        for (i, c) in card.chars().enumerate() {
            result.push_str(seps[i]);
            result.push(c);
        }
        result.push_str(seps[len]);
        result
    })
}

fn month_strategy() -> impl Strategy<Value = YearMonth> {
    (2000u16..=2090, 1u8..=12).prop_map(|(y, m)| YearMonth::new(y, m))
}

fn expiry_at(today: YearMonth, text: &str) -> ExpiryValidator {
    let mut v = ExpiryValidator::new(Arc::new(FixedClock(today)));
    v.update(text);
    v
}

// =============================================================================
// CARD NUMBER PROPERTIES
// =============================================================================

proptest! {
    /// Property: every Luhn-valid 16-digit number starting with 4 is a valid Visa.
    #[test]
    fn visa_luhn_numbers_are_valid(card in visa_strategy()) {
        let mut v = CardNumberValidator::new();
        v.update(&card);
        prop_assert_eq!(v.brand(), CardBrand::Visa);
        prop_assert!(v.has_full_length());
        prop_assert!(v.is_valid(), "{} should be valid", card);
    }

    /// Property: valid numbers of every known brand validate at their length.
    #[test]
    fn brand_numbers_validate((brand, card) in valid_card_strategy()) {
        let mut v = CardNumberValidator::new();
        v.update(&card);
        prop_assert_eq!(v.brand(), brand);
        prop_assert_eq!(v.len(), brand.number_length());
        prop_assert!(v.is_valid());
    }

    /// Property: a length other than the brand's is never full nor valid.
    #[test]
    fn wrong_length_never_full((_, card) in valid_card_strategy(), cut in 1usize..6, extra in digit_string(3)) {
        let mut v = CardNumberValidator::new();

        v.update(&card[..card.len() - cut]);
        prop_assert!(!v.has_full_length());
        prop_assert!(!v.is_valid());

        v.update(&format!("{}{}", card, extra));
        prop_assert!(!v.has_full_length());
        prop_assert!(!v.is_valid());
    }

    /// Property: separators affect neither the value nor validity.
    #[test]
    fn separators_dont_affect_validation(
        formatted in visa_strategy().prop_flat_map(with_separators)
    ) {
        let digits: String = formatted.chars().filter(|c| c.is_ascii_digit()).collect();

        let mut plain = CardNumberValidator::new();
        plain.update(&digits);
        let mut spaced = CardNumberValidator::new();
        spaced.update(&formatted);

        prop_assert_eq!(plain.value(), spaced.value());
        prop_assert_eq!(plain.is_valid(), spaced.is_valid());
        prop_assert_eq!(luhn::passes(&formatted), luhn::passes(&digits));
    }

    /// Property: changing one digit breaks the checksum.
    #[test]
    fn single_digit_change_invalidates(card in visa_strategy(), pos in 1usize..16, delta in 1u8..=9) {
        let mut bytes = card.into_bytes();
        bytes[pos] = b'0' + (bytes[pos] - b'0' + delta) % 10;
        let changed = String::from_utf8(bytes).unwrap();
        prop_assert!(!luhn::passes(&changed));
    }

    /// Property: classification never panics and is prefix-stable once known.
    #[test]
    fn classification_stable_under_extension((brand, card) in valid_card_strategy()) {
        for end in 1..=card.len() {
            let partial = detect::classify(&card[..end]);
            prop_assert!(partial == CardBrand::Unknown || partial == brand);
        }
        prop_assert_eq!(detect::classify(&card), brand);
    }

    /// Property: masked output never exposes the full number.
    #[test]
    fn masked_never_exposes_full_number((_, card) in valid_card_strategy()) {
        let masked = mask::mask_number(&card);
        prop_assert!(!masked.contains(&card));
        prop_assert!(masked.ends_with(&card[card.len() - 4..]));
    }

    /// Property: arbitrary input never panics the number validator.
    #[test]
    fn number_update_never_panics(input in ".*") {
        let mut v = CardNumberValidator::new();
        v.update(&input);
        let _ = v.is_valid();
        let _ = v.has_full_length();
        let _ = format!("{:?}", v);
    }
}

// =============================================================================
// EXPIRY PROPERTIES
// =============================================================================

proptest! {
    /// Property: the current month is valid, the one before it is not.
    #[test]
    fn expiry_boundary_at_current_month(today in month_strategy()) {
        let current = format!("{:02}{:02}", today.month, today.year % 100);
        prop_assert!(expiry_at(today, &current).is_valid());

        let (py, pm) = if today.month == 1 {
            (today.year - 1, 12)
        } else {
            (today.year, today.month - 1)
        };
        // the previous month must still fall in the same century to be expressible
        prop_assume!(py / 100 == today.year / 100);
        let previous = format!("{:02}{:02}", pm, py % 100);
        let v = expiry_at(today, &previous);
        prop_assert!(v.has_full_length());
        prop_assert!(!v.is_valid());
    }

    /// Property: months 00 and 13-99 are never valid.
    #[test]
    fn out_of_range_month_invalid(
        today in month_strategy(),
        month in prop_oneof![Just(0u8), 13u8..=99],
        yy in 0u8..=99,
    ) {
        let v = expiry_at(today, &format!("{:02}{:02}", month, yy));
        prop_assert!(v.has_full_length());
        prop_assert!(!v.is_valid());
    }

    /// Property: separators in the expiry do not change the outcome.
    #[test]
    fn expiry_separator_invariance(today in month_strategy(), month in 1u8..=12, yy in 0u8..=99) {
        let plain = expiry_at(today, &format!("{:02}{:02}", month, yy));
        let slashed = expiry_at(today, &format!("{:02}/{:02}", month, yy));
        prop_assert_eq!(plain.value(), slashed.value());
        prop_assert_eq!(plain.is_valid(), slashed.is_valid());
    }
}

// =============================================================================
// CVV PROPERTIES
// =============================================================================

proptest! {
    /// Property: a CVV is valid exactly when its digit count equals the brand's.
    #[test]
    fn cvv_valid_iff_exact_length(
        brand in prop_oneof![Just(CardBrand::Visa), Just(CardBrand::Amex), Just(CardBrand::Unknown)],
        cvv in "[0-9]{0,6}",
    ) {
        let mut v = FixedLengthValidator::new(brand.cvv_length());
        v.update(&cvv);
        prop_assert_eq!(v.is_valid(), cvv.len() == brand.cvv_length());
    }
}

// =============================================================================
// FORM PROPERTIES
// =============================================================================

proptest! {
    /// Property: readiness equals the conjunction of the field validities.
    #[test]
    fn readiness_is_conjunction(
        require in proptest::array::uniform4(any::<bool>()),
        inputs in proptest::array::uniform5(prop_oneof![
            Just(String::new()),
            Just("4111111111111111".to_string()),
            Just("12/30".to_string()),
            Just("123".to_string()),
            "[ -~]{0,8}",
        ]),
    ) {
        let config = FormConfig::new()
            .require_expiry(require[0])
            .require_cvv(require[1])
            .require_postal_code(require[2])
            .require_cardholder_name(require[3]);
        let mut form = CardEntryForm::with_clock(config, Arc::new(FixedClock::new(2024, 1)));

        for (kind, text) in FieldKind::ALL.into_iter().zip(inputs.iter()) {
            let update = form.on_field_changed(kind, text);
            let expected = FieldKind::ALL.iter().all(|&k| form.state(k).is_valid());
            prop_assert_eq!(update.ready, expected);
            prop_assert_eq!(form.is_form_ready(), expected);
        }
    }

    /// Property: focus only ever moves forward in declared order.
    #[test]
    fn focus_moves_forward(card in visa_strategy()) {
        let mut form = CardEntryForm::with_clock(
            FormConfig::all_fields(),
            Arc::new(FixedClock::new(2024, 1)),
        );
        for (kind, text) in [
            (FieldKind::Number, card.as_str()),
            (FieldKind::Expiry, "1230"),
            (FieldKind::Cvv, "123"),
        ] {
            if let Some(next) = form.on_field_changed(kind, text).focus {
                prop_assert!(next > kind);
            }
        }
    }
}
