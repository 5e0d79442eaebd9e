//! Card number field validation.

use crate::detect::classify;
use crate::luhn;
use crate::mask::mask_number;
use crate::validator::Validator;
use crate::CardBrand;
use std::fmt;
use zeroize::Zeroize;

/// Validates the card number as it is typed.
///
/// Non-digits are discarded on every update and the brand is re-detected
/// from the remaining digits, so classification can change as more digits
/// arrive.
///
/// # Example
///
/// ```
/// use card_entry::number::CardNumberValidator;
/// use card_entry::{CardBrand, Validator};
///
/// let mut v = CardNumberValidator::new();
/// v.update("4111 1111");
/// assert_eq!(v.brand(), CardBrand::Visa);
/// assert!(!v.has_full_length());
///
/// v.update("4111 1111 1111 1111");
/// assert!(v.is_valid());
/// ```
///
/// # Security
///
/// The digit buffer is zeroed on drop and `Debug` shows the last four
/// digits only.
#[derive(Clone, Default)]
pub struct CardNumberValidator {
    digits: String,
    brand: CardBrand,
}

impl CardNumberValidator {
    /// Creates an empty validator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a validator seeded with a previously captured number.
    pub fn with_number(number: &str) -> Self {
        let mut v = Self::new();
        v.update(number);
        v
    }

    /// The brand detected from the current digits.
    #[inline]
    pub const fn brand(&self) -> CardBrand {
        self.brand
    }

    /// Number of digits entered so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.digits.len()
    }

    /// Whether no digits were entered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// Digits the detected brand still expects, zero once complete or over.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.brand.number_length().saturating_sub(self.len())
    }

    /// The number with all but the last four digits masked.
    pub fn masked(&self) -> String {
        mask_number(&self.digits)
    }
}

impl Validator for CardNumberValidator {
    fn update(&mut self, text: &str) {
        self.digits.zeroize();
        self.digits.extend(text.chars().filter(|c| c.is_ascii_digit()));
        self.brand = classify(&self.digits);
    }

    fn value(&self) -> &str {
        &self.digits
    }

    fn has_full_length(&self) -> bool {
        !self.digits.is_empty() && self.digits.len() == self.brand.number_length()
    }

    fn is_valid(&self) -> bool {
        self.has_full_length() && luhn::passes(&self.digits)
    }
}

impl fmt::Debug for CardNumberValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardNumberValidator")
            .field("number", &self.masked())
            .field("brand", &self.brand)
            .finish()
    }
}

impl Drop for CardNumberValidator {
    fn drop(&mut self) {
        self.digits.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> CardNumberValidator {
        CardNumberValidator::with_number(text)
    }

    #[test]
    fn test_empty_is_neither_full_nor_valid() {
        let v = CardNumberValidator::new();
        assert!(!v.has_full_length());
        assert!(!v.is_valid());
        assert_eq!(v.brand(), CardBrand::Unknown);
    }

    #[test]
    fn test_visa() {
        let v = typed("4111111111111111");
        assert_eq!(v.brand(), CardBrand::Visa);
        assert!(v.has_full_length());
        assert!(v.is_valid());
    }

    #[test]
    fn test_bad_checksum_is_full_but_invalid() {
        let v = typed("4111111111111112");
        assert!(v.has_full_length());
        assert!(!v.is_valid());
    }

    #[test]
    fn test_amex_full_at_15() {
        let v = typed("37828224631000");
        assert_eq!(v.brand(), CardBrand::Amex);
        assert!(!v.has_full_length());
        assert_eq!(v.remaining(), 1);

        let v = typed("378282246310005");
        assert!(v.has_full_length());
        assert!(v.is_valid());
    }

    #[test]
    fn test_diners_full_at_14() {
        let v = typed("30569309025904");
        assert_eq!(v.brand(), CardBrand::DinersClub);
        assert!(v.is_valid());
    }

    #[test]
    fn test_separators_stripped() {
        let v = typed("4111-1111 1111.1111");
        assert_eq!(v.value(), "4111111111111111");
        assert!(v.is_valid());
    }

    #[test]
    fn test_unknown_brand_falls_back_to_19() {
        let v = typed("9999999999999999");
        assert_eq!(v.brand(), CardBrand::Unknown);
        assert!(!v.has_full_length());

        let v = typed("9999999999999999999");
        assert!(v.has_full_length());
    }

    #[test]
    fn test_over_length_is_invalid() {
        let v = typed("41111111111111111");
        assert!(!v.has_full_length());
        assert!(!v.is_valid());
        assert_eq!(v.remaining(), 0);
    }

    #[test]
    fn test_brand_changes_as_digits_arrive() {
        let mut v = CardNumberValidator::new();
        v.update("3");
        assert_eq!(v.brand(), CardBrand::Unknown);
        v.update("34");
        assert_eq!(v.brand(), CardBrand::Amex);
        v.update("3");
        assert_eq!(v.brand(), CardBrand::Unknown);
    }

    #[test]
    fn test_debug_is_masked() {
        let v = typed("4111111111111111");
        let debug = format!("{:?}", v);
        assert!(!debug.contains("4111111111111111"));
        assert!(debug.contains("1111"));
        assert!(debug.contains("Visa"));
    }
}
