//! CVV field validation.
//!
//! The CVV has no checksum; only its length can be checked, and that length
//! depends on the card brand: 4 digits for American Express, 3 for the
//! others. The form pushes the right length in whenever the detected brand
//! changes, so a complete 3-digit CVV turns invalid as soon as the number
//! is recognized as Amex.
//!
//! # Example
//!
//! ```
//! use card_entry::cvv::FixedLengthValidator;
//! use card_entry::Validator;
//!
//! let mut cvv = FixedLengthValidator::new(3);
//! cvv.update("999");
//! assert!(cvv.is_valid());
//!
//! cvv.set_required_length(4);
//! assert!(!cvv.is_valid());
//! ```

use crate::mask::mask_all;
use crate::validator::Validator;
use std::fmt;
use zeroize::Zeroize;

/// Validates input of an exact digit count.
#[derive(Clone)]
pub struct FixedLengthValidator {
    digits: String,
    required_length: usize,
}

impl FixedLengthValidator {
    /// Creates an empty validator requiring `required_length` digits.
    pub fn new(required_length: usize) -> Self {
        Self {
            digits: String::with_capacity(required_length),
            required_length,
        }
    }

    /// The digit count currently required.
    #[inline]
    pub const fn required_length(&self) -> usize {
        self.required_length
    }

    /// Changes the required digit count.
    ///
    /// Returns true if the length actually changed. Validity is re-evaluated
    /// against the existing input immediately.
    pub fn set_required_length(&mut self, length: usize) -> bool {
        let changed = self.required_length != length;
        self.required_length = length;
        changed
    }

    /// Placeholder hint matching the required length, e.g. `"123"`.
    pub fn placeholder(&self) -> String {
        (1..=self.required_length)
            .map(|d| char::from(b'0' + (d % 10) as u8))
            .collect()
    }
}

impl Validator for FixedLengthValidator {
    fn update(&mut self, text: &str) {
        self.digits.zeroize();
        self.digits
            .extend(text.chars().filter(|c| c.is_ascii_digit()));
    }

    fn value(&self) -> &str {
        &self.digits
    }

    fn has_full_length(&self) -> bool {
        self.digits.len() == self.required_length
    }

    fn is_valid(&self) -> bool {
        self.has_full_length()
    }
}

impl fmt::Debug for FixedLengthValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never show the digits themselves
        f.debug_struct("FixedLengthValidator")
            .field("value", &mask_all(&self.digits))
            .field("required_length", &self.required_length)
            .finish()
    }
}

impl Drop for FixedLengthValidator {
    fn drop(&mut self) {
        self.digits.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CardBrand;

    fn typed(required: usize, text: &str) -> FixedLengthValidator {
        let mut v = FixedLengthValidator::new(required);
        v.update(text);
        v
    }

    #[test]
    fn test_exact_length() {
        assert!(typed(3, "123").is_valid());
        assert!(typed(4, "1234").is_valid());
        assert!(typed(3, "007").is_valid());
    }

    #[test]
    fn test_short_input() {
        let v = typed(3, "12");
        assert!(!v.has_full_length());
        assert!(!v.is_valid());
        assert!(!typed(3, "").is_valid());
    }

    #[test]
    fn test_long_input() {
        let v = typed(3, "1234");
        assert!(!v.has_full_length());
        assert!(!v.is_valid());
    }

    #[test]
    fn test_non_digits_stripped() {
        let v = typed(3, "1a2b3");
        assert_eq!(v.value(), "123");
        assert!(v.is_valid());
    }

    #[test]
    fn test_retarget_length() {
        let mut v = typed(CardBrand::Visa.cvv_length(), "999");
        assert!(v.is_valid());

        assert!(v.set_required_length(CardBrand::Amex.cvv_length()));
        assert_eq!(v.required_length(), 4);
        assert!(!v.is_valid());
        assert!(!v.has_full_length());

        v.update("9999");
        assert!(v.is_valid());

        assert!(!v.set_required_length(4));
    }

    #[test]
    fn test_placeholder() {
        assert_eq!(FixedLengthValidator::new(3).placeholder(), "123");
        assert_eq!(FixedLengthValidator::new(4).placeholder(), "1234");
    }

    #[test]
    fn test_debug_is_masked() {
        let v = typed(3, "123");
        let debug = format!("{:?}", v);
        assert!(!debug.contains("123"));
        assert!(debug.contains("***"));
    }
}
