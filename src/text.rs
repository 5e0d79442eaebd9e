//! Bounded free-text fields: postal code and cardholder name.

use crate::validator::Validator;

/// Longest postal code the payment backend accepts.
pub const MAX_POSTAL_CODE_LENGTH: usize = 20;

/// Longest cardholder name the payment backend accepts.
pub const MAX_CARDHOLDER_NAME_LENGTH: usize = 175;

/// Accepts any non-empty text up to a maximum length.
///
/// Lengths are counted in characters, not bytes. With `numeric_only` set,
/// non-digits are dropped on update (numeric postal codes).
///
/// ```
/// use card_entry::text::MaxLengthValidator;
/// use card_entry::Validator;
///
/// let mut zip = MaxLengthValidator::new(5).numeric_only(true);
/// zip.update("94-10 3");
/// assert_eq!(zip.value(), "94103");
/// assert!(zip.is_valid());
/// assert!(zip.has_full_length());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaxLengthValidator {
    value: String,
    max_length: usize,
    numeric_only: bool,
}

impl MaxLengthValidator {
    /// Creates an empty validator allowing up to `max_length` characters.
    pub fn new(max_length: usize) -> Self {
        Self {
            value: String::new(),
            max_length,
            numeric_only: false,
        }
    }

    /// Validator for the postal code field.
    pub fn postal_code(numeric_only: bool) -> Self {
        Self::new(MAX_POSTAL_CODE_LENGTH).numeric_only(numeric_only)
    }

    /// Validator for the cardholder name field.
    pub fn cardholder_name() -> Self {
        Self::new(MAX_CARDHOLDER_NAME_LENGTH)
    }

    /// Restricts input to digits.
    pub fn numeric_only(mut self, numeric_only: bool) -> Self {
        self.numeric_only = numeric_only;
        self
    }

    /// The configured maximum length.
    #[inline]
    pub const fn max_length(&self) -> usize {
        self.max_length
    }

    /// Whether only digits are kept.
    #[inline]
    pub const fn is_numeric_only(&self) -> bool {
        self.numeric_only
    }

    #[inline]
    fn char_len(&self) -> usize {
        self.value.chars().count()
    }
}

impl Validator for MaxLengthValidator {
    fn update(&mut self, text: &str) {
        self.value.clear();
        if self.numeric_only {
            self.value
                .extend(text.chars().filter(|c| c.is_ascii_digit()));
        } else {
            self.value.push_str(text);
        }
    }

    fn value(&self) -> &str {
        &self.value
    }

    fn has_full_length(&self) -> bool {
        self.char_len() == self.max_length
    }

    fn is_valid(&self) -> bool {
        (1..=self.max_length).contains(&self.char_len())
    }
}
