//! The common contract of every field validator.
//!
//! Each form field owns exactly one validator. The closed set of validator
//! kinds is represented by [`FieldValidator`], which dispatches the
//! [`Validator`] operations by variant.

use crate::cvv::FixedLengthValidator;
use crate::expiry::ExpiryValidator;
use crate::field::FieldState;
use crate::number::CardNumberValidator;
use crate::text::MaxLengthValidator;

/// Incremental validation of a single input field.
///
/// `update` is called with the full current text of the field on every
/// keystroke. All queries are total: malformed input is normalized or
/// reported as invalid, never as an error.
pub trait Validator {
    /// Replaces the field content with `text` and recomputes derived state.
    fn update(&mut self, text: &str);

    /// The normalized value.
    fn value(&self) -> &str;

    /// Whether as many characters as the field could ever require are present.
    fn has_full_length(&self) -> bool;

    /// Whether the current content passes the field's rule.
    fn is_valid(&self) -> bool;

    /// Snapshot of value and derived flags.
    fn state(&self) -> FieldState {
        FieldState::new(self.value(), self.is_valid(), self.has_full_length())
    }
}

/// Placeholder for a field the form does not ask for.
///
/// Always valid and full length with an empty value, so the readiness
/// conjunction needs no special case for disabled fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AlwaysValid;

impl Validator for AlwaysValid {
    fn update(&mut self, _text: &str) {}

    fn value(&self) -> &str {
        ""
    }

    fn has_full_length(&self) -> bool {
        true
    }

    fn is_valid(&self) -> bool {
        true
    }
}

/// Every validator kind a form field can hold.
#[derive(Debug, Clone)]
pub enum FieldValidator {
    /// Card number with brand detection and Luhn check.
    Number(CardNumberValidator),
    /// Month/year expiry date.
    Expiry(ExpiryValidator),
    /// Fixed-length digits (CVV).
    FixedLength(FixedLengthValidator),
    /// Bounded free text (postal code, cardholder name).
    MaxLength(MaxLengthValidator),
    /// Disabled field.
    AlwaysValid(AlwaysValid),
}

impl FieldValidator {
    /// Returns the card number validator, if this is one.
    pub fn as_number(&self) -> Option<&CardNumberValidator> {
        match self {
            Self::Number(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the expiry validator, if this is one.
    pub fn as_expiry(&self) -> Option<&ExpiryValidator> {
        match self {
            Self::Expiry(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the fixed-length validator, if this is one.
    pub fn as_fixed_length(&self) -> Option<&FixedLengthValidator> {
        match self {
            Self::FixedLength(v) => Some(v),
            _ => None,
        }
    }

    /// Mutable access to the fixed-length validator, if this is one.
    pub fn as_fixed_length_mut(&mut self) -> Option<&mut FixedLengthValidator> {
        match self {
            Self::FixedLength(v) => Some(v),
            _ => None,
        }
    }

    /// Returns true for the disabled-field placeholder.
    #[inline]
    pub const fn is_placeholder(&self) -> bool {
        matches!(self, Self::AlwaysValid(_))
    }
}

impl Validator for FieldValidator {
    fn update(&mut self, text: &str) {
        match self {
            Self::Number(v) => v.update(text),
            Self::Expiry(v) => v.update(text),
            Self::FixedLength(v) => v.update(text),
            Self::MaxLength(v) => v.update(text),
            Self::AlwaysValid(v) => v.update(text),
        }
    }

    fn value(&self) -> &str {
        match self {
            Self::Number(v) => v.value(),
            Self::Expiry(v) => v.value(),
            Self::FixedLength(v) => v.value(),
            Self::MaxLength(v) => v.value(),
            Self::AlwaysValid(v) => v.value(),
        }
    }

    fn has_full_length(&self) -> bool {
        match self {
            Self::Number(v) => v.has_full_length(),
            Self::Expiry(v) => v.has_full_length(),
            Self::FixedLength(v) => v.has_full_length(),
            Self::MaxLength(v) => v.has_full_length(),
            Self::AlwaysValid(v) => v.has_full_length(),
        }
    }

    fn is_valid(&self) -> bool {
        match self {
            Self::Number(v) => v.is_valid(),
            Self::Expiry(v) => v.is_valid(),
            Self::FixedLength(v) => v.is_valid(),
            Self::MaxLength(v) => v.is_valid(),
            Self::AlwaysValid(v) => v.is_valid(),
        }
    }
}

impl From<CardNumberValidator> for FieldValidator {
    fn from(v: CardNumberValidator) -> Self {
        Self::Number(v)
    }
}

impl From<ExpiryValidator> for FieldValidator {
    fn from(v: ExpiryValidator) -> Self {
        Self::Expiry(v)
    }
}

impl From<FixedLengthValidator> for FieldValidator {
    fn from(v: FixedLengthValidator) -> Self {
        Self::FixedLength(v)
    }
}

impl From<MaxLengthValidator> for FieldValidator {
    fn from(v: MaxLengthValidator) -> Self {
        Self::MaxLength(v)
    }
}

impl From<AlwaysValid> for FieldValidator {
    fn from(v: AlwaysValid) -> Self {
        Self::AlwaysValid(v)
    }
}
