//! Field identities and the per-field snapshot handed to the presentation layer.

use crate::error::EntryError;
use std::fmt;
use std::str::FromStr;
use zeroize::Zeroize;

/// The input fields of the entry form, in their declared order.
///
/// The order drives focus traversal: number, expiry, CVV, postal code,
/// cardholder name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FieldKind {
    /// Card number.
    Number,
    /// Expiry date (MM/YY).
    Expiry,
    /// Card verification value.
    Cvv,
    /// Billing postal code.
    PostalCode,
    /// Name printed on the card.
    CardholderName,
}

impl FieldKind {
    /// All fields in declared order.
    pub const ALL: [FieldKind; 5] = [
        Self::Number,
        Self::Expiry,
        Self::Cvv,
        Self::PostalCode,
        Self::CardholderName,
    ];

    /// Position of the field in the declared order.
    #[inline]
    pub const fn index(&self) -> usize {
        match self {
            Self::Number => 0,
            Self::Expiry => 1,
            Self::Cvv => 2,
            Self::PostalCode => 3,
            Self::CardholderName => 4,
        }
    }

    /// Fields declared after this one, in order.
    #[inline]
    pub fn following(&self) -> &'static [FieldKind] {
        &Self::ALL[self.index() + 1..]
    }

    /// Returns a human-readable name for the field.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Number => "card number",
            Self::Expiry => "expiry",
            Self::Cvv => "CVV",
            Self::PostalCode => "postal code",
            Self::CardholderName => "cardholder name",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FieldKind {
    type Err = EntryError;

    /// Parses a field name such as `"number"`, `"cvv"` or `"postal_code"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "number" | "card_number" => Ok(Self::Number),
            "expiry" | "exp" => Ok(Self::Expiry),
            "cvv" | "cvc" => Ok(Self::Cvv),
            "postal_code" | "postal" | "zip" => Ok(Self::PostalCode),
            "cardholder_name" | "name" => Ok(Self::CardholderName),
            _ => Err(EntryError::UnknownField(s.to_string())),
        }
    }
}

/// Visual feedback a field should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Feedback {
    /// Default text color.
    #[default]
    Neutral,
    /// Error color: the field is complete but its content is wrong.
    Error,
}

/// Snapshot of one field after an update.
///
/// The value is zeroed when the snapshot is dropped, and `Debug` only shows
/// its length.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldState {
    value: String,
    is_valid: bool,
    has_full_length: bool,
}

impl FieldState {
    /// Creates a snapshot.
    pub fn new(value: impl Into<String>, is_valid: bool, has_full_length: bool) -> Self {
        Self {
            value: value.into(),
            is_valid,
            has_full_length,
        }
    }

    /// The normalized field value.
    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Whether the content passes the field's rule.
    #[inline]
    pub const fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Whether as many characters as the field could require were typed.
    #[inline]
    pub const fn has_full_length(&self) -> bool {
        self.has_full_length
    }

    /// Whether the field holds no input.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Coloring decision: error only once the field is complete and invalid.
    #[inline]
    pub const fn feedback(&self) -> Feedback {
        if self.has_full_length && !self.is_valid {
            Feedback::Error
        } else {
            Feedback::Neutral
        }
    }
}

impl fmt::Debug for FieldState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldState")
            .field("value_len", &self.value.chars().count())
            .field("is_valid", &self.is_valid)
            .field("has_full_length", &self.has_full_length)
            .finish()
    }
}

impl Drop for FieldState {
    fn drop(&mut self) {
        self.value.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_order() {
        for (i, kind) in FieldKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
        assert!(FieldKind::Number < FieldKind::CardholderName);
    }

    #[test]
    fn test_following() {
        assert_eq!(
            FieldKind::Cvv.following(),
            &[FieldKind::PostalCode, FieldKind::CardholderName]
        );
        assert!(FieldKind::CardholderName.following().is_empty());
    }

    #[test]
    fn test_parse_field_names() {
        assert_eq!("number".parse::<FieldKind>(), Ok(FieldKind::Number));
        assert_eq!("Postal Code".parse::<FieldKind>(), Ok(FieldKind::PostalCode));
        assert_eq!("cardholder-name".parse::<FieldKind>(), Ok(FieldKind::CardholderName));
        assert_eq!("CVC".parse::<FieldKind>(), Ok(FieldKind::Cvv));
        assert_eq!(
            "pin".parse::<FieldKind>(),
            Err(EntryError::UnknownField("pin".to_string()))
        );
    }

    #[test]
    fn test_feedback() {
        assert_eq!(FieldState::new("4111", false, false).feedback(), Feedback::Neutral);
        assert_eq!(FieldState::new("4112", false, true).feedback(), Feedback::Error);
        assert_eq!(FieldState::new("4111", true, true).feedback(), Feedback::Neutral);
    }

    #[test]
    fn test_debug_hides_value() {
        let state = FieldState::new("4111111111111111", true, true);
        let debug = format!("{:?}", state);
        assert!(!debug.contains("4111111111111111"));
        assert!(debug.contains("16"));
    }
}
