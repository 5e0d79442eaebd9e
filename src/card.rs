//! Card brand data for the entry form.
//!
//! This module provides the `CardBrand` enum together with the per-brand
//! number length and CVV length rules the entry validators depend on.
//! Prefix classification lives in [`crate::detect`].

use std::fmt;

/// Card brands recognized while a number is being typed.
///
/// `Unknown` is a regular classification outcome, not an error: it only means
/// the number and CVV length rules fall back to permissive defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CardBrand {
    /// No prefix rule matched (yet).
    #[default]
    Unknown,
    /// Visa - Prefix 4, length 16
    Visa,
    /// Mastercard - Prefix 51-55, 2221-2720, length 16
    Mastercard,
    /// American Express - Prefix 34, 37, length 15
    Amex,
    /// Discover - Prefix 6011, 622126-622925, 644-649, 65, length 16
    Discover,
    /// JCB - Prefix 3528-3589, length 16
    Jcb,
    /// Diners Club - Prefix 300-305, 309, 36, 38-39, length 14
    DinersClub,
}

/// Number length assumed for `CardBrand::Unknown`, so input is never blocked.
pub const UNKNOWN_NUMBER_LENGTH: usize = 19;

/// CVV length assumed for `CardBrand::Unknown`.
pub const DEFAULT_CVV_LENGTH: usize = 3;

impl CardBrand {
    /// Returns the digit count a complete number of this brand has.
    #[inline]
    pub const fn number_length(&self) -> usize {
        match self {
            Self::Amex => 15,
            Self::DinersClub => 14,
            Self::Visa | Self::Mastercard | Self::Discover | Self::Jcb => 16,
            Self::Unknown => UNKNOWN_NUMBER_LENGTH,
        }
    }

    /// Returns the expected CVV length for this brand.
    ///
    /// - American Express: 4 digits (printed on front)
    /// - All other brands: 3 digits
    #[inline]
    pub const fn cvv_length(&self) -> usize {
        match self {
            Self::Amex => 4,
            _ => DEFAULT_CVV_LENGTH,
        }
    }

    /// Returns a human-readable name for the card brand.
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Visa => "Visa",
            Self::Mastercard => "Mastercard",
            Self::Amex => "American Express",
            Self::Discover => "Discover",
            Self::Jcb => "JCB",
            Self::DinersClub => "Diners Club",
        }
    }
}

impl fmt::Display for CardBrand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
