//! Expiry date field validation.
//!
//! The field takes two month digits followed by two year digits. Whatever
//! separator the keyboard filter lets through (`/`, `-`, space) is dropped
//! before positions are interpreted, so `"12/30"` and `"1230"` are the same
//! input.
//!
//! # Example
//!
//! ```
//! use card_entry::clock::FixedClock;
//! use card_entry::expiry::ExpiryValidator;
//! use card_entry::Validator;
//! use std::sync::Arc;
//!
//! let mut v = ExpiryValidator::new(Arc::new(FixedClock::new(2024, 1)));
//! v.update("12/30");
//! assert!(v.is_valid());
//! assert_eq!(v.month(), Some(12));
//! assert_eq!(v.year(), Some(2030));
//! ```

use crate::clock::{Clock, SystemClock, YearMonth};
use crate::validator::Validator;
use std::sync::Arc;

/// Digits in a complete `MMYY` entry.
pub const EXPIRY_DIGITS: usize = 4;

/// Cards are not issued with an expiry further ahead than this many years.
pub const MAX_YEARS_AHEAD: u16 = 15;

/// A parsed expiry month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExpiryDate {
    /// Month (1-12)
    month: u8,
    /// Four-digit year (e.g., 2025)
    year: u16,
}

impl ExpiryDate {
    /// Creates a new expiry date.
    ///
    /// Returns `None` if the month is invalid (not 1-12).
    pub fn new(month: u8, year: u16) -> Option<Self> {
        if !(1..=12).contains(&month) {
            return None;
        }
        Some(Self { month, year })
    }

    /// Returns the month (1-12).
    #[inline]
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// Returns the four-digit year.
    #[inline]
    pub const fn year(&self) -> u16 {
        self.year
    }

    /// Returns true if the card is expired as of `today`.
    ///
    /// A card stays valid through the end of its expiry month.
    pub fn is_expired_at(&self, today: YearMonth) -> bool {
        YearMonth::new(self.year, self.month) < today
    }

    /// Returns true if the year lies more than `max_years` after `today`.
    pub fn is_too_far_future(&self, today: YearMonth, max_years: u16) -> bool {
        self.year > today.year.saturating_add(max_years)
    }
}

/// Validates the `MM/YY` expiry field against the current month.
///
/// Valid means: four digits, month in 1-12, not before the current month,
/// and no more than [`MAX_YEARS_AHEAD`] years ahead.
#[derive(Debug, Clone)]
pub struct ExpiryValidator {
    digits: String,
    clock: Arc<dyn Clock>,
    max_years_ahead: u16,
    /// Century of a four-digit seed year, until the field is edited.
    seed_century: Option<u16>,
}

impl Default for ExpiryValidator {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl ExpiryValidator {
    /// Creates an empty validator reading "today" from `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            digits: String::with_capacity(EXPIRY_DIGITS),
            clock,
            max_years_ahead: MAX_YEARS_AHEAD,
            seed_century: None,
        }
    }

    /// Overrides how many years ahead an expiry may lie.
    pub fn with_max_years_ahead(mut self, years: u16) -> Self {
        self.max_years_ahead = years;
        self
    }

    /// Creates a validator seeded with a known month and year.
    ///
    /// `year` may be given with two or four digits. A four-digit year keeps
    /// its century until the field is edited; a two-digit year is placed in
    /// the current century. An out-of-range month leaves the field empty.
    pub fn seeded(month: u8, year: u16, clock: Arc<dyn Clock>) -> Self {
        let mut v = Self::new(clock);
        if (1..=12).contains(&month) {
            v.digits = format!("{:02}{:02}", month, year % 100);
            if year >= 100 {
                v.seed_century = Some(year - year % 100);
            }
        }
        v
    }

    /// The month typed, once all four digits are present.
    pub fn month(&self) -> Option<u8> {
        if !self.has_full_length() {
            return None;
        }
        self.digits[0..2].parse().ok()
    }

    /// The four-digit year, once all four digits are present.
    ///
    /// Typed digits are placed in the current century. A seeded four-digit
    /// year is returned as given.
    pub fn year(&self) -> Option<u16> {
        if !self.has_full_length() {
            return None;
        }
        let yy: u16 = self.digits[2..4].parse().ok()?;
        let century = self
            .seed_century
            .unwrap_or_else(|| self.clock.today().century());
        century.checked_add(yy)
    }

    /// The parsed date, if the month is in range.
    pub fn expiry_date(&self) -> Option<ExpiryDate> {
        ExpiryDate::new(self.month()?, self.year()?)
    }

    /// Display text with the separator re-inserted, e.g. `"12/30"`.
    pub fn display_text(&self) -> String {
        if self.digits.len() <= 2 {
            return self.digits.clone();
        }
        format!("{}/{}", &self.digits[..2], &self.digits[2..])
    }
}

impl Validator for ExpiryValidator {
    fn update(&mut self, text: &str) {
        self.seed_century = None;
        self.digits.clear();
        self.digits
            .extend(text.chars().filter(|c| c.is_ascii_digit()));
    }

    fn value(&self) -> &str {
        &self.digits
    }

    fn has_full_length(&self) -> bool {
        self.digits.len() == EXPIRY_DIGITS
    }

    fn is_valid(&self) -> bool {
        let Some(date) = self.expiry_date() else {
            return false;
        };
        let today = self.clock.today();
        !date.is_expired_at(today) && !date.is_too_far_future(today, self.max_years_ahead)
    }
}
