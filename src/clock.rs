//! Source of the current month for expiry checks.

use chrono::{Datelike, Local};
use std::fmt;

/// A calendar month, ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    /// Four-digit year. Declared first so the derived ordering is by year, then month.
    pub year: u16,
    /// Month (1-12).
    pub month: u8,
}

impl YearMonth {
    /// Creates a new year/month pair.
    pub const fn new(year: u16, month: u8) -> Self {
        Self { year, month }
    }

    /// First year of the century this month falls in, e.g. 2000 for 2031.
    #[inline]
    pub const fn century(&self) -> u16 {
        self.year - self.year % 100
    }
}

/// Supplies "today" to the expiry validator.
pub trait Clock: fmt::Debug + Send + Sync {
    /// Returns the current year and month.
    fn today(&self) -> YearMonth;
}

/// Wall-clock time in the local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> YearMonth {
        let now = Local::now();
        YearMonth::new(now.year().clamp(0, u16::MAX as i32) as u16, now.month() as u8)
    }
}

/// A clock frozen at a given month, for deterministic checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub YearMonth);

impl FixedClock {
    /// Creates a clock that always reports `year`/`month`.
    pub const fn new(year: u16, month: u8) -> Self {
        Self(YearMonth::new(year, month))
    }
}

impl Clock for FixedClock {
    fn today(&self) -> YearMonth {
        self.0
    }
}
