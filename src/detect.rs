//! Card brand classification from a (partial) number prefix.
//!
//! Classification runs on every keystroke, so it has to work on incomplete
//! input: a leading `4` is Visa immediately, while `3` alone stays
//! `Unknown` until the second digit tells Amex (`34`, `37`) apart from
//! Diners Club (`36`, `38`) or JCB (`35`).
//!
//! The brand table is a small curated list of prefix ranges, not a full
//! BIN database. A rule with an N-digit prefix only matches once at least N
//! digits have been typed.

use crate::CardBrand;

/// Longest prefix (in digits) a rule may inspect.
pub const MAX_PREFIX_WIDTH: usize = 8;

/// One prefix range of the classification table.
///
/// Matches when the first `width` digits of the input, read as a number,
/// fall within `low..=high`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefixRule {
    /// Inclusive lower bound of the prefix range.
    pub low: u32,
    /// Inclusive upper bound of the prefix range.
    pub high: u32,
    /// Number of leading digits the rule inspects.
    pub width: u8,
    /// Brand selected when the rule matches.
    pub brand: CardBrand,
}

impl PrefixRule {
    /// Creates a rule matching a single prefix, e.g. `34`.
    pub const fn exact(prefix: u32, width: u8, brand: CardBrand) -> Self {
        Self::range(prefix, prefix, width, brand)
    }

    /// Creates a rule matching a range of prefixes, e.g. `51..=55`.
    pub const fn range(low: u32, high: u32, width: u8, brand: CardBrand) -> Self {
        Self {
            low,
            high,
            width,
            brand,
        }
    }

    /// Returns true if the leading digits satisfy this rule.
    #[inline]
    pub fn matches(&self, head: &[u8]) -> bool {
        let width = self.width as usize;
        if width == 0 || width > MAX_PREFIX_WIDTH || head.len() < width {
            return false;
        }

        let value = head[..width]
            .iter()
            .fold(0u32, |acc, &d| acc * 10 + d as u32);
        (self.low..=self.high).contains(&value)
    }
}

/// The built-in brand table.
///
/// Prefix sets are disjoint across brands.
pub const CARD_PREFIXES: &[PrefixRule] = &[
    // Visa: 4
    PrefixRule::exact(4, 1, CardBrand::Visa),
    // Mastercard: 51-55, 2221-2720
    PrefixRule::range(51, 55, 2, CardBrand::Mastercard),
    PrefixRule::range(2221, 2720, 4, CardBrand::Mastercard),
    // American Express: 34, 37
    PrefixRule::exact(34, 2, CardBrand::Amex),
    PrefixRule::exact(37, 2, CardBrand::Amex),
    // Discover: 6011, 622126-622925, 644-649, 65
    PrefixRule::exact(6011, 4, CardBrand::Discover),
    PrefixRule::range(622126, 622925, 6, CardBrand::Discover),
    PrefixRule::range(644, 649, 3, CardBrand::Discover),
    PrefixRule::exact(65, 2, CardBrand::Discover),
    // JCB: 3528-3589
    PrefixRule::range(3528, 3589, 4, CardBrand::Jcb),
    // Diners Club: 300-305, 309, 36, 38-39
    PrefixRule::range(300, 305, 3, CardBrand::DinersClub),
    PrefixRule::exact(309, 3, CardBrand::DinersClub),
    PrefixRule::exact(36, 2, CardBrand::DinersClub),
    PrefixRule::range(38, 39, 2, CardBrand::DinersClub),
];

/// Classifies a (possibly partial) card number using the built-in table.
///
/// Non-digit characters are ignored. Returns `CardBrand::Unknown` for empty
/// input or when no rule matches.
///
/// # Example
///
/// ```
/// use card_entry::detect::classify;
/// use card_entry::CardBrand;
///
/// assert_eq!(classify("4"), CardBrand::Visa);
/// assert_eq!(classify("3"), CardBrand::Unknown);
/// assert_eq!(classify("37"), CardBrand::Amex);
/// assert_eq!(classify("3782 8224"), CardBrand::Amex);
/// ```
#[inline]
pub fn classify(digits: &str) -> CardBrand {
    classify_with(CARD_PREFIXES, digits)
}

/// Classifies a (possibly partial) card number against a custom table.
///
/// When several rules match, the one with the longest prefix wins.
pub fn classify_with(table: &[PrefixRule], digits: &str) -> CardBrand {
    let mut head = [0u8; MAX_PREFIX_WIDTH];
    let mut count = 0usize;
    for b in digits
        .bytes()
        .filter(u8::is_ascii_digit)
        .take(MAX_PREFIX_WIDTH)
    {
        head[count] = b - b'0';
        count += 1;
    }
    let head = &head[..count];

    table
        .iter()
        .filter(|rule| rule.matches(head))
        .max_by_key(|rule| rule.width)
        .map(|rule| rule.brand)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visa_detection() {
        assert_eq!(classify("4"), CardBrand::Visa);
        assert_eq!(classify("4111111111111111"), CardBrand::Visa);
    }

    #[test]
    fn test_mastercard_detection() {
        assert_eq!(classify("51"), CardBrand::Mastercard);
        assert_eq!(classify("55"), CardBrand::Mastercard);
        assert_eq!(classify("2221"), CardBrand::Mastercard);
        assert_eq!(classify("2720"), CardBrand::Mastercard);
        assert_eq!(classify("2721"), CardBrand::Unknown);
        assert_eq!(classify("222"), CardBrand::Unknown);
    }

    #[test]
    fn test_amex_detection() {
        assert_eq!(classify("34"), CardBrand::Amex);
        assert_eq!(classify("37"), CardBrand::Amex);
        assert_eq!(classify("378282246310005"), CardBrand::Amex);
    }

    #[test]
    fn test_discover_detection() {
        assert_eq!(classify("6011"), CardBrand::Discover);
        assert_eq!(classify("644"), CardBrand::Discover);
        assert_eq!(classify("649"), CardBrand::Discover);
        assert_eq!(classify("65"), CardBrand::Discover);
        assert_eq!(classify("622126"), CardBrand::Discover);
        assert_eq!(classify("622925"), CardBrand::Discover);
        assert_eq!(classify("622926"), CardBrand::Unknown);
    }

    #[test]
    fn test_jcb_detection() {
        assert_eq!(classify("3528"), CardBrand::Jcb);
        assert_eq!(classify("3589"), CardBrand::Jcb);
        assert_eq!(classify("3527"), CardBrand::Unknown);
    }

    #[test]
    fn test_diners_club_detection() {
        assert_eq!(classify("300"), CardBrand::DinersClub);
        assert_eq!(classify("305"), CardBrand::DinersClub);
        assert_eq!(classify("309"), CardBrand::DinersClub);
        assert_eq!(classify("36"), CardBrand::DinersClub);
        assert_eq!(classify("38"), CardBrand::DinersClub);
        assert_eq!(classify("39"), CardBrand::DinersClub);
        assert_eq!(classify("306"), CardBrand::Unknown);
    }

    #[test]
    fn test_partial_prefix_stays_unknown() {
        assert_eq!(classify("3"), CardBrand::Unknown);
        assert_eq!(classify("6"), CardBrand::Unknown);
        assert_eq!(classify("601"), CardBrand::Unknown);
        assert_eq!(classify("5"), CardBrand::Unknown);
    }

    #[test]
    fn test_unknown_brand() {
        assert_eq!(classify(""), CardBrand::Unknown);
        assert_eq!(classify("0000000000000000"), CardBrand::Unknown);
        assert_eq!(classify("1"), CardBrand::Unknown);
        assert_eq!(classify("9"), CardBrand::Unknown);
    }

    #[test]
    fn test_separators_ignored() {
        assert_eq!(classify("3 7"), CardBrand::Amex);
        assert_eq!(classify("60-11"), CardBrand::Discover);
    }

    #[test]
    fn test_longest_prefix_wins() {
        let table = [
            PrefixRule::exact(6, 1, CardBrand::Visa),
            PrefixRule::range(6011, 6011, 4, CardBrand::Discover),
        ];
        assert_eq!(classify_with(&table, "6"), CardBrand::Visa);
        assert_eq!(classify_with(&table, "601"), CardBrand::Visa);
        assert_eq!(classify_with(&table, "6011"), CardBrand::Discover);
    }

    #[test]
    fn test_builtin_table_is_disjoint() {
        // Every prefix up to the widest rule matches at most one brand.
        for rule in CARD_PREFIXES {
            for value in [rule.low, rule.high] {
                let text = format!("{:0width$}", value, width = rule.width as usize);
                let digits: Vec<u8> = text.bytes().map(|b| b - b'0').collect();
                let brands: Vec<CardBrand> = CARD_PREFIXES
                    .iter()
                    .filter(|r| r.matches(&digits))
                    .map(|r| r.brand)
                    .collect();
                assert!(
                    brands.iter().all(|&b| b == rule.brand),
                    "prefix {} matched {:?}",
                    text,
                    brands
                );
            }
        }
    }
}
