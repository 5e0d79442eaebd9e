//! Masking helpers for safe `Debug` output and logging.
//!
//! PCI-DSS allows displaying only the last four digits of a card number.
//! Validators and results route their `Debug` impls through here so a full
//! number or a CVV never ends up in a log line.

/// Masks a card number showing only the last 4 digits.
///
/// Non-digit characters are stripped first. Inputs with 4 digits or fewer
/// are fully masked.
///
/// # Example
///
/// ```
/// use card_entry::mask::mask_number;
///
/// assert_eq!(mask_number("4111111111111111"), "****-****-****-1111");
/// assert_eq!(mask_number("4111"), "****");
/// ```
pub fn mask_number(input: &str) -> String {
    let digits: Vec<char> = input.chars().filter(|c| c.is_ascii_digit()).collect();
    let len = digits.len();

    if len <= 4 {
        return "*".repeat(len);
    }

    let masked_count = len - 4;
    let mut result = String::with_capacity(len + (len / 4));

    for i in 0..masked_count {
        if i > 0 && i % 4 == 0 {
            result.push('-');
        }
        result.push('*');
    }

    if masked_count % 4 == 0 {
        result.push('-');
    }

    result.extend(&digits[len - 4..]);
    result
}

/// Replaces every character with `*`, keeping only the length visible.
#[inline]
pub fn mask_all(input: &str) -> String {
    "*".repeat(input.chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_number() {
        assert_eq!(mask_number("4111111111111111"), "****-****-****-1111");
        assert_eq!(mask_number("4111-1111-1111-1111"), "****-****-****-1111");
        assert_eq!(mask_number("378282246310005"), "****-****-***0005");
    }

    #[test]
    fn test_mask_short() {
        assert_eq!(mask_number(""), "");
        assert_eq!(mask_number("411"), "***");
        assert_eq!(mask_number("41111"), "*1111");
    }

    #[test]
    fn test_mask_all() {
        assert_eq!(mask_all("123"), "***");
        assert_eq!(mask_all(""), "");
    }
}
