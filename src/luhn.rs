//! Luhn ("modulus 10") checksum.
//!
//! Digits are summed from the rightmost one; every second digit, starting
//! with the second from the right, is doubled and reduced by 9 when the
//! result exceeds 9. The number is valid when the total is divisible by 10.

/// Doubled digit with 9 subtracted when the result is >= 10.
/// Index is the digit (0-9), value is the transformed result.
const DOUBLE_TABLE: [u8; 10] = [0, 2, 4, 6, 8, 1, 3, 5, 7, 9];

/// Validates a slice of digit values (0-9) with the Luhn algorithm.
///
/// Returns `false` for an empty slice.
///
/// # Example
///
/// ```
/// use card_entry::luhn::validate;
///
/// assert!(validate(&[4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1]));
/// assert!(!validate(&[4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 2]));
/// ```
#[inline]
pub fn validate(digits: &[u8]) -> bool {
    !digits.is_empty() && compute_checksum(digits) % 10 == 0
}

/// Checks the digits of a text, ignoring every non-digit character.
///
/// Separators therefore never change the outcome.
///
/// ```
/// use card_entry::luhn::passes;
///
/// assert!(passes("4111 1111-1111 1111"));
/// assert!(!passes("----"));
/// ```
pub fn passes(text: &str) -> bool {
    let digits: Vec<u8> = text
        .bytes()
        .filter(u8::is_ascii_digit)
        .map(|b| b - b'0')
        .collect();
    validate(&digits)
}

/// Computes the Luhn sum (not reduced modulo 10).
#[inline]
pub fn compute_checksum(digits: &[u8]) -> u32 {
    digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 1 {
                DOUBLE_TABLE[d as usize % 10] as u32
            } else {
                d as u32
            }
        })
        .sum()
}

/// Generates the check digit that makes `digits` followed by it valid.
///
/// ```
/// use card_entry::luhn::generate_check_digit;
///
/// let partial = [4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1];
/// assert_eq!(generate_check_digit(&partial), 1);
/// ```
pub fn generate_check_digit(digits: &[u8]) -> u8 {
    // Appending the check digit shifts every position one to the left,
    // so the current last digit lands on a doubled position.
    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 0 {
                DOUBLE_TABLE[d as usize % 10] as u32
            } else {
                d as u32
            }
        })
        .sum();

    ((10 - (sum % 10)) % 10) as u8
}
