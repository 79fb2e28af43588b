//! Masking utilities for card fields.
//!
//! Used by the `Debug` and `Display` implementations of
//! [`CreditCard`](crate::CreditCard) and [`RenderedCard`](crate::RenderedCard),
//! so that a full card number or verification code is never printed.
//!
//! Only the last 4 characters of a number may be shown.

/// Masks a card number, keeping only its last 4 characters.
///
/// Numbers of 4 characters or fewer are masked completely.
///
/// # Example
///
/// ```
/// use cardview::mask::mask_number;
///
/// assert_eq!(mask_number("4111111111111111"), "************1111");
/// assert_eq!(mask_number("4111"), "****");
/// ```
#[inline]
pub fn mask_number(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let len = chars.len();

    if len <= 4 {
        return "*".repeat(len);
    }

    let mut result = String::with_capacity(len);
    result.push_str(&"*".repeat(len - 4));
    result.extend(&chars[len - 4..]);
    result
}

/// Masks every character of a field (CVV, pin code).
#[inline]
pub fn mask_all(input: &str) -> String {
    "*".repeat(input.chars().count())
}

/// Constant-time comparison of two byte slices.
///
/// Takes the same amount of time regardless of where (or if) the slices
/// differ. Used when comparing card numbers and verification codes.
///
/// # Example
///
/// ```
/// use cardview::mask::constant_time_eq;
///
/// assert!(constant_time_eq(b"4111111111111111", b"4111111111111111"));
/// assert!(!constant_time_eq(b"4111111111111111", b"4111111111111112"));
/// ```
#[inline]
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut diff: u8 = 0;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }

    diff == 0
}

/// Constant-time comparison of two strings.
#[inline]
pub fn constant_time_eq_str(a: &str, b: &str) -> bool {
    constant_time_eq(a.as_bytes(), b.as_bytes())
}
