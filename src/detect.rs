//! Card brand classification using IIN prefix patterns.
//!
//! The Issuer Identification Number (IIN) is the leading part of a card
//! number. Each brand other than [`Brand::Generic`] owns one anchored regular
//! expression covering its IIN ranges and total length; the brands are tried
//! in declaration order and the first full match wins.
//!
//! # Example
//!
//! ```
//! use cardview::detect::classify;
//! use cardview::Brand;
//!
//! assert_eq!(classify("378282246310005"), Brand::Amex);
//! assert_eq!(classify("4111111111111111"), Brand::Visa);
//! assert_eq!(classify("999999999999999"), Brand::Generic);
//! ```

use crate::Brand;
use once_cell::sync::Lazy;
use regex::Regex;

/// Compiled patterns, in classification order. `Generic` has no entry.
static PATTERNS: Lazy<Vec<(Brand, Regex)>> = Lazy::new(|| {
    Brand::ALL
        .iter()
        .filter_map(|&brand| {
            brand
                .pattern_source()
                .map(|src| (brand, Regex::new(src).expect("brand pattern is a valid regex")))
        })
        .collect()
});

/// Returns the brand of the given card number.
///
/// The whole string must match a brand pattern: separators, whitespace or
/// a partial number yield [`Brand::Generic`]. Never fails.
///
/// # Example
///
/// ```
/// use cardview::detect::classify;
/// use cardview::Brand;
///
/// assert_eq!(classify("6011111111111117"), Brand::Discover);
/// assert_eq!(classify("4111-1111-1111-1111"), Brand::Generic);
/// ```
pub fn classify(number: &str) -> Brand {
    let brand = PATTERNS
        .iter()
        .find(|(_, pattern)| pattern.is_match(number))
        .map(|(brand, _)| *brand)
        .unwrap_or(Brand::Generic);

    tracing::trace!(length = number.len(), %brand, "classified card number");
    brand
}

/// Returns the compiled pattern of a brand, `None` for [`Brand::Generic`].
pub fn pattern_for(brand: Brand) -> Option<&'static Regex> {
    PATTERNS
        .iter()
        .find(|(b, _)| *b == brand)
        .map(|(_, pattern)| pattern)
}

/// Returns true if the number fully matches the given brand's pattern.
///
/// Unlike [`classify`], this ignores the brands that come earlier in the
/// classification order.
#[inline]
pub fn matches_brand(brand: Brand, number: &str) -> bool {
    pattern_for(brand).is_some_and(|pattern| pattern.is_match(number))
}
