//! Core card types.
//!
//! This module provides the `Brand` enum for identifying card networks and the
//! `CreditCard` record holding what the user typed into the card fields.

use std::fmt;
use std::str::FromStr;

use chrono::Datelike;
use zeroize::Zeroize;

use crate::detect::classify;
use crate::mask::constant_time_eq_str;

/// Supported credit card brands.
///
/// Every variant but `Generic` carries an IIN pattern. The declaration order
/// is the classification order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Brand {
    /// American Express - Prefix 34, 37, length 15
    Amex,
    /// Diners Club - Prefix 300-305, 3095, 36, 38, 39, length 14-16
    Diners,
    /// Discover - Prefix 6011, 644-649, 65, length 16
    Discover,
    /// Fallback for numbers no other brand matches
    Generic,
    /// JCB - Prefix 2131, 1800 (length 15), 35 (length 16)
    Jcb,
    /// Maestro - Prefix 50, 56-69 except 62, length 12-19
    Maestro,
    /// Mastercard - Prefix 51-55, 2221-2720, length 16
    Mastercard,
    /// UnionPay - Prefix 62, length 16-19
    UnionPay,
    /// Visa - Prefix 4, lengths 13, 16, 19
    Visa,
}

impl Brand {
    /// All brands in classification order.
    pub const ALL: [Brand; 9] = [
        Self::Amex,
        Self::Diners,
        Self::Discover,
        Self::Generic,
        Self::Jcb,
        Self::Maestro,
        Self::Mastercard,
        Self::UnionPay,
        Self::Visa,
    ];

    /// Returns the anchored regular expression source for this brand.
    pub const fn pattern_source(&self) -> Option<&'static str> {
        match self {
            Self::Amex => Some(r"^3[47][0-9]{13}$"),
            Self::Diners => Some(r"^3(?:0[0-5][0-9]{11,13}|095[0-9]{10,12}|[689][0-9]{12,14})$"),
            Self::Discover => Some(r"^6(?:011|4[4-9][0-9]|5[0-9]{2})[0-9]{12}$"),
            Self::Generic => None,
            Self::Jcb => Some(r"^(?:2131|1800|35[0-9]{3})[0-9]{11}$"),
            Self::Maestro => Some(r"^(?:50|5[6-9]|6[013-9])[0-9]{10,17}$"),
            Self::Mastercard => Some(
                r"^(?:5[1-5][0-9]{2}|222[1-9]|22[3-9][0-9]|2[3-6][0-9]{2}|27[01][0-9]|2720)[0-9]{12}$",
            ),
            Self::UnionPay => Some(r"^62[0-9]{14,17}$"),
            Self::Visa => Some(r"^4[0-9]{12}(?:[0-9]{3}){0,2}$"),
        }
    }

    /// Returns the compiled pattern for this brand, `None` for `Generic`.
    #[inline]
    pub fn pattern(&self) -> Option<&'static regex::Regex> {
        crate::detect::pattern_for(*self)
    }

    /// Returns a human-readable name for the brand.
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Amex => "American Express",
            Self::Diners => "Diners Club",
            Self::Discover => "Discover",
            Self::Generic => "Generic",
            Self::Jcb => "JCB",
            Self::Maestro => "Maestro",
            Self::Mastercard => "Mastercard",
            Self::UnionPay => "UnionPay",
            Self::Visa => "Visa",
        }
    }
}

impl fmt::Display for Brand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Returned when a string names no known brand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseBrandError {
    /// The rejected input.
    pub input: String,
}

impl fmt::Display for ParseBrandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown brand: {}", self.input)
    }
}

impl std::error::Error for ParseBrandError {}

impl FromStr for Brand {
    type Err = ParseBrandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "amex" | "american express" => Ok(Self::Amex),
            "diners" | "diners club" | "dinersclub" => Ok(Self::Diners),
            "discover" => Ok(Self::Discover),
            "generic" => Ok(Self::Generic),
            "jcb" => Ok(Self::Jcb),
            "maestro" => Ok(Self::Maestro),
            "mastercard" | "mc" => Ok(Self::Mastercard),
            "unionpay" | "union pay" => Ok(Self::UnionPay),
            "visa" => Ok(Self::Visa),
            _ => Err(ParseBrandError {
                input: s.to_string(),
            }),
        }
    }
}

/// The data entered on a card.
///
/// `brand` is derived from `number` and recomputed by every call to
/// [`set_number`](Self::set_number); it takes no part in equality.
///
/// # Security
///
/// - Debug and Display output mask the number, CVV and pin code
/// - Number, CVV and pin code are zeroed on drop using the `zeroize` crate
#[derive(Clone)]
pub struct CreditCard {
    holder: String,
    number: String,
    cvv: String,
    expiry: String,
    pin_code: String,
    brand: Brand,
}

impl CreditCard {
    /// Creates a card from its four fields.
    ///
    /// # Example
    ///
    /// ```
    /// use cardview::{Brand, CreditCard};
    ///
    /// let card = CreditCard::new("Jane Doe", "4111111111111111", "123", "0930");
    /// assert_eq!(card.brand(), Brand::Visa);
    /// ```
    pub fn new(
        holder: impl Into<String>,
        number: impl Into<String>,
        cvv: impl Into<String>,
        expiry: impl Into<String>,
    ) -> Self {
        let number = number.into();
        let brand = classify(&number);

        Self {
            holder: holder.into(),
            number,
            cvv: cvv.into(),
            expiry: expiry.into(),
            pin_code: String::new(),
            brand,
        }
    }

    /// Builder method to set the pin code.
    pub fn with_pin_code(mut self, pin_code: impl Into<String>) -> Self {
        self.set_pin_code(pin_code);
        self
    }

    /// Name of the holder.
    #[inline]
    pub fn holder(&self) -> &str {
        &self.holder
    }

    /// Sets the holder name.
    pub fn set_holder(&mut self, holder: impl Into<String>) {
        self.holder = holder.into();
    }

    /// Digits on the front of the card.
    ///
    /// # Security Warning
    ///
    /// This is the full number. Never log it; use the `Display` output instead.
    #[inline]
    pub fn number(&self) -> &str {
        &self.number
    }

    /// Sets the number and recomputes the brand.
    ///
    /// # Example
    ///
    /// ```
    /// use cardview::{Brand, CreditCard};
    ///
    /// let mut card = CreditCard::default();
    /// assert_eq!(card.brand(), Brand::Generic);
    ///
    /// card.set_number("378282246310005");
    /// assert_eq!(card.brand(), Brand::Amex);
    /// ```
    pub fn set_number(&mut self, number: impl Into<String>) {
        self.number.zeroize();
        self.number = number.into();
        self.brand = classify(&self.number);
    }

    /// Verification code on the back of the card.
    #[inline]
    pub fn cvv(&self) -> &str {
        &self.cvv
    }

    /// Sets the verification code.
    pub fn set_cvv(&mut self, cvv: impl Into<String>) {
        self.cvv.zeroize();
        self.cvv = cvv.into();
    }

    /// Expiry, normally in the canonical `MMYY` form.
    #[inline]
    pub fn expiry(&self) -> &str {
        &self.expiry
    }

    /// Sets the expiry. See [`expiry::normalize`](crate::expiry::normalize) to
    /// convert other shapes first.
    pub fn set_expiry(&mut self, expiry: impl Into<String>) {
        self.expiry = expiry.into();
    }

    /// Pin code, only needed by applications that store credentials.
    #[inline]
    pub fn pin_code(&self) -> &str {
        &self.pin_code
    }

    /// Sets the pin code.
    pub fn set_pin_code(&mut self, pin_code: impl Into<String>) {
        self.pin_code.zeroize();
        self.pin_code = pin_code.into();
    }

    /// Brand derived from the number.
    #[inline]
    pub const fn brand(&self) -> Brand {
        self.brand
    }

    /// Returns true if the number contains only ASCII digits.
    ///
    /// An empty number passes.
    pub fn is_number_valid(&self) -> bool {
        self.number.chars().all(|c| c.is_ascii_digit())
    }

    /// Returns true if the expiry month is 1-12 and its year is not before
    /// the current year.
    pub fn is_expiry_valid(&self) -> bool {
        crate::expiry::is_valid(&self.expiry)
    }

    /// Same as [`is_expiry_valid`](Self::is_expiry_valid), measured against `today`.
    pub fn is_expiry_valid_at<D: Datelike>(&self, today: &D) -> bool {
        crate::expiry::is_valid_at(&self.expiry, today)
    }

    /// Returns true if the CVV is exactly 3 ASCII digits.
    pub fn is_cvv_valid(&self) -> bool {
        self.cvv.len() == 3 && self.cvv.chars().all(|c| c.is_ascii_digit())
    }
}

impl Default for CreditCard {
    fn default() -> Self {
        Self::new("", "", "", "")
    }
}

impl PartialEq for CreditCard {
    fn eq(&self, other: &Self) -> bool {
        self.holder == other.holder
            && constant_time_eq_str(&self.number, &other.number)
            && constant_time_eq_str(&self.cvv, &other.cvv)
            && self.expiry == other.expiry
    }
}

impl Eq for CreditCard {}

impl fmt::Debug for CreditCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreditCard")
            .field("holder", &self.holder)
            .field("number", &crate::mask::mask_number(&self.number))
            .field("cvv", &crate::mask::mask_all(&self.cvv))
            .field("expiry", &self.expiry)
            .field("pin_code", &crate::mask::mask_all(&self.pin_code))
            .field("brand", &self.brand)
            .finish()
    }
}

impl fmt::Display for CreditCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Holder: {}, Number: {}, Expiry: {}, CVV: {}",
            self.holder,
            crate::mask::mask_number(&self.number),
            self.expiry,
            crate::mask::mask_all(&self.cvv)
        )
    }
}

impl Drop for CreditCard {
    fn drop(&mut self) {
        self.number.zeroize();
        self.cvv.zeroize();
        self.pin_code.zeroize();
    }
}
