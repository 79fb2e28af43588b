//! Credit card expiry normalization and validation.
//!
//! Expiries are kept as text in the canonical `MMYY` form. This module turns
//! the usual hand-typed shapes into that form and checks whether a canonical
//! expiry is still usable.
//!
//! # Supported Formats
//!
//! Using September 2018 as an example:
//!
//! - `09/18`, `0918`, `09-18`
//! - `092018`, `09/2018`, `09-2018`
//! - `2018/09`, `2018-09`
//!
//! # Example
//!
//! ```
//! use cardview::expiry::normalize;
//!
//! assert_eq!(normalize("09/18").unwrap(), "0918");
//! assert_eq!(normalize("2018-09").unwrap(), "0918");
//! assert_eq!(normalize(None).unwrap(), "");
//! assert!(normalize("18/09/01").is_err());
//! ```

use chrono::{Datelike, Local, NaiveDate};

use crate::error::FormatError;

/// Converts an expiry in one of the accepted shapes to `MMYY`.
///
/// `None` and the empty string normalize to the empty string. Any other
/// shape is a [`FormatError::UnrecognizedExpiry`].
///
/// # Example
///
/// ```
/// use cardview::expiry::normalize;
///
/// assert_eq!(normalize("09-2018").unwrap(), "0918");
/// assert_eq!(normalize("092018").unwrap(), "0918");
/// ```
pub fn normalize<'a>(expiry: impl Into<Option<&'a str>>) -> Result<String, FormatError> {
    let raw = match expiry.into() {
        None | Some("") => return Ok(String::new()),
        Some(raw) => raw,
    };

    let b = raw.as_bytes();
    let digits = |idx: &[usize]| idx.iter().all(|&i| b[i].is_ascii_digit());
    let separator = |i: usize| b[i] == b'/' || b[i] == b'-';

    // Every accepted shape is ASCII, so byte slicing below is on char boundaries
    let normalized = match b.len() {
        // MMYY
        4 if digits(&[0, 1, 2, 3]) => Some(raw.to_string()),
        // MM/YY, MM-YY
        5 if separator(2) && digits(&[0, 1, 3, 4]) => Some(format!("{}{}", &raw[0..2], &raw[3..5])),
        // MMYYYY
        6 if digits(&[0, 1, 2, 3, 4, 5]) => Some(format!("{}{}", &raw[0..2], &raw[4..6])),
        // MM/YYYY, MM-YYYY
        7 if separator(2) && digits(&[0, 1, 3, 4, 5, 6]) => {
            Some(format!("{}{}", &raw[0..2], &raw[5..7]))
        }
        // YYYY/MM, YYYY-MM
        7 if separator(4) && digits(&[0, 1, 2, 3, 5, 6]) => {
            Some(format!("{}{}", &raw[5..7], &raw[2..4]))
        }
        _ => None,
    };

    normalized.ok_or_else(|| {
        tracing::debug!(length = raw.len(), "unrecognized expiry format");
        FormatError::UnrecognizedExpiry {
            input: raw.to_string(),
        }
    })
}

/// Builds an expiry from a month and a year.
///
/// The numbers are concatenated as they are: pass a two digit year and pad
/// single digit months yourself, or use [`from_date`].
///
/// # Example
///
/// ```
/// use cardview::expiry::from_month_year;
///
/// assert_eq!(from_month_year(12, 30), "1230");
/// assert_eq!(from_month_year(9, 30), "930");
/// ```
pub fn from_month_year(month: u32, year: u32) -> String {
    format!("{}{}", month, year)
}

/// Builds a canonical `MMYY` expiry from a date.
///
/// # Example
///
/// ```
/// use cardview::expiry::from_date;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2018, 9, 1).unwrap();
/// assert_eq!(from_date(&date), "0918");
/// ```
pub fn from_date<D: Datelike>(date: &D) -> String {
    format!("{:02}{:02}", date.month(), date.year().rem_euclid(100))
}

/// Parses `date` with a `chrono` format string and builds a canonical expiry.
///
/// # Example
///
/// ```
/// use cardview::expiry::from_date_str;
///
/// assert_eq!(from_date_str("2030-12-31", "%Y-%m-%d").unwrap(), "1230");
/// assert!(from_date_str("12/30", "%Y-%m-%d").is_err());
/// ```
pub fn from_date_str(date: &str, format: &str) -> Result<String, FormatError> {
    NaiveDate::parse_from_str(date, format)
        .map(|d| from_date(&d))
        .map_err(|_| FormatError::InvalidDate {
            input: date.to_string(),
            format: format.to_string(),
        })
}

/// Returns true if a canonical expiry is usable at `today`.
///
/// The first two characters are the month (1-12), the next two the year,
/// which must not be before `today`'s two digit year. The month is not
/// compared against the current month. Malformed input yields `false`.
pub fn is_valid_at<D: Datelike>(expiry: &str, today: &D) -> bool {
    let (Some(month), Some(year)) = (expiry.get(0..2), expiry.get(2..4)) else {
        return false;
    };

    if !month.bytes().chain(year.bytes()).all(|b| b.is_ascii_digit()) {
        return false;
    }

    match (month.parse::<u32>(), year.parse::<i32>()) {
        (Ok(month), Ok(year)) => (1..=12).contains(&month) && year >= today.year().rem_euclid(100),
        _ => false,
    }
}

/// Returns true if a canonical expiry is usable today (local time).
#[inline]
pub fn is_valid(expiry: &str) -> bool {
    is_valid_at(expiry, &Local::now().date_naive())
}
