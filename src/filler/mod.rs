//! Digit fillers.
//!
//! A [`Filler`] pads a partially typed value up to a target length with a
//! fill character, so the user sees how many digits are still missing:
//!
//! ```text
//! Input         Fillers                 Result
//! 222233334444  (16,'*')                222233334444****
//! 222233334444  (20,'*')                222233334444********
//! 222233334444  (16,'X')                222233334444XXXX
//! 222233334444  (16,'*') + (20,'*')     222233334444****
//! ```
//!
//! A [`FillerList`] keeps several fillers sorted by length and uses the first
//! one long enough for the input.
//!
//! # Loading
//!
//! Filler lists can be read from configuration files behind feature flags:
//!
//! - `fillers-json` - JSON loader
//! - `fillers-csv` - CSV loader
//!
//! ```rust,ignore
//! use cardview::filler::JsonFillerLoader;
//!
//! let fillers = JsonFillerLoader::from_file("number_fillers.json")?;
//! assert_eq!(fillers.fill("222233334444"), "222233334444****");
//! ```

#[cfg(feature = "fillers-json")]
mod json;

#[cfg(feature = "fillers-csv")]
mod csv;

#[cfg(feature = "fillers-json")]
pub use json::JsonFillerLoader;

#[cfg(feature = "fillers-csv")]
pub use csv::CsvFillerLoader;

use crate::error::RangeError;
use std::fmt;
use std::str::FromStr;

/// Fill character used when a configuration entry names none.
pub const DEFAULT_FILL_VALUE: char = '*';

/// A target length and the character used to reach it.
///
/// Lists order fillers by [`length`](Self::length) alone; fillers of equal
/// length keep the order they were given in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "fillers-json", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "fillers-json", serde(try_from = "json::RawFiller", into = "json::RawFiller"))]
pub struct Filler {
    length: usize,
    fill_value: char,
}

impl Filler {
    /// Creates a filler.
    ///
    /// Returns `None` if `length` is 0.
    pub fn new(length: usize, fill_value: char) -> Option<Self> {
        if length == 0 {
            return None;
        }
        Some(Self { length, fill_value })
    }

    /// Target length, in characters.
    #[inline]
    pub const fn length(&self) -> usize {
        self.length
    }

    /// Character appended until the target length is reached.
    #[inline]
    pub const fn fill_value(&self) -> char {
        self.fill_value
    }

    /// Returns true if this filler can pad an input of `input_length` characters.
    #[inline]
    pub const fn fits(&self, input_length: usize) -> bool {
        self.length >= input_length
    }

    /// Pads `input` on the right up to this filler's length.
    ///
    /// An input already at the target length is returned unchanged; a longer
    /// one is a [`RangeError::FillerTooShort`].
    ///
    /// # Example
    ///
    /// ```
    /// use cardview::Filler;
    ///
    /// let filler = Filler::new(16, 'X').unwrap();
    /// assert_eq!(filler.format("222233334444").unwrap(), "222233334444XXXX");
    /// assert!(filler.format("22223333444455556").is_err());
    /// ```
    pub fn format(&self, input: &str) -> Result<String, RangeError> {
        let input_length = input.chars().count();

        if !self.fits(input_length) {
            return Err(RangeError::FillerTooShort {
                length: self.length,
                input_length,
            });
        }

        Ok(self.pad(input, input_length))
    }

    fn pad(&self, input: &str, input_length: usize) -> String {
        let missing = self.length - input_length;
        let mut result = String::with_capacity(input.len() + missing * self.fill_value.len_utf8());
        result.push_str(input);
        result.extend(std::iter::repeat(self.fill_value).take(missing));
        result
    }
}

impl fmt::Display for Filler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.length, self.fill_value)
    }
}

/// Parses `length` or `length:fill`, the form `Display` writes.
///
/// ```
/// use cardview::Filler;
///
/// assert_eq!("16:X".parse::<Filler>().unwrap(), Filler::new(16, 'X').unwrap());
/// assert_eq!("16".parse::<Filler>().unwrap().fill_value(), '*');
/// assert!("0:*".parse::<Filler>().is_err());
/// ```
impl FromStr for Filler {
    type Err = FillerLoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (length, fill_value) = match s.split_once(':') {
            Some((length, fill_value)) => (length, Some(fill_value)),
            None => (s, None),
        };

        let length = length.trim().parse::<usize>().map_err(|_| {
            FillerLoadError::ParseError(format!("filler length '{}' is not a number", length))
        })?;

        filler_from_parts(0, length, fill_value)
    }
}

/// Fillers sorted ascending by length.
///
/// The list is sorted when it is built, so selection can take the first
/// filler that fits. The sort is stable: among fillers of the same length
/// the one listed first wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FillerList {
    fillers: Vec<Filler>,
}

impl FillerList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty list with room for `capacity` fillers.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fillers: Vec::with_capacity(capacity),
        }
    }

    /// Adds a filler, keeping the list sorted.
    pub fn insert(&mut self, filler: Filler) {
        let pos = self.fillers.partition_point(|f| f.length() <= filler.length());
        self.fillers.insert(pos, filler);
    }

    /// Returns the first filler whose length is at least `input_length`.
    pub fn select(&self, input_length: usize) -> Option<&Filler> {
        self.fillers.iter().find(|f| f.fits(input_length))
    }

    /// Pads `input` with the first filler that fits.
    ///
    /// If no filler is long enough the input is returned unchanged.
    ///
    /// # Example
    ///
    /// ```
    /// use cardview::{Filler, FillerList};
    ///
    /// let fillers: FillerList = [Filler::new(20, '*'), Filler::new(16, '*')]
    ///     .into_iter()
    ///     .flatten()
    ///     .collect();
    ///
    /// assert_eq!(fillers.fill("222233334444"), "222233334444****");
    /// assert_eq!(fillers.fill("222233334444555566667"), "222233334444555566667");
    /// ```
    pub fn fill(&self, input: &str) -> String {
        let input_length = input.chars().count();

        match self.select(input_length) {
            Some(filler) => {
                tracing::trace!(input_length, filler = %filler, "selected filler");
                filler.pad(input, input_length)
            }
            None => {
                tracing::trace!(input_length, "no filler fits, input left as is");
                input.to_string()
            }
        }
    }

    /// Returns the fillers in ascending order.
    #[inline]
    pub fn as_slice(&self) -> &[Filler] {
        &self.fillers
    }

    /// Returns an iterator over the fillers in ascending order.
    pub fn iter(&self) -> std::slice::Iter<'_, Filler> {
        self.fillers.iter()
    }

    /// Returns the number of fillers.
    #[inline]
    pub fn len(&self) -> usize {
        self.fillers.len()
    }

    /// Returns true if there are no fillers.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fillers.is_empty()
    }
}

impl From<Vec<Filler>> for FillerList {
    fn from(mut fillers: Vec<Filler>) -> Self {
        fillers.sort_by_key(Filler::length);
        Self { fillers }
    }
}

impl FromIterator<Filler> for FillerList {
    fn from_iter<I: IntoIterator<Item = Filler>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<'a> IntoIterator for &'a FillerList {
    type Item = &'a Filler;
    type IntoIter = std::slice::Iter<'a, Filler>;

    fn into_iter(self) -> Self::IntoIter {
        self.fillers.iter()
    }
}

/// Errors that can occur when loading a filler list.
#[derive(Debug)]
pub enum FillerLoadError {
    /// I/O error reading the source.
    Io(std::io::Error),
    /// The source could not be parsed.
    ParseError(String),
    /// An entry has a length of 0 or none at all.
    InvalidLength {
        /// Zero-based position of the entry.
        index: usize,
    },
    /// An entry's fill value is not exactly one character.
    InvalidFillValue {
        /// Zero-based position of the entry.
        index: usize,
        /// The rejected value.
        value: String,
    },
}

impl fmt::Display for FillerLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {}", e),
            Self::ParseError(msg) => write!(f, "Parse error: {}", msg),
            Self::InvalidLength { index } => {
                write!(f, "filler {} must have a length greater than 0", index)
            }
            Self::InvalidFillValue { index, value } => {
                write!(
                    f,
                    "filler {} must have a single character fill value, got '{}'",
                    index,
                    value.escape_default()
                )
            }
        }
    }
}

impl std::error::Error for FillerLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for FillerLoadError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

/// Builds a filler from the raw fields of a configuration entry.
///
/// Shared by the loaders: a missing fill value means [`DEFAULT_FILL_VALUE`].
pub(crate) fn filler_from_parts(
    index: usize,
    length: usize,
    fill_value: Option<&str>,
) -> Result<Filler, FillerLoadError> {
    let fill_value = match fill_value {
        None => DEFAULT_FILL_VALUE,
        Some(value) => {
            let mut chars = value.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => {
                    return Err(FillerLoadError::InvalidFillValue {
                        index,
                        value: value.to_string(),
                    })
                }
            }
        }
    };

    Filler::new(length, fill_value).ok_or(FillerLoadError::InvalidLength { index })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filler(length: usize, fill_value: char) -> Filler {
        Filler::new(length, fill_value).unwrap()
    }

    #[test]
    fn test_filler_pads() {
        assert_eq!(filler(16, '*').format("222233334444").unwrap(), "222233334444****");
        assert_eq!(filler(20, '*').format("222233334444").unwrap(), "222233334444********");
        assert_eq!(filler(16, 'X').format("222233334444").unwrap(), "222233334444XXXX");
    }

    #[test]
    fn test_filler_exact_length_unchanged() {
        assert_eq!(filler(4, '*').format("1234").unwrap(), "1234");
    }

    #[test]
    fn test_filler_too_short() {
        assert_eq!(
            filler(3, '*').format("1234"),
            Err(RangeError::FillerTooShort {
                length: 3,
                input_length: 4
            })
        );
    }

    #[test]
    fn test_filler_counts_characters() {
        assert_eq!(filler(4, '•').format("ab").unwrap(), "ab••");
        assert_eq!(filler(3, '*').format("éé").unwrap(), "éé*");
    }

    #[test]
    fn test_filler_zero_length_rejected() {
        assert!(Filler::new(0, '*').is_none());
    }

    #[test]
    fn test_list_orders_by_length_only() {
        let list = FillerList::from(vec![filler(20, '*'), filler(16, 'X'), filler(4, '*')]);
        let lengths: Vec<usize> = list.iter().map(|f| f.length()).collect();
        assert_eq!(lengths, vec![4, 16, 20]);
    }

    #[test]
    fn test_equal_lengths_keep_listed_order() {
        let list = FillerList::from(vec![filler(16, 'X'), filler(16, '*')]);
        assert_eq!(list.fill("1234"), "1234XXXXXXXXXXXX");

        let list = FillerList::from(vec![filler(16, '*'), filler(16, 'X')]);
        assert_eq!(list.fill("1234"), "1234************");

        let mut list = FillerList::new();
        list.insert(filler(16, 'X'));
        list.insert(filler(4, '_'));
        list.insert(filler(16, '*'));
        let fills: Vec<char> = list.iter().map(|f| f.fill_value()).collect();
        assert_eq!(fills, vec!['_', 'X', '*']);
        assert_eq!(list.fill("12345"), "12345XXXXXXXXXXX");
    }

    #[test]
    fn test_list_first_fit() {
        let list = FillerList::from(vec![filler(20, '*'), filler(16, '*')]);
        assert_eq!(list.as_slice()[0].length(), 16);
        assert_eq!(list.fill("222233334444"), "222233334444****");
        assert_eq!(list.fill("22223333444455556"), "22223333444455556***");
    }

    #[test]
    fn test_list_no_fit() {
        let list = FillerList::from(vec![filler(3, '*')]);
        assert_eq!(list.fill("1234"), "1234");
        assert!(list.select(4).is_none());

        let empty = FillerList::new();
        assert_eq!(empty.fill("1234"), "1234");
    }

    #[test]
    fn test_list_insert_keeps_order() {
        let mut list = FillerList::with_capacity(3);
        list.insert(filler(19, '*'));
        list.insert(filler(3, '_'));
        list.insert(filler(16, '*'));

        let lengths: Vec<usize> = list.iter().map(|f| f.length()).collect();
        assert_eq!(lengths, vec![3, 16, 19]);
        assert_eq!(list.len(), 3);
        assert_eq!(list.fill("1"), "1__");
    }

    #[test]
    fn test_filler_from_parts() {
        assert_eq!(filler_from_parts(0, 16, None).unwrap(), filler(16, '*'));
        assert_eq!(filler_from_parts(0, 16, Some("X")).unwrap(), filler(16, 'X'));
        assert!(matches!(
            filler_from_parts(2, 0, None),
            Err(FillerLoadError::InvalidLength { index: 2 })
        ));
        assert!(matches!(
            filler_from_parts(1, 16, Some("**")),
            Err(FillerLoadError::InvalidFillValue { index: 1, .. })
        ));
        assert!(matches!(
            filler_from_parts(1, 16, Some("")),
            Err(FillerLoadError::InvalidFillValue { .. })
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(filler(16, '*').to_string(), "16:*");
    }

    #[test]
    fn test_from_str() {
        assert_eq!("16:*".parse::<Filler>().unwrap(), filler(16, '*'));
        assert_eq!("4: ".parse::<Filler>().unwrap(), filler(4, ' '));
        assert_eq!(" 19".parse::<Filler>().unwrap(), filler(19, '*'));
        assert!(matches!("x:*".parse::<Filler>(), Err(FillerLoadError::ParseError(_))));
        assert!(matches!(
            "16:".parse::<Filler>(),
            Err(FillerLoadError::InvalidFillValue { .. })
        ));

        let f = filler(12, '#');
        assert_eq!(f.to_string().parse::<Filler>().unwrap(), f);
    }
}
