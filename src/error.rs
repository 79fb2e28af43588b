//! Error types for the formatting and parsing operations.
//!
//! Brand classification and the validity checks never fail: they fall back to
//! [`Brand::Generic`](crate::Brand::Generic) or `false`. Only expiry parsing,
//! the `%c` skip token and direct filler padding can report an error, along
//! with the configuration loaders.

use std::fmt;

/// An expiry or date string could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// The expiry does not match any of the accepted shapes
    /// (`MM/YY`, `MMYY`, `MM-YY`, `MMYYYY`, `MM/YYYY`, `MM-YYYY`, `YYYY/MM`, `YYYY-MM`).
    UnrecognizedExpiry {
        /// The rejected input.
        input: String,
    },

    /// A date string did not match the supplied `chrono` format.
    InvalidDate {
        /// The rejected input.
        input: String,
        /// The format string it was parsed with.
        format: String,
    },
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnrecognizedExpiry { input } => {
                write!(
                    f,
                    "unrecognized expiry format: '{}' (expected MM/YY, MMYY, MM-YY, MMYYYY, MM/YYYY, MM-YYYY, YYYY/MM or YYYY-MM)",
                    input.escape_default()
                )
            }

            Self::InvalidDate { input, format } => {
                write!(
                    f,
                    "cannot parse date '{}' with format '{}'",
                    input.escape_default(),
                    format
                )
            }
        }
    }
}

impl std::error::Error for FormatError {}

/// A cursor or length constraint was violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeError {
    /// A `%c` token asked to skip past the end of the input.
    SkipOutOfRange {
        /// Characters the token wanted to skip.
        requested: usize,
        /// Characters left in the input at that point.
        remaining: usize,
    },

    /// A filler was asked to pad an input longer than its target length.
    FillerTooShort {
        /// The filler's target length.
        length: usize,
        /// Length of the input, in characters.
        input_length: usize,
    },
}

impl fmt::Display for RangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SkipOutOfRange {
                requested,
                remaining,
            } => {
                write!(
                    f,
                    "cursor cannot be placed out of the input range: {} characters to skip, {} remaining",
                    requested, remaining
                )
            }

            Self::FillerTooShort {
                length,
                input_length,
            } => {
                write!(
                    f,
                    "filler length must be greater than or equal to the input length: filler {}, input {}",
                    length, input_length
                )
            }
        }
    }
}

impl std::error::Error for RangeError {}

/// A display configuration could not be loaded.
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading the configuration.
    Io(std::io::Error),
    /// The configuration document is malformed, or one of its fillers is invalid.
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {}", e),
            Self::Parse(msg) => write!(f, "invalid display configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
