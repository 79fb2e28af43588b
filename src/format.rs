//! Pattern based number formatting.
//!
//! A pattern is ordinary text with placeholders that are replaced by parts of
//! the input, left to right, while a cursor advances over the input:
//!
//! - `%d<N>` - the next `N` characters
//! - `%s<N>` - all remaining characters in space separated groups of `N`
//! - `%c<N>` - skips the next `N` characters
//! - `%r` - all remaining characters
//!
//! `N` defaults to 1. Everything else in the pattern is kept as is.
//!
//! # Examples
//!
//! ```text
//! Input       Pattern      Result
//! 12345678    %d4 %d4      1234 5678
//! 12345678    %s3          123 456 78
//! 12345678    %d3 %s2      123 45 67 8
//! 12345678    %d4          12345678   (extra digits shown)
//! 12345678    %d4          1234       (extra digits hidden)
//! 12345678    %d4_         1234_5678
//! 1234        %d2/%d2      12/34
//! 12345678    %c3%r        45678
//! 12345       ***%c3%r     ***45
//! ```
//!
//! Placeholders the cursor never reaches, because the input ran out, are
//! dropped from the result together with one whitespace character right
//! before them:
//!
//! ```
//! use cardview::format::format;
//!
//! assert_eq!(format("%d4 %d4 %d4", "123456").unwrap(), "1234 56");
//! ```

use std::fmt;

use crate::error::RangeError;

/// Placeholder kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `%d` - copy the next characters.
    Digits,
    /// `%s` - group all remaining characters.
    Groups,
    /// `%c` - skip the next characters.
    Skip,
    /// `%r` - copy all remaining characters.
    Rest,
}

impl TokenKind {
    fn from_marker(c: char) -> Option<Self> {
        match c {
            'd' => Some(Self::Digits),
            's' => Some(Self::Groups),
            'c' => Some(Self::Skip),
            'r' => Some(Self::Rest),
            _ => None,
        }
    }

    /// The letter following `%` for this kind.
    pub const fn marker(&self) -> char {
        match self {
            Self::Digits => 'd',
            Self::Groups => 's',
            Self::Skip => 'c',
            Self::Rest => 'r',
        }
    }
}

/// A placeholder and its numeric parameter, as written in the pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token {
    /// What the placeholder does.
    pub kind: TokenKind,
    /// The parameter, `None` when the pattern gives none.
    pub count: Option<usize>,
}

impl Token {
    /// Parameter with the default of 1 applied. `%r` takes no parameter.
    #[inline]
    pub fn count_or_default(&self) -> usize {
        self.count.unwrap_or(1)
    }
}

/// A run of pattern text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Text copied to the output unchanged.
    Literal(String),
    /// A placeholder.
    Token(Token),
}

/// A tokenized pattern.
///
/// Built once by [`Pattern::parse`] and applied to any number of inputs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pattern {
    segments: Vec<Segment>,
}

impl Pattern {
    /// Splits a pattern into literals and placeholders, then gives every
    /// `%d`, `%s` and `%c` without a parameter an explicit count of 1.
    ///
    /// A `%` not followed by `d`, `s`, `c` or `r` is literal text.
    ///
    /// # Example
    ///
    /// ```
    /// use cardview::format::{Pattern, Segment, Token, TokenKind};
    ///
    /// let pattern = Pattern::parse("%d2/%d");
    /// assert_eq!(pattern.segments(), &[
    ///     Segment::Token(Token { kind: TokenKind::Digits, count: Some(2) }),
    ///     Segment::Literal("/".to_string()),
    ///     Segment::Token(Token { kind: TokenKind::Digits, count: Some(1) }),
    /// ]);
    /// ```
    pub fn parse(pattern: &str) -> Self {
        Self {
            segments: default_counts(tokenize(pattern)),
        }
    }

    /// The literals and placeholders, in pattern order.
    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns an iterator over the placeholders only.
    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Token(token) => Some(token),
            Segment::Literal(_) => None,
        })
    }

    /// Formats `input` with this pattern.
    ///
    /// When placeholders run out before the input does, the leftover input is
    /// appended to the end if `show_extra_digits` is set and discarded
    /// otherwise.
    ///
    /// # Errors
    ///
    /// [`RangeError::SkipOutOfRange`] if a `%c` asks to skip more
    /// characters than are left.
    pub fn apply(&self, input: &str, show_extra_digits: bool) -> Result<String, RangeError> {
        let chars: Vec<char> = input.chars().collect();
        let mut cursor = 0;
        let mut dropped = 0;
        let mut result = String::with_capacity(input.len() * 2);

        for segment in &self.segments {
            let token = match segment {
                Segment::Literal(text) => {
                    result.push_str(text);
                    continue;
                }
                Segment::Token(token) => token,
            };

            if cursor >= chars.len() {
                // Unreached placeholder: remove it and one whitespace before it
                if result.ends_with(char::is_whitespace) {
                    result.pop();
                }
                dropped += 1;
                continue;
            }

            let remaining = chars.len() - cursor;

            match token.kind {
                TokenKind::Digits => {
                    let end = cursor + token.count_or_default().min(remaining);
                    result.extend(&chars[cursor..end]);
                    cursor = end;
                }
                TokenKind::Groups => {
                    let size = token.count_or_default();
                    if size > 0 {
                        for (i, group) in chars[cursor..].chunks(size).enumerate() {
                            if i > 0 {
                                result.push(' ');
                            }
                            result.extend(group);
                        }
                        cursor = chars.len();
                    }
                }
                TokenKind::Skip => {
                    let requested = token.count_or_default();
                    if requested > remaining {
                        return Err(RangeError::SkipOutOfRange {
                            requested,
                            remaining,
                        });
                    }
                    cursor += requested;
                }
                TokenKind::Rest => {
                    result.extend(&chars[cursor..]);
                    cursor = chars.len();
                }
            }
        }

        if cursor < chars.len() && show_extra_digits {
            result.extend(&chars[cursor..]);
        }

        if dropped > 0 {
            tracing::trace!(dropped, "removed unreached placeholders");
        }

        Ok(result)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => f.write_str(text)?,
                Segment::Token(Token {
                    kind: TokenKind::Rest,
                    ..
                }) => f.write_str("%r")?,
                Segment::Token(token) => {
                    write!(f, "%{}{}", token.kind.marker(), token.count_or_default())?
                }
            }
        }
        Ok(())
    }
}

/// Scans a pattern into literals and placeholders with their parameters as written.
fn tokenize(pattern: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        let kind = match (c, chars.peek().copied().and_then(TokenKind::from_marker)) {
            ('%', Some(kind)) => kind,
            _ => {
                literal.push(c);
                continue;
            }
        };
        chars.next();

        let mut count: Option<usize> = None;
        while let Some(digit) = chars.peek().and_then(|d| d.to_digit(10)) {
            count = Some(
                count
                    .unwrap_or(0)
                    .saturating_mul(10)
                    .saturating_add(digit as usize),
            );
            chars.next();
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(std::mem::take(&mut literal)));
        }
        segments.push(Segment::Token(Token { kind, count }));
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }

    segments
}

/// Gives `%d`, `%s` and `%c` placeholders without a parameter a count of 1.
fn default_counts(segments: Vec<Segment>) -> Vec<Segment> {
    segments
        .into_iter()
        .map(|segment| match segment {
            Segment::Token(Token { kind, count: None }) if kind != TokenKind::Rest => {
                Segment::Token(Token {
                    kind,
                    count: Some(1),
                })
            }
            other => other,
        })
        .collect()
}

/// A pattern string and whether input left over after the last placeholder
/// is shown.
///
/// Two formats are equal when their pattern strings are equal.
///
/// # Example
///
/// ```
/// use cardview::NumberFormat;
///
/// let format = NumberFormat::new("%d4 %d4");
/// assert_eq!(format.format("12345678").unwrap(), "1234 5678");
///
/// let hidden = NumberFormat::new("%d4").with_show_extra_digits(false);
/// assert_eq!(hidden.format("12345678").unwrap(), "1234");
/// ```
#[derive(Debug, Clone)]
pub struct NumberFormat {
    pattern: Option<String>,
    show_extra_digits: bool,
}

impl NumberFormat {
    /// Creates a format. `None` or an empty pattern leaves input unchanged.
    pub fn new<'a>(pattern: impl Into<Option<&'a str>>) -> Self {
        Self {
            pattern: pattern.into().map(str::to_string),
            show_extra_digits: true,
        }
    }

    /// Builder method to set whether leftover input is appended.
    pub fn with_show_extra_digits(mut self, show_extra_digits: bool) -> Self {
        self.show_extra_digits = show_extra_digits;
        self
    }

    /// The pattern string, if any.
    #[inline]
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }

    /// Whether leftover input is appended.
    #[inline]
    pub const fn show_extra_digits(&self) -> bool {
        self.show_extra_digits
    }

    /// Tokenizes the pattern. `None` if there is no pattern or it is empty.
    pub fn compile(&self) -> Option<Pattern> {
        self.pattern
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(Pattern::parse)
    }

    /// Formats `input`.
    ///
    /// # Errors
    ///
    /// [`RangeError::SkipOutOfRange`] if a `%c` asks to skip more
    /// characters than are left.
    pub fn format(&self, input: &str) -> Result<String, RangeError> {
        match self.compile() {
            Some(pattern) => pattern.apply(input, self.show_extra_digits),
            None => Ok(input.to_string()),
        }
    }

    /// Formats the decimal text of a number.
    ///
    /// # Example
    ///
    /// ```
    /// use cardview::NumberFormat;
    ///
    /// assert_eq!(NumberFormat::new("%d2/%d2").format_number(1230).unwrap(), "12/30");
    /// ```
    pub fn format_number<T: fmt::Display>(&self, number: T) -> Result<String, RangeError> {
        self.format(&number.to_string())
    }
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self::new(None)
    }
}

impl PartialEq for NumberFormat {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
    }
}

impl Eq for NumberFormat {}

impl fmt::Display for NumberFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.pattern.as_deref().unwrap_or(""))
    }
}

/// Formats `input` with `pattern`, showing leftover input.
///
/// # Example
///
/// ```
/// use cardview::format::format;
///
/// assert_eq!(format("%d4 %d4", "12345678").unwrap(), "1234 5678");
/// assert_eq!(format("%s3", "12345678").unwrap(), "123 456 78");
/// assert_eq!(format("%c3%r", "12345").unwrap(), "45");
/// assert_eq!(format(None, "anything").unwrap(), "anything");
/// ```
pub fn format<'a>(pattern: impl Into<Option<&'a str>>, input: &str) -> Result<String, RangeError> {
    NumberFormat::new(pattern).format(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits() {
        assert_eq!(format("%d4 %d4", "12345678").unwrap(), "1234 5678");
        assert_eq!(format("%d2/%d2", "1234").unwrap(), "12/34");
    }

    #[test]
    fn test_groups() {
        assert_eq!(format("%s3", "12345678").unwrap(), "123 456 78");
        assert_eq!(format("%s4", "4111111111111111").unwrap(), "4111 1111 1111 1111");
        assert_eq!(format("%d3 %s2", "12345678").unwrap(), "123 45 67 8");
    }

    #[test]
    fn test_skip() {
        assert_eq!(format("%c3%r", "12345").unwrap(), "45");
        assert_eq!(format("%c3%r", "12345678").unwrap(), "45678");
        assert_eq!(format("***%c3%r", "12345").unwrap(), "***45");
    }

    #[test]
    fn test_skip_out_of_range() {
        assert_eq!(
            format("%c6%r", "12345"),
            Err(RangeError::SkipOutOfRange {
                requested: 6,
                remaining: 5
            })
        );
        // Measured against what is left, not the whole input
        assert_eq!(
            format("%d3%c3", "12345"),
            Err(RangeError::SkipOutOfRange {
                requested: 3,
                remaining: 2
            })
        );
    }

    #[test]
    fn test_skip_exactly_remaining() {
        assert_eq!(format("%c5", "12345").unwrap(), "");
    }

    #[test]
    fn test_rest() {
        assert_eq!(format("%r", "12345").unwrap(), "12345");
        assert_eq!(format("[%r]", "12345").unwrap(), "[12345]");
        // A parameter on %r is ignored
        assert_eq!(format("%d1-%r9", "12345").unwrap(), "1-2345");
    }

    #[test]
    fn test_no_pattern() {
        assert_eq!(format(None, "anything").unwrap(), "anything");
        assert_eq!(format("", "anything").unwrap(), "anything");
    }

    #[test]
    fn test_missing_parameter_defaults_to_one() {
        assert_eq!(format("%d-%d-%d", "123").unwrap(), "1-2-3");
        assert_eq!(format("%s", "123").unwrap(), "1 2 3");
        assert_eq!(format("%c%r", "123").unwrap(), "23");
    }

    #[test]
    fn test_extra_digits() {
        assert_eq!(format("%d4", "12345678").unwrap(), "12345678");
        assert_eq!(format("%d4_", "12345678").unwrap(), "1234_5678");

        let hidden = NumberFormat::new("%d4").with_show_extra_digits(false);
        assert_eq!(hidden.format("12345678").unwrap(), "1234");
        let hidden = NumberFormat::new("%d4_").with_show_extra_digits(false);
        assert_eq!(hidden.format("12345678").unwrap(), "1234_");
    }

    #[test]
    fn test_unreached_placeholders_removed() {
        assert_eq!(format("%d4 %d4 %d4 %d4", "123456").unwrap(), "1234 56");
        assert_eq!(format("%d2/%d2", "12").unwrap(), "12/");
        assert_eq!(format("%d4 %d4", "").unwrap(), "");
        // Only one whitespace character goes with each placeholder
        assert_eq!(format("%d2  %d2", "12").unwrap(), "12 ");
    }

    #[test]
    fn test_short_digits_take_what_is_left() {
        assert_eq!(format("%d4 %d4", "12345").unwrap(), "1234 5");
    }

    #[test]
    fn test_literal_percent() {
        assert_eq!(format("%x%d2%", "12").unwrap(), "%x12%");
        assert_eq!(format("100%%d1", "5").unwrap(), "100%5");
    }

    #[test]
    fn test_input_is_not_reinterpreted() {
        // Substituted text never becomes a placeholder
        assert_eq!(format("%d2 %d2", "%d12").unwrap(), "%d 12");
    }

    #[test]
    fn test_zero_counts() {
        assert_eq!(format("%d0|%r", "123").unwrap(), "|123");
        assert_eq!(format("%s0|%d1", "123").unwrap(), "|123");
        assert_eq!(format("%c0%r", "123").unwrap(), "123");
    }

    #[test]
    fn test_huge_count_saturates() {
        assert_eq!(format("%d99999999999999999999999", "123").unwrap(), "123");
    }

    #[test]
    fn test_non_ascii_input() {
        assert_eq!(format("%d2 %d2", "ééàà").unwrap(), "éé àà");
    }

    #[test]
    fn test_tokenize() {
        let pattern = Pattern::parse("A%d4 %s%c2%r");
        assert_eq!(
            pattern.segments(),
            &[
                Segment::Literal("A".to_string()),
                Segment::Token(Token {
                    kind: TokenKind::Digits,
                    count: Some(4)
                }),
                Segment::Literal(" ".to_string()),
                Segment::Token(Token {
                    kind: TokenKind::Groups,
                    count: Some(1)
                }),
                Segment::Token(Token {
                    kind: TokenKind::Skip,
                    count: Some(2)
                }),
                Segment::Token(Token {
                    kind: TokenKind::Rest,
                    count: None
                }),
            ]
        );
        assert_eq!(pattern.tokens().count(), 4);
    }

    #[test]
    fn test_pattern_display() {
        assert_eq!(Pattern::parse("%d %s4-%r").to_string(), "%d1 %s4-%r");
    }

    #[test]
    fn test_number_format_equality() {
        assert_eq!(
            NumberFormat::new("%s4"),
            NumberFormat::new("%s4").with_show_extra_digits(false)
        );
        assert_ne!(NumberFormat::new("%s4"), NumberFormat::new("%s3"));
        assert_eq!(NumberFormat::default(), NumberFormat::new(None));
    }

    #[test]
    fn test_number_format_display() {
        assert_eq!(NumberFormat::new("%d4 %d4").to_string(), "%d4 %d4");
        assert_eq!(NumberFormat::default().to_string(), "");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(NumberFormat::new("%s4").format_number(12345678u64).unwrap(), "1234 5678");
    }

    #[test]
    fn test_deterministic() {
        let format = NumberFormat::new("%d3 %s2");
        assert_eq!(format.format("12345678"), format.format("12345678"));
    }
}
