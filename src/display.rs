//! Field rendering for a card view.
//!
//! A view shows each card field as the user types it. [`CardDisplay`] holds
//! the display settings and turns raw field text into display text:
//!
//! - number: pad with the number fillers, then apply the number format
//! - CVV: pad with the CVV fillers
//! - expiry: insert `/` after the month
//!
//! # Example
//!
//! ```
//! use cardview::display::{CardDisplay, DisplayConfig};
//! use cardview::Filler;
//!
//! let config = DisplayConfig {
//!     number_format: Some("%s4".to_string()),
//!     number_fillers: vec![Filler::new(16, '*').unwrap()],
//!     ..DisplayConfig::default()
//! };
//! let display = CardDisplay::new(&config);
//!
//! assert_eq!(display.render_number("411111").unwrap(), "4111 11** **** ****");
//! assert_eq!(display.render_expiry("0930"), "09/30");
//! ```

use std::fmt;

use crate::card::{Brand, CreditCard};
use crate::error::RangeError;
use crate::filler::{Filler, FillerList};
use crate::format::NumberFormat;
use crate::mask::{mask_all, mask_number};

#[cfg(feature = "fillers-json")]
use crate::error::ConfigError;

/// Display settings of a card view.
///
/// With the `fillers-json` feature this can be read from JSON. Keys may be
/// written in snake case or camel case; missing keys take their defaults.
///
/// ```json
/// {
///   "numberFormat": "%s4",
///   "showExtraDigits": true,
///   "numberFillers": [{ "length": 16, "fillValue": "*" }],
///   "cvvFillers": [{ "length": 3 }],
///   "formatExpiry": true
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "fillers-json", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "fillers-json", serde(default))]
pub struct DisplayConfig {
    /// Pattern applied to the filled number. `None` shows the number as typed.
    #[cfg_attr(feature = "fillers-json", serde(alias = "numberFormat"))]
    pub number_format: Option<String>,
    /// Whether digits left over after the last placeholder are shown.
    #[cfg_attr(feature = "fillers-json", serde(alias = "showExtraDigits"))]
    pub show_extra_digits: bool,
    /// Fillers for the card number.
    #[cfg_attr(feature = "fillers-json", serde(alias = "numberFillers"))]
    pub number_fillers: Vec<Filler>,
    /// Fillers for the CVV.
    #[cfg_attr(feature = "fillers-json", serde(alias = "cvvFillers"))]
    pub cvv_fillers: Vec<Filler>,
    /// Whether a `/` is inserted after the expiry month.
    #[cfg_attr(feature = "fillers-json", serde(alias = "formatExpiry"))]
    pub format_expiry: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            number_format: None,
            show_extra_digits: true,
            number_fillers: Vec::new(),
            cvv_fillers: Vec::new(),
            format_expiry: true,
        }
    }
}

#[cfg(feature = "fillers-json")]
impl DisplayConfig {
    /// Reads a configuration from a JSON string.
    ///
    /// # Example
    ///
    /// ```
    /// use cardview::display::DisplayConfig;
    ///
    /// let config = DisplayConfig::from_json(r#"{ "numberFormat": "%d4 %d4" }"#).unwrap();
    /// assert_eq!(config.number_format.as_deref(), Some("%d4 %d4"));
    /// assert!(config.show_extra_digits);
    /// ```
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;

        tracing::debug!(
            number_fillers = config.number_fillers.len(),
            cvv_fillers = config.cvv_fillers.len(),
            has_number_format = config.number_format.is_some(),
            "loaded display configuration"
        );
        Ok(config)
    }

    /// Reads a configuration from a JSON file.
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}

/// Renders card fields with a fixed set of display settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardDisplay {
    number_format: NumberFormat,
    number_fillers: FillerList,
    cvv_fillers: FillerList,
    format_expiry: bool,
}

impl CardDisplay {
    /// Builds a renderer. Filler lists are sorted here.
    pub fn new(config: &DisplayConfig) -> Self {
        Self {
            number_format: NumberFormat::new(config.number_format.as_deref())
                .with_show_extra_digits(config.show_extra_digits),
            number_fillers: FillerList::from(config.number_fillers.clone()),
            cvv_fillers: FillerList::from(config.cvv_fillers.clone()),
            format_expiry: config.format_expiry,
        }
    }

    /// The number format in use.
    #[inline]
    pub fn number_format(&self) -> &NumberFormat {
        &self.number_format
    }

    /// The sorted number fillers.
    #[inline]
    pub fn number_fillers(&self) -> &FillerList {
        &self.number_fillers
    }

    /// The sorted CVV fillers.
    #[inline]
    pub fn cvv_fillers(&self) -> &FillerList {
        &self.cvv_fillers
    }

    /// Pads the number with the first filler that fits, then formats it.
    ///
    /// Empty text is returned without formatting.
    ///
    /// # Errors
    ///
    /// [`RangeError::SkipOutOfRange`] if the number format skips past the
    /// end of the filled number.
    pub fn render_number(&self, raw: &str) -> Result<String, RangeError> {
        let filled = self.number_fillers.fill(raw);
        if filled.is_empty() {
            return Ok(filled);
        }
        self.number_format.format(&filled)
    }

    /// Pads the CVV with the first filler that fits.
    pub fn render_cvv(&self, raw: &str) -> String {
        self.cvv_fillers.fill(raw)
    }

    /// Inserts `/` after the first two characters when expiry formatting is
    /// on and there are at least two.
    pub fn render_expiry(&self, raw: &str) -> String {
        if !self.format_expiry {
            return raw.to_string();
        }

        match raw.char_indices().nth(2) {
            Some((split, _)) => format!("{}/{}", &raw[..split], &raw[split..]),
            None if raw.chars().count() == 2 => format!("{}/", raw),
            None => raw.to_string(),
        }
    }

    /// Renders every field of a card.
    ///
    /// # Errors
    ///
    /// See [`render_number`](Self::render_number).
    pub fn render(&self, card: &CreditCard) -> Result<RenderedCard, RangeError> {
        Ok(RenderedCard {
            holder: card.holder().to_string(),
            number: self.render_number(card.number())?,
            cvv: self.render_cvv(card.cvv()),
            expiry: self.render_expiry(card.expiry()),
            brand: card.brand(),
        })
    }
}

impl Default for CardDisplay {
    fn default() -> Self {
        Self::new(&DisplayConfig::default())
    }
}

impl From<&DisplayConfig> for CardDisplay {
    fn from(config: &DisplayConfig) -> Self {
        Self::new(config)
    }
}

/// Display text of every card field.
#[derive(Clone, PartialEq, Eq)]
pub struct RenderedCard {
    /// Cardholder name as entered.
    pub holder: String,
    /// Filled and formatted number.
    pub number: String,
    /// Filled CVV.
    pub cvv: String,
    /// Expiry with the month separator.
    pub expiry: String,
    /// Brand of the raw number.
    pub brand: Brand,
}

impl fmt::Debug for RenderedCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderedCard")
            .field("holder", &self.holder)
            .field("number", &mask_number(&self.number))
            .field("cvv", &mask_all(&self.cvv))
            .field("expiry", &self.expiry)
            .field("brand", &self.brand)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filler(length: usize, fill_value: char) -> Filler {
        Filler::new(length, fill_value).unwrap()
    }

    fn display(number_format: Option<&str>) -> CardDisplay {
        CardDisplay::new(&DisplayConfig {
            number_format: number_format.map(str::to_string),
            number_fillers: vec![filler(19, '*'), filler(16, '*')],
            cvv_fillers: vec![filler(3, '-')],
            ..DisplayConfig::default()
        })
    }

    #[test]
    fn test_defaults() {
        let config = DisplayConfig::default();
        assert!(config.number_format.is_none());
        assert!(config.show_extra_digits);
        assert!(config.number_fillers.is_empty());
        assert!(config.format_expiry);
    }

    #[test]
    fn test_render_number_fill_then_format() {
        let display = display(Some("%s4"));
        assert_eq!(display.render_number("411111").unwrap(), "4111 11** **** ****");
        assert_eq!(
            display.render_number("41111111111111111").unwrap(),
            "4111 1111 1111 1111 1**"
        );
    }

    #[test]
    fn test_render_number_without_format() {
        assert_eq!(display(None).render_number("4111").unwrap(), "4111************");
    }

    #[test]
    fn test_render_number_no_filler_fits() {
        assert_eq!(
            display(Some("%d4 %r")).render_number("12345678901234567890").unwrap(),
            "1234 5678901234567890"
        );
    }

    #[test]
    fn test_render_number_empty() {
        let display = CardDisplay::new(&DisplayConfig {
            number_format: Some("%c2%r".to_string()),
            ..DisplayConfig::default()
        });
        // Empty input skips formatting, so the skip cannot fail
        assert_eq!(display.render_number("").unwrap(), "");
        assert!(display.render_number("1").is_err());
    }

    #[test]
    fn test_render_number_hides_extra_digits() {
        let display = CardDisplay::new(&DisplayConfig {
            number_format: Some("%d4".to_string()),
            show_extra_digits: false,
            ..DisplayConfig::default()
        });
        assert_eq!(display.render_number("12345678").unwrap(), "1234");
    }

    #[test]
    fn test_render_cvv() {
        let display = display(None);
        assert_eq!(display.render_cvv("1"), "1--");
        assert_eq!(display.render_cvv("1234"), "1234");
    }

    #[test]
    fn test_render_expiry() {
        let display = display(None);
        assert_eq!(display.render_expiry("0930"), "09/30");
        assert_eq!(display.render_expiry("09"), "09/");
        assert_eq!(display.render_expiry("0"), "0");
        assert_eq!(display.render_expiry(""), "");
    }

    #[test]
    fn test_render_expiry_disabled() {
        let display = CardDisplay::new(&DisplayConfig {
            format_expiry: false,
            ..DisplayConfig::default()
        });
        assert_eq!(display.render_expiry("0930"), "0930");
    }

    #[test]
    fn test_render_card() {
        let card = CreditCard::new("Jane Doe", "4111111111111111", "12", "0930");
        let rendered = display(Some("%d4 %d4 %d4 %d4")).render(&card).unwrap();

        assert_eq!(rendered.holder, "Jane Doe");
        assert_eq!(rendered.number, "4111 1111 1111 1111");
        assert_eq!(rendered.cvv, "12-");
        assert_eq!(rendered.expiry, "09/30");
        assert_eq!(rendered.brand, Brand::Visa);
    }

    #[test]
    fn test_rendered_debug_is_masked() {
        let card = CreditCard::new("Jane Doe", "4111111111111111", "123", "0930");
        let rendered = display(None).render(&card).unwrap();
        let debug = format!("{:?}", rendered);

        assert!(!debug.contains("4111111111111111"));
        assert!(!debug.contains("123"));
        assert!(debug.contains("1111"));
    }

    #[cfg(feature = "fillers-json")]
    #[test]
    fn test_from_json() {
        let config = DisplayConfig::from_json(
            r#"{
                "numberFormat": "%s4",
                "showExtraDigits": false,
                "numberFillers": [{ "length": 19 }, { "length": 16, "fillValue": "X" }],
                "cvv_fillers": [{ "length": 3 }]
            }"#,
        )
        .unwrap();

        assert_eq!(config.number_format.as_deref(), Some("%s4"));
        assert!(!config.show_extra_digits);
        assert_eq!(config.number_fillers.len(), 2);
        assert_eq!(config.cvv_fillers, vec![filler(3, '*')]);
        assert!(config.format_expiry);

        let display = CardDisplay::new(&config);
        assert_eq!(display.number_fillers().as_slice()[0], filler(16, 'X'));
        assert_eq!(display.render_number("4111").unwrap(), "4111 XXXX XXXX XXXX");
    }

    #[cfg(feature = "fillers-json")]
    #[test]
    fn test_from_json_rejects_bad_filler() {
        let result = DisplayConfig::from_json(r#"{ "numberFillers": [{ "length": 0 }] }"#);
        match result {
            Err(ConfigError::Parse(msg)) => assert!(msg.contains("length greater than 0"), "{}", msg),
            other => panic!("expected a parse error, got {:?}", other),
        }

        assert!(matches!(
            DisplayConfig::from_json("[]"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[cfg(feature = "fillers-json")]
    #[test]
    fn test_from_file_missing() {
        let result = DisplayConfig::from_file("/nonexistent/cardview/display.json");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
