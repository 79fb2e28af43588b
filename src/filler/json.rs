//! JSON filler list loader.
//!
//! # Feature
//!
//! Requires the `fillers-json` feature.
//!
//! # Supported Formats
//!
//! ## Array format
//!
//! ```json
//! [
//!   { "length": 16, "fillValue": "*" },
//!   { "length": 19, "fillValue": "*" }
//! ]
//! ```
//!
//! `fillValue` may also be written `fill_value` and defaults to `*`.
//!
//! ## Object format (keyed by length)
//!
//! ```json
//! { "16": "*", "19": "X" }
//! ```

use super::{filler_from_parts, Filler, FillerList, FillerLoadError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::Read;
use std::path::Path;

/// JSON filler list loader.
pub struct JsonFillerLoader;

impl JsonFillerLoader {
    /// Loads a filler list from a JSON file.
    ///
    /// Automatically detects the JSON format (array or object).
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use cardview::filler::JsonFillerLoader;
    ///
    /// let fillers = JsonFillerLoader::from_file("number_fillers.json")?;
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<FillerList, FillerLoadError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Loads a filler list from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<FillerList, FillerLoadError> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        Self::parse(&content)
    }

    /// Loads a filler list from a JSON string.
    pub fn parse(json: &str) -> Result<FillerList, FillerLoadError> {
        let trimmed = json.trim();

        let fillers = if trimmed.starts_with('[') {
            Self::parse_array(json)?
        } else if trimmed.starts_with('{') {
            Self::parse_object(json)?
        } else {
            return Err(FillerLoadError::ParseError(
                "Invalid JSON format: expected array or object".to_string(),
            ));
        };

        tracing::debug!(count = fillers.len(), "loaded fillers from JSON");
        Ok(fillers)
    }

    /// Parses JSON array format.
    fn parse_array(json: &str) -> Result<FillerList, FillerLoadError> {
        let entries: Vec<JsonFillerEntry> = serde_json::from_str(json)
            .map_err(|e| FillerLoadError::ParseError(format!("JSON parse error: {}", e)))?;

        let mut list = FillerList::with_capacity(entries.len());

        for (index, entry) in entries.into_iter().enumerate() {
            let length = entry.length.ok_or(FillerLoadError::InvalidLength { index })?;
            list.insert(filler_from_parts(index, length, entry.fill_value.as_deref())?);
        }

        Ok(list)
    }

    /// Parses JSON object format (keyed by length).
    fn parse_object(json: &str) -> Result<FillerList, FillerLoadError> {
        let map: BTreeMap<String, String> = serde_json::from_str(json)
            .map_err(|e| FillerLoadError::ParseError(format!("JSON parse error: {}", e)))?;

        let mut list = FillerList::with_capacity(map.len());

        for (index, (length, fill_value)) in map.iter().enumerate() {
            let length: usize = length.trim().parse().map_err(|_| {
                FillerLoadError::ParseError(format!("filler length '{}' is not a number", length))
            })?;
            list.insert(filler_from_parts(index, length, Some(fill_value))?);
        }

        Ok(list)
    }
}

/// Internal structure for deserializing JSON filler entries.
#[derive(Debug, Deserialize, Default)]
struct JsonFillerEntry {
    #[serde(default, alias = "maxLength")]
    length: Option<usize>,

    #[serde(default, rename = "fillValue", alias = "fill_value", alias = "fill")]
    fill_value: Option<String>,
}

/// Serialized form of a [`Filler`] inside larger documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawFiller {
    length: usize,
    #[serde(default, rename = "fillValue", alias = "fill_value")]
    fill_value: Option<String>,
}

impl TryFrom<RawFiller> for Filler {
    type Error = String;

    fn try_from(raw: RawFiller) -> Result<Self, Self::Error> {
        filler_from_parts(0, raw.length, raw.fill_value.as_deref()).map_err(|e| e.to_string())
    }
}

impl From<Filler> for RawFiller {
    fn from(filler: Filler) -> Self {
        Self {
            length: filler.length(),
            fill_value: Some(filler.fill_value().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_array_format() {
        let json = r#"[
            { "length": 20, "fillValue": "*" },
            { "length": 16, "fillValue": "X" }
        ]"#;

        let fillers = JsonFillerLoader::parse(json).unwrap();
        assert_eq!(fillers.len(), 2);
        assert_eq!(fillers.as_slice()[0], Filler::new(16, 'X').unwrap());
        assert_eq!(fillers.fill("222233334444"), "222233334444XXXX");
    }

    #[test]
    fn test_parse_object_format() {
        let json = r#"{ "19": "*", "16": "_" }"#;

        let fillers = JsonFillerLoader::parse(json).unwrap();
        assert_eq!(fillers.len(), 2);
        assert_eq!(fillers.fill("1234567890123456"), "1234567890123456");
        assert_eq!(fillers.fill("12345678901234567"), "12345678901234567**");
    }

    #[test]
    fn test_default_fill_value() {
        let fillers = JsonFillerLoader::parse(r#"[{ "length": 3 }]"#).unwrap();
        assert_eq!(fillers.as_slice()[0].fill_value(), '*');
    }

    #[test]
    fn test_field_aliases() {
        let fillers = JsonFillerLoader::parse(r##"[{ "length": 4, "fill_value": "#" }]"##).unwrap();
        assert_eq!(fillers.fill("12"), "12##");
    }

    #[test]
    fn test_missing_length() {
        let result = JsonFillerLoader::parse(r#"[{ "length": 3 }, { "fillValue": "*" }]"#);
        assert!(matches!(result, Err(FillerLoadError::InvalidLength { index: 1 })));
    }

    #[test]
    fn test_zero_length() {
        let result = JsonFillerLoader::parse(r#"[{ "length": 0 }]"#);
        assert!(matches!(result, Err(FillerLoadError::InvalidLength { index: 0 })));
    }

    #[test]
    fn test_multi_character_fill_value() {
        let result = JsonFillerLoader::parse(r#"[{ "length": 4, "fillValue": "ab" }]"#);
        assert!(matches!(result, Err(FillerLoadError::InvalidFillValue { .. })));
    }

    #[test]
    fn test_empty_json() {
        let fillers = JsonFillerLoader::parse("[]").unwrap();
        assert!(fillers.is_empty());
    }

    #[test]
    fn test_invalid_json() {
        assert!(JsonFillerLoader::parse("not valid json").is_err());
        assert!(JsonFillerLoader::parse(r#"{ "sixteen": "*" }"#).is_err());
    }

    #[test]
    fn test_raw_filler_round_trip() {
        let filler: Filler = serde_json::from_str(r#"{ "length": 16 }"#).unwrap();
        assert_eq!(filler, Filler::new(16, '*').unwrap());

        let json = serde_json::to_string(&Filler::new(3, 'X').unwrap()).unwrap();
        assert_eq!(json, r#"{"length":3,"fillValue":"X"}"#);

        assert!(serde_json::from_str::<Filler>(r#"{ "length": 0 }"#).is_err());
    }

    #[test]
    fn test_raw_filler_uses_loader_checks() {
        let err = serde_json::from_str::<Filler>(r#"{ "length": 4, "fillValue": "ab" }"#)
            .unwrap_err()
            .to_string();
        assert!(err.contains("single character fill value"), "{}", err);

        let err = serde_json::from_str::<Filler>(r#"{ "length": 0 }"#).unwrap_err().to_string();
        assert!(err.contains("length greater than 0"), "{}", err);
    }

    #[test]
    fn test_space_fill_value() {
        let fillers = JsonFillerLoader::parse(r#"[{ "length": 4, "fillValue": " " }]"#).unwrap();
        assert_eq!(fillers.fill("1"), "1   ");
    }
}
