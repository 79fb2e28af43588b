//! CSV filler list loader.
//!
//! # Feature
//!
//! Requires the `fillers-csv` feature.
//!
//! # Supported Format
//!
//! ```csv
//! length,fill_value
//! 16,*
//! 19,X
//! ```
//!
//! Column order doesn't matter as long as headers are present.
//! Only the `length` column is required; an empty fill value means `*`.
//! Surrounding spaces are ignored, but a fill value that is only a space,
//! such as `" "`, is kept.

use super::{filler_from_parts, FillerList, FillerLoadError};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// CSV filler list loader.
pub struct CsvFillerLoader;

impl CsvFillerLoader {
    /// Loads a filler list from a CSV file.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use cardview::filler::CsvFillerLoader;
    ///
    /// let fillers = CsvFillerLoader::from_file("number_fillers.csv")?;
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<FillerList, FillerLoadError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Loads a filler list from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<FillerList, FillerLoadError> {
        Self::from_reader_with_delimiter(reader, b',')
    }

    /// Loads a filler list from a CSV string.
    pub fn parse(csv: &str) -> Result<FillerList, FillerLoadError> {
        Self::from_reader(csv.as_bytes())
    }

    /// Loads from reader with custom delimiter.
    pub fn from_reader_with_delimiter<R: Read>(
        reader: R,
        delimiter: u8,
    ) -> Result<FillerList, FillerLoadError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|e| FillerLoadError::ParseError(format!("Failed to read CSV headers: {}", e)))?
            .clone();

        let col_map = ColumnMap::from_headers(&headers)?;
        let mut list = FillerList::new();

        for (index, result) in csv_reader.records().enumerate() {
            let record = result
                .map_err(|e| FillerLoadError::ParseError(format!("CSV parse error: {}", e)))?;

            let length = record
                .get(col_map.length)
                .and_then(|s| s.trim().parse::<usize>().ok())
                .ok_or(FillerLoadError::InvalidLength { index })?;

            let fill_value = col_map
                .fill_value
                .and_then(|i| record.get(i))
                .map(|s| if s.trim().is_empty() { s } else { s.trim() })
                .filter(|s| !s.is_empty());

            list.insert(filler_from_parts(index, length, fill_value)?);
        }

        tracing::debug!(count = list.len(), "loaded fillers from CSV");
        Ok(list)
    }
}

/// Maps CSV column names to indices.
struct ColumnMap {
    length: usize,
    fill_value: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, FillerLoadError> {
        let mut length_col = None;
        let mut fill_value_col = None;

        for (i, header) in headers.iter().enumerate() {
            match header.to_lowercase().trim() {
                "length" | "max_length" => length_col = Some(i),
                "fill_value" | "fillvalue" | "fill" => fill_value_col = Some(i),
                _ => {}
            }
        }

        let length = length_col.ok_or_else(|| {
            FillerLoadError::ParseError("Missing required 'length' column".to_string())
        })?;

        Ok(Self {
            length,
            fill_value: fill_value_col,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Filler;

    #[test]
    fn test_parse_basic_csv() {
        let csv = "length,fill_value\n19,*\n16,X\n";

        let fillers = CsvFillerLoader::parse(csv).unwrap();
        assert_eq!(fillers.len(), 2);
        assert_eq!(fillers.as_slice()[0], Filler::new(16, 'X').unwrap());
        assert_eq!(fillers.fill("222233334444"), "222233334444XXXX");
    }

    #[test]
    fn test_column_order_and_case() {
        let csv = "FillValue,Length\n_,4\n";

        let fillers = CsvFillerLoader::parse(csv).unwrap();
        assert_eq!(fillers.fill("12"), "12__");
    }

    #[test]
    fn test_default_fill_value() {
        let csv = "length,fill_value\n3,\n";

        let fillers = CsvFillerLoader::parse(csv).unwrap();
        assert_eq!(fillers.fill("1"), "1**");
    }

    #[test]
    fn test_space_fill_value() {
        let fillers = CsvFillerLoader::parse("length,fill_value\n4,\" \"\n").unwrap();
        assert_eq!(fillers.as_slice()[0].fill_value(), ' ');
        assert_eq!(fillers.fill("1"), "1   ");
    }

    #[test]
    fn test_fields_are_trimmed() {
        let fillers = CsvFillerLoader::parse(" length , fill_value \n 4 , X \n").unwrap();
        assert_eq!(fillers.fill("1"), "1XXX");
    }

    #[test]
    fn test_length_only() {
        let fillers = CsvFillerLoader::parse("length\n5\n").unwrap();
        assert_eq!(fillers.fill("123"), "123**");
    }

    #[test]
    fn test_missing_length_column() {
        let result = CsvFillerLoader::parse("fill_value\n*\n");
        assert!(matches!(result, Err(FillerLoadError::ParseError(_))));
    }

    #[test]
    fn test_invalid_length() {
        let result = CsvFillerLoader::parse("length,fill_value\n16,*\nabc,*\n");
        assert!(matches!(result, Err(FillerLoadError::InvalidLength { index: 1 })));

        let result = CsvFillerLoader::parse("length\n0\n");
        assert!(matches!(result, Err(FillerLoadError::InvalidLength { index: 0 })));
    }

    #[test]
    fn test_custom_delimiter() {
        let csv = "length;fill_value\n4;-\n";

        let fillers = CsvFillerLoader::from_reader_with_delimiter(csv.as_bytes(), b';').unwrap();
        assert_eq!(fillers.fill("1"), "1---");
    }
}
