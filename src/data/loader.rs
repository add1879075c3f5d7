//! CSV Data Loader Module
//! Reads the sales file, decodes it from its legacy charset, and normalizes
//! it into the table the rest of the dashboard works on.

use super::dates::{days_since_epoch, month_bucket, parse_order_date};
use super::table::{text_values, TableError};
use super::{MONTH, ORDER_DATE, UNKNOWN_MONTH};
use encoding_rs::Encoding;
use polars::prelude::*;
use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;
use std::io::{self, Cursor};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Default charset of the sales export.
pub const DEFAULT_ENCODING: &str = "iso-8859-1";

/// Default number of rows used for schema inference.
pub const DEFAULT_INFER_SCHEMA_LENGTH: usize = 10_000;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("'{0}' not found")]
    NotFound(PathBuf),
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Unknown text encoding '{0}'")]
    UnknownEncoding(String),
    #[error("Column '{0}' appears more than once after normalizing names")]
    DuplicateColumn(String),
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error(transparent)]
    Table(#[from] TableError),
}

/// Non-fatal conditions found while loading. Each degrades one feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadWarning {
    /// No `ORDERDATE` column; every row is bucketed into the "Unknown" month.
    MissingDateColumn,
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadWarning::MissingDateColumn => write!(
                f,
                "'{}' column not found. Monthly trend is shown as a single '{}' bucket.",
                ORDER_DATE, UNKNOWN_MONTH
            ),
        }
    }
}

/// A normalized sales table together with what happened while loading it.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub source: PathBuf,
    pub table: DataFrame,
    pub warnings: Vec<LoadWarning>,
}

impl Dataset {
    pub fn row_count(&self) -> usize {
        self.table.height()
    }

    pub fn has_warning(&self, warning: LoadWarning) -> bool {
        self.warnings.contains(&warning)
    }
}

/// Reading options for the sales file.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub encoding: String,
    pub infer_schema_length: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            encoding: DEFAULT_ENCODING.to_string(),
            infer_schema_length: DEFAULT_INFER_SCHEMA_LENGTH,
        }
    }
}

/// Handles CSV file loading with Polars.
#[derive(Debug, Clone, Default)]
pub struct DataLoader {
    options: LoadOptions,
}

impl DataLoader {
    pub fn new(options: LoadOptions) -> Self {
        Self { options }
    }

    /// Load and normalize the sales file at `path`.
    pub fn load(&self, path: &Path) -> Result<Dataset, LoadError> {
        let raw = self.read_csv(path)?;
        let (table, warnings) = Self::normalize(raw)?;

        info!(
            path = %path.display(),
            rows = table.height(),
            columns = table.width(),
            "loaded sales data"
        );

        Ok(Dataset {
            source: path.to_path_buf(),
            table,
            warnings,
        })
    }

    /// Read the raw file into a DataFrame, column names untouched.
    pub fn read_csv(&self, path: &Path) -> Result<DataFrame, LoadError> {
        let bytes = std::fs::read(path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                LoadError::NotFound(path.to_path_buf())
            } else {
                LoadError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        let text = decode_text(&bytes, &self.options.encoding)?;
        debug!(bytes = bytes.len(), encoding = %self.options.encoding, "decoded sales file");

        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(self.options.infer_schema_length))
            .with_ignore_errors(true)
            .into_reader_with_file_handle(Cursor::new(text.into_owned().into_bytes()))
            .finish()?;

        Ok(df)
    }

    /// Upper-case every column name, parse `ORDERDATE` and derive `MONTH`.
    ///
    /// Pure transform: the input is consumed and a new table returned.
    pub fn normalize(raw: DataFrame) -> Result<(DataFrame, Vec<LoadWarning>), LoadError> {
        let mut df = raw;
        let mut warnings = Vec::new();

        let upper: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|name| name.as_str().to_uppercase())
            .collect();

        let mut seen = HashSet::new();
        for name in &upper {
            if !seen.insert(name.as_str()) {
                return Err(LoadError::DuplicateColumn(name.clone()));
            }
        }
        let original: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();
        for (old, new) in original.iter().zip(&upper) {
            if old != new {
                df.rename(old, new.as_str().into())?;
            }
        }

        let height = df.height();
        if df.column(ORDER_DATE).is_ok() {
            let dates: Vec<Option<chrono::NaiveDate>> = text_values(&df, ORDER_DATE)?
                .iter()
                .map(|raw| raw.as_deref().and_then(parse_order_date))
                .collect();

            let unparsed = dates.iter().filter(|d| d.is_none()).count();
            if unparsed > 0 {
                debug!(unparsed, "order dates coerced to missing");
            }

            let days: Vec<Option<i32>> = dates.iter().map(|d| d.map(days_since_epoch)).collect();
            let months: Vec<Option<String>> = dates.iter().map(|d| d.map(month_bucket)).collect();

            let order_dates = Series::new(ORDER_DATE.into(), days).cast(&DataType::Date)?;
            df.with_column(order_dates)?;
            df.with_column(Column::new(MONTH.into(), months))?;
        } else {
            warn!("'{}' column not found, monthly chart degraded", ORDER_DATE);
            warnings.push(LoadWarning::MissingDateColumn);
            df.with_column(Column::new(MONTH.into(), vec![UNKNOWN_MONTH; height]))?;
        }

        Ok((df, warnings))
    }
}

/// Decode the raw file bytes into text.
///
/// Latin-1 labels map every byte straight to the code point of the same value.
/// WHATWG folds those labels into windows-1252, which would remap 0x80..=0x9F.
pub fn decode_text<'a>(bytes: &'a [u8], label: &str) -> Result<Cow<'a, str>, LoadError> {
    let normalized = label.trim().to_ascii_lowercase();
    if matches!(
        normalized.as_str(),
        "iso-8859-1" | "iso8859-1" | "iso_8859-1" | "latin1" | "latin-1" | "l1"
    ) {
        return Ok(encoding_rs::mem::decode_latin1(bytes));
    }

    let encoding = Encoding::for_label(normalized.as_bytes())
        .ok_or_else(|| LoadError::UnknownEncoding(label.to_string()))?;
    let (text, actual, had_errors) = encoding.decode(bytes);
    if had_errors {
        warn!(encoding = actual.name(), "malformed byte sequences replaced while decoding");
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(bytes: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(bytes).unwrap();
        file.flush().unwrap();
        file
    }

    fn month_strings(df: &DataFrame) -> Vec<Option<String>> {
        text_values(df, MONTH).unwrap()
    }

    #[test]
    fn test_file_not_found() {
        let result = DataLoader::default().load(Path::new("definitely_missing_sales.csv"));
        assert!(matches!(result, Err(LoadError::NotFound(_))));
    }

    #[test]
    fn test_columns_normalized_to_uppercase() {
        let file = write_csv(b"Country,productLine,Sales\nUSA,Ships,10\n");
        let ds = DataLoader::default().load(file.path()).unwrap();
        let names: Vec<String> = ds
            .table
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(names, vec!["COUNTRY", "PRODUCTLINE", "SALES", "MONTH"]);
    }

    #[test]
    fn test_latin1_decoding() {
        // "Sévérine" and "Århus" in ISO-8859-1
        let mut bytes = b"CONTACTFIRSTNAME,CITY\nS".to_vec();
        bytes.extend_from_slice(&[0xE9, b'v', 0xE9]);
        bytes.extend_from_slice(b"rine,");
        bytes.push(0xC5);
        bytes.extend_from_slice(b"rhus\n");
        let file = write_csv(&bytes);

        let df = DataLoader::default().read_csv(file.path()).unwrap();
        let names = text_values(&df, "CONTACTFIRSTNAME").unwrap();
        let cities = text_values(&df, "CITY").unwrap();
        assert_eq!(names[0].as_deref(), Some("Sévérine"));
        assert_eq!(cities[0].as_deref(), Some("Århus"));
    }

    #[test]
    fn test_decode_latin1_keeps_c1_range() {
        let text = decode_text(&[0x80, 0x9F], "ISO-8859-1").unwrap();
        assert_eq!(text.chars().map(|c| c as u32).collect::<Vec<_>>(), vec![0x80, 0x9F]);
    }

    #[test]
    fn test_decode_other_label() {
        let text = decode_text("Zürich".as_bytes(), "utf-8").unwrap();
        assert_eq!(text, "Zürich");
    }

    #[test]
    fn test_unknown_encoding() {
        let err = decode_text(b"abc", "klingon-8").unwrap_err();
        assert!(matches!(err, LoadError::UnknownEncoding(_)));
    }

    #[test]
    fn test_order_date_parsed_and_month_derived() {
        let file = write_csv(
            b"ORDERDATE,SALES\n2/24/2003 0:00,100\n5/7/2003 0:00,50\nnonsense,25\n",
        );
        let ds = DataLoader::default().load(file.path()).unwrap();

        assert!(ds.warnings.is_empty());
        assert_eq!(ds.table.column(ORDER_DATE).unwrap().dtype(), &DataType::Date);
        assert_eq!(
            month_strings(&ds.table),
            vec![Some("2003-02".to_string()), Some("2003-05".to_string()), None]
        );
        assert_eq!(ds.table.column(ORDER_DATE).unwrap().null_count(), 1);
    }

    #[test]
    fn test_missing_date_column_degrades() {
        let file = write_csv(b"COUNTRY,SALES\nUSA,1\nFrance,2\n");
        let ds = DataLoader::default().load(file.path()).unwrap();

        assert!(ds.has_warning(LoadWarning::MissingDateColumn));
        assert_eq!(
            month_strings(&ds.table),
            vec![Some(UNKNOWN_MONTH.to_string()), Some(UNKNOWN_MONTH.to_string())]
        );
    }

    #[test]
    fn test_duplicate_columns_after_uppercase() {
        let df = df!("sales" => &[1], "SALES" => &[2]).unwrap();
        let err = DataLoader::normalize(df).unwrap_err();
        assert!(matches!(err, LoadError::DuplicateColumn(name) if name == "SALES"));
    }

    #[test]
    fn test_normalize_is_pure() {
        let raw = df!("country" => &["USA"], "sales" => &[1.0]).unwrap();
        let (normalized, _) = DataLoader::normalize(raw.clone()).unwrap();
        assert_eq!(raw.get_column_names()[0].as_str(), "country");
        assert_eq!(normalized.get_column_names()[0].as_str(), "COUNTRY");
    }

    #[test]
    fn test_header_only_file() {
        let file = write_csv(b"COUNTRY,PRODUCTLINE,SALES,ORDERDATE\n");
        let ds = DataLoader::default().load(file.path()).unwrap();
        assert_eq!(ds.row_count(), 0);
        assert!(ds.table.column(MONTH).is_ok());
    }
}
