//! Column access helpers shared by the filter and the aggregator.

use polars::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TableError {
    #[error("Column '{0}' not found in dataset")]
    MissingColumn(String),
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

pub(super) fn column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column, TableError> {
    df.column(name)
        .map_err(|_| TableError::MissingColumn(name.to_string()))
}

/// Read a column as optional text, whatever its physical type.
pub fn text_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>, TableError> {
    let as_text = column(df, name)?.cast(&DataType::String)?;
    let ca = as_text.str()?;
    Ok(ca.into_iter().map(|v| v.map(str::to_string)).collect())
}

/// Read a column as optional floats. Values that cannot be read as a number
/// (including NaN) come back as `None`.
pub fn numeric_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>, TableError> {
    let as_f64 = column(df, name)?.cast(&DataType::Float64)?;
    let ca = as_f64.f64()?;
    Ok(ca
        .into_iter()
        .map(|v| v.filter(|x| !x.is_nan()))
        .collect())
}

/// Render a single cell for display, without the quotes polars puts around strings.
pub fn display_cell(column: &Column, row: usize) -> String {
    match column.get(row) {
        Ok(AnyValue::Null) | Err(_) => String::new(),
        Ok(val) => val.to_string().trim_matches('"').to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_values_coerce_text() {
        let df = df!("SALES" => &["10.5", "n/a", "3"]).unwrap();
        let values = numeric_values(&df, "SALES").unwrap();
        assert_eq!(values, vec![Some(10.5), None, Some(3.0)]);
    }

    #[test]
    fn test_text_values_keep_nulls() {
        let df = df!("COUNTRY" => &[Some("USA"), None]).unwrap();
        let values = text_values(&df, "COUNTRY").unwrap();
        assert_eq!(values, vec![Some("USA".to_string()), None]);
    }

    #[test]
    fn test_missing_column() {
        let df = df!("A" => &[1, 2]).unwrap();
        let err = numeric_values(&df, "SALES").unwrap_err();
        assert!(matches!(err, TableError::MissingColumn(name) if name == "SALES"));
    }

    #[test]
    fn test_display_cell_strips_quotes() {
        let df = df!("COUNTRY" => &[Some("France"), None]).unwrap();
        let col = df.column("COUNTRY").unwrap();
        assert_eq!(display_cell(col, 0), "France");
        assert_eq!(display_cell(col, 1), "");
    }
}
