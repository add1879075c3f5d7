//! Record Filter Module
//! Narrows the sales table to the selected countries and product lines.

use super::table::{column, text_values, TableError};
use super::{COUNTRY, PRODUCT_LINE};
use polars::prelude::*;
use std::collections::{BTreeSet, HashSet};

/// Row filtering on the country and product line columns.
pub struct RecordFilter;

impl RecordFilter {
    /// Keep rows whose `COUNTRY` is in `countries` AND whose `PRODUCTLINE` is
    /// in `categories`. Row order is preserved and nulls never match.
    pub fn apply(
        table: &DataFrame,
        countries: &BTreeSet<String>,
        categories: &BTreeSet<String>,
    ) -> Result<DataFrame, TableError> {
        if countries.is_empty() || categories.is_empty() {
            return Ok(table.head(Some(0)));
        }

        column(table, COUNTRY)?;
        column(table, PRODUCT_LINE)?;

        // a null cell never matches a selected value
        let filtered = table
            .clone()
            .lazy()
            .filter(membership(COUNTRY, countries).and(membership(PRODUCT_LINE, categories)))
            .collect()?;

        Ok(filtered)
    }

    /// Non-null distinct values of a column, in order of first appearance.
    pub fn distinct_values(table: &DataFrame, column: &str) -> Result<Vec<String>, TableError> {
        let mut seen = HashSet::new();
        Ok(text_values(table, column)?
            .into_iter()
            .flatten()
            .filter(|v| seen.insert(v.clone()))
            .collect())
    }
}

/// `name` compared as text against the selected values.
fn membership(name: &str, selected: &BTreeSet<String>) -> Expr {
    let values: Vec<&str> = selected.iter().map(String::as_str).collect();
    col(name)
        .cast(DataType::String)
        .is_in(lit(Series::new("selected".into(), values)))
}
