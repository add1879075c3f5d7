//! Sales Aggregator Module
//! Grouped sums and scalar KPIs over the (filtered) sales table.

use crate::data::{numeric_values, text_values, TableError};
use crate::data::{COUNTRY, MONTH, PRICE_EACH, PRODUCT_LINE, QUANTITY_ORDERED, SALES};
use polars::prelude::*;
use std::cmp::Ordering;
use std::collections::HashMap;

/// One group of a summary table. `key` is `None` for rows with a missing key.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub key: Option<String>,
    pub value: f64,
}

/// Result of a group-by aggregation: one row per distinct key.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryTable {
    pub key_column: String,
    pub value_column: String,
    pub rows: Vec<SummaryRow>,
}

impl SummaryTable {
    pub fn empty(key_column: &str, value_column: &str) -> Self {
        Self {
            key_column: key_column.to_string(),
            value_column: value_column.to_string(),
            rows: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn total(&self) -> f64 {
        self.rows.iter().map(|r| r.value).sum()
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.rows
            .iter()
            .find(|r| r.key.as_deref() == Some(key))
            .map(|r| r.value)
    }

    /// Sort ascending by key; the missing-key group goes last.
    pub fn sorted_by_key(mut self) -> Self {
        self.rows.sort_by(|a, b| match (&a.key, &b.key) {
            (Some(a), Some(b)) => a.cmp(b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
        self
    }
}

/// Top-line metrics over the filtered table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kpis {
    pub total_sales: f64,
    pub total_quantity: f64,
    /// `None` when there is no price to average.
    pub avg_price: Option<f64>,
}

/// Handles grouping and reductions over the sales table.
pub struct SalesAggregator;

impl SalesAggregator {
    /// Sum `value_column` per distinct `key_column` value, in order of first
    /// appearance. Null keys form their own group; unreadable values count as 0.
    pub fn group_sum(
        table: &DataFrame,
        key_column: &str,
        value_column: &str,
    ) -> Result<SummaryTable, TableError> {
        if table.height() == 0 {
            return Ok(SummaryTable::empty(key_column, value_column));
        }

        let keys = text_values(table, key_column)?;
        let values = numeric_values(table, value_column)?;

        let mut index: HashMap<Option<String>, usize> = HashMap::new();
        let mut rows: Vec<SummaryRow> = Vec::new();

        for (key, value) in keys.into_iter().zip(values) {
            let slot = *index.entry(key.clone()).or_insert_with(|| {
                rows.push(SummaryRow { key, value: 0.0 });
                rows.len() - 1
            });
            rows[slot].value += value.unwrap_or(0.0);
        }

        Ok(SummaryTable {
            key_column: key_column.to_string(),
            value_column: value_column.to_string(),
            rows,
        })
    }

    /// Mean of the readable values in `value_column`, `None` when there are none.
    pub fn group_mean(table: &DataFrame, value_column: &str) -> Result<Option<f64>, TableError> {
        if table.height() == 0 {
            return Ok(None);
        }

        let (sum, count) = numeric_values(table, value_column)?
            .into_iter()
            .flatten()
            .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));

        Ok((count > 0).then(|| sum / count as f64))
    }

    /// Sum of `value_column`; unreadable values count as 0.
    pub fn column_sum(table: &DataFrame, value_column: &str) -> Result<f64, TableError> {
        if table.height() == 0 {
            return Ok(0.0);
        }

        Ok(numeric_values(table, value_column)?
            .into_iter()
            .flatten()
            .sum())
    }

    /// Sales per `MONTH`, sorted by month.
    pub fn monthly_sales(table: &DataFrame) -> Result<SummaryTable, TableError> {
        Ok(Self::group_sum(table, MONTH, SALES)?.sorted_by_key())
    }

    pub fn sales_by_category(table: &DataFrame) -> Result<SummaryTable, TableError> {
        Self::group_sum(table, PRODUCT_LINE, SALES)
    }

    pub fn sales_by_country(table: &DataFrame) -> Result<SummaryTable, TableError> {
        Self::group_sum(table, COUNTRY, SALES)
    }

    pub fn kpis(table: &DataFrame) -> Result<Kpis, TableError> {
        Ok(Kpis {
            total_sales: Self::column_sum(table, SALES)?,
            total_quantity: Self::column_sum(table, QUANTITY_ORDERED)?,
            avg_price: Self::group_mean(table, PRICE_EACH)?,
        })
    }
}
