//! Dashboard Pipeline
//! Turns the current filter selection into everything the window renders.

use crate::data::{Dataset, LoadWarning, RecordFilter, TableError, COUNTRY, PRODUCT_LINE};
use crate::stats::{Kpis, SalesAggregator, SummaryTable};
use polars::prelude::*;
use std::collections::BTreeSet;
use tracing::debug;

/// Countries and product lines the user currently has selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub countries: BTreeSet<String>,
    pub categories: BTreeSet<String>,
}

impl FilterSelection {
    /// Select every country and product line present in the dataset.
    pub fn everything(dataset: &Dataset) -> Result<Self, TableError> {
        Ok(Self {
            countries: RecordFilter::distinct_values(&dataset.table, COUNTRY)?
                .into_iter()
                .collect(),
            categories: RecordFilter::distinct_values(&dataset.table, PRODUCT_LINE)?
                .into_iter()
                .collect(),
        })
    }
}

/// What a single chart gets to draw.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartPanel {
    Ready(SummaryTable),
    NoData,
}

impl ChartPanel {
    fn from_summary(summary: SummaryTable) -> Self {
        if summary.is_empty() {
            ChartPanel::NoData
        } else {
            ChartPanel::Ready(summary)
        }
    }

    pub fn summary(&self) -> Option<&SummaryTable> {
        match self {
            ChartPanel::Ready(summary) => Some(summary),
            ChartPanel::NoData => None,
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, ChartPanel::NoData)
    }
}

/// Derived state for one render.
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub kpis: Kpis,
    pub monthly: ChartPanel,
    pub by_category: ChartPanel,
    pub by_country: ChartPanel,
    pub filtered: DataFrame,
    pub warnings: Vec<LoadWarning>,
}

impl DashboardView {
    pub fn row_count(&self) -> usize {
        self.filtered.height()
    }

    /// True when the selection matched no rows.
    pub fn is_empty(&self) -> bool {
        self.filtered.height() == 0
    }
}

/// Filter the dataset by `selection` and compute KPIs and chart summaries.
pub fn compute(dataset: &Dataset, selection: &FilterSelection) -> Result<DashboardView, TableError> {
    let filtered = RecordFilter::apply(
        &dataset.table,
        &selection.countries,
        &selection.categories,
    )?;

    let kpis = SalesAggregator::kpis(&filtered)?;
    let monthly = ChartPanel::from_summary(SalesAggregator::monthly_sales(&filtered)?);
    let by_category = ChartPanel::from_summary(SalesAggregator::sales_by_category(&filtered)?);
    let by_country = ChartPanel::from_summary(SalesAggregator::sales_by_country(&filtered)?);

    debug!(
        rows = filtered.height(),
        countries = selection.countries.len(),
        categories = selection.categories.len(),
        "dashboard recomputed"
    );

    Ok(DashboardView {
        kpis,
        monthly,
        by_category,
        by_country,
        filtered,
        warnings: dataset.warnings.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn dataset() -> Dataset {
        let table = df!(
            "COUNTRY" => &["USA", "USA", "France"],
            "PRODUCTLINE" => &["Ships", "Planes", "Ships"],
            "SALES" => &[100.0, 50.0, 75.0],
            "QUANTITYORDERED" => &[1, 2, 3],
            "PRICEEACH" => &[10.0, 20.0, 30.0],
            "MONTH" => &["2003-02", "2003-01", "2003-02"]
        )
        .unwrap();
        Dataset {
            source: PathBuf::from("sales_data.csv"),
            table,
            warnings: Vec::new(),
        }
    }

    #[test]
    fn test_everything_selects_all() {
        let ds = dataset();
        let selection = FilterSelection::everything(&ds).unwrap();
        assert_eq!(selection.countries.len(), 2);
        assert_eq!(selection.categories.len(), 2);

        let view = compute(&ds, &selection).unwrap();
        assert_eq!(view.row_count(), 3);
        assert_eq!(view.kpis.total_sales, 225.0);
        assert_eq!(view.kpis.avg_price, Some(20.0));
    }

    #[test]
    fn test_monthly_panel_sorted() {
        let ds = dataset();
        let view = compute(&ds, &FilterSelection::everything(&ds).unwrap()).unwrap();
        let monthly = view.monthly.summary().unwrap();
        let keys: Vec<&str> = monthly.rows.iter().filter_map(|r| r.key.as_deref()).collect();
        assert_eq!(keys, vec!["2003-01", "2003-02"]);
    }

    #[test]
    fn test_empty_selection_gives_no_data_panels() {
        let ds = dataset();
        let view = compute(&ds, &FilterSelection::default()).unwrap();
        assert!(view.is_empty());
        assert!(view.monthly.is_no_data());
        assert!(view.by_category.is_no_data());
        assert!(view.by_country.is_no_data());
        assert_eq!(view.kpis.avg_price, None);
    }
}
