//! Stats module - grouped aggregation and KPIs

mod aggregator;

pub use aggregator::{Kpis, SalesAggregator, SummaryRow, SummaryTable};
