//! Sales Dashboard - load, filter and aggregate a sales export, then chart it.

pub mod charts;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod gui;
pub mod stats;

pub use config::DashboardConfig;
pub use dashboard::{compute, ChartPanel, DashboardView, FilterSelection};
pub use data::{DataLoader, Dataset, DatasetCache, LoadError, LoadWarning, RecordFilter};
pub use stats::{Kpis, SalesAggregator, SummaryTable};
