//! Charts module - Chart rendering and KPI formatting

mod format;
mod plotter;

pub use format::{format_avg_price, format_currency, format_units, NO_DATA};
pub use plotter::{key_label, ChartPlotter};
