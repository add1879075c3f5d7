//! GUI module - User interface components

mod app;
mod chart_viewer;
mod control_panel;

pub use app::SalesDashboardApp;
pub use chart_viewer::{ChartViewer, NO_DATA_MESSAGE};
pub use control_panel::{ControlPanel, ControlPanelAction};
