//! Sales Dashboard - Interactive sales performance dashboard
//!
//! Loads `sales_data.csv`, lets the user filter by country and product line,
//! and charts the result.

use anyhow::{Context, Result};
use eframe::egui;
use sales_dashboard::config::{DashboardConfig, CONFIG_FILE};
use sales_dashboard::gui::SalesDashboardApp;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<()> {
    let config = DashboardConfig::load_or_default(Path::new(CONFIG_FILE))
        .with_context(|| format!("loading {}", CONFIG_FILE))?;

    // Initialize logging, RUST_LOG wins over the config file
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(data_path = %config.data_path.display(), "starting sales dashboard");

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1000.0, 700.0])
            .with_title("Sales Dashboard"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Sales Dashboard",
        options,
        Box::new(move |cc| Ok(Box::new(SalesDashboardApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("failed to run dashboard window: {}", e))
}
