//! Sales Dashboard Main Application
//! Main window with the filter panel and the dashboard view.

use crate::config::DashboardConfig;
use crate::dashboard::{compute, FilterSelection};
use crate::data::{DataLoader, Dataset, DatasetCache, RecordFilter, COUNTRY, PRODUCT_LINE};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use egui::SidePanel;
use std::sync::Arc;
use tracing::{error, info};

/// Main application window.
pub struct SalesDashboardApp {
    config: DashboardConfig,
    loader: DataLoader,
    cache: DatasetCache,
    dataset: Option<Arc<Dataset>>,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
}

impl SalesDashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: DashboardConfig) -> Self {
        let mut app = Self {
            loader: DataLoader::new(config.load_options()),
            config,
            cache: DatasetCache::new(),
            dataset: None,
            control_panel: ControlPanel::new(),
            chart_viewer: ChartViewer::new(),
        };
        app.reload();
        app
    }

    /// Load (or revalidate) the sales file. A changed file resets the filters.
    fn reload(&mut self) {
        let path = self.config.data_path.clone();
        self.control_panel.source_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        match self.cache.load(&self.loader, &path) {
            Ok(dataset) => {
                let unchanged = self
                    .dataset
                    .as_ref()
                    .is_some_and(|current| Arc::ptr_eq(current, &dataset));
                if !unchanged {
                    if let Err(e) = self.reset_options(&dataset) {
                        self.fail(format!("❌ {}", e));
                        return;
                    }
                }
                self.dataset = Some(dataset);
                self.recompute();
            }
            Err(e) => {
                error!(path = %path.display(), "failed to load sales data: {}", e);
                self.fail(format!(
                    "❌ {}. Please add the sales file next to the dashboard.",
                    e
                ));
            }
        }
    }

    fn reset_options(&mut self, dataset: &Dataset) -> Result<(), crate::data::TableError> {
        let countries = RecordFilter::distinct_values(&dataset.table, COUNTRY)?;
        let categories = RecordFilter::distinct_values(&dataset.table, PRODUCT_LINE)?;
        info!(
            countries = countries.len(),
            categories = categories.len(),
            "filter options updated"
        );
        self.control_panel.update_options(countries, categories);
        Ok(())
    }

    /// Halt the dashboard: no charts are drawn after a fatal error.
    fn fail(&mut self, message: String) {
        self.dataset = None;
        self.control_panel.clear_options();
        self.control_panel.set_status("Error: data not loaded");
        self.chart_viewer.set_error(message);
    }

    /// Filter -> aggregate for the current selection.
    fn recompute(&mut self) {
        let Some(dataset) = &self.dataset else {
            return;
        };

        let selection: &FilterSelection = &self.control_panel.selection;
        match compute(dataset, selection) {
            Ok(view) => {
                let status = format!(
                    "Showing {} of {} rows",
                    view.row_count(),
                    dataset.row_count()
                );
                self.chart_viewer.set_view(view);
                self.control_panel.set_status(&status);
            }
            Err(e) => {
                error!("failed to compute dashboard: {}", e);
                self.chart_viewer.set_error(format!("❌ {}", e));
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }
}

impl eframe::App for SalesDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(260.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);

                    match action {
                        ControlPanelAction::SelectionChanged => self.recompute(),
                        ControlPanelAction::Reload => self.reload(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Dashboard
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}
