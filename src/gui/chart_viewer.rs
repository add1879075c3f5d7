//! Chart Viewer Widget
//! Central scrollable panel: warnings, KPI cards, the three charts and the raw data.

use crate::charts::{format_avg_price, format_currency, format_units, ChartPlotter};
use crate::dashboard::{ChartPanel, DashboardView};
use crate::data::display_cell;
use crate::stats::SummaryTable;
use egui::{Color32, RichText, ScrollArea};
use polars::prelude::*;

const CARD_SPACING: f32 = 15.0;
const KPI_CARD_HEIGHT: f32 = 70.0;
const RAW_TABLE_HEIGHT: f32 = 360.0;
const RAW_COLUMN_WIDTH: f32 = 110.0;

const WARNING_COLOR: Color32 = Color32::from_rgb(243, 156, 18);
const ERROR_COLOR: Color32 = Color32::from_rgb(220, 53, 69);

/// Shown in a chart card whose summary came back empty.
pub const NO_DATA_MESSAGE: &str = "No data for selected filters.";

/// How a chart card draws its summary.
#[derive(Clone, Copy)]
enum ChartKind {
    Line,
    Bar,
    Donut,
}

/// Central dashboard area. Holds the last computed view, or the error that
/// prevented one.
#[derive(Default)]
pub struct ChartViewer {
    pub view: Option<DashboardView>,
    pub error: Option<String>,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_view(&mut self, view: DashboardView) {
        self.view = Some(view);
        self.error = None;
    }

    /// A fatal error replaces the whole dashboard.
    pub fn set_error(&mut self, message: String) {
        self.view = None;
        self.error = Some(message);
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        if let Some(error) = &self.error {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new(error).size(18.0).color(ERROR_COLOR));
            });
            return;
        }

        let Some(view) = &self.view else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading(RichText::new("📊 Sales Performance Dashboard").size(24.0));
                ui.label("Interactive dashboard to explore international product sales.");
                ui.add_space(CARD_SPACING);

                for warning in &view.warnings {
                    ui.label(
                        RichText::new(format!("⚠ {}", warning))
                            .size(13.0)
                            .color(WARNING_COLOR),
                    );
                }
                if !view.warnings.is_empty() {
                    ui.add_space(CARD_SPACING);
                }

                Self::draw_kpis(ui, view);
                ui.add_space(CARD_SPACING);

                let charts = [
                    ("📅 Monthly Sales Trend", "monthly_sales", &view.monthly, ChartKind::Line),
                    ("📦 Sales by Product Line", "category_sales", &view.by_category, ChartKind::Bar),
                    ("🌍 Sales by Country", "country_sales", &view.by_country, ChartKind::Donut),
                ];
                for (title, id, panel, kind) in charts {
                    Self::draw_chart_card(ui, title, id, panel, kind);
                    ui.add_space(CARD_SPACING);
                }

                egui::CollapsingHeader::new(format!("🔍 View Raw Data ({} rows)", view.row_count()))
                    .default_open(false)
                    .show(ui, |ui| {
                        Self::draw_raw_table(ui, &view.filtered);
                    });
            });
    }

    fn draw_kpis(ui: &mut egui::Ui, view: &DashboardView) {
        let kpis = &view.kpis;
        let cards = [
            ("💰 Total Sales", format_currency(kpis.total_sales)),
            ("📦 Units Sold", format_units(kpis.total_quantity)),
            ("🏷 Avg. Price Each", format_avg_price(kpis.avg_price)),
        ];

        let card_width =
            ((ui.available_width() - CARD_SPACING * (cards.len() as f32 - 1.0)) / cards.len() as f32)
                .max(120.0);

        ui.horizontal(|ui| {
            for (label, value) in cards {
                egui::Frame::none()
                    .rounding(8.0)
                    .fill(ui.visuals().widgets.noninteractive.bg_fill)
                    .inner_margin(12.0)
                    .show(ui, |ui| {
                        ui.set_width(card_width - 24.0);
                        ui.set_min_height(KPI_CARD_HEIGHT - 24.0);
                        ui.vertical(|ui| {
                            ui.label(RichText::new(label).size(13.0).color(Color32::GRAY));
                            ui.label(RichText::new(value).size(22.0).strong());
                        });
                    });
                ui.add_space(CARD_SPACING);
            }
        });
    }

    fn draw_chart_card(
        ui: &mut egui::Ui,
        title: &str,
        id: &str,
        panel: &ChartPanel,
        kind: ChartKind,
    ) {
        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(1.0, ui.visuals().widgets.noninteractive.bg_stroke.color))
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(RichText::new(title).size(18.0).strong());
                ui.add_space(8.0);

                match panel {
                    ChartPanel::Ready(summary) => Self::draw_summary(ui, id, summary, kind),
                    ChartPanel::NoData => {
                        ui.label(
                            RichText::new(format!("⚠ {}", NO_DATA_MESSAGE))
                                .size(13.0)
                                .color(WARNING_COLOR),
                        );
                    }
                }
            });
    }

    fn draw_summary(ui: &mut egui::Ui, id: &str, summary: &SummaryTable, kind: ChartKind) {
        match kind {
            ChartKind::Line => ChartPlotter::draw_line_chart(ui, id, summary),
            ChartKind::Bar => ChartPlotter::draw_bar_chart(ui, id, summary),
            ChartKind::Donut => ChartPlotter::draw_donut_chart(ui, summary),
        }
    }

    /// Filtered table with virtualized rows under a fixed header.
    fn draw_raw_table(ui: &mut egui::Ui, df: &DataFrame) {
        let columns = df.get_columns();
        let text_height = ui.text_style_height(&egui::TextStyle::Body);
        let row_height = text_height + ui.spacing().item_spacing.y;

        // fixed column widths keep the header grid aligned with the body grid
        ScrollArea::horizontal()
            .id_salt("raw_data_hscroll")
            .auto_shrink([false, true])
            .show(ui, |ui| {
                ui.vertical(|ui| {
                    egui::Grid::new("raw_data_header")
                        .min_col_width(RAW_COLUMN_WIDTH)
                        .max_col_width(RAW_COLUMN_WIDTH)
                        .show(ui, |ui| {
                            for column in columns {
                                ui.add(
                                    egui::Label::new(
                                        RichText::new(column.name().as_str()).strong(),
                                    )
                                    .truncate(),
                                );
                            }
                            ui.end_row();
                        });
                    ui.separator();

                    ScrollArea::vertical()
                        .id_salt("raw_data_scroll")
                        .max_height(RAW_TABLE_HEIGHT)
                        .auto_shrink([false, true])
                        .show_rows(ui, row_height, df.height(), |ui, row_range| {
                            egui::Grid::new("raw_data_grid")
                                .striped(true)
                                .min_col_width(RAW_COLUMN_WIDTH)
                                .max_col_width(RAW_COLUMN_WIDTH)
                                .show(ui, |ui| {
                                    for row in row_range {
                                        for column in columns {
                                            ui.add(
                                                egui::Label::new(display_cell(column, row))
                                                    .truncate(),
                                            );
                                        }
                                        ui.end_row();
                                    }
                                });
                        });
                });
            });
    }
}
