//! Chart Plotter Module
//! Draws the dashboard charts with egui_plot and the egui painter.

use crate::data::UNKNOWN_MONTH;
use crate::stats::SummaryTable;
use egui::{Color32, RichText, Stroke};
use egui_plot::{Bar, BarChart, Line, Plot, PlotPoints, Points};
use std::f32::consts::TAU;

pub const LINE_COLOR: Color32 = Color32::from_rgb(52, 152, 219); // Blue

pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(99, 110, 250),  // Indigo
    Color32::from_rgb(239, 85, 59),   // Red
    Color32::from_rgb(0, 204, 150),   // Green
    Color32::from_rgb(171, 99, 250),  // Purple
    Color32::from_rgb(255, 161, 90),  // Orange
    Color32::from_rgb(25, 211, 243),  // Cyan
    Color32::from_rgb(255, 102, 146), // Pink
    Color32::from_rgb(182, 232, 128), // Lime
    Color32::from_rgb(255, 151, 255), // Magenta
    Color32::from_rgb(254, 203, 82),  // Yellow
];

const CHART_HEIGHT: f32 = 280.0;

/// Fraction of the donut radius left empty in the middle.
const DONUT_HOLE: f32 = 0.4;

/// Angular step used to tessellate donut slices.
const DONUT_STEP: f32 = TAU / 180.0;

/// Label for a summary key; the missing-key group reads "Unknown".
pub fn key_label(key: Option<&str>) -> String {
    key.unwrap_or(UNKNOWN_MONTH).to_string()
}

/// Creates the dashboard charts.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn get_color(index: usize) -> Color32 {
        PALETTE[index % PALETTE.len()]
    }

    fn x_labels(summary: &SummaryTable) -> Vec<String> {
        summary
            .rows
            .iter()
            .map(|r| key_label(r.key.as_deref()))
            .collect()
    }

    /// Monthly sales as a line with markers. Expects rows sorted by month.
    pub fn draw_line_chart(ui: &mut egui::Ui, id: &str, summary: &SummaryTable) {
        let x_labels = Self::x_labels(summary);
        let points: Vec<[f64; 2]> = summary
            .rows
            .iter()
            .enumerate()
            .map(|(i, r)| [i as f64, r.value])
            .collect();

        Plot::new(id)
            .height(CHART_HEIGHT)
            .allow_zoom(true)
            .allow_drag(true)
            .allow_scroll(false)
            .x_axis_label(summary.key_column.as_str())
            .y_axis_label(summary.value_column.as_str())
            .include_y(0.0)
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round();
                if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
                    return String::new();
                }
                x_labels.get(idx as usize).cloned().unwrap_or_default()
            })
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(PlotPoints::from_iter(points.iter().copied()))
                        .color(LINE_COLOR)
                        .width(2.0)
                        .name(summary.value_column.as_str()),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from_iter(points.iter().copied()))
                        .radius(4.0)
                        .color(LINE_COLOR),
                );
            });
    }

    /// One colored bar per group.
    pub fn draw_bar_chart(ui: &mut egui::Ui, id: &str, summary: &SummaryTable) {
        let x_labels = Self::x_labels(summary);
        let bars: Vec<Bar> = summary
            .rows
            .iter()
            .enumerate()
            .map(|(i, r)| {
                Bar::new(i as f64, r.value)
                    .width(0.7)
                    .name(key_label(r.key.as_deref()))
                    .fill(Self::get_color(i))
            })
            .collect();

        Plot::new(id)
            .height(CHART_HEIGHT)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .x_axis_label(summary.key_column.as_str())
            .y_axis_label(summary.value_column.as_str())
            .include_y(0.0)
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round();
                if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
                    return String::new();
                }
                x_labels.get(idx as usize).cloned().unwrap_or_default()
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars));
            });
    }

    /// Share of the total per group as a donut, with a legend on the right.
    /// Groups with a non-positive value have no slice.
    pub fn draw_donut_chart(ui: &mut egui::Ui, summary: &SummaryTable) {
        let total: f64 = summary.rows.iter().map(|r| r.value.max(0.0)).sum();

        ui.horizontal(|ui| {
            let size = CHART_HEIGHT;
            let (rect, _) = ui.allocate_exact_size(egui::vec2(size, size), egui::Sense::hover());
            let painter = ui.painter_at(rect);
            let center = rect.center();
            let outer = size / 2.0 - 6.0;
            let inner = outer * DONUT_HOLE;

            if total > 0.0 {
                let mut start = -TAU / 4.0;
                for (i, row) in summary.rows.iter().enumerate() {
                    let sweep = (row.value.max(0.0) / total) as f32 * TAU;
                    if sweep <= 0.0 {
                        continue;
                    }
                    Self::paint_slice(&painter, center, inner, outer, start, sweep, Self::get_color(i));
                    start += sweep;
                }
            }

            ui.add_space(12.0);

            ui.vertical(|ui| {
                for (i, row) in summary.rows.iter().enumerate() {
                    let share = if total > 0.0 {
                        row.value.max(0.0) / total * 100.0
                    } else {
                        0.0
                    };
                    ui.horizontal(|ui| {
                        let (swatch, _) =
                            ui.allocate_exact_size(egui::vec2(14.0, 14.0), egui::Sense::hover());
                        ui.painter().rect_filled(swatch, 3.0, Self::get_color(i));
                        ui.label(
                            RichText::new(format!(
                                "{}  {:.1}%",
                                key_label(row.key.as_deref()),
                                share
                            ))
                            .size(12.0),
                        );
                    });
                }
            });
        });
    }

    /// Ring segment built from small quads so every polygon stays convex.
    fn paint_slice(
        painter: &egui::Painter,
        center: egui::Pos2,
        inner: f32,
        outer: f32,
        start: f32,
        sweep: f32,
        color: Color32,
    ) {
        let point = |radius: f32, angle: f32| {
            center + egui::vec2(angle.cos() * radius, angle.sin() * radius)
        };

        let steps = ((sweep / DONUT_STEP).ceil() as usize).max(1);
        let step = sweep / steps as f32;
        for s in 0..steps {
            let a0 = start + s as f32 * step;
            let a1 = a0 + step;
            painter.add(egui::Shape::convex_polygon(
                vec![point(outer, a0), point(outer, a1), point(inner, a1), point(inner, a0)],
                color,
                Stroke::NONE,
            ));
        }

        let edge = Stroke::new(1.5, Color32::WHITE);
        painter.line_segment([point(inner, start), point(outer, start)], edge);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_label() {
        assert_eq!(key_label(Some("2003-02")), "2003-02");
        assert_eq!(key_label(None), UNKNOWN_MONTH);
    }

    #[test]
    fn test_palette_wraps() {
        assert_eq!(ChartPlotter::get_color(0), ChartPlotter::get_color(PALETTE.len()));
    }
}
