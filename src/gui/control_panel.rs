//! Control Panel Widget
//! Left side panel with the data source and the filter multiselects.

use crate::dashboard::FilterSelection;
use egui::{Color32, RichText, ScrollArea};
use std::collections::BTreeSet;

/// Left side control panel. Owns the current filter selection.
pub struct ControlPanel {
    pub selection: FilterSelection,
    pub countries: Vec<String>,
    pub categories: Vec<String>,
    pub source_name: String,
    pub status: String,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            selection: FilterSelection::default(),
            countries: Vec::new(),
            categories: Vec::new(),
            source_name: "No file loaded".to_string(),
            status: "Ready".to_string(),
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the available options and select all of them.
    pub fn update_options(&mut self, countries: Vec<String>, categories: Vec<String>) {
        self.selection = FilterSelection {
            countries: countries.iter().cloned().collect(),
            categories: categories.iter().cloned().collect(),
        };
        self.countries = countries;
        self.categories = categories;
    }

    pub fn clear_options(&mut self) {
        self.update_options(Vec::new(), Vec::new());
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📊 Sales Dashboard")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(&self.source_name).size(12.0));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("🔄 Reload").clicked() {
                            action = ControlPanelAction::Reload;
                        }
                    });
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Filter Section =====
        ui.label(RichText::new("📋 Filter Data").size(14.0).strong());
        ui.add_space(8.0);

        ui.label("Select Country:");
        if Self::multiselect(ui, "countries", &self.countries, &mut self.selection.countries) {
            action = ControlPanelAction::SelectionChanged;
        }

        ui.add_space(10.0);

        ui.label("Select Product Line:");
        if Self::multiselect(
            ui,
            "categories",
            &self.categories,
            &mut self.selection.categories,
        ) {
            action = ControlPanelAction::SelectionChanged;
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    /// Checkbox list with Select All / Clear All. Returns true when the selection changed.
    fn multiselect(
        ui: &mut egui::Ui,
        id: &str,
        options: &[String],
        selected: &mut BTreeSet<String>,
    ) -> bool {
        let mut changed = false;

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(5.0)
            .show(ui, |ui| {
                ScrollArea::vertical()
                    .id_salt(id)
                    .max_height(160.0)
                    .show(ui, |ui| {
                        for option in options {
                            let mut checked = selected.contains(option);
                            if ui.checkbox(&mut checked, option).changed() {
                                if checked {
                                    selected.insert(option.clone());
                                } else {
                                    selected.remove(option);
                                }
                                changed = true;
                            }
                        }
                    });
            });

        ui.add_space(5.0);
        ui.horizontal(|ui| {
            if ui.small_button("Select All").clicked() {
                selected.extend(options.iter().cloned());
                changed = true;
            }
            if ui.small_button("Clear All").clicked() {
                selected.clear();
                changed = true;
            }
        });

        changed
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    SelectionChanged,
    Reload,
}
