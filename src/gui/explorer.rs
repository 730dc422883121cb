//! Data Explorer Page
//! Hour/day filtering with a table preview and CSV export.

use crate::data::{by_hour_and_days, write_csv, DAY_ORDER};
use egui::{Color32, RichText};
use polars::prelude::DataFrame;

pub struct ExplorerPage {
    version: Option<u64>,
    hour_enabled: bool,
    hour: i32,
    day_selected: [bool; 7],
    filtered: Option<DataFrame>,
    error: Option<String>,
}

impl ExplorerPage {
    pub fn new() -> Self {
        Self {
            version: None,
            hour_enabled: false,
            hour: 0,
            day_selected: [false; 7],
            filtered: None,
            error: None,
        }
    }

    fn selected_days(&self) -> Vec<String> {
        DAY_ORDER
            .iter()
            .zip(self.day_selected.iter())
            .filter(|(_, selected)| **selected)
            .map(|(day, _)| day.to_string())
            .collect()
    }

    /// Recompute the filtered view when the table or the filter state changes.
    fn refresh(&mut self, df: &DataFrame, version: u64, changed: bool) {
        if !changed && self.version == Some(version) && self.filtered.is_some() {
            return;
        }

        let hour = self.hour_enabled.then_some(self.hour);
        match by_hour_and_days(df, hour, &self.selected_days()) {
            Ok(filtered) => {
                self.filtered = Some(filtered);
                self.error = None;
            }
            Err(err) => {
                log::error!("filter failed: {err}");
                self.filtered = None;
                self.error = Some(err.to_string());
            }
        }
        self.version = Some(version);
    }

    pub fn show(&mut self, ui: &mut egui::Ui, df: &DataFrame, version: u64) {
        ui.heading("Data Explorer");
        ui.add_space(8.0);
        ui.label(RichText::new("Filter Data").size(14.0).strong());
        ui.add_space(4.0);

        let mut changed = false;
        ui.horizontal(|ui| {
            changed |= ui
                .checkbox(&mut self.hour_enabled, "Filter by hour")
                .changed();
            ui.add_enabled_ui(self.hour_enabled, |ui| {
                changed |= ui
                    .add(egui::Slider::new(&mut self.hour, 0..=23).text("Hour of day"))
                    .changed();
            });
        });
        ui.horizontal_wrapped(|ui| {
            ui.label("Day of week:");
            for (idx, day) in DAY_ORDER.iter().enumerate() {
                changed |= ui.toggle_value(&mut self.day_selected[idx], *day).changed();
            }
        });

        self.refresh(df, version, changed);

        ui.add_space(10.0);
        if let Some(error) = &self.error {
            ui.colored_label(Color32::from_rgb(220, 53, 69), error);
            return;
        }
        let Some(filtered) = &self.filtered else {
            return;
        };

        ui.label(format!("Filtered data - {} records", filtered.height()));
        ui.add_space(4.0);

        if filtered.height() == 0 {
            ui.add_space(10.0);
            ui.label(
                RichText::new("No data matches the current filters.")
                    .size(14.0)
                    .color(Color32::GRAY),
            );
        } else {
            super::table::draw_table(ui, "explorer_preview", filtered, 100);
        }

        ui.add_space(8.0);
        ui.add_enabled_ui(filtered.height() > 0, |ui| {
            if ui.button("Download filtered data as CSV").clicked() {
                export_filtered(filtered);
            }
        });
    }
}

/// Ask for an output path and write the filtered view.
fn export_filtered(df: &DataFrame) {
    let Some(path) = rfd::FileDialog::new()
        .add_filter("CSV Files", &["csv"])
        .set_file_name("uber_pickups_filtered.csv")
        .save_file()
    else {
        return; // user cancelled
    };

    if let Err(err) = write_csv(df, &path) {
        log::error!("CSV export failed: {err}");
    }
}
