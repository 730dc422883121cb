//! Overview Page
//! Headline metric, peak-hours bar chart and a raw data sample.

use crate::data::count_by_hour;
use egui::RichText;
use egui_plot::{Bar, BarChart, Plot};
use polars::prelude::DataFrame;

pub struct OverviewPage {
    version: Option<u64>,
    total: usize,
    hour_bins: [u32; 24],
    show_raw: bool,
}

impl OverviewPage {
    pub fn new() -> Self {
        Self {
            version: None,
            total: 0,
            hour_bins: [0; 24],
            show_raw: false,
        }
    }

    /// Recompute derived values only when the underlying table changes.
    fn refresh(&mut self, df: &DataFrame, version: u64) {
        if self.version == Some(version) {
            return;
        }

        self.total = df.height();
        self.hour_bins = count_by_hour(df).unwrap_or_else(|err| {
            log::error!("hourly aggregation failed: {err}");
            [0; 24]
        });
        self.version = Some(version);
    }

    pub fn show(&mut self, ui: &mut egui::Ui, df: &DataFrame, version: u64) {
        self.refresh(df, version);

        ui.heading("Uber Pickups in NYC");
        ui.add_space(8.0);

        ui.columns(2, |columns| {
            columns[0].label(RichText::new("About this app").size(14.0).strong());
            columns[0].label(
                "Visualizes Uber pickup data in New York City from September 2014. \
                 Use the sidebar to switch between analysis views.",
            );
            columns[0].add_space(10.0);
            columns[0].label(RichText::new("Total Rides").size(12.0));
            columns[0].label(
                RichText::new(format_thousands(self.total))
                    .size(26.0)
                    .strong(),
            );

            columns[1].label(RichText::new("Peak Hours").size(14.0).strong());
            let bars: Vec<Bar> = self
                .hour_bins
                .iter()
                .enumerate()
                .map(|(hour, count)| Bar::new(hour as f64, *count as f64))
                .collect();
            Plot::new("overview_hours")
                .height(220.0)
                .allow_scroll(false)
                .x_axis_label("Hour of Day")
                .y_axis_label("Pickups")
                .show(&mut columns[1], |plot_ui| {
                    plot_ui.bar_chart(BarChart::new(bars));
                });
        });

        ui.add_space(12.0);
        ui.label(RichText::new("Sample Data").size(14.0).strong());
        ui.checkbox(&mut self.show_raw, "Show raw data sample");
        if self.show_raw {
            super::table::draw_table(ui, "overview_sample", df, 10);
        }
    }
}

fn format_thousands(value: usize) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::format_thousands;

    #[test]
    fn groups_digits_by_three() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(10000), "10,000");
        assert_eq!(format_thousands(1234567), "1,234,567");
    }
}
