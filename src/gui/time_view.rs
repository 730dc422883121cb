//! Time Analysis Page
//! Hourly line chart, daily bar chart and a day/hour heatmap.

use crate::data::{count_by_day, count_by_day_hour, count_by_hour, DAY_ORDER, HOURS_PER_DAY};
use egui::{Color32, RichText, Sense};
use egui_plot::{Bar, BarChart, Line, Plot, PlotPoints};
use polars::prelude::DataFrame;

pub struct TimeAnalysisPage {
    version: Option<u64>,
    hourly: [u32; HOURS_PER_DAY],
    daily: [u32; 7],
    grid: [[u32; HOURS_PER_DAY]; 7],
}

impl TimeAnalysisPage {
    pub fn new() -> Self {
        Self {
            version: None,
            hourly: [0; HOURS_PER_DAY],
            daily: [0; 7],
            grid: [[0; HOURS_PER_DAY]; 7],
        }
    }

    fn refresh(&mut self, df: &DataFrame, version: u64) {
        if self.version == Some(version) {
            return;
        }

        self.hourly = count_by_hour(df).unwrap_or_else(|err| {
            log::error!("hourly aggregation failed: {err}");
            [0; HOURS_PER_DAY]
        });
        self.daily = count_by_day(df).unwrap_or_else(|err| {
            log::error!("daily aggregation failed: {err}");
            [0; 7]
        });
        self.grid = count_by_day_hour(df).unwrap_or_else(|err| {
            log::error!("cross-tab aggregation failed: {err}");
            [[0; HOURS_PER_DAY]; 7]
        });
        self.version = Some(version);
    }

    pub fn show(&mut self, ui: &mut egui::Ui, df: &DataFrame, version: u64) {
        self.refresh(df, version);

        ui.heading("Time Analysis");
        ui.add_space(8.0);

        ui.columns(2, |columns| {
            columns[0].label(RichText::new("Pickups by Hour").size(14.0).strong());
            let points: PlotPoints = self
                .hourly
                .iter()
                .enumerate()
                .map(|(hour, count)| [hour as f64, *count as f64])
                .collect();
            Plot::new("hourly_line")
                .height(240.0)
                .allow_scroll(false)
                .x_axis_label("Hour of Day")
                .y_axis_label("Number of Pickups")
                .show(&mut columns[0], |plot_ui| {
                    plot_ui.line(Line::new(points).width(2.0).name("Pickups"));
                });

            columns[1].label(RichText::new("Pickups by Day").size(14.0).strong());
            let bars: Vec<Bar> = self
                .daily
                .iter()
                .enumerate()
                .map(|(day, count)| Bar::new(day as f64, *count as f64))
                .collect();
            Plot::new("daily_bars")
                .height(240.0)
                .allow_scroll(false)
                .x_axis_label("Day of Week")
                .y_axis_label("Number of Pickups")
                .x_axis_formatter(|mark, _range| {
                    if mark.value < -0.5 {
                        return String::new();
                    }
                    let idx = mark.value.round() as usize;
                    DAY_ORDER
                        .get(idx)
                        .map(|day| day[..3].to_string())
                        .unwrap_or_default()
                })
                .show(&mut columns[1], |plot_ui| {
                    plot_ui.bar_chart(BarChart::new(bars));
                });
        });

        ui.add_space(14.0);
        ui.label(
            RichText::new("Pickups Heatmap by Day and Hour")
                .size(14.0)
                .strong(),
        );
        ui.add_space(4.0);
        self.draw_heatmap(ui);
    }

    fn draw_heatmap(&self, ui: &mut egui::Ui) {
        let max = self.grid.iter().flatten().copied().max().unwrap_or(0).max(1) as f32;

        let label_width = 80.0;
        let cell_height = 22.0;
        let avail = ui.available_width();
        let cell_width = ((avail - label_width) / HOURS_PER_DAY as f32 - 8.0).clamp(8.0, 40.0);

        for (day_idx, day) in DAY_ORDER.iter().enumerate() {
            ui.horizontal(|ui| {
                ui.add_sized(
                    [label_width, cell_height],
                    egui::Label::new(RichText::new(*day).size(11.0)),
                );
                for hour in 0..HOURS_PER_DAY {
                    let count = self.grid[day_idx][hour];
                    let (rect, response) = ui
                        .allocate_exact_size(egui::vec2(cell_width, cell_height), Sense::hover());
                    ui.painter()
                        .rect_filled(rect, 2.0, heat_color(count as f32 / max));
                    response.on_hover_text(format!("{day} {hour}:00 - {count} pickups"));
                }
            });
        }

        // hour labels under the grid, every third hour
        ui.horizontal(|ui| {
            ui.add_sized([label_width, 14.0], egui::Label::new(""));
            for hour in 0..HOURS_PER_DAY {
                let (rect, _) =
                    ui.allocate_exact_size(egui::vec2(cell_width, 14.0), Sense::hover());
                if hour % 3 == 0 {
                    ui.painter().text(
                        rect.center(),
                        egui::Align2::CENTER_CENTER,
                        format!("{hour}:00"),
                        egui::FontId::proportional(9.0),
                        ui.visuals().text_color(),
                    );
                }
            }
        });
    }
}

/// Dark blue to yellow ramp over [0, 1].
fn heat_color(t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let r = (40.0 + 215.0 * t) as u8;
    let g = (44.0 + 180.0 * t) as u8;
    let b = (130.0 - 90.0 * t) as u8;
    Color32::from_rgb(r, g, b)
}
