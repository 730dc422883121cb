//! Table preview helper: renders the first rows of a DataFrame as a grid.

use egui::RichText;
use polars::prelude::*;

pub fn draw_table(ui: &mut egui::Ui, id_salt: &str, df: &DataFrame, max_rows: usize) {
    let columns = df.get_columns();
    let rows = df.height().min(max_rows);

    egui::ScrollArea::horizontal()
        .id_salt(id_salt)
        .show(ui, |ui| {
            egui::Grid::new(ui.make_persistent_id(id_salt))
                .striped(true)
                .min_col_width(70.0)
                .spacing([12.0, 3.0])
                .show(ui, |ui| {
                    for column in columns {
                        ui.label(RichText::new(column.name().as_str()).strong().size(11.0));
                    }
                    ui.end_row();

                    for row in 0..rows {
                        for column in columns {
                            let text = column
                                .get(row)
                                .map(|value| value.to_string())
                                .unwrap_or_default();
                            ui.label(RichText::new(text.trim_matches('"')).size(11.0));
                        }
                        ui.end_row();
                    }
                });
        });

    if df.height() > rows {
        ui.label(
            RichText::new(format!("Showing first {rows} of {} rows", df.height()))
                .size(10.0)
                .color(egui::Color32::GRAY),
        );
    }
}
