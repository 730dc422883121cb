//! Location Analysis Page
//! Scatter map and hexagon density layer for a single hour of day.

use crate::config::MapLocation;
use crate::data::{by_exact_hour, LAT_COLUMN, LON_COLUMN};
use egui::{Color32, RichText};
use egui_plot::{Plot, PlotPoints, Points, Polygon};
use h3o::{CellIndex, LatLng, Resolution};
use polars::prelude::*;
use std::collections::HashMap;

/// H3 resolution used for density binning; resolution 9 cells are roughly
/// 200m across, comparable to the 100m bin radius of the original map.
const HEX_RESOLUTION: Resolution = Resolution::Nine;

const POINT_COLOR: Color32 = Color32::from_rgb(52, 152, 219);
const HEX_COLOR: Color32 = Color32::from_rgb(231, 76, 60);

pub struct LocationPage {
    version: Option<u64>,
    hour: i32,
    /// [lon, lat] pairs for the selected hour.
    points: Vec<[f64; 2]>,
    /// Hexagon boundaries ([lon, lat] rings) with their pickup counts.
    hexes: Vec<(Vec<[f64; 2]>, u32)>,
    max_hex_count: u32,
    error: Option<String>,
}

impl LocationPage {
    pub fn new() -> Self {
        Self {
            version: None,
            hour: 17,
            points: Vec::new(),
            hexes: Vec::new(),
            max_hex_count: 0,
            error: None,
        }
    }

    fn refresh(&mut self, df: &DataFrame, version: u64, changed: bool) {
        if !changed && self.version == Some(version) {
            return;
        }

        self.points.clear();
        self.hexes.clear();
        self.max_hex_count = 0;
        self.error = None;
        self.version = Some(version);

        let filtered = match by_exact_hour(df, self.hour) {
            Ok(filtered) => filtered,
            Err(err) => {
                log::error!("hour filter failed: {err}");
                self.error = Some(err.to_string());
                return;
            }
        };

        match extract_points(&filtered) {
            Ok(points) => self.points = points,
            Err(err) => {
                log::error!("reading coordinates failed: {err}");
                self.error = Some(err.to_string());
                return;
            }
        }

        let (hexes, max_count) = hex_bins(&self.points);
        self.hexes = hexes;
        self.max_hex_count = max_count;
    }

    pub fn show(&mut self, ui: &mut egui::Ui, df: &DataFrame, version: u64, map: &MapLocation) {
        ui.heading("Location Analysis");
        ui.add_space(8.0);
        ui.label(RichText::new("Pickup Locations").size(14.0).strong());

        let changed = ui
            .add(egui::Slider::new(&mut self.hour, 0..=23).text("Hour"))
            .changed();
        self.refresh(df, version, changed);

        ui.label(format!("Showing pickups at {}:00", self.hour));
        ui.add_space(8.0);

        if let Some(error) = &self.error {
            ui.colored_label(Color32::from_rgb(220, 53, 69), error);
            return;
        }
        if self.points.is_empty() {
            ui.add_space(20.0);
            ui.vertical_centered(|ui| {
                ui.label(
                    RichText::new("No data available for the selected hour.")
                        .size(16.0)
                        .color(Color32::GRAY),
                );
            });
            return;
        }

        ui.columns(2, |columns| {
            columns[0].label(RichText::new("Pickup Map").size(13.0).strong());
            draw_scatter(&mut columns[0], &self.points, map);

            columns[1].label(RichText::new("Hexagon Density").size(13.0).strong());
            draw_hexes(&mut columns[1], &self.hexes, self.max_hex_count, map);
        });
    }
}

fn extract_points(df: &DataFrame) -> Result<Vec<[f64; 2]>, PolarsError> {
    let lat = df.column(LAT_COLUMN)?.cast(&DataType::Float64)?;
    let lon = df.column(LON_COLUMN)?.cast(&DataType::Float64)?;
    let lat = lat.f64()?;
    let lon = lon.f64()?;

    Ok(lat
        .into_iter()
        .zip(lon.into_iter())
        .filter_map(|(lat, lon)| Some([lon?, lat?]))
        .collect())
}

/// Bin points into H3 cells and return each cell's boundary ring with its
/// count, plus the largest count for color scaling.
fn hex_bins(points: &[[f64; 2]]) -> (Vec<(Vec<[f64; 2]>, u32)>, u32) {
    let mut counts: HashMap<CellIndex, u32> = HashMap::new();
    for &[lon, lat] in points {
        let Ok(coord) = LatLng::new(lat, lon) else {
            continue;
        };
        *counts.entry(coord.to_cell(HEX_RESOLUTION)).or_default() += 1;
    }

    let max_count = counts.values().copied().max().unwrap_or(0);
    let hexes = counts
        .into_iter()
        .map(|(cell, count)| {
            let boundary: Vec<[f64; 2]> = cell
                .boundary()
                .iter()
                .map(|vertex| [vertex.lng(), vertex.lat()])
                .collect();
            (boundary, count)
        })
        .collect();

    (hexes, max_count)
}

fn draw_scatter(ui: &mut egui::Ui, points: &[[f64; 2]], map: &MapLocation) {
    let span = view_span(map.zoom);
    let plot_points: PlotPoints = points.iter().copied().collect();

    Plot::new("pickup_map")
        .height(380.0)
        .allow_scroll(false)
        .data_aspect(lat_aspect(map.latitude))
        .include_x(map.longitude - span)
        .include_x(map.longitude + span)
        .include_y(map.latitude - span)
        .include_y(map.latitude + span)
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .show(ui, |plot_ui| {
            plot_ui.points(
                Points::new(plot_points)
                    .radius(1.5)
                    .color(POINT_COLOR.gamma_multiply(0.6)),
            );
        });
}

fn draw_hexes(ui: &mut egui::Ui, hexes: &[(Vec<[f64; 2]>, u32)], max_count: u32, map: &MapLocation) {
    let span = view_span(map.zoom);
    let max = max_count.max(1) as f32;

    Plot::new("pickup_hexes")
        .height(380.0)
        .allow_scroll(false)
        .data_aspect(lat_aspect(map.latitude))
        .include_x(map.longitude - span)
        .include_x(map.longitude + span)
        .include_y(map.latitude - span)
        .include_y(map.latitude + span)
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .show(ui, |plot_ui| {
            for (boundary, count) in hexes {
                let intensity = *count as f32 / max;
                let polygon = Polygon::new(PlotPoints::from_iter(boundary.iter().copied()))
                    .fill_color(HEX_COLOR.gamma_multiply(0.15 + 0.75 * intensity))
                    .stroke(egui::Stroke::new(0.5, HEX_COLOR.gamma_multiply(0.4)));
                plot_ui.polygon(polygon);
            }
        });
}

/// Half-width of the initial viewport in degrees for a web-map zoom level.
fn view_span(zoom: u32) -> f64 {
    180.0 / f64::from(1u32 << zoom.min(20))
}

/// Vertical stretch so one degree of latitude and longitude cover comparable
/// screen distance at the map's latitude.
fn lat_aspect(latitude: f64) -> f32 {
    (1.0 / latitude.to_radians().cos().abs().max(0.01)) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::testutil::sample_frame;

    #[test]
    fn extracts_lon_lat_pairs() {
        let df = sample_frame();
        let points = extract_points(&df).unwrap();
        assert_eq!(points.len(), 3);
        assert_eq!(points[0], [-73.99, 40.75]);
    }

    #[test]
    fn bins_nearby_points_into_cells() {
        // two identical points share a cell, a far away point does not
        let points = vec![[-73.99, 40.75], [-73.99, 40.75], [-73.00, 41.50]];
        let (hexes, max_count) = hex_bins(&points);
        assert_eq!(hexes.len(), 2);
        assert_eq!(max_count, 2);
        for (boundary, _) in &hexes {
            assert_eq!(boundary.len(), 6);
        }
    }

    #[test]
    fn empty_input_yields_no_hexes() {
        let (hexes, max_count) = hex_bins(&[]);
        assert!(hexes.is_empty());
        assert_eq!(max_count, 0);
    }
}
