//! Uber Pickups in NYC - Interactive Analysis Dashboard
//!
//! Loads the public pickup dataset and renders grouped aggregates as
//! interactive charts and maps.

mod config;
mod data;
mod gui;

use config::AppConfig;
use eframe::egui;
use gui::PickupsApp;
use std::path::Path;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Missing or malformed configuration is fatal at startup
    let config = match AppConfig::load(Path::new("config.yaml")) {
        Ok(config) => config,
        Err(err) => {
            log::error!("failed to load configuration: {err:#}");
            std::process::exit(1);
        }
    };

    let title = config.app.title.clone();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([1000.0, 640.0])
            .with_title(&title),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| Ok(Box::new(PickupsApp::new(cc, config)))),
    )
}
