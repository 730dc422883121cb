//! Main Application
//! Page navigation, background dataset loading and the per-page views.

use crate::config::AppConfig;
use crate::data::{self, TableCache};
use crate::gui::explorer::ExplorerPage;
use crate::gui::location::LocationPage;
use crate::gui::overview::OverviewPage;
use crate::gui::sidebar::{Page, Sidebar, SidebarAction};
use crate::gui::time_view::TimeAnalysisPage;
use egui::SidePanel;
use polars::prelude::DataFrame;
use std::sync::mpsc::{channel, Receiver};
use std::sync::Arc;
use std::thread;

/// Dataset loading result from the background thread.
enum LoadResult {
    Complete { max_rows: usize, df: DataFrame },
    Error(String),
}

/// Main application window.
pub struct PickupsApp {
    config: AppConfig,
    cache: TableCache,
    data: Option<Arc<DataFrame>>,
    /// Bumped whenever a new table is installed so the pages know to
    /// recompute their derived views.
    data_version: u64,

    sidebar: Sidebar,
    overview: OverviewPage,
    explorer: ExplorerPage,
    time_view: TimeAnalysisPage,
    location: LocationPage,

    // Async CSV loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl PickupsApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let mut app = Self {
            cache: TableCache::new(config.data.cache_capacity),
            data: None,
            data_version: 0,
            sidebar: Sidebar::new(config.data.max_rows),
            overview: OverviewPage::new(),
            explorer: ExplorerPage::new(),
            time_view: TimeAnalysisPage::new(),
            location: LocationPage::new(),
            load_rx: None,
            is_loading: false,
            config,
        };
        app.start_load();
        app
    }

    /// Load the dataset for the sidebar's current row count, serving from the
    /// keyed cache when possible. Ignored while a load is in flight.
    fn start_load(&mut self) {
        if self.is_loading {
            return;
        }

        let max_rows = self.sidebar.max_rows;
        if let Some(table) = self.cache.get(max_rows) {
            log::info!("cache hit for {max_rows} rows");
            self.install_table(table, true);
            return;
        }

        self.sidebar.status = "Loading data...".to_string();
        self.sidebar.status_is_error = false;
        self.is_loading = true;

        let (tx, rx) = channel();
        self.load_rx = Some(rx);
        let url = self.config.data.url.clone();

        // Fetch in a background thread so the UI stays responsive
        thread::spawn(move || {
            let result = match data::fetch(&url, max_rows) {
                Ok(df) => LoadResult::Complete { max_rows, df },
                Err(err) => LoadResult::Error(err.to_string()),
            };
            let _ = tx.send(result);
        });
    }

    fn install_table(&mut self, table: Arc<DataFrame>, from_cache: bool) {
        let rows = table.height();
        self.data = Some(table);
        self.data_version += 1;
        self.sidebar.status = if from_cache {
            format!("Done! {rows} rows (cached)")
        } else {
            format!("Done! {rows} rows")
        };
        self.sidebar.status_is_error = false;
    }

    /// Check for dataset loading results
    fn check_load_results(&mut self) {
        let rx = self.load_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    LoadResult::Complete { max_rows, df } => {
                        let table = Arc::new(df);
                        self.cache.insert(max_rows, Arc::clone(&table));
                        self.install_table(table, false);
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                    LoadResult::Error(error) => {
                        log::error!("dataset load failed: {error}");
                        self.sidebar.status = format!("Error: {error}");
                        self.sidebar.status_is_error = true;
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.load_rx = Some(rx);
            }
        }
    }
}

impl eframe::App for PickupsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_results();

        // Request repaint while loading
        if self.is_loading {
            ctx.request_repaint();
        }

        SidePanel::left("sidebar")
            .min_width(210.0)
            .max_width(260.0)
            .show(ctx, |ui| match self.sidebar.show(ui, self.is_loading) {
                SidebarAction::Reload => self.start_load(),
                SidebarAction::None => {}
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(data) = self.data.clone() else {
                ui.centered_and_justified(|ui| {
                    let text = if self.sidebar.status_is_error {
                        self.sidebar.status.clone()
                    } else {
                        "Loading data...".to_string()
                    };
                    ui.label(egui::RichText::new(text).size(16.0));
                });
                return;
            };

            let version = self.data_version;
            egui::ScrollArea::vertical().show(ui, |ui| match self.sidebar.page {
                Page::Overview => self.overview.show(ui, &data, version),
                Page::DataExplorer => self.explorer.show(ui, &data, version),
                Page::TimeAnalysis => self.time_view.show(ui, &data, version),
                Page::LocationAnalysis => {
                    self.location
                        .show(ui, &data, version, &self.config.map.default_location)
                }
            });
        });
    }
}
