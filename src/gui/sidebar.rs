//! Sidebar Widget
//! Page navigation plus the dataset load controls and status line.

use egui::{Color32, RichText};

/// Dashboard pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Overview,
    DataExplorer,
    TimeAnalysis,
    LocationAnalysis,
}

impl Page {
    pub const ALL: [Page; 4] = [
        Page::Overview,
        Page::DataExplorer,
        Page::TimeAnalysis,
        Page::LocationAnalysis,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Page::Overview => "Overview",
            Page::DataExplorer => "Data Explorer",
            Page::TimeAnalysis => "Time Analysis",
            Page::LocationAnalysis => "Location Analysis",
        }
    }
}

/// Actions triggered by the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarAction {
    None,
    Reload,
}

pub struct Sidebar {
    pub page: Page,
    pub max_rows: usize,
    pub status: String,
    pub status_is_error: bool,
}

impl Sidebar {
    pub fn new(max_rows: usize) -> Self {
        Self {
            page: Page::Overview,
            max_rows,
            status: "Loading data...".to_string(),
            status_is_error: false,
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui, loading: bool) -> SidebarAction {
        let mut action = SidebarAction::None;

        ui.add_space(5.0);
        ui.label(RichText::new("Uber Pickups Analysis").size(18.0).strong());
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        ui.label(RichText::new("Navigate").size(14.0).strong());
        for page in Page::ALL {
            ui.radio_value(&mut self.page, page, page.label());
        }

        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        ui.label(RichText::new("Dataset").size(14.0).strong());
        ui.horizontal(|ui| {
            ui.label("Rows to load:");
            ui.add(
                egui::DragValue::new(&mut self.max_rows)
                    .range(100..=100_000)
                    .speed(100),
            );
        });
        ui.add_enabled_ui(!loading, |ui| {
            if ui.button("Reload").clicked() {
                action = SidebarAction::Reload;
            }
        });

        ui.add_space(8.0);
        let status_color = if self.status_is_error {
            Color32::from_rgb(220, 53, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }
}
