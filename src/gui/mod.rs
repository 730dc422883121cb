//! GUI module - application shell and dashboard pages

mod app;
mod explorer;
mod location;
mod overview;
mod sidebar;
mod table;
mod time_view;

pub use app::PickupsApp;
