pub mod app;
pub mod charts;
pub mod client;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod labels;
pub mod layout;
pub mod level;
pub mod models;
pub mod render;
pub mod state;
pub mod stats;
pub mod tooltip;
pub mod ui;

pub use app::router;
pub use config::DashboardConfig;
pub use state::AppState;
