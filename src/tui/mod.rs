//! Interactive terminal dashboard.

mod app;
mod dashboard;
mod screens;

pub use app::run;
pub use dashboard::Dashboard;
