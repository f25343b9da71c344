//! Terminal platform: stdin command loop and stdout rendering.
mod app;
mod ui;

pub use app::run_app;
