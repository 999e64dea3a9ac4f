//! TUI module for the interactive catalog browser.
//!
//! Uses `ratatui` + `crossterm` for rendering.

mod app;
/// View-state controllers.
pub mod state;
mod ui;

pub use app::run_browser;
