//! Application configuration module.
//!
//! Manages the TOML config file holding the TMDB credential and an
//! optional endpoint override.

#[allow(clippy::module_inception)]
mod config;

#[allow(clippy::module_name_repetitions)]
pub use config::{AppConfig, TmdbConfig, resolve_config_path};
