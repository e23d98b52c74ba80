//! Application configuration module.
//!
//! Manages the TOML config file holding the TMDB endpoints and search
//! tuning.

#[allow(clippy::module_inception)]
mod config;

#[allow(clippy::module_name_repetitions)]
pub use config::{AppConfig, SearchConfig, TmdbConfig};
