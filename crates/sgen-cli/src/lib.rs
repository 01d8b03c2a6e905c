//! Audiobook segment generator CLI library.
//!
//! This crate provides the command-line interface around `sgen-core`: reading
//! silences from XML, loading settings, and writing the segment document.

mod cli;
pub mod commands;
mod config;
pub mod input;
pub mod output;

pub use cli::Cli;
pub use config::{Settings, SettingsOverrides, dirs_config_path};
pub use input::{InputError, parse_silences, read_silences};
pub use output::Sink;
