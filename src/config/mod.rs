//! Configuration management for quicktask.
//!
//! This module handles loading and saving configuration from `~/.quicktask/`.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{ColorSetting, Config, GeneralConfig, IngestionConfig};
