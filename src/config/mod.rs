//! Configuration management for pomodo.
//!
//! This module handles loading configuration from `~/.pomodo/`.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{ColorSetting, Config, GeneralConfig, StorageConfig, UiConfig};
