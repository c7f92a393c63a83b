//! Core module - app states, shared events, and config loading.
//!
//! This module provides the foundation that all other plugins build upon.

mod config;
mod events;
mod plugin;
mod states;

pub use config::{load_config, read_config, ConfigError};
pub use events::*;
pub use plugin::CorePlugin;
pub use states::*;
