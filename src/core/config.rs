//! RON config loading shared by the placement and simulator plugins.
//!
//! Configs live under `assets/data/` and can be tweaked without
//! recompilation. A missing or broken file never stops the app; the
//! defaults are used instead.

use bevy::prelude::*;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when reading a config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read.
    #[error("Failed to read file '{path}': {details}")]
    ReadError { path: String, details: String },

    /// RON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    ParseError { path: String, details: String },

    /// The file parsed but holds a value that cannot be used.
    #[error("Invalid value in '{path}': {details}")]
    InvalidValue { path: String, details: String },
}

/// Read and parse a RON config file.
pub fn read_config<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, ConfigError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.display().to_string(),
        details: e.to_string(),
    })?;

    ron::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.display().to_string(),
        details: e.to_string(),
    })
}

/// Load a config file, falling back to defaults on any error.
pub fn load_config<T: DeserializeOwned + Default>(path: impl AsRef<Path>) -> T {
    let path = path.as_ref();
    match read_config(path) {
        Ok(config) => {
            info!("Loaded config from {}", path.display());
            config
        }
        Err(e @ ConfigError::ParseError { .. }) => {
            error!("{}. Using defaults.", e);
            T::default()
        }
        Err(e) => {
            warn!("{}. Using defaults.", e);
            T::default()
        }
    }
}
