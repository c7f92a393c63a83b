//! Simulator configuration loaded from external RON file.

use bevy::prelude::*;
use serde::Deserialize;

use super::permission::PermissionPolicy;
use std::path::Path;

use crate::core::{load_config, ConfigError};

/// Debug simulator settings loaded from assets/data/simulator.ron.
#[derive(Resource, Debug, Clone, Deserialize)]
pub struct SimulatorConfig {
    /// Simulate planes when running on a desktop
    pub enabled: bool,
    /// Seconds between generated planes
    pub generation_interval: f32,
    /// Distance in front of the camera
    pub plane_distance: f32,
    /// Plane width and depth
    pub plane_size: (f32, f32),
    /// Maximum random offset per axis
    #[serde(default = "default_jitter")]
    pub jitter: (f32, f32, f32),
    /// Oldest planes are dropped beyond this count (None = keep all)
    #[serde(default)]
    pub max_planes: Option<usize>,
    /// Answer given to the camera permission request
    #[serde(default)]
    pub camera_permission: PermissionPolicy,
}

fn default_jitter() -> (f32, f32, f32) {
    (0.5, 0.2, 0.5)
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            generation_interval: 1.0,
            plane_distance: 2.0,
            plane_size: (1.0, 1.0),
            jitter: default_jitter(),
            max_planes: Some(12),
            camera_permission: PermissionPolicy::Grant,
        }
    }
}

impl SimulatorConfig {
    pub fn load() -> Self {
        Self::load_from("assets/data/simulator.ron")
    }

    /// Load and validate; an unusable config is replaced by the defaults.
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let config: Self = load_config(path);
        match config.validate(path) {
            Ok(()) => config,
            Err(e) => {
                error!("{}. Using defaults.", e);
                Self::default()
            }
        }
    }

    /// Distances, sizes and jitter must be finite and not negative.
    pub fn validate(&self, path: &Path) -> Result<(), ConfigError> {
        let (jx, jy, jz) = self.jitter;
        let (w, h) = self.plane_size;
        let fields = [
            ("generation_interval", self.generation_interval),
            ("plane_distance", self.plane_distance),
            ("plane_size.0", w),
            ("plane_size.1", h),
            ("jitter.0", jx),
            ("jitter.1", jy),
            ("jitter.2", jz),
        ];

        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidValue {
                    path: path.display().to_string(),
                    details: format!("{} must be finite and not negative, got {}", name, value),
                });
            }
        }
        Ok(())
    }
}
