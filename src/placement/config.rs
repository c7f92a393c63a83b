//! Placement configuration loaded from external RON file.

use bevy::prelude::*;
use serde::Deserialize;

use crate::core::load_config;

/// Shape of the placed object's mesh and collider.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub enum PrefabShape {
    Cuboid { size: (f32, f32, f32) },
    Sphere { radius: f32 },
}

/// The object the user places.
#[derive(Debug, Clone, Deserialize)]
pub struct PrefabDef {
    pub name: String,
    pub shape: PrefabShape,
    pub color: (f32, f32, f32),
}

impl Default for PrefabDef {
    fn default() -> Self {
        Self {
            name: "Cube".to_string(),
            shape: PrefabShape::Cuboid {
                size: (0.1, 0.1, 0.1),
            },
            color: (0.9, 0.6, 0.2),
        }
    }
}

/// Placement config loaded from assets/data/placement.ron.
#[derive(Resource, Debug, Clone, Deserialize)]
pub struct PlacementConfig {
    /// `None` leaves the controller without a prefab; it will not activate
    pub prefab: Option<PrefabDef>,
    /// Lift above the hit point along world up
    #[serde(default)]
    pub surface_offset: f32,
    #[serde(default)]
    pub disable_detection_after_placement: bool,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            prefab: Some(PrefabDef::default()),
            surface_offset: 0.01,
            disable_detection_after_placement: false,
        }
    }
}

impl PlacementConfig {
    pub fn load() -> Self {
        load_config("assets/data/placement.ron")
    }
}
