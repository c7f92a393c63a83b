//! Placement module - hit testing, the placement slot, and placed objects.

mod collaborators;
mod config;
mod controller;
mod error;
mod plugin;
mod scene;
mod slot;

pub use collaborators::{HitFilter, HitResult, HitTester, ObjectSpawner, PlaneDetection};
pub use config::{PlacementConfig, PrefabDef, PrefabShape};
pub use controller::{
    AffordanceChange, PlaceOutcome, PlacementController, PlacementControllerBuilder,
};
pub use error::{Collaborator, PlacementError};
pub use hit_test::{hits_along_ray, ScreenRaycaster};
pub use plugin::{ActivePlacement, BevyPlacementController, PlacementPlugin};
pub use scene::{
    DetectionSwitch, EntitySpawner, PlacedObject, PlacedObjectId, PlacementPrefab, SceneCommand,
};
pub use slot::PlacementSlot;
