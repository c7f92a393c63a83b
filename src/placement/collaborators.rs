//! Interfaces the placement controller needs from its host.
//!
//! The controller never talks to a scene graph or a tracking backend
//! directly. Each host (the Bevy app, the unit tests) plugs in its own
//! implementations.

use bevy::prelude::*;

use crate::tracking::{PlaneId, Pose};

/// Which surfaces a hit test may report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HitFilter {
    /// Only hits inside a tracked plane's polygon
    #[default]
    PlaneWithinPolygon,
    /// Hits anywhere on the infinite extension of a tracked plane
    PlaneInfinite,
}

/// One hit of a screen-space query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitResult {
    /// Where the ray met the plane, oriented like the plane
    pub pose: Pose,
    /// The plane that was hit
    pub plane: PlaneId,
    /// Distance from the ray origin
    pub distance: f32,
}

/// Resolves a screen point to hits on tracked planes.
pub trait HitTester {
    /// Hits along the ray through `screen_point`, nearest first.
    /// An empty list means nothing was hit.
    fn raycast(&self, screen_point: Vec2, filter: HitFilter) -> Vec<HitResult>;
}

/// Creates and destroys placed objects.
pub trait ObjectSpawner {
    /// What to instantiate.
    type Prefab;
    /// Reference to an instantiated object.
    type Handle: Copy + PartialEq + std::fmt::Debug;

    fn instantiate(&mut self, prefab: &Self::Prefab, pose: Pose) -> Self::Handle;

    fn destroy(&mut self, handle: Self::Handle);
}

/// Switch for the tracking backend's plane detection.
pub trait PlaneDetection {
    fn set_plane_detection_enabled(&mut self, enabled: bool);
}
