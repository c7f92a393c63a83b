//! Global events used for cross-plugin communication.
//!
//! The tracking backend (here the debug simulator) only ever talks to the
//! placement controller through [`PlanesChanged`], and the UI only learns
//! about the affordance through [`AffordanceChanged`]. This keeps the
//! plugins independent and testable.

use bevy::prelude::*;

use crate::tracking::{Plane, PlaneId};

/// Sent by a tracking backend whenever its detection state changes.
///
/// All plane fields are populated before the event is sent. The three
/// batches are applied together: added, then updated, then removed.
#[derive(Event, Debug, Clone, Default, PartialEq)]
pub struct PlanesChanged {
    /// Planes seen for the first time
    pub added: Vec<Plane>,
    /// Planes whose pose or extent changed
    pub updated: Vec<Plane>,
    /// Planes no longer tracked
    pub removed: Vec<PlaneId>,
}

impl PlanesChanged {
    pub fn added(planes: impl IntoIterator<Item = Plane>) -> Self {
        Self {
            added: planes.into_iter().collect(),
            ..default()
        }
    }

    pub fn updated(planes: impl IntoIterator<Item = Plane>) -> Self {
        Self {
            updated: planes.into_iter().collect(),
            ..default()
        }
    }

    pub fn removed(ids: impl IntoIterator<Item = PlaneId>) -> Self {
        Self {
            removed: ids.into_iter().collect(),
            ..default()
        }
    }
}

/// Sent when the place affordance (the place button) should appear or hide.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AffordanceChanged {
    pub visible: bool,
}

/// Sent by the UI to place the object at a screen point.
///
/// Screen points are in logical window pixels, origin top-left.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PlaceRequested {
    pub screen_point: Vec2,
}

/// Sent by the UI to clear the placed object and look for planes again.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct StartNewExperience;

/// Sent after an object was placed on a plane.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ObjectPlaced {
    /// The plane the object sits on
    pub plane: PlaneId,
    /// World position of the placed object
    pub position: Vec3,
}

/// Request a reset of all tracking state.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct SessionResetRequested;

/// Broadcast after the session was reset; every plane is gone.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct SessionReset;
