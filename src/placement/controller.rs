//! The placement controller.
//!
//! Turns a "place" trigger into one hit test, keeps at most one placed
//! object alive, and decides when the place affordance should be visible.

use bevy::prelude::*;

use super::collaborators::{HitFilter, HitTester, ObjectSpawner, PlaneDetection};
use super::error::{Collaborator, PlacementError};
use super::slot::PlacementSlot;
use crate::core::PlanesChanged;
use crate::tracking::{PlaneId, PlaneTracker, Pose};

/// A change of the place affordance's visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AffordanceChange {
    pub visible: bool,
}

/// Result of a place request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlaceOutcome<H> {
    /// The object was placed; any previous one was destroyed.
    Placed { handle: H, pose: Pose, plane: PlaneId },
    /// No tracked plane lies under the screen point. Nothing changed.
    NoPlaneUnderPoint,
}

/// Builds a [`PlacementController`], refusing to do so while a
/// collaborator is missing.
pub struct PlacementControllerBuilder<H, S: ObjectSpawner, D> {
    hit_tester: Option<H>,
    spawner: Option<S>,
    plane_detection: Option<D>,
    prefab: Option<S::Prefab>,
    surface_offset: f32,
    disable_detection_after_placement: bool,
}

impl<H, S, D> Default for PlacementControllerBuilder<H, S, D>
where
    S: ObjectSpawner,
{
    fn default() -> Self {
        Self {
            hit_tester: None,
            spawner: None,
            plane_detection: None,
            prefab: None,
            surface_offset: 0.0,
            disable_detection_after_placement: false,
        }
    }
}

impl<H, S, D> PlacementControllerBuilder<H, S, D>
where
    H: HitTester,
    S: ObjectSpawner,
    D: PlaneDetection,
{
    pub fn hit_tester(mut self, hit_tester: H) -> Self {
        self.hit_tester = Some(hit_tester);
        self
    }

    pub fn spawner(mut self, spawner: S) -> Self {
        self.spawner = Some(spawner);
        self
    }

    pub fn plane_detection(mut self, plane_detection: D) -> Self {
        self.plane_detection = Some(plane_detection);
        self
    }

    pub fn prefab(mut self, prefab: S::Prefab) -> Self {
        self.prefab = Some(prefab);
        self
    }

    /// Lift placed objects this far above the hit point, along world up.
    pub fn surface_offset(mut self, offset: f32) -> Self {
        self.surface_offset = offset;
        self
    }

    /// Turn plane detection off once an object is placed.
    pub fn disable_detection_after_placement(mut self, disable: bool) -> Self {
        self.disable_detection_after_placement = disable;
        self
    }

    pub fn build(self) -> Result<PlacementController<H, S, D>, PlacementError> {
        let hit_tester = self
            .hit_tester
            .ok_or(PlacementError::MissingCollaborator(Collaborator::HitTester))?;
        let spawner = self
            .spawner
            .ok_or(PlacementError::MissingCollaborator(Collaborator::Spawner))?;
        let plane_detection = self
            .plane_detection
            .ok_or(PlacementError::MissingCollaborator(Collaborator::PlaneDetection))?;
        let prefab = self
            .prefab
            .ok_or(PlacementError::MissingCollaborator(Collaborator::Prefab))?;

        Ok(PlacementController {
            hit_tester,
            spawner,
            plane_detection,
            prefab,
            surface_offset: self.surface_offset,
            disable_detection_after_placement: self.disable_detection_after_placement,
            tracker: PlaneTracker::new(),
            slot: PlacementSlot::default(),
            affordance_visible: false,
            placed: false,
        })
    }
}

/// Owns the plane tracker and the single placement slot.
pub struct PlacementController<H, S: ObjectSpawner, D> {
    hit_tester: H,
    spawner: S,
    plane_detection: D,
    prefab: S::Prefab,
    surface_offset: f32,
    disable_detection_after_placement: bool,
    tracker: PlaneTracker,
    slot: PlacementSlot<S::Handle>,
    affordance_visible: bool,
    /// Set on placement, cleared only by `start_new_experience`
    placed: bool,
}

impl<H, S, D> PlacementController<H, S, D>
where
    H: HitTester,
    S: ObjectSpawner,
    D: PlaneDetection,
{
    pub fn builder() -> PlacementControllerBuilder<H, S, D> {
        PlacementControllerBuilder::default()
    }

    /// Feed a batch of plane changes through the tracker and re-evaluate
    /// the affordance.
    pub fn on_planes_changed(&mut self, changes: &PlanesChanged) -> Option<AffordanceChange> {
        self.tracker.apply(changes);

        if self.tracker.has_any_plane() {
            if !self.placed && !self.affordance_visible {
                return Some(self.set_affordance(true));
            }
        } else if self.affordance_visible {
            return Some(self.set_affordance(false));
        }

        None
    }

    /// Place the prefab on the nearest tracked plane under `screen_point`.
    pub fn place(&mut self, screen_point: Vec2) -> PlaceOutcome<S::Handle> {
        let hits = self
            .hit_tester
            .raycast(screen_point, HitFilter::PlaneWithinPolygon);

        // The hit tester orders hits nearest first; take the first as is
        let Some(hit) = hits.first() else {
            debug!("No plane under screen point {}", screen_point);
            return PlaceOutcome::NoPlaneUnderPoint;
        };

        if let Some(previous) = self.slot.take() {
            self.spawner.destroy(previous);
        }

        let pose = Pose::new(
            hit.pose.position + Vec3::Y * self.surface_offset,
            hit.pose.rotation,
        );
        let handle = self.spawner.instantiate(&self.prefab, pose);
        self.slot.replace(handle);
        self.placed = true;
        self.affordance_visible = false;

        if self.disable_detection_after_placement {
            self.plane_detection.set_plane_detection_enabled(false);
        }

        info!("Placed object on plane {} at {}", hit.plane, pose.position);

        PlaceOutcome::Placed {
            handle,
            pose,
            plane: hit.plane,
        }
    }

    /// Clear the placed object and go back to looking for planes.
    ///
    /// The affordance is left alone; the next plane change decides it from
    /// `has_any_plane()` alone.
    pub fn start_new_experience(&mut self) {
        self.plane_detection.set_plane_detection_enabled(true);

        if let Some(previous) = self.slot.take() {
            self.spawner.destroy(previous);
        }
        self.placed = false;

        info!("Started new experience");
    }

    /// Forget every tracked plane after a session reset.
    pub fn reset_tracking(&mut self) -> Option<AffordanceChange> {
        self.tracker.clear();
        if self.affordance_visible {
            return Some(self.set_affordance(false));
        }
        None
    }

    fn set_affordance(&mut self, visible: bool) -> AffordanceChange {
        self.affordance_visible = visible;
        AffordanceChange { visible }
    }

    pub fn has_placement(&self) -> bool {
        self.slot.has_placement()
    }

    pub fn placed_object(&self) -> Option<S::Handle> {
        self.slot.occupant()
    }

    pub fn affordance_visible(&self) -> bool {
        self.affordance_visible
    }

    pub fn tracker(&self) -> &PlaneTracker {
        &self.tracker
    }

    pub fn hit_tester_mut(&mut self) -> &mut H {
        &mut self.hit_tester
    }

    pub fn spawner(&self) -> &S {
        &self.spawner
    }

    pub fn spawner_mut(&mut self) -> &mut S {
        &mut self.spawner
    }

    pub fn plane_detection(&self) -> &D {
        &self.plane_detection
    }

    pub fn plane_detection_mut(&mut self) -> &mut D {
        &mut self.plane_detection
    }
}
