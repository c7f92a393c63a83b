//! The plane tracker: a de-duplicated view of the currently detected planes.

use bevy::prelude::*;
use std::collections::HashMap;

use super::{Plane, PlaneId, TrackingIssue};
use crate::core::PlanesChanged;

/// Snapshot of the tracked planes, keyed by id.
///
/// Taken at a point in time; it never reflects later changes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackedPlaneSet {
    planes: HashMap<PlaneId, Plane>,
}

impl TrackedPlaneSet {
    pub fn get(&self, id: PlaneId) -> Option<&Plane> {
        self.planes.get(&id)
    }

    pub fn contains(&self, id: PlaneId) -> bool {
        self.planes.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.planes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.planes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Plane> {
        self.planes.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = PlaneId> + '_ {
        self.planes.keys().copied()
    }
}

/// What a batch of plane changes actually did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeReport {
    pub inserted: usize,
    pub updated: usize,
    pub removed: usize,
    pub issues: Vec<TrackingIssue>,
}

/// Maintains the set of live planes reported by the tracking backend.
#[derive(Debug, Default)]
pub struct PlaneTracker {
    planes: HashMap<PlaneId, Plane>,
}

impl PlaneTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one batch of added, updated and removed planes.
    ///
    /// Backend contract violations are logged and recovered from: a
    /// duplicate add refreshes the existing entry, an update for an unknown
    /// id is dropped, and removing an absent id does nothing.
    pub fn apply(&mut self, changes: &PlanesChanged) -> ChangeReport {
        let mut report = ChangeReport::default();

        for plane in &changes.added {
            match self.planes.insert(plane.id, *plane) {
                None => report.inserted += 1,
                Some(_) => {
                    let issue = TrackingIssue::DuplicateId(plane.id);
                    warn!("{}", issue);
                    report.issues.push(issue);
                }
            }
        }

        for plane in &changes.updated {
            match self.planes.get_mut(&plane.id) {
                Some(existing) => {
                    existing.pose = plane.pose;
                    existing.extent = plane.extent;
                    report.updated += 1;
                }
                None => {
                    let issue = TrackingIssue::UnknownId(plane.id);
                    warn!("{}", issue);
                    report.issues.push(issue);
                }
            }
        }

        for id in &changes.removed {
            if self.planes.remove(id).is_some() {
                report.removed += 1;
            } else {
                debug!("Plane {} already removed", id);
            }
        }

        report
    }

    pub fn has_any_plane(&self) -> bool {
        !self.planes.is_empty()
    }

    pub fn current_planes(&self) -> TrackedPlaneSet {
        TrackedPlaneSet {
            planes: self.planes.clone(),
        }
    }

    pub fn get(&self, id: PlaneId) -> Option<&Plane> {
        self.planes.get(&id)
    }

    pub fn len(&self) -> usize {
        self.planes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.planes.is_empty()
    }

    /// Forget every plane (session reset).
    pub fn clear(&mut self) {
        self.planes.clear();
    }
}
