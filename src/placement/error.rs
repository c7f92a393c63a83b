//! Error types for placement activation.

use std::fmt;
use thiserror::Error;

/// A collaborator the placement controller cannot work without.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collaborator {
    /// Resolves screen points to poses on tracked planes
    HitTester,
    /// Instantiates and destroys placed objects
    Spawner,
    /// Turns plane detection on and off
    PlaneDetection,
    /// The object to place
    Prefab,
}

impl fmt::Display for Collaborator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Collaborator::HitTester => "hit tester",
            Collaborator::Spawner => "object spawner",
            Collaborator::PlaneDetection => "plane detection",
            Collaborator::Prefab => "prefab",
        };
        f.write_str(name)
    }
}

/// Errors that stop the placement controller from activating.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("Placement controller is missing its {0}")]
    MissingCollaborator(Collaborator),
}
