//! Recoverable tracking inconsistencies.

use thiserror::Error;

use super::PlaneId;

/// Contract violations by the tracking backend.
///
/// None of these are fatal: the tracker logs them and carries on with the
/// best state it can derive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TrackingIssue {
    /// An "added" plane reused an id that is already tracked.
    #[error("Plane {0} was added twice; refreshing the existing entry")]
    DuplicateId(PlaneId),

    /// An "updated" plane was never added.
    #[error("Update for unknown plane {0} ignored")]
    UnknownId(PlaneId),
}
