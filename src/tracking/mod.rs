//! Tracking module - plane data, the plane tracker, and plane visuals.

mod error;
mod plane;
mod plugin;
mod tracker;
mod visualizer;

pub use error::TrackingIssue;
pub use plane::{Plane, PlaneExtent, PlaneId, Pose};
pub use plugin::TrackingPlugin;
pub use tracker::{ChangeReport, PlaneTracker, TrackedPlaneSet};
pub use visualizer::{PlaneVisual, PlaneVisualConfig};
