//! Simulator module - synthetic planes for development without a device.
//!
//! On a desktop there is no AR backend, so this module plays its part: it
//! generates planes in front of the AR camera and reports them through
//! `PlanesChanged`, exactly like a real tracking backend would.

mod config;
mod generator;
mod permission;
mod plugin;

pub use config::SimulatorConfig;
pub use generator::{DebugPlaneGenerator, SIMULATOR_SOURCE};
pub use permission::{CameraPermission, PermissionPolicy, PermissionStatus};
pub use plugin::{running_on_desktop, SimulatorPlugin};
