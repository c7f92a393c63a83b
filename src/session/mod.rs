//! Session module - AR session state, the AR camera, and resets.

mod plugin;
mod state;

pub use plugin::{plane_detection_enabled, ArCamera, SessionPlugin};
pub use state::ArSession;
