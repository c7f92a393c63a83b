//! UI module - place affordance, controls, and status HUD.

mod hud;
mod plugin;

pub use hud::{HudRoot, StatusText};
pub use plugin::{screen_center, ControlButton, UiPlugin};
