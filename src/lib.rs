//! Plane Placement - tracked-plane object placement in Bevy.
//!
//! The heart of the crate is an engine-agnostic placement flow: a
//! [`tracking::PlaneTracker`] follows detected planes, and a
//! [`placement::PlacementController`] turns a screen point into a pose on one
//! of those planes and keeps exactly one placed object alive.
//!
//! # Architecture
//!
//! The app is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: App states and the events shared between plugins
//! - **Session**: AR session state, resets, plane detection switch
//! - **Tracking**: Plane data, the plane tracker, plane visuals
//! - **Placement**: Hit testing, the placement slot, placed objects
//! - **Simulator**: Synthetic planes for desktop development
//! - **UI**: Place/reset/quit buttons and keyboard shortcuts

pub mod core;
pub mod placement;
pub mod session;
pub mod simulator;
pub mod tracking;
pub mod ui;

use bevy::prelude::*;

/// Main plugin that adds all sub-plugins.
pub struct PlanePlacementPlugin;

impl Plugin for PlanePlacementPlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Session state
            .add_plugins(session::SessionPlugin)

            // Plane visuals
            .add_plugins(tracking::TrackingPlugin)

            // Placement controller
            .add_plugins(placement::PlacementPlugin)

            // Debug plane source
            .add_plugins(simulator::SimulatorPlugin)

            // UI systems
            .add_plugins(ui::UiPlugin);
    }
}
