//! Plane Placement - Desktop Entry Point
//!
//! Runs the placement flow against the PC debug plane simulator so it can be
//! tried without a mobile device.
//!
//! Controls:
//! - Space: Generate a debug plane
//! - Enter: Place the object at the centre of the screen
//! - N: Start a new experience
//! - R: Reset plane tracking
//! - Q: Quit

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

fn main() {
    App::new()
        // Bevy default plugins
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Plane Placement".to_string(),
                resolution: (1280.0, 720.0).into(),
                ..default()
            }),
            ..default()
        }))

        // Physics
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())

        // Placement demo
        .add_plugins(plane_placement::PlanePlacementPlugin)

        .run();
}
