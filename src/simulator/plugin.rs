//! Simulator plugin - timer and keyboard driven debug planes.

use bevy::ecs::schedule::SystemConfigs;
use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::config::SimulatorConfig;
use super::generator::DebugPlaneGenerator;
use super::permission::{
    camera_permission_granted, poll_permission_request, start_permission_request,
    CameraPermission, PermissionRequest,
};
use crate::core::{AppState, PlanesChanged, SessionReset};
use crate::session::{plane_detection_enabled, ArCamera};

/// Whether the app runs on a desktop rather than a mobile device.
pub fn running_on_desktop() -> bool {
    cfg!(any(target_os = "windows", target_os = "macos", target_os = "linux"))
}

/// Simulator plugin - stands in for the AR backend on desktops.
pub struct SimulatorPlugin;

impl Plugin for SimulatorPlugin {
    fn build(&self, app: &mut App) {
        let config = SimulatorConfig::load();
        let active = config.enabled && running_on_desktop();

        if !active {
            info!("Plane simulator inactive");
            app.insert_resource(config);
            return;
        }

        app.insert_resource(DebugPlaneGenerator::new(&config, StdRng::from_entropy()))
            .insert_resource(config)
            .init_resource::<CameraPermission>()
            .add_systems(Startup, start_permission_request)
            .add_systems(
                Update,
                poll_permission_request.run_if(resource_exists::<PermissionRequest>),
            )
            .add_systems(
                Update,
                simulation_systems().run_if(in_state(AppState::Running)),
            );
    }
}

/// Planes are only generated once the camera may be used and while plane
/// detection is on.
fn simulation_systems() -> SystemConfigs {
    (
        forget_planes_on_reset,
        generate_debug_planes
            .run_if(camera_permission_granted)
            .run_if(plane_detection_enabled),
    )
        .chain()
}

fn forget_planes_on_reset(
    mut resets: EventReader<SessionReset>,
    mut generator: ResMut<DebugPlaneGenerator>,
) {
    if resets.read().count() > 0 {
        generator.clear();
    }
}

/// Generate a plane on every timer interval, and on Space.
fn generate_debug_planes(
    time: Res<Time>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut generator: ResMut<DebugPlaneGenerator>,
    cameras: Query<&GlobalTransform, With<ArCamera>>,
    mut changes: EventWriter<PlanesChanged>,
) {
    let due = generator.tick(time.delta_secs());
    let requested = keyboard.just_pressed(KeyCode::Space);
    if !due && !requested {
        return;
    }

    let Ok(camera) = cameras.get_single() else {
        warn!("No AR camera to generate debug planes in front of");
        return;
    };

    let count = usize::from(due) + usize::from(requested);
    for _ in 0..count {
        let batch = generator.generate(camera.translation(), camera.forward().as_vec3());
        for plane in &batch.added {
            info!("Generated debug plane {} at {}", plane.id, plane.pose.position);
        }
        changes.send(batch);
    }
}
