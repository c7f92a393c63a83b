//! Session plugin - owns the AR session and the AR camera.

use bevy::prelude::*;

use super::state::ArSession;
use crate::core::{AppState, SessionReset, SessionResetRequested};

/// Marker for the camera the AR view is rendered from.
///
/// Hit tests cast rays from it, and debug planes are generated in front
/// of it.
#[derive(Component)]
pub struct ArCamera;

/// Session plugin - installs the single [`ArSession`].
///
/// Adding it a second time keeps the first session and logs a warning.
pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        if app.world().contains_resource::<ArSession>() {
            warn!("AR session already installed, ignoring duplicate SessionPlugin");
            return;
        }

        app.init_resource::<ArSession>()
            .add_systems(Startup, spawn_ar_camera)
            // Tracking from a previous scene must not leak into this one
            .add_systems(OnEnter(AppState::Running), reset_session)
            .add_systems(
                Update,
                reset_session
                    .run_if(on_event::<SessionResetRequested>)
                    .run_if(in_state(AppState::Running)),
            );
    }

    fn is_unique(&self) -> bool {
        false
    }
}

/// Run condition: plane detection is currently on.
pub fn plane_detection_enabled(session: Res<ArSession>) -> bool {
    session.plane_detection_enabled()
}

fn spawn_ar_camera(mut commands: Commands) {
    commands.spawn((
        ArCamera,
        Camera3d::default(),
        Transform::from_xyz(0.0, 1.4, 0.0).looking_to(Vec3::new(0.0, -0.6, -1.0), Vec3::Y),
        Name::new("AR Camera"),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 8000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(2.0, 4.0, 2.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

fn reset_session(
    mut session: ResMut<ArSession>,
    mut requests: EventReader<SessionResetRequested>,
    mut resets: EventWriter<SessionReset>,
) {
    requests.clear();
    session.reset();
    resets.send(SessionReset);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_plugin_keeps_first_session() {
        let mut app = App::new();
        app.add_plugins(SessionPlugin);
        app.world_mut().resource_mut::<ArSession>().set_plane_detection_enabled(false);

        app.add_plugins(SessionPlugin);

        assert!(!app.world().resource::<ArSession>().plane_detection_enabled());
    }

    #[derive(Resource, Default)]
    struct Resets(usize);

    fn count_resets(mut resets: EventReader<SessionReset>, mut seen: ResMut<Resets>) {
        seen.0 += resets.read().count();
    }

    #[test]
    fn reset_request_resets_session_once_per_frame() {
        let mut app = App::new();
        app.add_event::<SessionResetRequested>()
            .add_event::<SessionReset>()
            .init_resource::<ArSession>()
            .init_resource::<Resets>()
            .add_systems(
                Update,
                (
                    reset_session.run_if(on_event::<SessionResetRequested>),
                    count_resets,
                )
                    .chain(),
            );

        app.update();
        assert_eq!(app.world().resource::<Resets>().0, 0);

        app.world_mut().send_event(SessionResetRequested);
        app.world_mut().send_event(SessionResetRequested);
        app.update();

        assert_eq!(app.world().resource::<ArSession>().reset_count(), 1);
        assert_eq!(app.world().resource::<Resets>().0, 1);
    }
}
