//! Placement plugin - activates the controller and routes events through it.

use bevy::prelude::*;

use super::config::PlacementConfig;
use super::controller::{PlaceOutcome, PlacementController};
use super::error::PlacementError;
use super::hit_test::ScreenRaycaster;
use super::scene::{
    apply_queued_scene_commands, DetectionSwitch, EntitySpawner, PlacedObject, PlacementPrefab,
};
use crate::core::{
    AffordanceChanged, AppState, ObjectPlaced, PlaceRequested, PlanesChanged, SessionReset,
    StartNewExperience,
};
use crate::session::{ArCamera, ArSession};

/// Placement controller as wired into the Bevy app.
pub type BevyPlacementController =
    PlacementController<ScreenRaycaster, EntitySpawner, DetectionSwitch>;

/// The active placement controller. Only present once activation succeeded.
#[derive(Resource, Deref, DerefMut)]
pub struct ActivePlacement(pub BevyPlacementController);

/// Placement plugin - hit testing and the single placed object.
pub struct PlacementPlugin;

impl Plugin for PlacementPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(PlacementConfig::load())
            .add_systems(
                Update,
                activate_placement.run_if(in_state(AppState::Loading)),
            )
            .add_systems(
                Update,
                (
                    handle_session_reset,
                    ingest_plane_changes,
                    handle_new_experience,
                    handle_place_requests,
                    apply_scene_commands,
                    apply_detection_requests,
                )
                    .chain()
                    .run_if(in_state(AppState::Running))
                    .run_if(resource_exists::<ActivePlacement>),
            );
    }
}

/// Build the controller from config. Fails when a collaborator is missing.
fn build_placement(
    config: &PlacementConfig,
    has_camera: bool,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) -> Result<BevyPlacementController, PlacementError> {
    let mut builder = BevyPlacementController::builder()
        .spawner(EntitySpawner::default())
        .plane_detection(DetectionSwitch::default())
        .surface_offset(config.surface_offset)
        .disable_detection_after_placement(config.disable_detection_after_placement);

    // Without an AR camera there is nothing to cast rays from
    if has_camera {
        builder = builder.hit_tester(ScreenRaycaster::default());
    }
    if let Some(def) = &config.prefab {
        builder = builder.prefab(PlacementPrefab::from_def(def, meshes, materials));
    }

    builder.build()
}

/// Activate the controller, or park the app in `Failed`.
fn activate_placement(
    mut commands: Commands,
    config: Res<PlacementConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    cameras: Query<(), With<ArCamera>>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    match build_placement(&config, !cameras.is_empty(), &mut meshes, &mut materials) {
        Ok(controller) => {
            info!("Placement controller active");
            commands.insert_resource(ActivePlacement(controller));
            next_state.set(AppState::Running);
        }
        Err(e) => {
            error!("Failed to activate placement: {}", e);
            next_state.set(AppState::Failed);
        }
    }
}

fn handle_session_reset(
    mut placement: ResMut<ActivePlacement>,
    mut resets: EventReader<SessionReset>,
    mut affordance: EventWriter<AffordanceChanged>,
) {
    for _ in resets.read() {
        if let Some(change) = placement.reset_tracking() {
            affordance.send(AffordanceChanged { visible: change.visible });
        }
    }
}

fn ingest_plane_changes(
    mut placement: ResMut<ActivePlacement>,
    mut changes: EventReader<PlanesChanged>,
    mut affordance: EventWriter<AffordanceChanged>,
) {
    for change in changes.read() {
        if let Some(change) = placement.on_planes_changed(change) {
            affordance.send(AffordanceChanged { visible: change.visible });
        }
    }
}

fn handle_new_experience(
    mut placement: ResMut<ActivePlacement>,
    mut requests: EventReader<StartNewExperience>,
) {
    for _ in requests.read() {
        placement.start_new_experience();
    }
}

fn handle_place_requests(
    mut placement: ResMut<ActivePlacement>,
    mut requests: EventReader<PlaceRequested>,
    cameras: Query<(&Camera, &GlobalTransform), With<ArCamera>>,
    mut affordance: EventWriter<AffordanceChanged>,
    mut placed: EventWriter<ObjectPlaced>,
) {
    if requests.is_empty() {
        return;
    }

    if let Ok((camera, transform)) = cameras.get_single() {
        let planes = placement.tracker().current_planes();
        placement.hit_tester_mut().sync(camera, transform, planes);
    }

    for request in requests.read() {
        match placement.place(request.screen_point) {
            PlaceOutcome::Placed { pose, plane, .. } => {
                affordance.send(AffordanceChanged { visible: false });
                placed.send(ObjectPlaced {
                    plane,
                    position: pose.position,
                });
            }
            PlaceOutcome::NoPlaneUnderPoint => {
                info!("No plane detected under {}", request.screen_point);
            }
        }
    }
}

fn apply_scene_commands(
    mut commands: Commands,
    mut placement: ResMut<ActivePlacement>,
    placed: Query<(Entity, &PlacedObject)>,
) {
    if placement.spawner().pending() == 0 {
        return;
    }
    apply_queued_scene_commands(
        &mut commands,
        placement.spawner_mut(),
        placed.iter().map(|(entity, object)| (entity, object.0)),
    );
}

fn apply_detection_requests(
    mut placement: ResMut<ActivePlacement>,
    mut session: ResMut<ArSession>,
) {
    // Read first so an idle frame leaves the controller unchanged
    if !placement.plane_detection().has_request() {
        return;
    }
    if let Some(enabled) = placement.plane_detection_mut().take_request() {
        session.set_plane_detection_enabled(enabled);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::{Collaborator, PlaneDetection, PrefabDef};
    use crate::tracking::{Plane, PlaneExtent, PlaneId, Pose};
    use bevy::state::app::StatesPlugin;
    use bevy_rapier3d::prelude::Collider;

    #[derive(Resource, Default)]
    struct Seen(Vec<bool>);

    fn record_affordance(mut events: EventReader<AffordanceChanged>, mut seen: ResMut<Seen>) {
        seen.0.extend(events.read().map(|event| event.visible));
    }

    fn test_app() -> App {
        let controller = BevyPlacementController::builder()
            .hit_tester(ScreenRaycaster::default())
            .spawner(EntitySpawner::default())
            .plane_detection(DetectionSwitch::default())
            .prefab(PlacementPrefab {
                name: "Cube".to_string(),
                mesh: Handle::default(),
                material: Handle::default(),
                collider: Collider::cuboid(0.05, 0.05, 0.05),
            })
            .build()
            .unwrap();

        let mut app = App::new();
        app.add_event::<PlanesChanged>()
            .add_event::<AffordanceChanged>()
            .add_event::<PlaceRequested>()
            .add_event::<ObjectPlaced>()
            .add_event::<SessionReset>()
            .init_resource::<Seen>()
            .insert_resource(ActivePlacement(controller))
            .add_systems(
                Update,
                (
                    handle_session_reset,
                    ingest_plane_changes,
                    handle_place_requests,
                    record_affordance,
                )
                    .chain(),
            );
        app
    }

    fn plane(serial: u64) -> Plane {
        Plane::new(
            PlaneId::new(1, serial),
            Pose::from_position(Vec3::new(0.0, 0.0, -2.0)),
            PlaneExtent::new(1.0, 1.0),
        )
    }

    #[test]
    fn plane_events_drive_affordance() {
        let mut app = test_app();

        app.world_mut().send_event(PlanesChanged::added([plane(1)]));
        app.update();
        app.world_mut().send_event(PlanesChanged::removed([PlaneId::new(1, 1)]));
        app.update();

        assert_eq!(app.world().resource::<Seen>().0, vec![true, false]);
        assert!(!app.world().resource::<ActivePlacement>().tracker().has_any_plane());
    }

    #[test]
    fn place_without_camera_is_a_quiet_miss() {
        let mut app = test_app();
        app.world_mut().send_event(PlanesChanged::added([plane(1)]));
        app.update();

        app.world_mut().send_event(PlaceRequested {
            screen_point: Vec2::new(640.0, 360.0),
        });
        app.update();

        let placement = app.world().resource::<ActivePlacement>();
        assert!(!placement.has_placement());
        assert!(placement.affordance_visible());
        assert_eq!(app.world().resource::<Seen>().0, vec![true]);
    }

    #[test]
    fn session_reset_clears_planes_and_hides_affordance() {
        let mut app = test_app();
        app.world_mut().send_event(PlanesChanged::added([plane(1), plane(2)]));
        app.update();

        app.world_mut().send_event(SessionReset);
        app.update();

        let placement = app.world().resource::<ActivePlacement>();
        assert!(!placement.tracker().has_any_plane());
        assert!(!placement.affordance_visible());
        assert_eq!(app.world().resource::<Seen>().0, vec![true, false]);
    }

    #[test]
    fn planes_after_reset_show_affordance_again() {
        let mut app = test_app();
        app.world_mut().send_event(PlanesChanged::added([plane(1)]));
        app.update();
        app.world_mut().send_event(SessionReset);
        app.update();

        app.world_mut().send_event(PlanesChanged::added([plane(3)]));
        app.update();

        assert_eq!(app.world().resource::<Seen>().0, vec![true, false, true]);
    }

    #[derive(Resource, Default)]
    struct ChangedFrames(Vec<bool>);

    fn record_changed(placement: Res<ActivePlacement>, mut frames: ResMut<ChangedFrames>) {
        frames.0.push(placement.is_changed());
    }

    #[test]
    fn idle_frames_leave_controller_unchanged() {
        let mut app = test_app();
        app.init_resource::<ArSession>()
            .init_resource::<ChangedFrames>()
            .add_systems(PostUpdate, (apply_detection_requests, record_changed).chain());

        app.update();
        app.update();
        app.update();

        // Only the frame the resource was inserted counts as a change
        assert_eq!(app.world().resource::<ChangedFrames>().0, vec![true, false, false]);
    }

    #[test]
    fn pending_detection_request_reaches_the_session() {
        let mut app = test_app();
        app.init_resource::<ArSession>()
            .add_systems(PostUpdate, apply_detection_requests);
        app.world_mut()
            .resource_mut::<ActivePlacement>()
            .plane_detection_mut()
            .set_plane_detection_enabled(false);

        app.update();

        assert!(!app.world().resource::<ArSession>().plane_detection_enabled());
        assert!(!app.world().resource::<ActivePlacement>().plane_detection().has_request());
    }

    fn activation_app(config: PlacementConfig, with_camera: bool) -> App {
        let mut app = App::new();
        app.add_plugins(StatesPlugin)
            .init_state::<AppState>()
            .init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<StandardMaterial>>()
            .insert_resource(config)
            .add_systems(
                Update,
                activate_placement.run_if(in_state(AppState::Loading)),
            );
        if with_camera {
            app.world_mut().spawn(ArCamera);
        }

        // The state change lands on the following frame
        app.update();
        app.update();
        app
    }

    fn state(app: &App) -> AppState {
        *app.world().resource::<State<AppState>>().get()
    }

    #[test]
    fn complete_setup_activates_placement() {
        let app = activation_app(PlacementConfig::default(), true);

        assert_eq!(state(&app), AppState::Running);
        assert!(app.world().contains_resource::<ActivePlacement>());
    }

    #[test]
    fn missing_prefab_fails_activation() {
        let config = PlacementConfig {
            prefab: None,
            ..default()
        };
        let app = activation_app(config, true);

        assert_eq!(state(&app), AppState::Failed);
        assert!(!app.world().contains_resource::<ActivePlacement>());
    }

    #[test]
    fn missing_camera_fails_activation() {
        let app = activation_app(PlacementConfig::default(), false);

        assert_eq!(state(&app), AppState::Failed);
        assert!(!app.world().contains_resource::<ActivePlacement>());
    }

    #[test]
    fn missing_collaborator_is_named() {
        let mut meshes = Assets::<Mesh>::default();
        let mut materials = Assets::<StandardMaterial>::default();

        let config = PlacementConfig::default();
        let result = build_placement(&config, false, &mut meshes, &mut materials);
        assert_eq!(
            result.err(),
            Some(PlacementError::MissingCollaborator(Collaborator::HitTester))
        );

        let no_prefab = PlacementConfig {
            prefab: None,
            ..default()
        };
        let result = build_placement(&no_prefab, true, &mut meshes, &mut materials);
        assert_eq!(
            result.err(),
            Some(PlacementError::MissingCollaborator(Collaborator::Prefab))
        );

        let custom = PlacementConfig {
            prefab: Some(PrefabDef::default()),
            surface_offset: 0.5,
            disable_detection_after_placement: true,
        };
        assert!(build_placement(&custom, true, &mut meshes, &mut materials).is_ok());
    }
}
