//! Translucent quads that show where the tracked planes are.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;

use super::{Plane, PlaneId};
use crate::core::{load_config, PlanesChanged, SessionReset};

/// Half thickness of the plane colliders.
const PLANE_HALF_THICKNESS: f32 = 0.005;

/// Plane visual settings loaded from assets/data/plane_visuals.ron.
#[derive(Resource, Clone, Deserialize)]
pub struct PlaneVisualConfig {
    pub enabled: bool,
    pub color: (f32, f32, f32, f32),
    /// Lift above the plane surface to avoid z-fighting with placed objects
    pub lift: f32,
}

impl Default for PlaneVisualConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            color: (0.0, 0.7, 1.0, 0.5),
            lift: 0.0,
        }
    }
}

impl PlaneVisualConfig {
    pub fn load() -> Self {
        load_config("assets/data/plane_visuals.ron")
    }
}

/// Marker for the quad drawn for a tracked plane.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaneVisual(pub PlaneId);

/// Shared mesh and material for every plane quad.
#[derive(Resource)]
pub(super) struct PlaneVisualAssets {
    mesh: Handle<Mesh>,
    material: Handle<StandardMaterial>,
}

pub(super) fn setup_plane_visual_assets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<PlaneVisualConfig>,
) {
    let (r, g, b, a) = config.color;
    commands.insert_resource(PlaneVisualAssets {
        mesh: meshes.add(Plane3d::default().mesh().size(1.0, 1.0)),
        material: materials.add(StandardMaterial {
            base_color: Color::srgba(r, g, b, a),
            alpha_mode: AlphaMode::Blend,
            unlit: true,
            double_sided: true,
            cull_mode: None,
            ..default()
        }),
    });
}

fn visual_transform(plane: &Plane, lift: f32) -> Transform {
    Transform::from_translation(plane.pose.position + plane.normal() * lift)
        .with_rotation(plane.pose.rotation)
        .with_scale(Vec3::new(plane.extent.size.x, 1.0, plane.extent.size.y))
}

/// Mirror plane changes into quads.
pub(super) fn sync_plane_visuals(
    mut commands: Commands,
    mut changes: EventReader<PlanesChanged>,
    visuals: Query<(Entity, &PlaneVisual)>,
    assets: Res<PlaneVisualAssets>,
    config: Res<PlaneVisualConfig>,
) {
    let mut existing: HashMap<PlaneId, Entity> = visuals
        .iter()
        .map(|(entity, visual)| (visual.0, entity))
        .collect();

    for change in changes.read() {
        for plane in &change.added {
            let transform = visual_transform(plane, config.lift);
            if let Some(entity) = existing.get(&plane.id) {
                commands.entity(*entity).insert(transform);
                continue;
            }

            let entity = commands
                .spawn((
                    PlaneVisual(plane.id),
                    Mesh3d(assets.mesh.clone()),
                    MeshMaterial3d(assets.material.clone()),
                    transform,
                    Collider::cuboid(0.5, PLANE_HALF_THICKNESS, 0.5),
                    RigidBody::Fixed,
                    Name::new(format!("Plane {}", plane.id)),
                ))
                .id();
            existing.insert(plane.id, entity);
        }

        for plane in &change.updated {
            if let Some(entity) = existing.get(&plane.id) {
                commands.entity(*entity).insert(visual_transform(plane, config.lift));
            }
        }

        for id in &change.removed {
            if let Some(entity) = existing.remove(id) {
                commands.entity(entity).despawn_recursive();
            }
        }
    }
}

/// Remove every plane quad after a session reset.
pub(super) fn clear_plane_visuals(
    mut commands: Commands,
    mut resets: EventReader<SessionReset>,
    visuals: Query<Entity, With<PlaneVisual>>,
) {
    if resets.read().count() == 0 {
        return;
    }
    for entity in visuals.iter() {
        commands.entity(entity).despawn_recursive();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracking::{PlaneExtent, Pose};

    fn test_app() -> App {
        let mut app = App::new();
        app.add_event::<PlanesChanged>()
            .add_event::<SessionReset>()
            .insert_resource(PlaneVisualConfig::default())
            .insert_resource(PlaneVisualAssets {
                mesh: Handle::default(),
                material: Handle::default(),
            })
            .add_systems(Update, (clear_plane_visuals, sync_plane_visuals).chain());
        app
    }

    fn plane(serial: u64, x: f32, size: f32) -> Plane {
        Plane::new(
            PlaneId::new(1, serial),
            Pose::from_position(Vec3::new(x, 0.0, -2.0)),
            PlaneExtent::new(size, size * 2.0),
        )
    }

    fn visuals(app: &mut App) -> Vec<(Entity, PlaneId, Transform)> {
        let mut query = app.world_mut().query::<(Entity, &PlaneVisual, &Transform)>();
        let mut visuals: Vec<_> = query
            .iter(app.world())
            .map(|(entity, visual, transform)| (entity, visual.0, *transform))
            .collect();
        visuals.sort_by_key(|(_, id, _)| *id);
        visuals
    }

    #[test]
    fn one_quad_per_added_plane() {
        let mut app = test_app();

        app.world_mut()
            .send_event(PlanesChanged::added([plane(1, 0.0, 1.0), plane(2, 3.0, 1.0)]));
        app.update();

        let ids: Vec<_> = visuals(&mut app).into_iter().map(|(_, id, _)| id).collect();
        assert_eq!(ids, vec![PlaneId::new(1, 1), PlaneId::new(1, 2)]);
    }

    #[test]
    fn duplicate_add_reuses_the_quad() {
        let mut app = test_app();
        app.world_mut().send_event(PlanesChanged::added([plane(1, 0.0, 1.0)]));
        app.update();
        let (first, _, _) = visuals(&mut app)[0];

        app.world_mut().send_event(PlanesChanged::added([plane(1, 4.0, 1.0)]));
        app.update();

        let after = visuals(&mut app);
        assert_eq!(after.len(), 1);
        assert_eq!(after[0].0, first);
        assert_eq!(after[0].2.translation.x, 4.0);
    }

    #[test]
    fn update_moves_and_rescales_the_quad() {
        let mut app = test_app();
        app.world_mut().send_event(PlanesChanged::added([plane(1, 0.0, 1.0)]));
        app.update();

        app.world_mut().send_event(PlanesChanged::updated([plane(1, 2.0, 3.0)]));
        app.update();

        let (_, _, transform) = visuals(&mut app)[0];
        assert_eq!(transform.translation, Vec3::new(2.0, 0.0, -2.0));
        assert_eq!(transform.scale, Vec3::new(3.0, 1.0, 6.0));
    }

    #[test]
    fn removal_despawns_the_quad() {
        let mut app = test_app();
        app.world_mut()
            .send_event(PlanesChanged::added([plane(1, 0.0, 1.0), plane(2, 1.0, 1.0)]));
        app.update();

        app.world_mut().send_event(PlanesChanged::removed([PlaneId::new(1, 1)]));
        app.update();

        let ids: Vec<_> = visuals(&mut app).into_iter().map(|(_, id, _)| id).collect();
        assert_eq!(ids, vec![PlaneId::new(1, 2)]);
    }

    #[test]
    fn session_reset_despawns_every_quad() {
        let mut app = test_app();
        app.world_mut()
            .send_event(PlanesChanged::added([plane(1, 0.0, 1.0), plane(2, 1.0, 1.0)]));
        app.update();

        app.world_mut().send_event(SessionReset);
        app.update();

        assert!(visuals(&mut app).is_empty());
    }
}
