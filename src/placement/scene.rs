//! Bevy-side collaborators of the placement controller.
//!
//! The controller runs inside a resource, so it cannot hold `Commands` or
//! the session. Its spawner and detection switch queue requests instead,
//! and the placement systems apply them right after the controller ran.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use std::collections::HashMap;

use super::collaborators::{ObjectSpawner, PlaneDetection};
use super::config::{PrefabDef, PrefabShape};
use crate::tracking::Pose;

/// Handle of a placed object. Ids are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlacedObjectId(pub u64);

/// Marker for a placed object entity.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedObject(pub PlacedObjectId);

/// Everything needed to spawn the placed object.
#[derive(Clone)]
pub struct PlacementPrefab {
    pub name: String,
    pub mesh: Handle<Mesh>,
    pub material: Handle<StandardMaterial>,
    pub collider: Collider,
}

impl PlacementPrefab {
    pub fn from_def(
        def: &PrefabDef,
        meshes: &mut Assets<Mesh>,
        materials: &mut Assets<StandardMaterial>,
    ) -> Self {
        let (mesh, collider) = match def.shape {
            PrefabShape::Cuboid { size: (x, y, z) } => (
                meshes.add(Cuboid::new(x, y, z)),
                Collider::cuboid(x / 2.0, y / 2.0, z / 2.0),
            ),
            PrefabShape::Sphere { radius } => {
                (meshes.add(Sphere::new(radius)), Collider::ball(radius))
            }
        };

        let (r, g, b) = def.color;
        Self {
            name: def.name.clone(),
            mesh,
            material: materials.add(StandardMaterial {
                base_color: Color::srgb(r, g, b),
                perceptual_roughness: 0.6,
                ..default()
            }),
            collider,
        }
    }
}

/// A queued scene change.
pub enum SceneCommand {
    Spawn {
        id: PlacedObjectId,
        prefab: PlacementPrefab,
        pose: Pose,
    },
    Despawn(PlacedObjectId),
}

/// Spawner that queues scene changes for [`apply_queued_scene_commands`].
#[derive(Default)]
pub struct EntitySpawner {
    next_id: u64,
    pending: Vec<SceneCommand>,
}

impl EntitySpawner {
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn drain(&mut self) -> impl Iterator<Item = SceneCommand> + '_ {
        self.pending.drain(..)
    }
}

impl ObjectSpawner for EntitySpawner {
    type Prefab = PlacementPrefab;
    type Handle = PlacedObjectId;

    fn instantiate(&mut self, prefab: &PlacementPrefab, pose: Pose) -> PlacedObjectId {
        let id = PlacedObjectId(self.next_id);
        self.next_id += 1;
        self.pending.push(SceneCommand::Spawn {
            id,
            prefab: prefab.clone(),
            pose,
        });
        id
    }

    fn destroy(&mut self, handle: PlacedObjectId) {
        self.pending.push(SceneCommand::Despawn(handle));
    }
}

/// Detection switch that remembers the last request for the session.
#[derive(Default)]
pub struct DetectionSwitch {
    requested: Option<bool>,
}

impl DetectionSwitch {
    pub fn has_request(&self) -> bool {
        self.requested.is_some()
    }

    pub fn take_request(&mut self) -> Option<bool> {
        self.requested.take()
    }
}

impl PlaneDetection for DetectionSwitch {
    fn set_plane_detection_enabled(&mut self, enabled: bool) {
        self.requested = Some(enabled);
    }
}

/// Turn queued spawner requests into entities.
pub fn apply_queued_scene_commands(
    commands: &mut Commands,
    spawner: &mut EntitySpawner,
    placed: impl Iterator<Item = (Entity, PlacedObjectId)>,
) {
    let mut live: HashMap<PlacedObjectId, Entity> =
        placed.map(|(entity, id)| (id, entity)).collect();

    for command in spawner.drain() {
        match command {
            SceneCommand::Spawn { id, prefab, pose } => {
                // Kinematic so the object stays where it was placed
                let entity = commands
                    .spawn((
                        PlacedObject(id),
                        Name::new(prefab.name),
                        Mesh3d(prefab.mesh),
                        MeshMaterial3d(prefab.material),
                        pose.to_transform(),
                        RigidBody::KinematicPositionBased,
                        prefab.collider,
                    ))
                    .id();
                live.insert(id, entity);
            }
            SceneCommand::Despawn(id) => match live.remove(&id) {
                Some(entity) => commands.entity(entity).despawn_recursive(),
                None => warn!("Placed object {:?} already gone", id),
            },
        }
    }
}
