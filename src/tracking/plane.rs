//! Plane value types.

use bevy::prelude::*;
use std::fmt;

/// Identifier of a tracked plane, assigned by the tracking backend.
///
/// Stable for the plane's lifetime. Split in two halves like an AR trackable
/// id: the first names the source, the second the plane within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlaneId {
    pub source: u64,
    pub serial: u64,
}

impl PlaneId {
    pub const fn new(source: u64, serial: u64) -> Self {
        Self { source, serial }
    }
}

impl fmt::Display for PlaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016X}-{:016X}", self.source, self.serial)
    }
}

/// A position plus orientation in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Pose {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }

    /// The pose's local +Y axis in world space.
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    pub fn to_transform(&self) -> Transform {
        Transform::from_translation(self.position).with_rotation(self.rotation)
    }
}

/// Bounds of a plane: a rectangle centred on the pose, lying in the local
/// XZ plane. `size.x` runs along local X, `size.y` along local Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneExtent {
    pub size: Vec2,
}

impl PlaneExtent {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
        }
    }

    /// Whether a point in plane-local XZ coordinates lies inside the polygon.
    pub fn contains(&self, local: Vec2) -> bool {
        let half = self.size * 0.5;
        local.x.abs() <= half.x && local.y.abs() <= half.y
    }
}

/// One tracked flat surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub id: PlaneId,
    pub pose: Pose,
    pub extent: PlaneExtent,
}

impl Plane {
    pub fn new(id: PlaneId, pose: Pose, extent: PlaneExtent) -> Self {
        Self { id, pose, extent }
    }

    /// Surface normal in world space.
    pub fn normal(&self) -> Vec3 {
        self.pose.up()
    }

    /// Distance along the ray to the point where it crosses this plane's
    /// polygon, if it does. `direction` must be normalized.
    pub fn intersect_ray(&self, origin: Vec3, direction: Vec3) -> Option<f32> {
        let distance = self.intersect_ray_unbounded(origin, direction)?;
        let hit = origin + direction * distance;
        let local = self.pose.rotation.inverse() * (hit - self.pose.position);
        self.extent
            .contains(Vec2::new(local.x, local.z))
            .then_some(distance)
    }

    /// Like [`Plane::intersect_ray`], but treats the plane as infinite.
    pub fn intersect_ray_unbounded(&self, origin: Vec3, direction: Vec3) -> Option<f32> {
        let normal = self.normal();
        let denom = normal.dot(direction);
        if denom.abs() < 1e-6 {
            return None;
        }

        let distance = normal.dot(self.pose.position - origin) / denom;
        (distance >= 0.0).then_some(distance)
    }
}
