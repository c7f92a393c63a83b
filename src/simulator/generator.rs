//! Debug plane generation.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::Rng;
use std::collections::VecDeque;

use super::config::SimulatorConfig;
use crate::core::PlanesChanged;
use crate::tracking::{Plane, PlaneExtent, PlaneId, Pose};

/// Source half of every simulated [`PlaneId`].
pub const SIMULATOR_SOURCE: u64 = 1;

/// Fabricates upward-facing planes in front of the camera.
///
/// The simulator owns plane creation, so ids are handed out here directly
/// in sequence.
#[derive(Resource)]
pub struct DebugPlaneGenerator {
    interval: f32,
    distance: f32,
    size: Vec2,
    jitter: Vec3,
    max_planes: Option<usize>,
    since_last: f32,
    next_serial: u64,
    live: VecDeque<PlaneId>,
    rng: StdRng,
}

impl DebugPlaneGenerator {
    pub fn new(config: &SimulatorConfig, rng: StdRng) -> Self {
        Self {
            interval: config.generation_interval,
            distance: config.plane_distance,
            size: Vec2::new(config.plane_size.0, config.plane_size.1),
            jitter: Vec3::new(config.jitter.0, config.jitter.1, config.jitter.2),
            max_planes: config.max_planes,
            since_last: 0.0,
            next_serial: 0,
            live: VecDeque::new(),
            rng,
        }
    }

    /// Advance the generation timer. Returns true when a plane is due.
    pub fn tick(&mut self, delta_secs: f32) -> bool {
        self.since_last += delta_secs;
        if self.since_last >= self.interval {
            self.since_last = 0.0;
            return true;
        }
        false
    }

    /// Generate one plane in front of the camera, evicting the oldest one
    /// if the plane limit is reached.
    pub fn generate(&mut self, camera_position: Vec3, camera_forward: Vec3) -> PlanesChanged {
        let offset = Vec3::new(
            self.random_offset(self.jitter.x),
            self.random_offset(self.jitter.y),
            self.random_offset(self.jitter.z),
        );
        let position = camera_position + camera_forward * self.distance + offset;

        let id = PlaneId::new(SIMULATOR_SOURCE, self.next_serial);
        self.next_serial += 1;
        let plane = Plane::new(
            id,
            Pose::from_position(position),
            PlaneExtent::new(self.size.x, self.size.y),
        );

        let mut changes = PlanesChanged::added([plane]);
        self.live.push_back(id);
        if let Some(max) = self.max_planes {
            while self.live.len() > max {
                if let Some(oldest) = self.live.pop_front() {
                    changes.removed.push(oldest);
                }
            }
        }

        changes
    }

    fn random_offset(&mut self, max: f32) -> f32 {
        // gen_range panics on an empty or non-finite range
        if !max.is_finite() || max <= 0.0 {
            return 0.0;
        }
        self.rng.gen_range(-max..max)
    }

    pub fn live_planes(&self) -> usize {
        self.live.len()
    }

    /// Forget every generated plane (session reset). Ids keep counting up.
    pub fn clear(&mut self) {
        self.live.clear();
        self.since_last = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn generator(config: SimulatorConfig) -> DebugPlaneGenerator {
        DebugPlaneGenerator::new(&config, StdRng::seed_from_u64(42))
    }

    #[test]
    fn timer_fires_once_per_interval() {
        let mut generator = generator(SimulatorConfig::default());

        assert!(!generator.tick(0.4));
        assert!(!generator.tick(0.4));
        assert!(generator.tick(0.4));
        // Timer restarts from zero, leftover time is dropped
        assert!(!generator.tick(0.9));
    }

    #[test]
    fn planes_appear_in_front_of_camera_within_jitter() {
        let mut generator = generator(SimulatorConfig::default());
        let camera = Vec3::new(0.0, 1.5, 0.0);

        for _ in 0..20 {
            let changes = generator.generate(camera, Vec3::NEG_Z);
            let plane = changes.added[0];
            let offset = plane.pose.position - Vec3::new(0.0, 1.5, -2.0);
            assert!(offset.x.abs() <= 0.5 && offset.y.abs() <= 0.2 && offset.z.abs() <= 0.5);
            assert_eq!(plane.normal(), Vec3::Y);
            assert_eq!(plane.extent, PlaneExtent::new(1.0, 1.0));
        }
    }

    #[test]
    fn ids_are_sequential() {
        let mut generator = generator(SimulatorConfig::default());
        let first = generator.generate(Vec3::ZERO, Vec3::NEG_Z).added[0].id;
        let second = generator.generate(Vec3::ZERO, Vec3::NEG_Z).added[0].id;

        assert_eq!(first, PlaneId::new(SIMULATOR_SOURCE, 0));
        assert_eq!(second, PlaneId::new(SIMULATOR_SOURCE, 1));
    }

    #[test]
    fn oldest_plane_is_evicted_at_the_limit() {
        let mut generator = generator(SimulatorConfig {
            max_planes: Some(2),
            ..default()
        });

        generator.generate(Vec3::ZERO, Vec3::NEG_Z);
        generator.generate(Vec3::ZERO, Vec3::NEG_Z);
        let third = generator.generate(Vec3::ZERO, Vec3::NEG_Z);

        assert_eq!(third.removed, vec![PlaneId::new(SIMULATOR_SOURCE, 0)]);
        assert_eq!(generator.live_planes(), 2);
    }

    #[test]
    fn zero_jitter_is_exact() {
        let mut generator = generator(SimulatorConfig {
            jitter: (0.0, 0.0, 0.0),
            plane_distance: 3.0,
            ..default()
        });

        let plane = generator.generate(Vec3::new(1.0, 1.0, 1.0), Vec3::X).added[0];

        assert_eq!(plane.pose.position, Vec3::new(4.0, 1.0, 1.0));
    }

    #[test]
    fn non_finite_jitter_is_ignored() {
        let mut generator = generator(SimulatorConfig {
            jitter: (f32::NAN, f32::INFINITY, 0.0),
            ..default()
        });

        let plane = generator.generate(Vec3::ZERO, Vec3::NEG_Z).added[0];

        assert_eq!(plane.pose.position, Vec3::new(0.0, 0.0, -2.0));
    }
}
