//! Tracking plugin - draws the tracked planes.
//!
//! Plane bookkeeping itself lives in the placement controller's
//! [`PlaneTracker`](super::PlaneTracker); this plugin only visualizes.

use bevy::prelude::*;

use super::visualizer::{
    clear_plane_visuals, setup_plane_visual_assets, sync_plane_visuals, PlaneVisualConfig,
};

/// Tracking plugin - plane quads that follow the plane events.
pub struct TrackingPlugin;

impl Plugin for TrackingPlugin {
    fn build(&self, app: &mut App) {
        let config = PlaneVisualConfig::load();
        let enabled = config.enabled;
        app.insert_resource(config);

        if !enabled {
            info!("Plane visuals disabled");
            return;
        }

        app.add_systems(Startup, setup_plane_visual_assets)
            .add_systems(Update, (clear_plane_visuals, sync_plane_visuals).chain());
    }
}
