//! Core plugin that sets up app states and shared events.

use bevy::prelude::*;

use super::events::*;
use super::states::*;

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - App states (Loading, Running, Failed)
/// - Global events (PlanesChanged, PlaceRequested, etc.)
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app
            // Initialize app states
            .init_state::<AppState>()

            // Register global events
            .add_event::<PlanesChanged>()
            .add_event::<AffordanceChanged>()
            .add_event::<PlaceRequested>()
            .add_event::<StartNewExperience>()
            .add_event::<ObjectPlaced>()
            .add_event::<SessionResetRequested>()
            .add_event::<SessionReset>()

            .add_systems(OnEnter(AppState::Failed), report_failure);
    }
}

fn report_failure() {
    error!("Placement is unavailable; check the placement config and restart");
}
