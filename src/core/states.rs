//! App state definitions that control the overall flow of the app.
//!
//! States determine which systems run at any given time. Placement input is
//! only handled while `Running`; a controller that failed to activate parks
//! the app in `Failed`.

use bevy::prelude::*;

/// Main app states.
///
/// - Start in `Loading` while the placement controller is being activated
/// - Move to `Running` once every collaborator is in place
/// - `Failed` when activation was refused (missing collaborator)
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum AppState {
    /// Initial state - configs loaded, controller not yet active
    #[default]
    Loading,
    /// Active AR session, placement available
    Running,
    /// Placement could not be activated
    Failed,
}
