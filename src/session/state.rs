//! Process-wide AR session state.

use bevy::prelude::*;

/// The one AR session of the app.
///
/// Installed once by [`SessionPlugin`](super::SessionPlugin) and passed to
/// systems as a resource; there is no global instance.
#[derive(Resource, Debug)]
pub struct ArSession {
    plane_detection_enabled: bool,
    reset_count: u32,
}

impl Default for ArSession {
    fn default() -> Self {
        Self {
            plane_detection_enabled: true,
            reset_count: 0,
        }
    }
}

impl ArSession {
    pub fn plane_detection_enabled(&self) -> bool {
        self.plane_detection_enabled
    }

    pub fn set_plane_detection_enabled(&mut self, enabled: bool) {
        if self.plane_detection_enabled != enabled {
            info!("Plane detection {}", if enabled { "enabled" } else { "disabled" });
        }
        self.plane_detection_enabled = enabled;
    }

    /// Number of resets since startup.
    pub fn reset_count(&self) -> u32 {
        self.reset_count
    }

    /// Drop all tracking state. Listeners learn about it via `SessionReset`.
    pub fn reset(&mut self) {
        self.reset_count += 1;
        info!("AR session reset (#{})", self.reset_count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detection_starts_enabled() {
        let session = ArSession::default();
        assert!(session.plane_detection_enabled());
        assert_eq!(session.reset_count(), 0);
    }

    #[test]
    fn reset_counts_up() {
        let mut session = ArSession::default();
        session.reset();
        session.reset();
        assert_eq!(session.reset_count(), 2);
    }
}
