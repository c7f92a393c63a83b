//! One-shot camera permission request.
//!
//! The simulator must not produce planes before the camera may be used.
//! The request runs as a task on the async compute pool and is polled once
//! per frame until it resolves.

use bevy::prelude::*;
use bevy::tasks::{block_on, futures_lite::future, AsyncComputeTaskPool, Task};
use serde::Deserialize;

use super::config::SimulatorConfig;

/// How the desktop answers the permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum PermissionPolicy {
    #[default]
    Grant,
    Deny,
}

/// Answer to a permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

/// Current state of the camera permission.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraPermission {
    #[default]
    Pending,
    Granted,
    Denied,
}

/// The in-flight request. Removed once it resolves.
#[derive(Resource)]
pub(super) struct PermissionRequest(Task<PermissionStatus>);

async fn request_camera_permission(policy: PermissionPolicy) -> PermissionStatus {
    match policy {
        PermissionPolicy::Grant => PermissionStatus::Granted,
        PermissionPolicy::Deny => PermissionStatus::Denied,
    }
}

pub(super) fn start_permission_request(mut commands: Commands, config: Res<SimulatorConfig>) {
    let policy = config.camera_permission;
    let task = AsyncComputeTaskPool::get().spawn(request_camera_permission(policy));
    commands.insert_resource(PermissionRequest(task));
}

pub(super) fn poll_permission_request(
    mut commands: Commands,
    mut request: ResMut<PermissionRequest>,
    mut permission: ResMut<CameraPermission>,
) {
    let Some(status) = block_on(future::poll_once(&mut request.0)) else {
        return;
    };
    commands.remove_resource::<PermissionRequest>();

    match status {
        PermissionStatus::Granted => {
            info!("Camera permission granted, simulating planes");
            *permission = CameraPermission::Granted;
        }
        PermissionStatus::Denied => {
            error!("Camera permission denied, no planes will be simulated");
            *permission = CameraPermission::Denied;
        }
    }
}

/// Run condition: the camera may be used.
pub(super) fn camera_permission_granted(permission: Res<CameraPermission>) -> bool {
    *permission == CameraPermission::Granted
}
