//! Status HUD - tracked plane count, placement state, and the aim reticle.

use bevy::prelude::*;

use crate::core::{AppState, ObjectPlaced};
use crate::placement::ActivePlacement;
use crate::tracking::PlaneId;

const CONTROLS_HINT: &str =
    "Space: debug plane | Enter: place | N: new experience | R: reset | Q: quit";

/// Marker for HUD root entity.
#[derive(Component)]
pub struct HudRoot;

/// Marker for the status line.
#[derive(Component)]
pub struct StatusText;

/// Setup HUD systems.
pub fn setup_hud_systems(app: &mut App) {
    app.add_systems(OnEnter(AppState::Running), spawn_hud)
        .add_systems(OnExit(AppState::Running), cleanup_hud)
        .add_systems(
            Update,
            update_status_text
                .run_if(in_state(AppState::Running))
                .run_if(resource_exists::<ActivePlacement>),
        );
}

/// Spawn the HUD UI.
fn spawn_hud(mut commands: Commands) {
    // Status and hints (top-left corner)
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Start,
                align_items: AlignItems::Start,
                padding: UiRect::all(Val::Px(20.0)),
                position_type: PositionType::Absolute,
                ..default()
            },
            HudRoot,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Looking for planes..."),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.8, 0.8)),
                StatusText,
            ));

            parent.spawn((
                Text::new(CONTROLS_HINT),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(0.5, 0.5, 0.55)),
            ));
        });

    // Reticle (center of screen, where objects get placed)
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                position_type: PositionType::Absolute,
                ..default()
            },
            HudRoot,
        ))
        .with_children(|parent| {
            parent.spawn((
                Node {
                    width: Val::Px(6.0),
                    height: Val::Px(6.0),
                    ..default()
                },
                BackgroundColor(Color::srgba(1.0, 1.0, 1.0, 0.6)),
            ));
        });
}

/// Text shown in the status line. `placed_on` is the plane holding the
/// placed object, if there is one.
fn status_line(planes: usize, placed_on: Option<PlaneId>) -> String {
    match (planes, placed_on) {
        (_, Some(plane)) => format!("Object placed on {} | {} plane(s) tracked", plane, planes),
        (0, None) => "Looking for planes...".to_string(),
        (n, None) => format!("{} plane(s) tracked | aim at a plane and place", n),
    }
}

fn update_status_text(
    placement: Res<ActivePlacement>,
    mut placed: EventReader<ObjectPlaced>,
    mut placed_on: Local<Option<PlaneId>>,
    mut text_query: Query<&mut Text, With<StatusText>>,
) {
    if let Some(event) = placed.read().last() {
        *placed_on = Some(event.plane);
    }
    if !placement.is_changed() {
        return;
    }
    if !placement.has_placement() {
        *placed_on = None;
    }
    let Ok(mut text) = text_query.get_single_mut() else {
        return;
    };

    text.0 = status_line(placement.tracker().len(), *placed_on);
}

/// Clean up HUD entities.
fn cleanup_hud(mut commands: Commands, query: Query<Entity, With<HudRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_line_reflects_state() {
        assert_eq!(status_line(0, None), "Looking for planes...");
        assert_eq!(status_line(2, None), "2 plane(s) tracked | aim at a plane and place");
        assert_eq!(
            status_line(3, Some(PlaneId::new(1, 2))),
            "Object placed on 0000000000000001-0000000000000002 | 3 plane(s) tracked"
        );
    }
}
