//! UI plugin - placement controls and keyboard shortcuts.

use bevy::ecs::system::EntityCommands;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use super::hud;
use crate::core::{
    AffordanceChanged, AppState, PlaceRequested, SessionResetRequested, StartNewExperience,
};

/// UI plugin - handles all user interface.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        // Setup HUD systems
        hud::setup_hud_systems(app);

        app
            // Placement controls
            .add_systems(OnEnter(AppState::Running), setup_controls)
            .add_systems(
                Update,
                (control_button_input, keyboard_shortcuts, apply_affordance)
                    .run_if(in_state(AppState::Running)),
            )
            .add_systems(OnExit(AppState::Running), cleanup_controls)

            // Activation failure
            .add_systems(OnEnter(AppState::Failed), setup_failure_notice)
            .add_systems(
                Update,
                control_button_input.run_if(in_state(AppState::Failed)),
            );
    }
}

/// Marker for placement control UI entities.
#[derive(Component)]
struct ControlsUi;

/// Marker for the place button; its visibility is the place affordance.
#[derive(Component)]
struct PlaceButton;

/// Control buttons.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlButton {
    Place,
    NewExperience,
    ResetSession,
    Quit,
}

const BUTTON_IDLE: Color = Color::srgb(0.15, 0.15, 0.2);
const BUTTON_HOVERED: Color = Color::srgb(0.25, 0.25, 0.3);
const BUTTON_PRESSED: Color = Color::srgb(0.3, 0.3, 0.35);

/// Centre of the window in logical pixels, where placement aims.
pub fn screen_center(window: &Window) -> Vec2 {
    Vec2::new(window.width() / 2.0, window.height() / 2.0)
}

/// Set up the control bar.
fn setup_controls(mut commands: Commands) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Row,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::End,
                padding: UiRect::bottom(Val::Px(30.0)),
                position_type: PositionType::Absolute,
                ..default()
            },
            ControlsUi,
        ))
        .with_children(|parent| {
            // Hidden until a plane is detected
            spawn_control_button(parent, "Place", ControlButton::Place)
                .insert(PlaceButton)
                .insert(Visibility::Hidden);

            spawn_control_button(parent, "New Experience", ControlButton::NewExperience);

            spawn_control_button(parent, "Reset", ControlButton::ResetSession);

            spawn_control_button(parent, "Quit", ControlButton::Quit);
        });
}

/// Helper to spawn a control button.
fn spawn_control_button<'a>(
    parent: &'a mut ChildBuilder,
    text: &str,
    button: ControlButton,
) -> EntityCommands<'a> {
    let mut entity = parent.spawn((
        Button,
        Node {
            width: Val::Px(200.0),
            height: Val::Px(50.0),
            margin: UiRect::all(Val::Px(10.0)),
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            ..default()
        },
        BackgroundColor(BUTTON_IDLE),
        button,
    ));
    entity.with_children(|button| {
        button.spawn((
            Text::new(text),
            TextFont {
                font_size: 24.0,
                ..default()
            },
            TextColor(Color::srgb(0.8, 0.8, 0.85)),
        ));
    });
    entity
}

/// Handle control button interactions.
fn control_button_input(
    mut interaction_query: Query<
        (&Interaction, &ControlButton, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>),
    >,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut place: EventWriter<PlaceRequested>,
    mut new_experience: EventWriter<StartNewExperience>,
    mut reset: EventWriter<SessionResetRequested>,
    mut exit: EventWriter<AppExit>,
) {
    for (interaction, button, mut bg_color) in interaction_query.iter_mut() {
        match interaction {
            Interaction::Pressed => {
                *bg_color = BUTTON_PRESSED.into();
                match button {
                    ControlButton::Place => {
                        if let Ok(window) = windows.get_single() {
                            place.send(PlaceRequested {
                                screen_point: screen_center(window),
                            });
                        }
                    }
                    ControlButton::NewExperience => {
                        new_experience.send(StartNewExperience);
                    }
                    ControlButton::ResetSession => {
                        reset.send(SessionResetRequested);
                    }
                    ControlButton::Quit => {
                        exit.send(AppExit::Success);
                    }
                }
            }
            Interaction::Hovered => {
                *bg_color = BUTTON_HOVERED.into();
            }
            Interaction::None => {
                *bg_color = BUTTON_IDLE.into();
            }
        }
    }
}

/// Enter places, N starts over, R resets tracking, Q quits.
fn keyboard_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut place: EventWriter<PlaceRequested>,
    mut new_experience: EventWriter<StartNewExperience>,
    mut reset: EventWriter<SessionResetRequested>,
    mut exit: EventWriter<AppExit>,
) {
    if keyboard.just_pressed(KeyCode::Enter) {
        if let Ok(window) = windows.get_single() {
            place.send(PlaceRequested {
                screen_point: screen_center(window),
            });
        }
    }
    if keyboard.just_pressed(KeyCode::KeyN) {
        new_experience.send(StartNewExperience);
    }
    if keyboard.just_pressed(KeyCode::KeyR) {
        reset.send(SessionResetRequested);
    }
    if keyboard.just_pressed(KeyCode::KeyQ) {
        exit.send(AppExit::Success);
    }
}

/// Show or hide the place button.
fn apply_affordance(
    mut changes: EventReader<AffordanceChanged>,
    mut buttons: Query<&mut Visibility, With<PlaceButton>>,
) {
    let Some(change) = changes.read().last() else {
        return;
    };
    for mut visibility in buttons.iter_mut() {
        *visibility = if change.visible {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
}

/// Clean up control entities.
fn cleanup_controls(mut commands: Commands, query: Query<Entity, With<ControlsUi>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}

/// Tell the user placement is unavailable.
fn setup_failure_notice(mut commands: Commands) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(Color::srgba(0.1, 0.0, 0.0, 0.9)),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Placement unavailable"),
                TextFont {
                    font_size: 48.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.2, 0.2)),
                Node {
                    margin: UiRect::bottom(Val::Px(40.0)),
                    ..default()
                },
            ));

            spawn_control_button(parent, "Quit", ControlButton::Quit);
        });
}
