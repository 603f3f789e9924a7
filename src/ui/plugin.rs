//! UI plugin - HUD plus pause and game-over overlays.

use bevy::app::AppExit;
use bevy::prelude::*;

use super::hud;
use crate::core::GameState;
use crate::game::{MatchOutcome, MatchState};

/// UI plugin - handles all user interface.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        // Setup HUD systems
        hud::setup_hud_systems(app);

        app
            // Pause overlay
            .add_systems(OnEnter(GameState::Paused), setup_pause_menu)
            .add_systems(OnExit(GameState::Paused), cleanup_pause_menu)

            // Game over
            .add_systems(OnEnter(GameState::GameOver), setup_game_over)

            .add_systems(
                Update,
                menu_button_input.run_if(in_state(GameState::Paused).or(in_state(GameState::GameOver))),
            );
    }
}

/// Marker for pause menu UI entities.
#[derive(Component)]
struct PauseMenuUi;

/// Marker for game over UI entities.
#[derive(Component)]
struct GameOverUi;

/// Marker for menu buttons.
#[derive(Component)]
enum MenuButton {
    Resume,
    Quit,
}

const BUTTON_COLOR: Color = Color::srgb(0.15, 0.15, 0.18);
const BUTTON_HOVER_COLOR: Color = Color::srgb(0.25, 0.25, 0.3);
const BUTTON_PRESSED_COLOR: Color = Color::srgb(0.3, 0.3, 0.35);

fn overlay_node() -> Node {
    Node {
        width: Val::Percent(100.0),
        height: Val::Percent(100.0),
        flex_direction: FlexDirection::Column,
        justify_content: JustifyContent::Center,
        align_items: AlignItems::Center,
        position_type: PositionType::Absolute,
        ..default()
    }
}

fn spawn_title(parent: &mut ChildBuilder, title: &str, color: Color) {
    parent.spawn((
        Text::new(title),
        TextFont {
            font_size: 48.0,
            ..default()
        },
        TextColor(color),
        Node {
            margin: UiRect::bottom(Val::Px(40.0)),
            ..default()
        },
    ));
}

fn spawn_menu_button(parent: &mut ChildBuilder, label: &str, button: MenuButton) {
    parent
        .spawn((
            Button,
            Node {
                width: Val::Px(200.0),
                height: Val::Px(50.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                margin: UiRect::all(Val::Px(8.0)),
                ..default()
            },
            BackgroundColor(BUTTON_COLOR),
            button,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(label),
                TextFont {
                    font_size: 22.0,
                    ..default()
                },
                TextColor(Color::srgb(0.85, 0.85, 0.85)),
            ));
        });
}

fn setup_pause_menu(mut commands: Commands) {
    // Semi-transparent overlay
    commands
        .spawn((
            overlay_node(),
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
            PauseMenuUi,
        ))
        .with_children(|parent| {
            spawn_title(parent, "PAUSED", Color::srgb(0.8, 0.8, 0.85));
            spawn_menu_button(parent, "Resume", MenuButton::Resume);
            spawn_menu_button(parent, "Quit", MenuButton::Quit);
        });
}

fn cleanup_pause_menu(mut commands: Commands, query: Query<Entity, With<PauseMenuUi>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}

fn setup_game_over(mut commands: Commands, state: Res<MatchState>) {
    let (title, color) = match state.outcome() {
        Some(MatchOutcome::Won) => ("YOU WIN!", Color::srgb(0.3, 0.9, 0.4)),
        _ => ("GAME OVER", Color::srgb(0.9, 0.2, 0.2)),
    };

    commands
        .spawn((
            overlay_node(),
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.75)),
            GameOverUi,
        ))
        .with_children(|parent| {
            spawn_title(parent, title, color);
            parent.spawn((
                Text::new(format!("Zombies killed: {}", state.kills())),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.8, 0.8)),
                Node {
                    margin: UiRect::bottom(Val::Px(30.0)),
                    ..default()
                },
            ));
            spawn_menu_button(parent, "Quit", MenuButton::Quit);
        });
}

/// Handle overlay button interactions.
fn menu_button_input(
    mut interaction_query: Query<
        (&Interaction, &MenuButton, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>),
    >,
    mut next_state: ResMut<NextState<GameState>>,
    mut exit: EventWriter<AppExit>,
) {
    for (interaction, button, mut bg_color) in interaction_query.iter_mut() {
        match interaction {
            Interaction::Pressed => {
                *bg_color = BUTTON_PRESSED_COLOR.into();
                match button {
                    MenuButton::Resume => next_state.set(GameState::Playing),
                    MenuButton::Quit => {
                        exit.send(AppExit::Success);
                    }
                }
            }
            Interaction::Hovered => *bg_color = BUTTON_HOVER_COLOR.into(),
            Interaction::None => *bg_color = BUTTON_COLOR.into(),
        }
    }
}
