//! In-game HUD - health, clock, kills, wave and banners.

use bevy::prelude::*;

use crate::core::{
    GameState, HealthChangedEvent, InfectionChangedEvent, ScoreChangedEvent, TimeLeftChangedEvent,
    WaveNotificationEvent,
};
use crate::game::{format_clock, MatchConfig, MatchState};
use crate::player::{Player, PlayerConfig};

const BANNER_SECONDS: f32 = 3.0;

/// Marker for HUD root entity.
#[derive(Component)]
pub struct HudRoot;

/// Marker for health bar fill.
#[derive(Component)]
pub struct HealthBar;

#[derive(Component)]
struct HealthLabel;

#[derive(Component)]
struct ClockLabel;

#[derive(Component)]
struct KillsLabel;

#[derive(Component)]
struct WaveLabel;

#[derive(Component)]
struct InfectedLabel;

/// Center-screen wave message, hidden when the timer runs out.
#[derive(Component)]
struct WaveBanner {
    timer: Timer,
}

/// Setup HUD systems.
pub fn setup_hud_systems(app: &mut App) {
    app.add_systems(OnExit(GameState::Loading), spawn_hud).add_systems(
        Update,
        (
            update_health,
            update_clock,
            update_kills,
            update_infection,
            show_wave_banner,
            hide_wave_banner,
        ),
    );
}

fn label(text: impl Into<String>, size: f32, color: Color) -> (Text, TextFont, TextColor) {
    (
        Text::new(text),
        TextFont {
            font_size: size,
            ..default()
        },
        TextColor(color),
    )
}

/// Spawn the HUD UI, showing a fresh match for the loaded configs.
fn spawn_hud(mut commands: Commands, player: Res<PlayerConfig>, match_config: Res<MatchConfig>) {
    let clock = format_clock(MatchState::new(&match_config).time_left());
    let health = player.max_health.max(1);

    // Top bar: clock, kills, wave
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                justify_content: JustifyContent::SpaceBetween,
                padding: UiRect::all(Val::Px(16.0)),
                position_type: PositionType::Absolute,
                ..default()
            },
            HudRoot,
        ))
        .with_children(|parent| {
            parent.spawn((label("Kills: 0", 20.0, Color::WHITE), KillsLabel));
            parent.spawn((label(clock, 28.0, Color::WHITE), ClockLabel));
            parent.spawn((label("Wave 1", 20.0, Color::WHITE), WaveLabel));
        });

    // Bottom-left: health and infection
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::End,
                align_items: AlignItems::Start,
                padding: UiRect::all(Val::Px(20.0)),
                position_type: PositionType::Absolute,
                ..default()
            },
            HudRoot,
        ))
        .with_children(|parent| {
            parent.spawn((
                label("INFECTED", 16.0, Color::srgb(0.9, 0.2, 0.2)),
                Visibility::Hidden,
                InfectedLabel,
            ));
            parent
                .spawn(Node {
                    flex_direction: FlexDirection::Row,
                    align_items: AlignItems::Center,
                    ..default()
                })
                .with_children(|row| {
                    row.spawn((
                        label(health.to_string(), 14.0, Color::srgb(0.8, 0.8, 0.8)),
                        Node {
                            width: Val::Px(40.0),
                            ..default()
                        },
                        HealthLabel,
                    ));
                    row.spawn((
                        Node {
                            width: Val::Px(150.0),
                            height: Val::Px(12.0),
                            ..default()
                        },
                        BackgroundColor(Color::srgb(0.1, 0.1, 0.1)),
                    ))
                    .with_children(|bg| {
                        bg.spawn((
                            Node {
                                width: Val::Percent(100.0),
                                height: Val::Percent(100.0),
                                ..default()
                            },
                            BackgroundColor(Color::srgb(0.8, 0.2, 0.2)),
                            HealthBar,
                        ));
                    });
                });
        });

    // Wave banner
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(40.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::End,
                position_type: PositionType::Absolute,
                ..default()
            },
            HudRoot,
        ))
        .with_children(|parent| {
            parent.spawn((
                label("", 36.0, Color::srgb(1.0, 0.85, 0.3)),
                Visibility::Hidden,
                WaveBanner {
                    timer: Timer::from_seconds(BANNER_SECONDS, TimerMode::Once),
                },
            ));
        });
}

fn update_health(
    mut health_events: EventReader<HealthChangedEvent>,
    players: Query<(), With<Player>>,
    mut bar_query: Query<&mut Node, With<HealthBar>>,
    mut label_query: Query<&mut Text, With<HealthLabel>>,
) {
    let Some(event) = health_events
        .read()
        .filter(|event| players.contains(event.entity))
        .last()
    else {
        return;
    };

    let percentage = if event.maximum > 0 {
        event.current as f32 / event.maximum as f32
    } else {
        0.0
    };
    if let Ok(mut bar) = bar_query.get_single_mut() {
        bar.width = Val::Percent(percentage * 100.0);
    }
    if let Ok(mut text) = label_query.get_single_mut() {
        text.0 = event.current.to_string();
    }
}

fn update_clock(
    mut time_events: EventReader<TimeLeftChangedEvent>,
    mut label_query: Query<&mut Text, With<ClockLabel>>,
) {
    let Some(event) = time_events.read().last() else {
        return;
    };
    if let Ok(mut text) = label_query.get_single_mut() {
        text.0 = format_clock(event.time_left);
    }
}

fn update_kills(
    mut score_events: EventReader<ScoreChangedEvent>,
    mut label_query: Query<&mut Text, With<KillsLabel>>,
) {
    let Some(event) = score_events.read().last() else {
        return;
    };
    if let Ok(mut text) = label_query.get_single_mut() {
        text.0 = format!("Kills: {}", event.kills);
    }
}

fn update_infection(
    mut infection_events: EventReader<InfectionChangedEvent>,
    players: Query<(), With<Player>>,
    mut label_query: Query<&mut Visibility, With<InfectedLabel>>,
) {
    let Some(event) = infection_events
        .read()
        .filter(|event| players.contains(event.entity))
        .last()
    else {
        return;
    };
    if let Ok(mut visibility) = label_query.get_single_mut() {
        *visibility = if event.infected {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
}

fn show_wave_banner(
    mut wave_events: EventReader<WaveNotificationEvent>,
    mut banner_query: Query<(&mut Text, &mut Visibility, &mut WaveBanner)>,
    mut wave_query: Query<&mut Text, (With<WaveLabel>, Without<WaveBanner>)>,
) {
    let Some(event) = wave_events.read().last() else {
        return;
    };
    if let Ok((mut text, mut visibility, mut banner)) = banner_query.get_single_mut() {
        text.0 = event.message.clone();
        *visibility = Visibility::Inherited;
        banner.timer.reset();
    }
    if let Ok(mut text) = wave_query.get_single_mut() {
        text.0 = format!("Wave {}", event.wave);
    }
}

fn hide_wave_banner(time: Res<Time>, mut banner_query: Query<(&mut Visibility, &mut WaveBanner)>) {
    for (mut visibility, mut banner) in &mut banner_query {
        if *visibility == Visibility::Hidden {
            continue;
        }
        if banner.timer.tick(time.delta()).just_finished() {
            *visibility = Visibility::Hidden;
        }
    }
}
