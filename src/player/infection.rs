//! Infection ticking, infecting and the related notifications.

use bevy::prelude::*;

use super::components::{Infection, Player, PlayerConfig};
use crate::combat::{DamageEvent, Dead};
use crate::core::{
    GameplaySet, InfectEvent, InfectionChangedEvent, PlaySoundEvent, SoundClip,
};

pub fn setup_infection_systems(app: &mut App) {
    app.add_systems(Update, tick_infection.in_set(GameplaySet::Act))
        .add_systems(Update, handle_infect_events.in_set(GameplaySet::React));
}

/// Deal infection damage once per interval while infected.
fn tick_infection(
    time: Res<Time>,
    config: Res<PlayerConfig>,
    mut player_query: Query<(Entity, &mut Infection), (With<Player>, Without<Dead>)>,
    mut damage_events: EventWriter<DamageEvent>,
) {
    for (entity, mut infection) in player_query.iter_mut() {
        for _ in 0..infection.tick(time.delta()) {
            damage_events.send(DamageEvent {
                target: entity,
                source: None,
                amount: config.infection_damage,
                knockback: None,
            });
        }
    }
}

/// Infect players bitten this tick.
fn handle_infect_events(
    mut infect_events: EventReader<InfectEvent>,
    mut player_query: Query<&mut Infection, Without<Dead>>,
    mut changed_events: EventWriter<InfectionChangedEvent>,
    mut sound_events: EventWriter<PlaySoundEvent>,
) {
    for event in infect_events.read() {
        let Ok(mut infection) = player_query.get_mut(event.target) else {
            continue;
        };

        if infection.infect() {
            info!("Player infected");
            changed_events.send(InfectionChangedEvent {
                entity: event.target,
                infected: true,
            });
        }
        sound_events.send(PlaySoundEvent::new(SoundClip::Infection, 0.8));
    }
}
