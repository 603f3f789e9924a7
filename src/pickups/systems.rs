//! Pickup systems - collect the nearest item in range on request.

use bevy::prelude::*;

use super::items::{nearest_item, DroppableItem};
use super::resolution::{resolve_pickup, PickupEffect};
use crate::combat::{Dead, Loadout};
use crate::core::{
    ActorCue, ActorCueEvent, DamageEvent, GameplaySet, InfectionChangedEvent, InputSnapshot,
    PlaySoundEvent, SoundClip, WeaponSwitchedEvent,
};
use crate::player::{Infection, Player, PlayerConfig};

pub fn setup_pickup_systems(app: &mut App) {
    app.add_systems(Update, handle_pickup.in_set(GameplaySet::Act));
}

#[allow(clippy::too_many_arguments)]
fn handle_pickup(
    mut commands: Commands,
    input: Res<InputSnapshot>,
    config: Res<PlayerConfig>,
    mut player_query: Query<(Entity, &Transform, &mut Loadout, &mut Infection), (With<Player>, Without<Dead>)>,
    items: Query<(Entity, &Transform, &DroppableItem)>,
    mut damage_events: EventWriter<DamageEvent>,
    mut infection_events: EventWriter<InfectionChangedEvent>,
    mut switched_events: EventWriter<WeaponSwitchedEvent>,
    mut cue_events: EventWriter<ActorCueEvent>,
    mut sound_events: EventWriter<PlaySoundEvent>,
) {
    if !input.pickup {
        return;
    }
    let Ok((player, transform, mut loadout, mut infection)) = player_query.get_single_mut() else {
        return;
    };

    let position = transform.translation.truncate();
    let candidates = items
        .iter()
        .map(|(entity, transform, item)| (entity, transform.translation.truncate(), item.pickup_range));
    let Some(nearest) = nearest_item(position, candidates) else {
        return;
    };
    let Ok((_, _, item)) = items.get(nearest) else {
        return;
    };

    match resolve_pickup(item.item_type, &mut loadout, &mut infection, config.vaccine_heal) {
        Ok(PickupEffect::Vaccine { cured, heal }) => {
            info!("Picked up vaccine");
            sound_events.send(PlaySoundEvent::new(SoundClip::VaccinePickup, 0.7));
            if cured {
                infection_events.send(InfectionChangedEvent {
                    entity: player,
                    infected: false,
                });
            }
            damage_events.send(DamageEvent {
                target: player,
                source: None,
                amount: -heal,
                knockback: None,
            });
        }
        Ok(PickupEffect::Weapon(switch)) => {
            info!("Picked up {:?}", item.item_type);
            sound_events.send(PlaySoundEvent::new(SoundClip::WeaponPickup, 0.6));
            if switch.swing_cancelled || switch.flame_stopped {
                cue_events.send(ActorCueEvent {
                    entity: player,
                    cue: ActorCue::AttackStopped,
                });
            }
            switched_events.send(WeaponSwitchedEvent {
                previous: Some(switch.previous),
                current: switch.current,
            });
        }
        Err(err) => {
            error!("{}", err);
            return;
        }
    }

    commands.entity(nearest).despawn_recursive();
}
