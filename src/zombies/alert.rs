//! Alert propagation between zombies.

use bevy::prelude::*;

use super::brain::AiState;

/// A zombie that might hear an alert.
#[derive(Debug, Clone, Copy)]
pub struct AlertCandidate {
    pub entity: Entity,
    pub position: Vec2,
    pub state: AiState,
}

/// Zombies that should be alerted when `source` at `origin` takes damage.
///
/// Only direct neighbours within `range` that are idle qualify. Recipients do
/// not pass the alert on.
pub fn alert_recipients(
    source: Entity,
    origin: Vec2,
    range: f32,
    candidates: &[AlertCandidate],
) -> Vec<Entity> {
    candidates
        .iter()
        .filter(|candidate| candidate.entity != source)
        .filter(|candidate| candidate.state == AiState::Idle)
        .filter(|candidate| candidate.position.distance(origin) <= range)
        .map(|candidate| candidate.entity)
        .collect()
}
