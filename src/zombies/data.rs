//! Zombie archetype loading from RON files.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::components::ZombieStats;
use crate::core::{load_ron, DataLoadError};
use crate::player::PlayerConfig;
use crate::world::contact_distance;

/// Directory holding one RON file per archetype.
pub const ZOMBIES_DIR: &str = "assets/data/zombies";

fn default_true() -> bool {
    true
}

fn default_tint() -> (f32, f32, f32) {
    (0.4, 0.7, 0.3)
}

fn default_radius() -> f32 {
    0.35
}

/// Zombie archetype loaded from a RON file.
#[derive(Deserialize, Clone, Debug)]
pub struct ZombieDefinition {
    pub name: String,
    pub max_health: i32,
    pub damage: i32,
    pub move_speed: f32,
    pub detection_radius: f32,
    pub alerted_radius: f32,
    pub alert_range: f32,
    pub alert_duration: f32,
    pub attack_range: f32,
    pub attack_delay: f32,
    pub wind_up_time: f32,
    pub total_attack_time: f32,
    #[serde(default = "default_true")]
    pub stop_while_attacking: bool,
    #[serde(default = "default_true")]
    pub infects: bool,
    #[serde(default)]
    pub knockback_force: f32,
    #[serde(default = "default_tint")]
    pub tint: (f32, f32, f32),
    #[serde(default = "default_radius")]
    pub radius: f32,
}

impl ZombieDefinition {
    /// Convert to ZombieStats component.
    pub fn to_stats(&self) -> ZombieStats {
        ZombieStats {
            damage: self.damage,
            move_speed: self.move_speed,
            detection_radius: self.detection_radius,
            alerted_radius: self.alerted_radius,
            alert_range: self.alert_range,
            alert_duration: self.alert_duration,
            attack_range: self.attack_range,
            attack_delay: self.attack_delay,
            wind_up_time: self.wind_up_time,
            total_attack_time: self.total_attack_time,
            stop_while_attacking: self.stop_while_attacking,
            infects: self.infects,
            knockback_force: self.knockback_force,
            radius: self.radius,
        }
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self, path: &str) -> Result<(), DataLoadError> {
        let problem = if self.max_health <= 0 {
            Some("max_health must be positive")
        } else if self.radius <= 0.0 {
            Some("radius must be positive")
        } else if self.wind_up_time < 0.0 || self.total_attack_time < self.wind_up_time {
            Some("total_attack_time must cover wind_up_time")
        } else if self.detection_radius < 0.0 || self.alerted_radius < 0.0 {
            Some("detection radii must not be negative")
        } else {
            None
        };

        match problem {
            Some(details) => Err(DataLoadError::InvalidData {
                path: path.to_string(),
                details: details.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Whether `attack_range` reaches a player of `player_radius` once the colliders touch.
    pub fn reaches_player(&self, player_radius: f32) -> bool {
        self.attack_range >= contact_distance(self.radius, player_radius)
    }

    /// The archetype used when no data files are available.
    pub fn walker() -> Self {
        let stats = ZombieStats::default();
        Self {
            name: "Walker".to_string(),
            max_health: 100,
            damage: stats.damage,
            move_speed: stats.move_speed,
            detection_radius: stats.detection_radius,
            alerted_radius: stats.alerted_radius,
            alert_range: stats.alert_range,
            alert_duration: stats.alert_duration,
            attack_range: stats.attack_range,
            attack_delay: stats.attack_delay,
            wind_up_time: stats.wind_up_time,
            total_attack_time: stats.total_attack_time,
            stop_while_attacking: stats.stop_while_attacking,
            infects: stats.infects,
            knockback_force: stats.knockback_force,
            tint: default_tint(),
            radius: stats.radius,
        }
    }
}

/// Resource holding all loaded zombie archetypes.
#[derive(Resource, Default)]
pub struct ZombieRegistry {
    pub definitions: HashMap<String, ZombieDefinition>,
}

impl ZombieRegistry {
    /// Get an archetype by its file stem.
    pub fn get(&self, archetype: &str) -> Option<&ZombieDefinition> {
        self.definitions.get(archetype)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

/// Read and validate one archetype file.
pub fn load_zombie_definition(path: &Path) -> Result<ZombieDefinition, DataLoadError> {
    let definition: ZombieDefinition = load_ron(path)?;
    definition.validate(&path.display().to_string())?;
    Ok(definition)
}

/// Load all zombie archetypes from the assets/data/zombies/ directory.
pub fn load_zombie_definitions(mut registry: ResMut<ZombieRegistry>) {
    let zombies_dir = Path::new(ZOMBIES_DIR);

    match fs::read_dir(zombies_dir) {
        Ok(entries) => {
            for entry in entries.flatten() {
                let path = entry.path();
                if !path.extension().is_some_and(|ext| ext == "ron") {
                    continue;
                }

                let Some(archetype) = path.file_stem().and_then(|s| s.to_str()) else {
                    warn!("Skipping zombie file with unreadable name: {:?}", path);
                    continue;
                };

                match load_zombie_definition(&path) {
                    Ok(definition) => {
                        info!("Loaded zombie archetype: {} ({})", definition.name, archetype);
                        registry.definitions.insert(archetype.to_string(), definition);
                    }
                    Err(e) => error!("{}", e),
                }
            }
        }
        Err(e) => warn!("Zombie definitions directory {:?} unreadable: {}", zombies_dir, e),
    }

    if registry.is_empty() {
        warn!("No zombie archetypes loaded. Using the built-in walker.");
        registry
            .definitions
            .insert("walker".to_string(), ZombieDefinition::walker());
    }

    info!("Loaded {} zombie archetypes", registry.len());
}

/// Warn about archetypes that could only attack through `ZombieStats::attack_reach`.
pub fn check_attack_reach(registry: Res<ZombieRegistry>, player: Res<PlayerConfig>) {
    let mut archetypes: Vec<_> = registry.definitions.iter().collect();
    archetypes.sort_by_key(|(archetype, _)| archetype.as_str());

    for (archetype, definition) in archetypes {
        if !definition.reaches_player(player.radius) {
            warn!(
                "Zombie archetype {} has attack_range {} below collider contact {}; using the contact distance",
                archetype,
                definition.attack_range,
                contact_distance(definition.radius, player.radius)
            );
        }
    }
}
