//! Wave presets and weighted archetype selection.

use rand::Rng;
use serde::Deserialize;

/// One row of a preset's weighted zombie table.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ZombieChance {
    /// Archetype name (file stem under `assets/data/zombies/`)
    pub archetype: String,
    /// Relative weight
    pub chance: u32,
}

/// Spawn settings in force while enough match time remains.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct WavePreset {
    /// Active while `time_left >= time_threshold`
    pub time_threshold: i32,
    /// Seconds between spawn batches
    pub spawn_interval: f32,
    /// Zombies per batch
    pub spawn_count: u32,
    pub zombies: Vec<ZombieChance>,
}

/// Index of the preset in force with `time_left` seconds remaining.
///
/// The first preset whose threshold is met wins; otherwise the last one is
/// the fallback. `None` only when there are no presets at all.
pub fn active_preset(presets: &[WavePreset], time_left: i32) -> Option<usize> {
    if presets.is_empty() {
        return None;
    }
    presets
        .iter()
        .position(|preset| time_left >= preset.time_threshold)
        .or(Some(presets.len() - 1))
}

/// Pick an archetype by cumulative-weight roll.
///
/// A single entry is always chosen, and a table whose weights sum to zero
/// falls back to its first entry.
pub fn choose_archetype<'a>(table: &'a [ZombieChance], rng: &mut impl Rng) -> Option<&'a str> {
    let first = table.first()?;
    if table.len() == 1 {
        return Some(&first.archetype);
    }

    let total: u64 = table.iter().map(|entry| u64::from(entry.chance)).sum();
    if total == 0 {
        return Some(&first.archetype);
    }

    let roll = rng.gen_range(0..total);
    let mut cumulative = 0;
    for entry in table {
        cumulative += u64::from(entry.chance);
        if roll < cumulative {
            return Some(&entry.archetype);
        }
    }
    Some(&first.archetype)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn chance(archetype: &str, chance: u32) -> ZombieChance {
        ZombieChance {
            archetype: archetype.to_string(),
            chance,
        }
    }

    fn preset(time_threshold: i32) -> WavePreset {
        WavePreset {
            time_threshold,
            spawn_interval: 3.0,
            spawn_count: 2,
            zombies: vec![chance("walker", 1)],
        }
    }

    #[test]
    fn test_first_matching_preset_is_active() {
        let presets = [preset(480), preset(300), preset(120)];
        assert_eq!(active_preset(&presets, 600), Some(0));
        assert_eq!(active_preset(&presets, 480), Some(0));
        assert_eq!(active_preset(&presets, 479), Some(1));
        assert_eq!(active_preset(&presets, 200), Some(2));
    }

    #[test]
    fn test_last_preset_is_fallback() {
        let presets = [preset(480), preset(300)];
        assert_eq!(active_preset(&presets, 10), Some(1));
        assert_eq!(active_preset(&[], 10), None);
    }

    #[test]
    fn test_weighted_selection_converges() {
        let table = [chance("a", 1), chance("b", 3)];
        let mut rng = StdRng::seed_from_u64(7);

        let samples = 100_000;
        let a = (0..samples)
            .filter(|_| choose_archetype(&table, &mut rng) == Some("a"))
            .count();
        let ratio = a as f64 / samples as f64;
        assert!((ratio - 0.25).abs() < 0.01, "ratio was {}", ratio);
    }

    #[test]
    fn test_zero_weights_fall_back_to_first() {
        let table = [chance("a", 0), chance("b", 0)];
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..20 {
            assert_eq!(choose_archetype(&table, &mut rng), Some("a"));
        }
    }

    #[test]
    fn test_degenerate_tables() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(choose_archetype(&[], &mut rng), None);
        assert_eq!(choose_archetype(&[chance("only", 0)], &mut rng), Some("only"));
    }

    #[test]
    fn test_zero_weight_entry_never_chosen() {
        let table = [chance("a", 0), chance("b", 5)];
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..1000 {
            assert_eq!(choose_archetype(&table, &mut rng), Some("b"));
        }
    }
}
