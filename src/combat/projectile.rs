//! Firearm projectiles.

use bevy::prelude::*;
use std::time::Duration;

use crate::world::{layers, QueryMask, SpatialQuery};

/// A bullet in flight.
#[derive(Component, Debug, Clone)]
pub struct Projectile {
    pub direction: Vec2,
    pub speed: f32,
    pub damage: i32,
    /// Entity that fired it; never hit by its own shots
    pub owner: Option<Entity>,
    lifetime: Timer,
}

/// How a projectile treats a collider it touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Living target: damage it and stop
    Damage,
    /// Fly straight through
    Ignore,
    /// Static obstacle: stop
    Block,
}

/// Outcome of advancing a projectile by one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectileStep {
    /// Still flying, now at this position
    Travel(Vec2),
    /// Hit a damageable target
    Struck(Entity),
    /// Hit an obstacle
    Blocked,
    /// Lifetime ran out
    Expired,
}

impl Projectile {
    pub fn new(direction: Vec2, speed: f32, damage: i32, lifetime: f32, owner: Option<Entity>) -> Self {
        Self {
            direction: direction.normalize_or_zero(),
            speed,
            damage,
            owner,
            lifetime: Timer::from_seconds(lifetime.max(0.0), TimerMode::Once),
        }
    }

    /// Sweep from `position` along the flight path for `dt` seconds.
    pub fn step(
        &mut self,
        position: Vec2,
        dt: f32,
        world: &impl SpatialQuery,
        classify: impl Fn(Entity) -> Contact,
    ) -> ProjectileStep {
        self.lifetime.tick(Duration::from_secs_f32(dt.max(0.0)));
        if self.lifetime.finished() {
            return ProjectileStep::Expired;
        }

        let travel = self.speed * dt;
        let mut mask = QueryMask::new(layers::ZOMBIE | layers::OBSTACLE).solids();
        if let Some(owner) = self.owner {
            mask = mask.excluding(owner);
        }

        // Corpses and the like do not hide what lies behind them
        for hit in world.raycast_all(position, self.direction, travel, mask) {
            match classify(hit.entity) {
                Contact::Damage => return ProjectileStep::Struck(hit.entity),
                Contact::Block => return ProjectileStep::Blocked,
                Contact::Ignore => {}
            }
        }

        ProjectileStep::Travel(position + self.direction * travel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::testing::TestWorld;

    fn zombie() -> Entity {
        Entity::from_raw(10)
    }

    fn wall() -> Entity {
        Entity::from_raw(20)
    }

    fn classify(entity: Entity) -> Contact {
        if entity == zombie() {
            Contact::Damage
        } else {
            Contact::Block
        }
    }

    #[test]
    fn test_travels_when_path_is_clear() {
        let world = TestWorld::default();
        let mut bullet = Projectile::new(Vec2::X, 20.0, 10, 2.0, None);
        let step = bullet.step(Vec2::ZERO, 0.1, &world, classify);
        assert_eq!(step, ProjectileStep::Travel(Vec2::new(2.0, 0.0)));
    }

    #[test]
    fn test_hits_zombie_in_path() {
        let world = TestWorld::default().with(zombie(), Vec2::new(1.5, 0.0), 0.4, layers::ZOMBIE);
        let mut bullet = Projectile::new(Vec2::X, 20.0, 10, 2.0, None);
        assert_eq!(bullet.step(Vec2::ZERO, 0.1, &world, classify), ProjectileStep::Struck(zombie()));
    }

    #[test]
    fn test_stopped_by_obstacle() {
        let world = TestWorld::default()
            .with(wall(), Vec2::new(1.0, 0.0), 0.4, layers::OBSTACLE)
            .with(zombie(), Vec2::new(1.8, 0.0), 0.4, layers::ZOMBIE);
        let mut bullet = Projectile::new(Vec2::X, 20.0, 10, 2.0, None);
        assert_eq!(bullet.step(Vec2::ZERO, 0.1, &world, classify), ProjectileStep::Blocked);
    }

    #[test]
    fn test_passes_through_player() {
        let player = Entity::from_raw(1);
        let world = TestWorld::default().with(player, Vec2::new(1.0, 0.0), 0.5, layers::PLAYER);
        let mut bullet = Projectile::new(Vec2::X, 20.0, 10, 2.0, Some(player));
        assert!(matches!(
            bullet.step(Vec2::ZERO, 0.1, &world, classify),
            ProjectileStep::Travel(_)
        ));
    }

    #[test]
    fn test_ignored_contacts_do_not_stop_flight() {
        let world = TestWorld::default().with(zombie(), Vec2::new(1.0, 0.0), 0.4, layers::ZOMBIE);
        let mut bullet = Projectile::new(Vec2::X, 20.0, 10, 2.0, None);
        let step = bullet.step(Vec2::ZERO, 0.1, &world, |_| Contact::Ignore);
        assert_eq!(step, ProjectileStep::Travel(Vec2::new(2.0, 0.0)));
    }

    #[test]
    fn test_hits_zombie_behind_ignored_contact() {
        let corpse = Entity::from_raw(30);
        let world = TestWorld::default()
            .with(corpse, Vec2::new(0.8, 0.0), 0.4, layers::ZOMBIE)
            .with(zombie(), Vec2::new(1.7, 0.0), 0.4, layers::ZOMBIE);
        let mut bullet = Projectile::new(Vec2::X, 20.0, 10, 2.0, None);
        let step = bullet.step(Vec2::ZERO, 0.1, &world, |hit| {
            if hit == corpse {
                Contact::Ignore
            } else {
                classify(hit)
            }
        });
        assert_eq!(step, ProjectileStep::Struck(zombie()));
    }

    #[test]
    fn test_expires_after_lifetime() {
        let world = TestWorld::default();
        let mut bullet = Projectile::new(Vec2::X, 20.0, 10, 0.25, None);
        assert!(matches!(bullet.step(Vec2::ZERO, 0.1, &world, classify), ProjectileStep::Travel(_)));
        assert!(matches!(bullet.step(Vec2::ZERO, 0.1, &world, classify), ProjectileStep::Travel(_)));
        assert_eq!(bullet.step(Vec2::ZERO, 0.1, &world, classify), ProjectileStep::Expired);
    }
}
