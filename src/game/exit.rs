//! Exit zone - the way out of the arena.

use bevy::prelude::*;

/// Area the player must reach, uninfected, to win.
#[derive(Component, Debug, Clone)]
pub struct ExitZone {
    pub area: Rect,
    player_inside: bool,
}

impl ExitZone {
    pub fn new(area: Rect) -> Self {
        Self {
            area,
            player_inside: false,
        }
    }

    /// Track the player. True only on the tick the player enters while uninfected.
    ///
    /// Standing in the zone does not count: an infected player who gets cured
    /// inside has to step out and back in.
    pub fn update(&mut self, player: Vec2, infected: bool) -> bool {
        let inside = self.area.contains(player);
        let entered = inside && !self.player_inside;
        self.player_inside = inside;
        entered && !infected
    }
}
