use crate::render::{Surface, Tile};
use crate::Coordinate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Stable identity of an actor; two actors with equal tiles are still distinct
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(pub usize);

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "actor#{}", self.0)
    }
}

/// Actor represents a walking entity on the board
///
/// The walk cooldown is stored as a whole number of speed units so the
/// bounds are hit exactly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Actor {
    id: ActorId,
    tile: Tile,
    /// Delay between steps, in SPEED_UNIT_MS steps
    cooldown_units: u32,
}

impl Actor {
    /// Size of one speed adjustment (0.01 s)
    pub const SPEED_UNIT_MS: u64 = 10;
    /// Shortest allowed cooldown (0.05 s)
    pub const WAIT_UNITS_MIN: u32 = 5;
    /// Longest allowed cooldown (1.0 s)
    pub const WAIT_UNITS_MAX: u32 = 100;
    /// Cooldown a new actor starts with (0.1 s)
    pub const WAIT_UNITS_DEFAULT: u32 = 10;

    pub fn new(id: ActorId, tile: Tile) -> Self {
        Actor {
            id,
            tile,
            cooldown_units: Self::WAIT_UNITS_DEFAULT,
        }
    }

    pub fn id(&self) -> ActorId {
        self.id
    }

    pub fn tile(&self) -> &Tile {
        &self.tile
    }

    /// Draw this actor's tile at `position`
    pub fn render<S: Surface + ?Sized>(&self, position: Coordinate, surface: &mut S) {
        surface.draw(position, &self.tile);
    }

    /// Current delay between gated steps
    pub fn walk_cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_units as u64 * Self::SPEED_UNIT_MS)
    }

    /// Shorten the cooldown by one unit. Returns false at the lower bound.
    pub fn speed_up(&mut self) -> bool {
        if self.cooldown_units > Self::WAIT_UNITS_MIN {
            self.cooldown_units -= 1;
            true
        } else {
            false
        }
    }

    /// Lengthen the cooldown by one unit. Returns false at the upper bound.
    pub fn speed_down(&mut self) -> bool {
        if self.cooldown_units < Self::WAIT_UNITS_MAX {
            self.cooldown_units += 1;
            true
        } else {
            false
        }
    }
}
