use crate::actor::{Actor, ActorId};
use crate::render::Surface;
use crate::{Coordinate, Direction};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("no actor at {0}")]
    EmptyCell(Coordinate),
    #[error("{0} is not on the board")]
    UntrackedActor(ActorId),
    #[error("cell {pos} is already held by {occupant}")]
    Occupied { pos: Coordinate, occupant: ActorId },
    #[error("{actor} is already placed at {at}")]
    AlreadyPlaced { actor: ActorId, at: Coordinate },
    #[error("no free cell left in row {row}")]
    BoardFull { row: i32 },
}

impl RegistryError {
    /// True for the lookup failures (empty cell, untracked actor)
    pub fn is_not_found(&self) -> bool {
        matches!(self, RegistryError::EmptyCell(_) | RegistryError::UntrackedActor(_))
    }
}

/// Bidirectional position <-> actor index for one board
///
/// `actors` and `positions` are kept exact inverses: every occupied cell holds
/// one actor and every tracked actor sits in one cell. Width and height are
/// nominal; only the spawn scan is bounded by width.
#[derive(Debug, Clone)]
pub struct ActorRegistry {
    pub width: i32,
    pub height: i32,
    actors: HashMap<Coordinate, Actor>,
    positions: HashMap<ActorId, Coordinate>,
}

impl ActorRegistry {
    pub fn new(width: i32, height: i32) -> Self {
        ActorRegistry {
            width,
            height,
            actors: HashMap::new(),
            positions: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// Occupant of `pos`, if any
    pub fn actor_at(&self, pos: Coordinate) -> Option<&Actor> {
        self.actors.get(&pos)
    }

    /// Current cell of `actor`, if it is on the board
    pub fn position_of(&self, actor: ActorId) -> Option<Coordinate> {
        self.positions.get(&actor).copied()
    }

    pub fn actor_mut(&mut self, actor: ActorId) -> Option<&mut Actor> {
        let pos = self.positions.get(&actor)?;
        self.actors.get_mut(pos)
    }

    /// Iterate over every (cell, actor) pair in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = (Coordinate, &Actor)> {
        self.actors.iter().map(|(pos, actor)| (*pos, actor))
    }

    /// Put `actor` on the empty cell `pos`.
    ///
    /// Relocation goes through `move_actor`; placing an actor that is already
    /// tracked, or onto another actor, is rejected.
    pub fn place(&mut self, pos: Coordinate, actor: Actor) -> Result<(), RegistryError> {
        if let Some(at) = self.position_of(actor.id()) {
            return Err(RegistryError::AlreadyPlaced { actor: actor.id(), at });
        }
        if let Some(occupant) = self.actors.get(&pos) {
            return Err(RegistryError::Occupied { pos, occupant: occupant.id() });
        }
        self.positions.insert(actor.id(), pos);
        self.actors.insert(pos, actor);
        Ok(())
    }

    /// Take the occupant of `pos` off the board
    pub fn remove(&mut self, pos: Coordinate) -> Result<Actor, RegistryError> {
        let actor = self.actors.remove(&pos).ok_or(RegistryError::EmptyCell(pos))?;
        self.positions.remove(&actor.id());
        Ok(actor)
    }

    /// Cell `actor` would land on after stepping in `direction`
    pub fn projected_position(&self, actor: ActorId, direction: Direction) -> Result<Coordinate, RegistryError> {
        self.position_of(actor)
            .map(|pos| pos + direction)
            .ok_or(RegistryError::UntrackedActor(actor))
    }

    /// Step `actor` one cell in `direction`, returning the new cell.
    ///
    /// Collision is the caller's rule: it checks `projected_position` first and
    /// decides what a blocked step means. The `Occupied` error here only keeps
    /// the two maps inverse if that check was skipped; both maps are left untouched.
    pub fn move_actor(&mut self, actor: ActorId, direction: Direction) -> Result<Coordinate, RegistryError> {
        let from = self.position_of(actor).ok_or(RegistryError::UntrackedActor(actor))?;
        let target = from + direction;
        if let Some(occupant) = self.actors.get(&target) {
            return Err(RegistryError::Occupied { pos: target, occupant: occupant.id() });
        }
        let moving = self.remove(from)?;
        self.place(target, moving)?;
        Ok(target)
    }

    /// First free cell scanning x = 1, 2, ... along `row`, below the board width
    pub fn spawn_position(&self, row: i32) -> Result<Coordinate, RegistryError> {
        (1..self.width)
            .map(|x| Coordinate::new(x, row))
            .find(|pos| !self.actors.contains_key(pos))
            .ok_or(RegistryError::BoardFull { row })
    }

    /// Draw every actor at its cell
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        for (pos, actor) in &self.actors {
            actor.render(*pos, &mut *surface);
        }
    }

    /// Check that both indices agree; used by tests
    pub fn is_consistent(&self) -> bool {
        self.actors.len() == self.positions.len()
            && self
                .actors
                .iter()
                .all(|(pos, actor)| self.positions.get(&actor.id()) == Some(pos))
    }
}
