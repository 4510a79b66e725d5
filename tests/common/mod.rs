#![allow(dead_code)]

use std::collections::HashMap;
use walkdemo::action_log::ActionLog;
use walkdemo::handler::{MovementRules, Reactivate, WalkContext};
use walkdemo::render::{Surface, Tile, TileColor};
use walkdemo::scheduler::Scheduler;
use walkdemo::{Actor, ActorId, ActorRegistry, Coordinate, InputToken, TokenSet};

/// Build a token set from a list of tokens
pub fn tokens(list: &[InputToken]) -> TokenSet {
    list.iter().copied().collect()
}

pub fn actor(id: usize) -> Actor {
    Actor::new(ActorId(id), Tile::new('@', TileColor::Red))
}

pub fn at(x: i32, y: i32) -> Coordinate {
    Coordinate::new(x, y)
}

/// Everything a player handler needs for one frame, owned by the test
pub struct Board {
    pub registry: ActorRegistry,
    pub scheduler: Scheduler<Reactivate>,
    pub rules: MovementRules,
    pub log: ActionLog,
}

impl Board {
    pub fn new(width: i32, rules: MovementRules) -> Self {
        Board {
            registry: ActorRegistry::new(width, 20),
            scheduler: Scheduler::new(),
            rules,
            log: ActionLog::new(),
        }
    }

    pub fn ctx(&mut self) -> WalkContext<'_> {
        WalkContext {
            registry: &mut self.registry,
            scheduler: &mut self.scheduler,
            rules: &self.rules,
            log: &mut self.log,
        }
    }
}

/// Surface that remembers every draw call since the last fill
#[derive(Default)]
pub struct RecordingSurface {
    pub fills: usize,
    pub drawn: HashMap<Coordinate, Tile>,
    pub draw_calls: usize,
}

impl Surface for RecordingSurface {
    fn fill(&mut self) {
        self.fills += 1;
        self.drawn.clear();
    }

    fn draw(&mut self, pos: Coordinate, tile: &Tile) {
        self.draw_calls += 1;
        self.drawn.insert(pos, *tile);
    }
}
