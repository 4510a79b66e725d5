use crate::action_log::{Action, ActionLog};
use crate::actor::{Actor, ActorId};
use crate::config::Config;
use crate::handler::{Flow, MovementRules, PlayerHandler, Reactivate, WalkContext};
use crate::input::InputSource;
use crate::registry::{ActorRegistry, RegistryError};
use crate::render::{Surface, Tile, TileColor};
use crate::scheduler::Scheduler;
use log::debug;
use std::time::Duration;

/// Owns the board, the players and the clock for one demo session
pub struct WalkDemo {
    registry: ActorRegistry,
    scheduler: Scheduler<Reactivate>,
    players: Vec<PlayerHandler>,
    rules: MovementRules,
    log: ActionLog,
}

impl WalkDemo {
    /// One actor per configured player colour; the action log follows `[logging]`
    pub fn new(config: &Config) -> Self {
        Self::with_players(
            config.board.width,
            config.board.height,
            config.players.glyph,
            &config.players.colors,
            config.movement,
        )
        .with_action_log(config.logging.enable_action_log)
    }

    pub fn with_players(width: i32, height: i32, glyph: char, colors: &[TileColor], rules: MovementRules) -> Self {
        let players = colors
            .iter()
            .enumerate()
            .map(|(i, color)| PlayerHandler::new(i, Actor::new(ActorId(i), Tile::new(glyph, *color))))
            .collect();

        WalkDemo {
            registry: ActorRegistry::new(width, height),
            scheduler: Scheduler::new(),
            players,
            rules,
            log: ActionLog::new(),
        }
    }

    /// Turn recording of the action log on or off
    pub fn with_action_log(mut self, enabled: bool) -> Self {
        self.log = ActionLog::with_enabled(enabled);
        self
    }

    pub fn registry(&self) -> &ActorRegistry {
        &self.registry
    }

    pub fn players(&self) -> &[PlayerHandler] {
        &self.players
    }

    pub fn action_log(&self) -> &ActionLog {
        &self.log
    }

    pub fn pending_reactivations(&self) -> usize {
        self.scheduler.pending()
    }

    /// Run one frame at demo time `now`: due reactivations first, then each
    /// player polls its controller in order. Players without a controller get no input.
    ///
    /// `keyboard` is the secondary source, polled once per frame for quit.
    pub fn update<C, K>(&mut self, now: Duration, controllers: &[C], keyboard: &K) -> Result<Flow, RegistryError>
    where
        C: InputSource,
        K: InputSource + ?Sized,
    {
        self.log.set_time(now);

        for Reactivate { player } in self.scheduler.advance_to(now) {
            // The player may be gone or back in Ready; nothing to do then.
            if let Some(handler) = self.players.get_mut(player) {
                if handler.reactivate() {
                    debug!("player {} may move again", player);
                    self.log.log(Action::Reactivate { player });
                }
            }
        }

        let mut ctx = WalkContext {
            registry: &mut self.registry,
            scheduler: &mut self.scheduler,
            rules: &self.rules,
            log: &mut self.log,
        };
        let keyboard = keyboard.pressed_tokens();
        for (handler, controller) in self.players.iter_mut().zip(controllers) {
            let tokens = controller.pressed_tokens();
            if handler.handle(&tokens, Some(&keyboard), &mut ctx)? == Flow::Quit {
                return Ok(Flow::Quit);
            }
        }
        Ok(Flow::Continue)
    }

    /// Clear the surface and draw every actor on the board
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.fill();
        self.registry.render(surface);
    }
}
