use crate::action_log::{Action, ActionLog};
use crate::actor::{Actor, ActorId};
use crate::input::{resolve_directions, InputToken, TokenSet};
use crate::registry::{ActorRegistry, RegistryError};
use crate::scheduler::Scheduler;
use log::{debug, info, warn};
use serde::Deserialize;

/// Row scanned for a free cell when a player starts
pub const SPAWN_ROW: i32 = 1;

/// Which walking behaviours are switched on
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
pub struct MovementRules {
    /// Block further steps until the actor's cooldown elapses
    #[serde(default = "enabled")]
    pub cooldown_gating: bool,
    /// Treat two held orthogonal keys as one diagonal step
    #[serde(default = "enabled")]
    pub diagonal: bool,
    /// Holding run skips the cooldown
    #[serde(default = "enabled")]
    pub run_modifier: bool,
}

fn enabled() -> bool { true }

impl Default for MovementRules {
    fn default() -> Self {
        Self {
            cooldown_gating: true,
            diagonal: true,
            run_modifier: true,
        }
    }
}

/// Scheduled wake-up for a player whose cooldown is running
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reactivate {
    pub player: usize,
}

/// Whether the host should keep running
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Per-player input state. There is no way back from `Walking`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlayerState {
    /// Waiting for start; the actor is not on the board yet
    Ready { actor: Actor },
    /// On the board; `movement_enabled` is false while a cooldown runs
    Walking { actor: ActorId, movement_enabled: bool },
}

/// Shared resources a handler works against during one frame
pub struct WalkContext<'a> {
    pub registry: &'a mut ActorRegistry,
    pub scheduler: &'a mut Scheduler<Reactivate>,
    pub rules: &'a MovementRules,
    pub log: &'a mut ActionLog,
}

#[derive(Clone, Debug)]
pub struct PlayerHandler {
    player: usize,
    state: PlayerState,
}

impl PlayerHandler {
    pub fn new(player: usize, actor: Actor) -> Self {
        PlayerHandler {
            player,
            state: PlayerState::Ready { actor },
        }
    }

    pub fn player(&self) -> usize {
        self.player
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn actor_id(&self) -> ActorId {
        match &self.state {
            PlayerState::Ready { actor } => actor.id(),
            PlayerState::Walking { actor, .. } => *actor,
        }
    }

    pub fn is_walking(&self) -> bool {
        matches!(self.state, PlayerState::Walking { .. })
    }

    pub fn movement_enabled(&self) -> bool {
        matches!(self.state, PlayerState::Walking { movement_enabled: true, .. })
    }

    /// Consume one frame of input.
    ///
    /// `keyboard` is the secondary source checked for the quit token.
    pub fn handle(
        &mut self,
        tokens: &TokenSet,
        keyboard: Option<&TokenSet>,
        ctx: &mut WalkContext<'_>,
    ) -> Result<Flow, RegistryError> {
        match self.state {
            PlayerState::Ready { .. } => {
                if tokens.contains(&InputToken::Start) {
                    self.start(ctx)?;
                }
            }
            PlayerState::Walking { .. } => self.walk(tokens, ctx)?,
        }

        self.adjust_speed(tokens, ctx);

        if keyboard.is_some_and(|keys| keys.contains(&InputToken::Quit)) {
            info!("player {} requested quit", self.player);
            ctx.log.log(Action::Quit { player: self.player });
            return Ok(Flow::Quit);
        }
        Ok(Flow::Continue)
    }

    /// Cooldown finished. Returns false if there was nothing to re-enable.
    pub fn reactivate(&mut self) -> bool {
        match &mut self.state {
            PlayerState::Walking { movement_enabled, .. } => {
                *movement_enabled = true;
                true
            }
            PlayerState::Ready { .. } => false,
        }
    }

    fn start(&mut self, ctx: &mut WalkContext<'_>) -> Result<(), RegistryError> {
        let PlayerState::Ready { actor } = &self.state else {
            return Ok(());
        };

        let at = match ctx.registry.spawn_position(SPAWN_ROW) {
            Ok(at) => at,
            Err(RegistryError::BoardFull { row }) => {
                warn!("player {} cannot start: row {} is full", self.player, row);
                ctx.log.log(Action::SpawnFailed { player: self.player, row });
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        let id = actor.id();
        ctx.registry.place(at, actor.clone())?;
        info!("player {} entered the board as {} at {}", self.player, id, at);
        ctx.log.log(Action::Spawn { player: self.player, actor: id, at });

        self.state = PlayerState::Walking {
            actor: id,
            movement_enabled: true,
        };
        Ok(())
    }

    fn walk(&mut self, tokens: &TokenSet, ctx: &mut WalkContext<'_>) -> Result<(), RegistryError> {
        let player = self.player;
        let PlayerState::Walking { actor, movement_enabled } = &mut self.state else {
            return Ok(());
        };
        let actor = *actor;
        let run = ctx.rules.run_modifier && tokens.contains(&InputToken::Run);

        for direction in resolve_directions(tokens, ctx.rules.diagonal) {
            if !*movement_enabled {
                break;
            }

            let target = ctx.registry.projected_position(actor, direction)?;
            if ctx.registry.actor_at(target).is_some() {
                debug!("player {} blocked at {}", player, target);
                ctx.log.log(Action::Blocked { player, target });
                continue;
            }

            let from = target + direction.inverse();
            ctx.registry.move_actor(actor, direction)?;
            debug!("player {} stepped {:?} to {}", player, direction, target);
            ctx.log.log(Action::Step { player, from, to: target });

            if ctx.rules.cooldown_gating && !run {
                let cooldown = ctx
                    .registry
                    .actor_at(target)
                    .map(Actor::walk_cooldown)
                    .ok_or(RegistryError::EmptyCell(target))?;
                *movement_enabled = false;
                ctx.scheduler.schedule(cooldown, Reactivate { player });
            }
        }
        Ok(())
    }

    fn adjust_speed(&mut self, tokens: &TokenSet, ctx: &mut WalkContext<'_>) {
        let speed_up = tokens.contains(&InputToken::SpeedUp);
        let speed_down = tokens.contains(&InputToken::SpeedDown);
        if !speed_up && !speed_down {
            return;
        }

        let actor = match &mut self.state {
            PlayerState::Ready { actor } => Some(actor),
            PlayerState::Walking { actor, .. } => ctx.registry.actor_mut(*actor),
        };
        let Some(actor) = actor else {
            return;
        };

        let mut changed = false;
        if speed_up {
            changed |= actor.speed_up();
        }
        if speed_down {
            changed |= actor.speed_down();
        }
        if changed {
            let cooldown_ms = actor.walk_cooldown().as_millis() as u64;
            debug!("player {} cooldown now {}ms", self.player, cooldown_ms);
            ctx.log.log(Action::SpeedChange { player: self.player, cooldown_ms });
        }
    }
}
