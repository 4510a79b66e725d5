use crate::actor::ActorId;
use crate::Coordinate;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Things that happen to players during a session
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Player pressed start and its actor entered the board
    Spawn { player: usize, actor: ActorId, at: Coordinate },
    /// Start was pressed but the spawn row had no free cell
    SpawnFailed { player: usize, row: i32 },
    /// Actor took one step
    Step { player: usize, from: Coordinate, to: Coordinate },
    /// Step refused because the target cell was occupied
    Blocked { player: usize, target: Coordinate },
    /// Walk cooldown changed (milliseconds)
    SpeedChange { player: usize, cooldown_ms: u64 },
    /// Cooldown elapsed; movement enabled again
    Reactivate { player: usize },
    /// Quit token seen
    Quit { player: usize },
}

/// Logged action with timestamp
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoggedAction {
    /// Milliseconds of demo time
    pub timestamp_ms: u64,
    pub action: Action,
}

/// Action logger, stamped with the demo clock rather than wall time
///
/// A disabled log drops every entry, so it stays empty for the whole session.
#[derive(Debug)]
pub struct ActionLog {
    enabled: bool,
    now: Duration,
    actions: Vec<LoggedAction>,
}

impl Default for ActionLog {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionLog {
    pub fn new() -> Self {
        Self::with_enabled(true)
    }

    /// Log that records nothing
    pub fn disabled() -> Self {
        Self::with_enabled(false)
    }

    pub fn with_enabled(enabled: bool) -> Self {
        ActionLog {
            enabled,
            now: Duration::ZERO,
            actions: Vec::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Timestamp applied to subsequent entries
    pub fn set_time(&mut self, now: Duration) {
        self.now = now;
    }

    pub fn log(&mut self, action: Action) {
        if !self.enabled {
            return;
        }
        self.actions.push(LoggedAction {
            timestamp_ms: self.now.as_millis() as u64,
            action,
        });
    }

    /// Get all logged actions
    pub fn get_actions(&self) -> &[LoggedAction] {
        &self.actions
    }

    /// Save log to JSON file
    pub fn save_to_file(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(&self.actions)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Get summary statistics
    pub fn summary(&self) -> String {
        let mut spawns = 0;
        let mut failed_spawns = 0;
        let mut steps = 0;
        let mut blocked = 0;
        let mut speed_changes = 0;
        let mut reactivations = 0;

        for logged in &self.actions {
            match &logged.action {
                Action::Spawn { .. } => spawns += 1,
                Action::SpawnFailed { .. } => failed_spawns += 1,
                Action::Step { .. } => steps += 1,
                Action::Blocked { .. } => blocked += 1,
                Action::SpeedChange { .. } => speed_changes += 1,
                Action::Reactivate { .. } => reactivations += 1,
                Action::Quit { .. } => {}
            }
        }

        let duration = self.actions.last().map_or(0, |last| last.timestamp_ms);

        format!(
            "Session Duration: {}ms\n\
             Total Events: {}\n\
             Players: {} spawned, {} spawn attempts refused\n\
             Movement: {} steps, {} blocked, {} reactivations\n\
             Speed Changes: {}",
            duration,
            self.actions.len(),
            spawns,
            failed_spawns,
            steps,
            blocked,
            reactivations,
            speed_changes
        )
    }
}
