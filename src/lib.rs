pub mod action_log;
pub mod actor;
pub mod config;
pub mod coord;
pub mod demo;
pub mod handler;
pub mod input;
pub mod registry;
pub mod render;
pub mod scheduler;

pub use actor::{Actor, ActorId};
pub use coord::{Coordinate, Direction};
pub use demo::WalkDemo;
pub use handler::{Flow, MovementRules, PlayerHandler, PlayerState};
pub use input::{InputToken, TokenSet};
pub use registry::{ActorRegistry, RegistryError};
