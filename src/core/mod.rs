//! Core engine types: players, coordinates, RNG, configuration, errors.

pub mod config;
pub mod error;
pub mod player;
pub mod position;
pub mod rng;

pub use config::{AgentRules, ComboRules, DrawMode, RuleConfig, StartingPlayer, TurnModel, WinConditions};
pub use error::{ActionError, ConfigError, RuleViolation, StoreError};
pub use player::{PlayerId, PlayerMap};
pub use position::Position;
pub use rng::GameRng;
