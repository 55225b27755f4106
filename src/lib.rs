//! # rust-trinity
//!
//! Rules and state engine for Trinity, a turn-based tile-placement strategy
//! game for two to four players.
//!
//! Players place Housing, Commerce and Industry tiles on a square grid,
//! fold connected triads into landmarks, raise headquarters that spawn
//! agents, fight over tiles and landmarks with those agents, and play event
//! cards that reshape the board.
//!
//! ## Design Principles
//!
//! 1. **One writer**: all state lives in [`store::StateStore`]. Every change
//!    goes through one of its methods and is announced as one
//!    [`triggers::GameEvent`].
//!
//! 2. **Validate, then mutate**: rule checks are pure functions over the
//!    board. An illegal action returns a [`core::RuleViolation`] and leaves
//!    state untouched.
//!
//! 3. **N-Player First**: every API takes the player count from the rule
//!    table. Nothing assumes two players.
//!
//! 4. **Cheap snapshots**: board and piles use persistent collections, so
//!    undo history is a queue of whole-state clones.
//!
//! ## Modules
//!
//! - `core`: players, positions, RNG, rule configuration, errors
//! - `board`: tiles, landmarks, agent stacks, piles and the grid
//! - `cards`: event card definitions, instances and the catalog
//! - `effects`: card effects, targeting and resolution
//! - `triggers`: the game event feed and reactive card triggers
//! - `rules`: placement, landmark detection, combos and scoring
//! - `store`: the state store, undo history and save games
//! - `game`: the controller that runs setup, turns and actions

pub mod board;
pub mod cards;
pub mod core;
pub mod effects;
pub mod game;
pub mod rules;
pub mod store;
pub mod triggers;

// Re-export commonly used types
pub use crate::core::{
    ActionError, ConfigError, DrawMode, GameRng, PlayerId, PlayerMap, Position, RuleConfig, RuleViolation,
    StartingPlayer, StoreError, TurnModel,
};

pub use crate::board::{AgentStack, Board, Landmark, Pile, Tile, TileType};

pub use crate::cards::{CardCatalog, CardId, EventCard, EventCardDefinition};

pub use crate::effects::{CardEffect, EffectOutcome, PlayArgs, Target, TargetFilter, TargetSelector};

pub use crate::triggers::{GameEvent, SubscriptionId};

pub use crate::rules::{GameResult, Standing, TrinityProposal};

pub use crate::store::{Phase, SaveData, StateStore};

pub use crate::game::{Game, PlacementOutcome, TakeoverOutcome};
