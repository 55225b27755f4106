//! Error types.
//!
//! Two layers, two styles:
//!
//! - [`RuleViolation`]: an expected rejection of a player action (illegal
//!   placement, not enough agents, wrong phase). Callers surface the
//!   message to the player.
//! - [`StoreError`]: a caller broke a store contract (unknown seat,
//!   out-of-bounds cell, placing on an occupied cell). Validated controller
//!   paths never produce these.
//!
//! Controller actions return [`ActionError`], which wraps either.

use thiserror::Error;

use super::player::PlayerId;
use super::position::Position;
use crate::store::Phase;

/// Contract violations reported by the state store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),
    #[error("position {0} is off the board")]
    OutOfBounds(Position),
    #[error("position {0} is already occupied")]
    Occupied(Position),
    #[error("no tile at {0}")]
    NoTile(Position),
    #[error("no landmark at {0}")]
    NoLandmark(Position),
    #[error("tile placed at {0} has no owner")]
    OwnerlessTile(Position),
    #[error("malformed landmark: {0}")]
    MalformedLandmark(&'static str),
    #[error("{player} does not own the structure at {pos}")]
    NotOwner { pos: Position, player: PlayerId },
    #[error("landmark at {0} is already a headquarters")]
    AlreadyHeadquarters(Position),
    #[error("{player} already has the maximum of {cap} headquarters")]
    HeadquartersCap { player: PlayerId, cap: u32 },
    #[error("{player} already has the maximum of {cap} agents on the board")]
    AgentCap { player: PlayerId, cap: u32 },
    #[error("{player} has no agent at {pos}")]
    NoAgent { pos: Position, player: PlayerId },
    #[error("{player} has no hand tile at index {index}")]
    HandIndex { player: PlayerId, index: usize },
    #[error("{player} has no event card at index {index}")]
    EventIndex { player: PlayerId, index: usize },
    #[error("reorder must be a permutation of 0..{0}")]
    InvalidReorder(usize),
    #[error("saved game has {found} players, expected {expected}")]
    PlayerCountMismatch { expected: usize, found: usize },
    #[error("saved game is inconsistent: {0}")]
    InconsistentSave(&'static str),
    #[error("codec error: {0}")]
    Codec(#[from] bincode::Error),
}

/// Expected rejections of player actions, with a reason for the player.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RuleViolation {
    #[error("{0} is off the board")]
    OutOfBounds(Position),
    #[error("{0} is already occupied")]
    Occupied(Position),
    #[error("first tile must be placed in your starting zone, {0} is outside it")]
    NotInStartingZone(Position),
    #[error("{0} is not next to one of your tiles")]
    NotAdjacent(Position),
    #[error("combo placement at {0} must touch one of your tiles of a different type")]
    NotComboConnected(Position),
    #[error("it is {current}'s turn, not {player}'s")]
    NotYourTurn { player: PlayerId, current: PlayerId },
    #[error("action not allowed during the {0:?} phase")]
    WrongPhase(Phase),
    #[error("no placements left this turn")]
    PlacementLimitReached,
    #[error("no hand tile at index {0}")]
    NoSuchHandTile(usize),
    #[error("no event card at index {0}")]
    NoSuchEventCard(usize),
    #[error("no tile at {0}")]
    NoTileAt(Position),
    #[error("no landmark at {0}")]
    NoLandmarkAt(Position),
    #[error("the tile at {0} is not yours")]
    NotOwnTile(Position),
    #[error("the tile at {0} is yours")]
    OwnTile(Position),
    #[error("the landmark at {0} is not yours")]
    NotOwnLandmark(Position),
    #[error("the landmark at {0} is yours")]
    OwnLandmark(Position),
    #[error("{0} does not form a trinity")]
    NotATrinity(Position),
    #[error("the landmark at {0} is already a headquarters")]
    AlreadyHeadquarters(Position),
    #[error("headquarters limit of {0} reached")]
    HeadquartersCapReached(u32),
    #[error("need {required} agents, have {available}")]
    InsufficientAgents { required: u32, available: u32 },
    #[error("agent limit of {0} reached")]
    AgentCapReached(u32),
    #[error("no agent of yours at or next to {0}")]
    NoAgentInRange(Position),
    #[error("{from} and {to} are not adjacent")]
    NotAdjacentCells { from: Position, to: Position },
    #[error("no agent moves left this turn")]
    AgentMovesExhausted,
    #[error("event card limit for this turn reached")]
    EventLimitReached,
    #[error("this card only triggers in response to an event")]
    ReactiveOnly,
    #[error("invalid target: {0}")]
    InvalidTarget(&'static str),
    #[error("missing target: {0}")]
    MissingTarget(&'static str),
    #[error("draw pile is empty")]
    EmptyPile,
    #[error("order must be a permutation of the top {0} tiles")]
    InvalidOrder(usize),
    #[error("mulligan not available")]
    MulliganUnavailable,
    #[error("setup has already been performed")]
    AlreadySetUp,
    #[error("the game is over")]
    GameOver,
}

/// Error returned by controller actions.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error(transparent)]
    Rule(#[from] RuleViolation),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ActionError {
    /// The player-facing rejection, if this is one.
    #[must_use]
    pub fn violation(&self) -> Option<&RuleViolation> {
        match self {
            ActionError::Rule(v) => Some(v),
            ActionError::Store(_) => None,
        }
    }
}

/// Invalid rule table.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("player count must be 2-4, got {0}")]
    PlayerCount(usize),
    #[error("board size must be 4-32, got {0}")]
    BoardSize(u8),
    #[error("hand size must be at least 1")]
    HandSize,
    #[error("at least one placement per turn is required")]
    Placements,
    #[error("contest threshold must be at least 1")]
    ContestThreshold,
    #[error("undo capacity must be at least 1")]
    UndoCapacity,
    #[error("invalid rule table json: {0}")]
    Json(#[from] serde_json::Error),
}
