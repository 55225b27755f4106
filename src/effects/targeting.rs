//! Effect targeting.
//!
//! - `TargetSpec`: what a card aims at (entity kind plus a filter)
//! - `TargetFilter`: declarative legality rule for candidate targets
//! - `TargetSelector`: enumerates and validates targets against a board
//!
//! The selector is the single source of truth for "what may this card
//! target": the resolver validates through it and a UI highlights from it.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::core::{PlayerId, Position, RuleViolation};

/// The kind of entity a card aims at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetType {
    /// No target; the card affects the acting player or the piles.
    None,
    Player,
    Cell,
    Agent,
}

/// Filters over candidate targets, relative to the acting player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetFilter {
    /// Cells holding a tile the actor owns.
    OwnTiles,
    /// Cells holding a tile another player owns.
    OpponentTiles,
    /// Opponent tiles orthogonally adjacent to one of the actor's tiles.
    OpponentTilesAdjacentToOwn,
    /// Opponent tiles with one of the actor's agents on a neighbouring cell.
    OpponentTilesInAgentReach,
    /// The actor's headquarters.
    OwnHeadquarters,
    /// Opponent landmarks next to one of the actor's tiles or landmarks.
    AdjacentOpponentLandmarks,
    /// Each (cell, owner) pair where an opponent has an agent.
    OpponentAgents,
    /// In-bounds cells with no tile or landmark.
    EmptyCells,
    /// Every player except the actor.
    Opponents,
}

/// A chosen target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
    Player(PlayerId),
    Cell(Position),
    Agent { pos: Position, owner: PlayerId },
}

impl Target {
    /// The board cell this target refers to, if any.
    #[must_use]
    pub fn cell(self) -> Option<Position> {
        match self {
            Target::Cell(pos) | Target::Agent { pos, .. } => Some(pos),
            Target::Player(_) => None,
        }
    }
}

/// Specification for card targeting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSpec {
    pub target_type: TargetType,
    pub filter: Option<TargetFilter>,
}

impl TargetSpec {
    /// A card with no target.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            target_type: TargetType::None,
            filter: None,
        }
    }

    #[must_use]
    pub const fn new(target_type: TargetType, filter: TargetFilter) -> Self {
        Self {
            target_type,
            filter: Some(filter),
        }
    }

    #[must_use]
    pub fn needs_target(&self) -> bool {
        self.target_type != TargetType::None
    }
}

/// Resolves a [`TargetSpec`] for one acting player.
#[derive(Clone, Copy, Debug)]
pub struct TargetSelector {
    spec: TargetSpec,
    actor: PlayerId,
    player_count: usize,
}

impl TargetSelector {
    #[must_use]
    pub fn new(spec: TargetSpec, actor: PlayerId, player_count: usize) -> Self {
        Self {
            spec,
            actor,
            player_count,
        }
    }

    /// Every legal target, in deterministic order (players by seat, cells
    /// row-major).
    #[must_use]
    pub fn valid_targets(&self, board: &Board) -> Vec<Target> {
        let actor = self.actor;
        let Some(filter) = self.spec.filter else {
            return Vec::new();
        };

        let mut out = Vec::new();
        match filter {
            TargetFilter::Opponents => {
                out.extend(
                    PlayerId::all(self.player_count)
                        .filter(|&p| p != actor)
                        .map(Target::Player),
                );
            }
            TargetFilter::OwnTiles => {
                out.extend(board.owned_tiles(actor).into_iter().map(Target::Cell));
            }
            TargetFilter::OpponentTiles => {
                out.extend(
                    board
                        .tiles()
                        .into_iter()
                        .filter(|(_, t)| t.owner.is_some_and(|o| o != actor))
                        .map(|(p, _)| Target::Cell(p)),
                );
            }
            TargetFilter::OpponentTilesAdjacentToOwn => {
                out.extend(
                    board
                        .tiles()
                        .into_iter()
                        .filter(|(_, t)| t.owner.is_some_and(|o| o != actor))
                        .filter(|(p, _)| touches_own_tile(board, *p, actor))
                        .map(|(p, _)| Target::Cell(p)),
                );
            }
            TargetFilter::OpponentTilesInAgentReach => {
                out.extend(
                    board
                        .tiles()
                        .into_iter()
                        .filter(|(_, t)| t.owner.is_some_and(|o| o != actor))
                        .filter(|(p, _)| board.adjacent_agents(*p, actor) > 0)
                        .map(|(p, _)| Target::Cell(p)),
                );
            }
            TargetFilter::OwnHeadquarters => {
                out.extend(
                    board
                        .landmarks_of(actor)
                        .into_iter()
                        .filter(|l| l.is_hq)
                        .map(|l| Target::Cell(l.anchor)),
                );
            }
            TargetFilter::AdjacentOpponentLandmarks => {
                out.extend(
                    board
                        .landmarks()
                        .into_iter()
                        .filter(|l| l.owner != actor)
                        .filter(|l| {
                            l.anchor.neighbors(board.size()).into_iter().any(|n| {
                                board.tile(n).is_some_and(|t| t.is_owned_by(actor))
                                    || board.landmark(n).is_some_and(|m| m.owner == actor)
                            })
                        })
                        .map(|l| Target::Cell(l.anchor)),
                );
            }
            TargetFilter::OpponentAgents => {
                for (pos, stack) in board.agent_stacks() {
                    let mut owners: Vec<_> = stack.owners().into_iter().filter(|&o| o != actor).collect();
                    owners.sort_unstable();
                    out.extend(owners.into_iter().map(|owner| Target::Agent { pos, owner }));
                }
            }
            TargetFilter::EmptyCells => {
                out.extend(
                    Position::all(board.size())
                        .filter(|&p| !board.is_occupied(p))
                        .map(Target::Cell),
                );
            }
        }

        // A filter only makes sense for its own entity kind.
        out.retain(|t| {
            matches!(
                (self.spec.target_type, t),
                (TargetType::Player, Target::Player(_))
                    | (TargetType::Cell, Target::Cell(_))
                    | (TargetType::Agent, Target::Agent { .. })
            )
        });
        out
    }

    /// Check a chosen target against the spec.
    pub fn validate(&self, board: &Board, target: Option<Target>) -> Result<(), RuleViolation> {
        match (self.spec.needs_target(), target) {
            (false, _) => Ok(()),
            (true, None) => Err(RuleViolation::MissingTarget("this card needs a target")),
            (true, Some(t)) => {
                if self.valid_targets(board).contains(&t) {
                    Ok(())
                } else {
                    Err(RuleViolation::InvalidTarget("not a legal target for this card"))
                }
            }
        }
    }
}

fn touches_own_tile(board: &Board, pos: Position, player: PlayerId) -> bool {
    pos.neighbors(board.size())
        .into_iter()
        .any(|n| board.tile(n).is_some_and(|t| t.is_owned_by(player)))
}
