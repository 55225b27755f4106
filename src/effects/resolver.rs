//! Effect resolution - executing event cards on game state.
//!
//! Resolution happens in two steps. [`validate`] checks the card, its
//! target and any extra arguments against the current state and turns them
//! into a [`Plan`] holding only concrete positions and players. [`apply`]
//! then carries the plan out through the store. Because every rule check
//! happens in the first step, the second one can only fail on a store
//! contract violation.
//!
//! Consuming the card, counting it against the per-turn limit and announcing
//! it are the controller's job; this module only knows about effects.

use serde::{Deserialize, Serialize};

use super::effect::{CardEffect, EffectOutcome};
use super::targeting::{Target, TargetSelector};
use crate::board::TileType;
use crate::cards::EventCardDefinition;
use crate::core::{PlayerId, Position, RuleConfig, RuleViolation, StoreError};
use crate::store::StateStore;
use crate::triggers::GameEvent;

/// Player choices accompanying an event card.
///
/// Which fields matter depends on the effect: `target` for anything aimed,
/// `destination` for swaps and moves, `tile_type` for retyping, `order` for
/// reordering the draw pile.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayArgs {
    pub target: Option<Target>,
    pub destination: Option<Position>,
    pub tile_type: Option<TileType>,
    pub order: Vec<usize>,
}

impl PlayArgs {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Args aimed at `target`.
    #[must_use]
    pub fn targeting(target: Target) -> Self {
        Self::new().with_target(target)
    }

    #[must_use]
    pub fn with_target(mut self, target: Target) -> Self {
        self.target = Some(target);
        self
    }

    #[must_use]
    pub fn with_destination(mut self, pos: Position) -> Self {
        self.destination = Some(pos);
        self
    }

    #[must_use]
    pub fn with_tile_type(mut self, tile_type: TileType) -> Self {
        self.tile_type = Some(tile_type);
        self
    }

    #[must_use]
    pub fn with_order(mut self, order: impl Into<Vec<usize>>) -> Self {
        self.order = order.into();
        self
    }
}

/// A validated effect with every argument resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Plan {
    DrawTiles(usize),
    DrawEvents(usize),
    ForceDiscard { victim: PlayerId, count: usize },
    ReturnTile(Position),
    RemoveTile(Position),
    TakeOwnership(Position),
    Capture(Position),
    SwapTiles { theirs: Position, ours: Position },
    MoveTile { from: Position, to: Position },
    Retype { pos: Position, to: TileType },
    IgnoreAdjacency,
    SpawnAgents { pos: Position, count: u32 },
    MoveAgent { from: Position, to: Position, owner: PlayerId },
    Peek(usize),
    Reorder(Vec<usize>),
    ViewHand(PlayerId),
}

impl Plan {
    /// Carrying out this plan shows the player cards they could not see
    /// before.
    #[must_use]
    pub fn reveals_hidden(&self) -> bool {
        matches!(
            self,
            Plan::DrawTiles(_) | Plan::DrawEvents(_) | Plan::Peek(_) | Plan::Reorder(_) | Plan::ViewHand(_)
        )
    }
}

/// Check that `player` may play `card` with `args` right now.
///
/// Turn, phase and per-turn limits are not checked here.
pub fn validate(
    store: &StateStore,
    player: PlayerId,
    card: &EventCardDefinition,
    args: &PlayArgs,
) -> Result<Plan, RuleViolation> {
    if card.is_reactive() || card.effect == CardEffect::Insurance {
        return Err(RuleViolation::ReactiveOnly);
    }

    let board = store.board();
    TargetSelector::new(card.target, player, store.player_count()).validate(board, args.target)?;

    let plan = match card.effect {
        CardEffect::DrawTiles { count } => Plan::DrawTiles(count),
        CardEffect::DrawEvents { count } => Plan::DrawEvents(count),
        CardEffect::ForceDiscard { count } => Plan::ForceDiscard {
            victim: target_player(args)?,
            count,
        },
        CardEffect::ReturnTile => Plan::ReturnTile(target_cell(args)?),
        CardEffect::RemoveTile => Plan::RemoveTile(target_cell(args)?),
        CardEffect::StealTile => Plan::TakeOwnership(target_cell(args)?),
        CardEffect::FreeCapture => Plan::Capture(target_cell(args)?),
        CardEffect::SwapTiles => {
            let theirs = target_cell(args)?;
            let ours = args
                .destination
                .ok_or(RuleViolation::MissingTarget("choose one of your tiles to swap"))?;
            if !board.tile(ours).is_some_and(|t| t.is_owned_by(player)) {
                return Err(RuleViolation::NotOwnTile(ours));
            }
            Plan::SwapTiles { theirs, ours }
        }
        CardEffect::MoveTile => {
            let from = target_cell(args)?;
            let to = args
                .destination
                .ok_or(RuleViolation::MissingTarget("choose where to move the tile"))?;
            if !board.in_bounds(to) {
                return Err(RuleViolation::OutOfBounds(to));
            }
            if board.is_occupied(to) {
                return Err(RuleViolation::Occupied(to));
            }
            let anchored = to
                .neighbors(board.size())
                .into_iter()
                .any(|n| n != from && board.tile(n).is_some_and(|t| t.is_owned_by(player)));
            if !anchored {
                return Err(RuleViolation::NotAdjacent(to));
            }
            Plan::MoveTile { from, to }
        }
        CardEffect::RetypeOwnTile | CardEffect::RetypeOpponentTile => {
            let pos = target_cell(args)?;
            let to = args
                .tile_type
                .ok_or(RuleViolation::MissingTarget("choose a new tile type"))?;
            if board.tile(pos).is_some_and(|t| t.tile_type == to) {
                return Err(RuleViolation::InvalidTarget("tile already has that type"));
            }
            Plan::Retype { pos, to }
        }
        CardEffect::IgnoreAdjacency => Plan::IgnoreAdjacency,
        CardEffect::SpawnAgent { count } => {
            let pos = target_cell(args)?;
            let cap = store.agent_cap();
            if board.agents_on_board(player) + count > cap {
                return Err(RuleViolation::AgentCapReached(cap));
            }
            Plan::SpawnAgents { pos, count }
        }
        CardEffect::MoveOpponentAgent => {
            let Some(Target::Agent { pos: from, owner }) = args.target else {
                return Err(RuleViolation::MissingTarget("choose an opponent agent"));
            };
            let to = args
                .destination
                .ok_or(RuleViolation::MissingTarget("choose where to push the agent"))?;
            if !board.in_bounds(to) {
                return Err(RuleViolation::OutOfBounds(to));
            }
            if !from.is_adjacent(to) {
                return Err(RuleViolation::NotAdjacentCells { from, to });
            }
            Plan::MoveAgent { from, to, owner }
        }
        CardEffect::PeekDrawPile { count } => Plan::Peek(count),
        CardEffect::ReorderDrawPile { count } => {
            let pile = store.draw_pile();
            if pile.is_empty() {
                return Err(RuleViolation::EmptyPile);
            }
            let n = count.min(pile.len());
            if !is_permutation(&args.order, n) {
                return Err(RuleViolation::InvalidOrder(n));
            }
            Plan::Reorder(args.order.clone())
        }
        CardEffect::ViewHand => Plan::ViewHand(target_player(args)?),
        CardEffect::Insurance => return Err(RuleViolation::ReactiveOnly),
    };
    Ok(plan)
}

/// Carry out a validated plan for `player`.
pub fn apply(
    store: &mut StateStore,
    config: &RuleConfig,
    player: PlayerId,
    plan: Plan,
) -> Result<EffectOutcome, StoreError> {
    let outcome = match plan {
        Plan::DrawTiles(count) => {
            let mut drawn = 0;
            while drawn < count && store.draw_tile(player)?.is_some() {
                drawn += 1;
            }
            store.enforce_hand_limit(player, config.hand_size)?;
            EffectOutcome::TilesDrawn(drawn)
        }
        Plan::DrawEvents(count) => {
            let mut drawn = 0;
            while drawn < count && store.draw_event(player)?.is_some() {
                drawn += 1;
            }
            store.enforce_event_limit(player, config.event_hand_size)?;
            EffectOutcome::EventsDrawn(drawn)
        }
        Plan::ForceDiscard { victim, count } => {
            let held = store.player(victim).map_or(0, |p| p.hand.len());
            let tiles = store.enforce_hand_limit(victim, held.saturating_sub(count))?;
            EffectOutcome::Discarded { player: victim, tiles }
        }
        Plan::ReturnTile(pos) => {
            let tile = store.remove_tile(pos).ok_or(StoreError::NoTile(pos))?;
            store.add_to_hand(player, tile)?;
            store.enforce_hand_limit(player, config.hand_size)?;
            EffectOutcome::Applied
        }
        Plan::RemoveTile(pos) => {
            store.remove_tile(pos).ok_or(StoreError::NoTile(pos))?;
            EffectOutcome::Applied
        }
        Plan::TakeOwnership(pos) => {
            store.set_tile_owner(pos, player)?;
            EffectOutcome::Applied
        }
        Plan::Capture(pos) => {
            let defender = store
                .board()
                .tile(pos)
                .ok_or(StoreError::NoTile(pos))?
                .owner
                .ok_or(StoreError::OwnerlessTile(pos))?;
            let mut defenders_lost = 0;
            loop {
                match store.remove_agent(pos, defender) {
                    Ok(()) => defenders_lost += 1,
                    Err(StoreError::NoAgent { .. }) => break,
                    Err(err) => return Err(err),
                }
            }
            store.set_tile_owner(pos, player)?;
            store.publish(GameEvent::TileCaptured {
                pos,
                attacker: player,
                defender,
                attackers_spent: 0,
                defenders_lost,
            });
            EffectOutcome::Captured { defender, defenders_lost }
        }
        Plan::SwapTiles { theirs, ours } => {
            let their_tile = store.remove_tile(theirs).ok_or(StoreError::NoTile(theirs))?;
            let our_tile = store.remove_tile(ours).ok_or(StoreError::NoTile(ours))?;
            store.place_tile(theirs, our_tile)?;
            store.place_tile(ours, their_tile)?;
            EffectOutcome::Applied
        }
        Plan::MoveTile { from, to } => {
            let tile = store.remove_tile(from).ok_or(StoreError::NoTile(from))?;
            store.place_tile(to, tile)?;
            EffectOutcome::Applied
        }
        Plan::Retype { pos, to } => {
            store.set_tile_type(pos, to)?;
            EffectOutcome::Applied
        }
        Plan::IgnoreAdjacency => {
            let mut flags = store.player(player).map(|p| p.flags).unwrap_or_default();
            flags.ignore_adjacency = true;
            store.set_flags(player, flags)?;
            EffectOutcome::Applied
        }
        Plan::SpawnAgents { pos, count } => {
            for _ in 0..count {
                store.place_agent(pos, player)?;
            }
            EffectOutcome::AgentsSpawned(count)
        }
        Plan::MoveAgent { from, to, owner } => {
            store.move_agent(from, to, owner)?;
            EffectOutcome::Applied
        }
        Plan::Peek(count) => EffectOutcome::Peeked(store.peek_draw_pile(count)),
        Plan::Reorder(order) => {
            store.reorder_draw_pile(&order)?;
            EffectOutcome::Applied
        }
        Plan::ViewHand(victim) => EffectOutcome::HandRevealed {
            player: victim,
            tiles: store.player(victim).map(|p| p.hand.clone()).unwrap_or_default(),
        },
    };
    Ok(outcome)
}

fn target_cell(args: &PlayArgs) -> Result<Position, RuleViolation> {
    match args.target {
        Some(Target::Cell(pos)) => Ok(pos),
        _ => Err(RuleViolation::MissingTarget("this card needs a cell")),
    }
}

fn target_player(args: &PlayArgs) -> Result<PlayerId, RuleViolation> {
    match args.target {
        Some(Target::Player(p)) => Ok(p),
        _ => Err(RuleViolation::MissingTarget("this card needs a player")),
    }
}

fn is_permutation(order: &[usize], n: usize) -> bool {
    let mut sorted = order.to_vec();
    sorted.sort_unstable();
    sorted.len() == n && sorted.iter().enumerate().all(|(i, &v)| i == v)
}
