//! Agents: movement, landmark takeovers, tile capture and reposition.

use tracing::{info, instrument};

use super::controller::Game;
use crate::core::{ActionError, PlayerId, Position, RuleViolation, StoreError};
use crate::triggers::{find_responder, GameEvent, ReactiveTrigger};

/// Result of a landmark takeover. Takeovers always settle: the landmark and
/// every agent on it are destroyed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TakeoverOutcome {
    pub defender: PlayerId,
    pub attackers_lost: u32,
    pub defenders_lost: u32,
    /// The attacking stack met `capture_threshold`.
    pub reached_capture: bool,
    /// The defender's insurance returned the folded tiles.
    pub insured: bool,
}

impl Game {
    fn ensure_agent_phase(&self) -> Result<(), RuleViolation> {
        let phase = self.phase();
        if phase.allows_agents() {
            Ok(())
        } else {
            Err(RuleViolation::WrongPhase(phase))
        }
    }

    /// Move one of `player`'s agents to an orthogonally adjacent cell.
    #[instrument(skip(self))]
    pub fn move_agent(&mut self, player: PlayerId, from: Position, to: Position) -> Result<(), ActionError> {
        self.ensure_turn(player)?;
        self.ensure_agent_phase()?;
        if self.turn().agent_moves >= self.config.agents.moves_per_turn {
            return Err(RuleViolation::AgentMovesExhausted.into());
        }
        let board = self.store.board();
        for pos in [from, to] {
            if !board.in_bounds(pos) {
                return Err(RuleViolation::OutOfBounds(pos).into());
            }
        }
        if !from.is_adjacent(to) {
            return Err(RuleViolation::NotAdjacentCells { from, to }.into());
        }
        if board.agent_count_at(from, player) == 0 {
            return Err(RuleViolation::NoAgentInRange(from).into());
        }

        self.transact(|g| {
            g.store.move_agent(from, to, player)?;
            g.store.count_agent_move();
            Ok(())
        })
    }

    /// Attack the enemy landmark at `pos` with the agents stacked on it.
    ///
    /// Needs `contest_threshold` attacking agents. The landmark is removed
    /// along with every agent on its cell; ownership never changes hands. If
    /// the defender holds an insurance card it is spent and the three folded
    /// tiles go back to their hand.
    #[instrument(skip(self))]
    pub fn attempt_takeover(&mut self, attacker: PlayerId, pos: Position) -> Result<TakeoverOutcome, ActionError> {
        self.ensure_turn(attacker)?;
        self.ensure_agent_phase()?;
        let board = self.store.board();
        let landmark = board.landmark(pos).ok_or(RuleViolation::NoLandmarkAt(pos))?.clone();
        if landmark.owner == attacker {
            return Err(RuleViolation::OwnLandmark(pos).into());
        }
        let rules = self.config.agents;
        let attackers = board.agent_count_at(pos, attacker);
        if attackers < rules.contest_threshold {
            return Err(RuleViolation::InsufficientAgents {
                required: rules.contest_threshold,
                available: attackers,
            }
            .into());
        }
        let defender = landmark.owner;
        let insurance = self
            .store
            .player(defender)
            .and_then(|p| find_responder(&self.catalog, &p.events, ReactiveTrigger::OnLandmarkLost));

        let outcome = self.transact(|g| {
            if let Some(index) = insurance {
                let card = g.store.take_event(defender, index)?;
                for tile in landmark.released_tiles(defender) {
                    g.store.add_to_hand(defender, tile)?;
                }
                g.store.enforce_hand_limit(defender, g.config.hand_size)?;
                g.store.publish(GameEvent::EventPlayed { player: defender, card });
            }

            let removed = g.store.clear_agents(pos)?;
            g.store.remove_landmark(pos).ok_or(StoreError::NoLandmark(pos))?;
            let outcome = TakeoverOutcome {
                defender,
                attackers_lost: removed.count_for(attacker),
                defenders_lost: removed.count_except(attacker),
                reached_capture: attackers >= rules.capture_threshold,
                insured: insurance.is_some(),
            };
            g.store.publish(GameEvent::LandmarkCaptured {
                anchor: pos,
                attacker,
                defender,
                attackers_lost: outcome.attackers_lost,
                defenders_lost: outcome.defenders_lost,
                reached_capture: outcome.reached_capture,
                insured: outcome.insured,
            });
            Ok(outcome)
        })?;
        info!(%pos, %attacker, %defender, insured = outcome.insured, "landmark settled");
        self.check_win();
        Ok(outcome)
    }

    /// Take over the enemy tile at `pos` with agents on adjacent cells.
    ///
    /// Costs `1 + d` of the attacker's adjacent agents, where `d` is the
    /// number of the owner's agents on the tile; those `d` are lost too.
    /// Returns the number of attacking agents spent.
    #[instrument(skip(self))]
    pub fn capture_tile(&mut self, attacker: PlayerId, pos: Position) -> Result<u32, ActionError> {
        self.ensure_turn(attacker)?;
        self.ensure_agent_phase()?;
        let board = self.store.board();
        let tile = board.tile(pos).ok_or(RuleViolation::NoTileAt(pos))?;
        let defender = tile.owner.ok_or(StoreError::OwnerlessTile(pos))?;
        if defender == attacker {
            return Err(RuleViolation::OwnTile(pos).into());
        }
        let defenders = board.agent_count_at(pos, defender);
        let required = 1 + defenders;
        let available = board.adjacent_agents(pos, attacker);
        if available < required {
            return Err(RuleViolation::InsufficientAgents { required, available }.into());
        }
        let neighbors = pos.neighbors(board.size());

        self.transact(|g| {
            let mut remaining = required;
            for n in neighbors {
                while remaining > 0 {
                    match g.store.remove_agent(n, attacker) {
                        Ok(()) => remaining -= 1,
                        Err(StoreError::NoAgent { .. }) => break,
                        Err(err) => return Err(err.into()),
                    }
                }
            }
            for _ in 0..defenders {
                g.store.remove_agent(pos, defender)?;
            }
            g.store.set_tile_owner(pos, attacker)?;
            g.store.publish(GameEvent::TileCaptured {
                pos,
                attacker,
                defender,
                attackers_spent: required,
                defenders_lost: defenders,
            });
            if g.config.auto_form_landmarks {
                g.auto_form(attacker, Some(pos))?;
            }
            Ok(())
        })?;
        info!(%pos, %attacker, %defender, "tile captured");
        self.check_win();
        Ok(required)
    }

    /// Spend one agent on or next to the own tile at `pos` to return the
    /// tile to hand.
    #[instrument(skip(self))]
    pub fn reposition(&mut self, player: PlayerId, pos: Position) -> Result<(), ActionError> {
        self.ensure_turn(player)?;
        self.ensure_agent_phase()?;
        let board = self.store.board();
        let tile = board.tile(pos).ok_or(RuleViolation::NoTileAt(pos))?;
        if !tile.is_owned_by(player) {
            return Err(RuleViolation::NotOwnTile(pos).into());
        }
        let source = std::iter::once(pos)
            .chain(pos.neighbors(board.size()))
            .find(|&cell| board.agent_count_at(cell, player) > 0)
            .ok_or(RuleViolation::NoAgentInRange(pos))?;

        self.transact(|g| {
            g.store.remove_agent(source, player)?;
            let tile = g.store.remove_tile(pos).ok_or(StoreError::NoTile(pos))?;
            g.store.add_to_hand(player, tile)?;
            g.store.enforce_hand_limit(player, g.config.hand_size)?;
            Ok(())
        })?;
        self.check_win();
        Ok(())
    }
}
