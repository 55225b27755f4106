//! Turn flow: placement, landmarks, headquarters, phases and turn end.

use tracing::{debug, info, instrument};

use super::controller::Game;
use crate::core::{ActionError, DrawMode, PlayerId, Position, RuleViolation, StoreError, TurnModel};
use crate::rules::{check_combo_placement, check_placement, can_continue, detect_after_placement, detect_for_player, detect_from, TrinityProposal};
use crate::store::Phase;

/// What a tile placement led to.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlacementOutcome {
    /// Anchors of landmarks formed automatically.
    pub formed: Vec<Position>,
    /// Landmarks the player may now form (when auto-forming is off).
    pub proposals: Vec<TrinityProposal>,
    /// The placement used up a Simple turn and play passed on.
    pub turn_ended: bool,
}

impl Game {
    /// Place the tile at `hand_index` of `player`'s hand on `pos`.
    ///
    /// After the turn's first tile, combo rules (if enabled) apply. A Simple
    /// turn ends by itself once no further placement is possible.
    #[instrument(skip(self))]
    pub fn place_tile(
        &mut self,
        player: PlayerId,
        hand_index: usize,
        pos: Position,
    ) -> Result<PlacementOutcome, ActionError> {
        self.ensure_turn(player)?;
        let phase = self.phase();
        if !phase.allows_placement() {
            return Err(RuleViolation::WrongPhase(phase).into());
        }
        let state = self.store.player(player).ok_or(StoreError::UnknownPlayer(player))?;
        let tile = *state
            .hand
            .get(hand_index)
            .ok_or(RuleViolation::NoSuchHandTile(hand_index))?;
        let mut flags = state.flags;
        let ignore = flags.ignore_adjacency;

        let combo = self.next_placement_is_combo()?;
        let board = self.store.board();
        let count = self.store.player_count();
        if combo {
            check_combo_placement(board, count, player, pos, tile.tile_type, ignore)?;
        } else {
            check_placement(board, count, player, pos, ignore)?;
        }

        let (formed, proposals) = self.transact(|g| {
            let tile = g.store.take_from_hand(player, hand_index)?;
            g.store.place_tile(pos, tile)?;
            g.store.count_placement(player, combo);
            if ignore {
                flags.ignore_adjacency = false;
                g.store.set_flags(player, flags)?;
            }
            if g.config.auto_form_landmarks {
                Ok((g.auto_form(player, Some(pos))?, Vec::new()))
            } else {
                let proposals = detect_after_placement(g.store.board(), pos)
                    .into_iter()
                    .filter(|p| p.owner == player)
                    .collect();
                Ok((Vec::new(), proposals))
            }
        })?;
        debug!(%pos, tile = %tile.tile_type, combo, "tile placed");

        let turn_ended = self.config.turn_model == TurnModel::Simple && self.placements_exhausted(player);
        if turn_ended {
            self.end_turn_with_draw(player)?;
        }
        self.check_win();
        Ok(PlacementOutcome {
            formed,
            proposals,
            turn_ended,
        })
    }

    /// Form a landmark the player was offered after a placement.
    #[instrument(skip(self))]
    pub fn form_landmark(&mut self, player: PlayerId, proposal: TrinityProposal) -> Result<(), ActionError> {
        self.ensure_turn(player)?;
        let phase = self.phase();
        if !phase.allows_placement() {
            return Err(RuleViolation::WrongPhase(phase).into());
        }
        let anchor = proposal.anchor();
        if proposal.owner != player {
            return Err(RuleViolation::NotOwnTile(anchor).into());
        }
        if !detect_from(self.store.board(), anchor).contains(&proposal) {
            return Err(RuleViolation::NotATrinity(anchor).into());
        }
        self.transact(|g| Ok(g.form(proposal)?))?;
        self.check_win();
        Ok(())
    }

    /// Turn `player`'s landmark at `pos` into a headquarters. Returns the
    /// number of agents spawned there.
    #[instrument(skip(self))]
    pub fn establish_headquarters(&mut self, player: PlayerId, pos: Position) -> Result<u32, ActionError> {
        self.ensure_turn(player)?;
        let phase = self.phase();
        if !phase.allows_placement() {
            return Err(RuleViolation::WrongPhase(phase).into());
        }
        let landmark = self
            .store
            .board()
            .landmark(pos)
            .ok_or(RuleViolation::NoLandmarkAt(pos))?;
        if landmark.owner != player {
            return Err(RuleViolation::NotOwnLandmark(pos).into());
        }
        if landmark.is_hq {
            return Err(RuleViolation::AlreadyHeadquarters(pos).into());
        }
        let cap = self.config.max_headquarters;
        if self.store.player(player).is_some_and(|p| p.headquarters >= cap) {
            return Err(RuleViolation::HeadquartersCapReached(cap).into());
        }

        let spawn = self.config.agents.hq_spawn;
        let spawned = self.transact(|g| Ok(g.store.convert_to_hq(pos, player, spawn)?))?;
        self.check_win();
        Ok(spawned)
    }

    /// Move a Classic turn on to its next phase. Leaving `End` passes the
    /// turn. Returns the phase now in effect.
    #[instrument(skip(self))]
    pub fn advance_phase(&mut self, player: PlayerId) -> Result<Phase, ActionError> {
        self.ensure_turn(player)?;
        let phase = self.phase();
        if self.config.turn_model == TurnModel::Simple {
            return Err(RuleViolation::WrongPhase(phase).into());
        }

        match phase {
            Phase::Draw | Phase::Develop | Phase::Agent => {
                if phase == Phase::Draw {
                    self.start_of_turn_draw(player)?;
                }
                let skip = phase == Phase::Develop && self.take_skip_flag(player)?;
                let next = if skip { None } else { phase.next() };
                self.store.set_phase(next.unwrap_or(Phase::End));
            }
            Phase::End => {
                self.store.enforce_hand_limit(player, self.config.hand_size)?;
                self.pass_turn();
            }
            Phase::Play => return Err(RuleViolation::WrongPhase(phase).into()),
        }
        self.check_win();
        Ok(self.phase())
    }

    /// Skip this turn's Agent phase (Classic turns). From the Agent phase
    /// itself this jumps straight to End.
    #[instrument(skip(self))]
    pub fn skip_agent_phase(&mut self, player: PlayerId) -> Result<(), ActionError> {
        self.ensure_turn(player)?;
        let phase = self.phase();
        match (self.config.turn_model, phase) {
            (TurnModel::Classic, Phase::Agent) => self.store.set_phase(Phase::End),
            (TurnModel::Classic, Phase::Draw | Phase::Develop) => {
                let mut flags = self.store.player(player).map(|p| p.flags).unwrap_or_default();
                flags.skip_next_phase = true;
                self.store.set_flags(player, flags)?;
            }
            _ => return Err(RuleViolation::WrongPhase(phase).into()),
        }
        Ok(())
    }

    /// Stop acting this turn. A Simple turn ends with the usual draw; a
    /// Classic turn jumps to its End phase.
    #[instrument(skip(self))]
    pub fn finish_turn(&mut self, player: PlayerId) -> Result<(), ActionError> {
        self.ensure_turn(player)?;
        match self.config.turn_model {
            TurnModel::Simple => self.end_turn_with_draw(player)?,
            TurnModel::Classic => {
                if self.phase() != Phase::End {
                    self.store.set_phase(Phase::End);
                }
            }
        }
        self.check_win();
        Ok(())
    }

    /// Tiles `player` would draw at the end of a Simple turn.
    ///
    /// One, plus one per non-HQ landmark, plus one more for having the
    /// fewest non-HQ landmarks at the table (ties included). In refill mode,
    /// enough to fill the hand.
    #[must_use]
    pub fn draw_count(&self, player: PlayerId) -> usize {
        let Some(state) = self.store.player(player) else {
            return 0;
        };
        match self.config.draw_mode {
            DrawMode::Refill => self.config.hand_size.saturating_sub(state.hand.len()),
            DrawMode::Landmarks => {
                let plain = state.plain_landmarks();
                let fewest = self
                    .store
                    .players()
                    .values()
                    .map(|p| p.plain_landmarks())
                    .min()
                    .unwrap_or(0);
                1 + plain as usize + usize::from(plain == fewest)
            }
        }
    }

    /// Whether the next placement this turn is a combo placement, or an
    /// error if the turn has no placements left.
    fn next_placement_is_combo(&self) -> Result<bool, RuleViolation> {
        let turn = self.store.turn();
        let combo = self.config.combo;
        if combo.enabled {
            if turn.tiles_placed == 0 {
                Ok(false)
            } else if turn.combo_chain < combo.max_chain {
                Ok(true)
            } else {
                Err(RuleViolation::PlacementLimitReached)
            }
        } else if turn.tiles_placed < self.config.placements_per_turn {
            Ok(false)
        } else {
            Err(RuleViolation::PlacementLimitReached)
        }
    }

    fn placements_exhausted(&self, player: PlayerId) -> bool {
        let Some(state) = self.store.player(player) else {
            return true;
        };
        if state.hand.is_empty() {
            return true;
        }
        let turn = self.store.turn();
        let combo = self.config.combo;
        if combo.enabled {
            turn.combo_chain >= combo.max_chain
                || !can_continue(self.store.board(), self.store.player_count(), player, &state.hand)
        } else {
            turn.tiles_placed >= self.config.placements_per_turn
        }
    }

    /// Clear a pending Agent-phase skip. Returns whether one was set.
    fn take_skip_flag(&mut self, player: PlayerId) -> Result<bool, StoreError> {
        let mut flags = self.store.player(player).map(|p| p.flags).unwrap_or_default();
        if !flags.skip_next_phase {
            return Ok(false);
        }
        flags.skip_next_phase = false;
        self.store.set_flags(player, flags)?;
        Ok(true)
    }

    /// Form detected landmarks for `player` one at a time, re-detecting
    /// after each. With `near`, only landmarks around that cell are looked
    /// for. Returns the anchors formed.
    pub(super) fn auto_form(&mut self, player: PlayerId, near: Option<Position>) -> Result<Vec<Position>, StoreError> {
        let mut formed = Vec::new();
        loop {
            let board = self.store.board();
            let next = match near {
                Some(pos) => detect_after_placement(board, pos)
                    .into_iter()
                    .find(|p| p.owner == player),
                None => detect_for_player(board, player).into_iter().next(),
            };
            let Some(proposal) = next else { break };
            self.form(proposal)?;
            formed.push(proposal.anchor());
        }
        Ok(formed)
    }

    /// Form one landmark and draw its event cards.
    fn form(&mut self, proposal: TrinityProposal) -> Result<(), StoreError> {
        let owner = proposal.owner;
        self.store.form_landmark(proposal.anchor(), proposal.positions())?;
        for _ in 0..self.config.events_per_landmark {
            if self.store.draw_event(owner)?.is_none() {
                break;
            }
            self.revealed = true;
        }
        self.store.enforce_event_limit(owner, self.config.event_hand_size)?;
        Ok(())
    }

    /// Leaving a Classic Draw phase: every HQ spawns agents, then one tile
    /// is dealt.
    fn start_of_turn_draw(&mut self, player: PlayerId) -> Result<(), StoreError> {
        let per_hq = self.config.agents.draw_spawn_per_hq;
        let hqs: Vec<Position> = self
            .store
            .board()
            .landmarks_of(player)
            .into_iter()
            .filter(|l| l.is_hq)
            .map(|l| l.anchor)
            .collect();
        for pos in hqs {
            for _ in 0..per_hq {
                if self.store.board().agents_on_board(player) >= self.store.agent_cap() {
                    break;
                }
                self.store.place_agent(pos, player)?;
            }
        }
        self.store.draw_tile(player)?;
        self.store.enforce_hand_limit(player, self.config.hand_size)?;
        // the drawn tile cannot be taken back
        self.store.clear_history();
        Ok(())
    }

    fn end_turn_with_draw(&mut self, player: PlayerId) -> Result<(), StoreError> {
        let count = self.draw_count(player);
        let mut drawn = 0;
        while drawn < count && self.store.draw_tile(player)?.is_some() {
            drawn += 1;
        }
        self.store.enforce_hand_limit(player, self.config.hand_size)?;
        debug!(%player, drawn, "end of turn draw");
        self.pass_turn();
        Ok(())
    }

    fn pass_turn(&mut self) {
        self.store.end_turn();
        self.store.clear_history();
        info!(player = %self.current_player(), turn = self.turn().number, "turn passed");
    }
}
