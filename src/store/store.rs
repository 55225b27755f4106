//! The state store.
//!
//! [`StateStore`] is the only owner of mutable game data: players, board,
//! piles, and the current turn. Every public mutator checks its
//! preconditions first, applies the change, and then publishes exactly one
//! [`GameEvent`]. On failure it returns a [`StoreError`] and leaves the data
//! untouched. `end_turn` is the one exception to the single-event rule; it
//! announces the turn ending, the next turn starting, and the seat change.
//!
//! Undo history is a bounded window of whole-state snapshots. The board and
//! piles are persistent structures, so a snapshot shares almost everything
//! with the live state.

use std::collections::VecDeque;

use tracing::{debug, info, warn};

use super::player::{Player, PlayerFlags};
use super::save::SaveData;
use super::turn::{Phase, Turn};
use crate::board::{AgentStack, Board, Landmark, Pile, Tile, TileType};
use crate::cards::EventCard;
use crate::core::{PlayerId, PlayerMap, Position, RuleConfig, StoreError, TurnModel};
use crate::triggers::{EventBus, GameEvent, SubscriptionId};

/// Everything undo restores and save captures.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct GameData {
    pub(crate) players: PlayerMap<Player>,
    pub(crate) board: Board,
    pub(crate) draw_pile: Pile<Tile>,
    pub(crate) event_pile: Pile<EventCard>,
    pub(crate) turn: Turn,
}

/// Canonical game state plus its undo history and event feed.
#[derive(Debug)]
pub struct StateStore {
    data: GameData,
    history: VecDeque<GameData>,
    turn_model: TurnModel,
    agent_cap: u32,
    hq_cap: u32,
    undo_capacity: usize,
    bus: EventBus,
}

impl StateStore {
    /// Empty store: empty hands, board, and piles; seat 0 to act on turn 1.
    #[must_use]
    pub fn new(config: &RuleConfig) -> Self {
        Self {
            data: GameData {
                players: PlayerMap::new(config.player_count, Player::new),
                board: Board::new(config.board_size),
                draw_pile: Pile::new(),
                event_pile: Pile::new(),
                turn: Turn::new(PlayerId::new(0), config.turn_model),
            },
            history: VecDeque::new(),
            turn_model: config.turn_model,
            agent_cap: config.agents.max_per_player,
            hq_cap: config.max_headquarters,
            undo_capacity: config.undo_capacity.max(1),
            bus: EventBus::new(),
        }
    }

    // === Read access ===

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.players.player_count()
    }

    #[must_use]
    pub fn players(&self) -> &PlayerMap<Player> {
        &self.data.players
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.data.players.get(id)
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.data.board
    }

    #[must_use]
    pub fn draw_pile(&self) -> &Pile<Tile> {
        &self.data.draw_pile
    }

    #[must_use]
    pub fn event_pile(&self) -> &Pile<EventCard> {
        &self.data.event_pile
    }

    #[must_use]
    pub fn turn(&self) -> &Turn {
        &self.data.turn
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.data.turn.current
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.data.turn.phase
    }

    #[must_use]
    pub fn agent_cap(&self) -> u32 {
        self.agent_cap
    }

    /// Snapshots currently held for undo.
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Copies of the top `n` draw-pile tiles, topmost first.
    #[must_use]
    pub fn peek_draw_pile(&self, n: usize) -> Vec<Tile> {
        self.data.draw_pile.peek(n)
    }

    // === Event feed ===

    /// Register a listener. See [`EventBus`] for the delivery contract.
    pub fn subscribe(&mut self, listener: impl FnMut(&GameEvent) + 'static) -> SubscriptionId {
        self.bus.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    /// Announce a composite event (draw-off, captures) through the same feed.
    pub fn publish(&mut self, event: GameEvent) {
        debug!(event = event.name(), "publish");
        self.bus.publish(&event);
    }

    // === Tiles ===

    /// Put an owned tile on an empty cell.
    pub fn place_tile(&mut self, pos: Position, tile: Tile) -> Result<(), StoreError> {
        self.check_bounds(pos)?;
        if self.data.board.is_occupied(pos) {
            return Err(StoreError::Occupied(pos));
        }
        let owner = tile.owner.ok_or(StoreError::OwnerlessTile(pos))?;
        self.check_player(owner)?;

        let tile = Tile {
            in_landmark: false,
            ..tile
        };
        self.data.board.insert_tile(pos, tile);
        self.publish(GameEvent::TilePlaced { pos, tile });
        Ok(())
    }

    /// Lift the tile at `pos` off the board. `None` if there is none.
    pub fn remove_tile(&mut self, pos: Position) -> Option<Tile> {
        let tile = self.data.board.take_tile(pos)?;
        self.publish(GameEvent::TileRemoved { pos, tile });
        Some(tile)
    }

    /// Reassign the tile at `pos` in place.
    pub fn set_tile_owner(&mut self, pos: Position, owner: PlayerId) -> Result<(), StoreError> {
        self.check_player(owner)?;
        let tile = self.data.board.tile_mut(pos).ok_or(StoreError::NoTile(pos))?;
        let from = tile.owner;
        tile.owner = Some(owner);
        self.publish(GameEvent::TileOwnerChanged { pos, from, to: owner });
        Ok(())
    }

    /// Change the type of the tile at `pos` in place.
    pub fn set_tile_type(&mut self, pos: Position, tile_type: TileType) -> Result<(), StoreError> {
        let tile = self.data.board.tile_mut(pos).ok_or(StoreError::NoTile(pos))?;
        let from = tile.tile_type;
        tile.tile_type = tile_type;
        self.publish(GameEvent::TileRetyped { pos, from, to: tile_type });
        Ok(())
    }

    // === Landmarks ===

    /// Fold three tiles into a landmark at `anchor`.
    ///
    /// The three positions must be distinct, include `anchor`, and hold one
    /// Housing, one Commerce and one Industry tile of a single owner.
    pub fn form_landmark(&mut self, anchor: Position, positions: [Position; 3]) -> Result<(), StoreError> {
        for pos in positions {
            self.check_bounds(pos)?;
        }
        let [a, b, c] = positions;
        if a == b || b == c || a == c {
            return Err(StoreError::MalformedLandmark("source positions must be distinct"));
        }
        if !positions.contains(&anchor) {
            return Err(StoreError::MalformedLandmark("anchor must be one of the sources"));
        }

        let mut sources = [(anchor, Tile::new(TileType::Housing)); 3];
        for (slot, pos) in sources.iter_mut().zip(positions) {
            let tile = *self.data.board.tile(pos).ok_or(StoreError::NoTile(pos))?;
            *slot = (pos, tile);
        }
        let owner = sources[0].1.owner.ok_or(StoreError::OwnerlessTile(sources[0].0))?;
        self.check_player(owner)?;
        if sources.iter().any(|(_, t)| t.owner != Some(owner)) {
            return Err(StoreError::MalformedLandmark("tiles belong to different owners"));
        }
        sources.sort_by_key(|(_, t)| std::cmp::Reverse(t.tile_type.rank()));
        let types = sources.map(|(_, t)| t.tile_type);
        if types != TileType::ALL {
            return Err(StoreError::MalformedLandmark("needs one tile of each type"));
        }

        for pos in positions {
            self.data.board.take_tile(pos);
        }
        let landmark = Landmark::new(anchor, owner, sources);
        self.data.board.insert_landmark(landmark);
        self.data.players[owner].landmarks += 1;

        info!(%anchor, %owner, "landmark formed");
        self.publish(GameEvent::LandmarkCreated {
            anchor,
            owner,
            sources: sources.map(|(p, _)| p),
        });
        Ok(())
    }

    /// Delete the landmark at `pos` wholesale, adjusting its owner's counters.
    pub fn remove_landmark(&mut self, pos: Position) -> Option<Landmark> {
        let landmark = self.data.board.take_landmark(pos)?;
        let owner = &mut self.data.players[landmark.owner];
        owner.landmarks = owner.landmarks.saturating_sub(1);
        if landmark.is_hq {
            owner.headquarters = owner.headquarters.saturating_sub(1);
        }
        self.publish(GameEvent::LandmarkRemoved {
            anchor: pos,
            owner: landmark.owner,
            was_hq: landmark.is_hq,
        });
        Some(landmark)
    }

    /// Upgrade `player`'s landmark at `pos` to a headquarters and spawn up
    /// to `spawn` agents on it. Returns the number actually spawned, which
    /// is clamped to the player's remaining agent capacity.
    pub fn convert_to_hq(&mut self, pos: Position, player: PlayerId, spawn: u32) -> Result<u32, StoreError> {
        self.check_player(player)?;
        let landmark = self.data.board.landmark(pos).ok_or(StoreError::NoLandmark(pos))?;
        if landmark.owner != player {
            return Err(StoreError::NotOwner { pos, player });
        }
        if landmark.is_hq {
            return Err(StoreError::AlreadyHeadquarters(pos));
        }
        if self.data.players[player].headquarters >= self.hq_cap {
            return Err(StoreError::HeadquartersCap {
                player,
                cap: self.hq_cap,
            });
        }

        if let Some(landmark) = self.data.board.landmark_mut(pos) {
            landmark.is_hq = true;
        }
        self.data.players[player].headquarters += 1;

        let room = self.agent_cap.saturating_sub(self.data.board.agents_on_board(player));
        let spawned = spawn.min(room);
        for _ in 0..spawned {
            self.data.board.push_agent(pos, player);
        }

        info!(%pos, %player, spawned, "headquarters established");
        self.publish(GameEvent::HeadquartersCreated {
            pos,
            owner: player,
            agents_spawned: spawned,
        });
        Ok(spawned)
    }

    // === Agents ===

    pub fn place_agent(&mut self, pos: Position, player: PlayerId) -> Result<(), StoreError> {
        self.check_player(player)?;
        self.check_bounds(pos)?;
        if self.data.board.agents_on_board(player) >= self.agent_cap {
            return Err(StoreError::AgentCap {
                player,
                cap: self.agent_cap,
            });
        }
        self.data.board.push_agent(pos, player);
        self.publish(GameEvent::AgentPlaced { pos, owner: player });
        Ok(())
    }

    pub fn move_agent(&mut self, from: Position, to: Position, player: PlayerId) -> Result<(), StoreError> {
        self.check_player(player)?;
        self.check_bounds(from)?;
        self.check_bounds(to)?;
        if !self.data.board.pop_agent(from, player) {
            return Err(StoreError::NoAgent { pos: from, player });
        }
        self.data.board.push_agent(to, player);
        self.publish(GameEvent::AgentMoved {
            from,
            to,
            owner: player,
        });
        Ok(())
    }

    pub fn remove_agent(&mut self, pos: Position, player: PlayerId) -> Result<(), StoreError> {
        self.check_player(player)?;
        self.check_bounds(pos)?;
        if !self.data.board.pop_agent(pos, player) {
            return Err(StoreError::NoAgent { pos, player });
        }
        self.publish(GameEvent::AgentRemoved { pos, owner: player });
        Ok(())
    }

    /// Remove every agent at `pos`, whoever owns them.
    pub fn clear_agents(&mut self, pos: Position) -> Result<AgentStack, StoreError> {
        self.check_bounds(pos)?;
        let removed = self.data.board.take_agents(pos);
        self.publish(GameEvent::AgentsCleared {
            pos,
            removed: removed.len() as u32,
        });
        Ok(removed)
    }

    // === Hands ===

    /// Draw the top tile into `player`'s hand. `Ok(None)` on an empty pile.
    pub fn draw_tile(&mut self, player: PlayerId) -> Result<Option<Tile>, StoreError> {
        self.check_player(player)?;
        let Some(tile) = self.data.draw_pile.draw() else {
            return Ok(None);
        };
        let tile = tile.with_owner(player);
        self.data.players[player].hand.push(tile);
        self.announce_hand(player);
        Ok(Some(tile))
    }

    /// Append a tile to `player`'s hand; it becomes theirs.
    pub fn add_to_hand(&mut self, player: PlayerId, tile: Tile) -> Result<(), StoreError> {
        self.check_player(player)?;
        let tile = Tile {
            owner: Some(player),
            in_landmark: false,
            ..tile
        };
        self.data.players[player].hand.push(tile);
        self.announce_hand(player);
        Ok(())
    }

    pub fn take_from_hand(&mut self, player: PlayerId, index: usize) -> Result<Tile, StoreError> {
        self.check_player(player)?;
        let hand = &mut self.data.players[player].hand;
        if index >= hand.len() {
            return Err(StoreError::HandIndex { player, index });
        }
        let tile = hand.remove(index);
        self.announce_hand(player);
        Ok(tile)
    }

    /// Discard from the tail of `player`'s hand down to `limit` tiles.
    pub fn enforce_hand_limit(&mut self, player: PlayerId, limit: usize) -> Result<Vec<Tile>, StoreError> {
        self.check_player(player)?;
        let hand = &mut self.data.players[player].hand;
        if hand.len() <= limit {
            return Ok(Vec::new());
        }
        let discarded = hand.split_off(limit);
        debug!(%player, count = discarded.len(), "hand trimmed");
        self.publish(GameEvent::TilesDiscarded {
            player,
            tiles: discarded.clone(),
        });
        Ok(discarded)
    }

    /// Put `player`'s whole hand on the bottom of the draw pile, ownerless.
    /// Returns how many tiles went back.
    pub fn return_hand(&mut self, player: PlayerId) -> Result<usize, StoreError> {
        self.check_player(player)?;
        let hand = std::mem::take(&mut self.data.players[player].hand);
        let count = hand.len();
        for tile in hand {
            self.data.draw_pile.push_bottom(Tile::new(tile.tile_type));
        }
        self.announce_hand(player);
        Ok(count)
    }

    // === Event cards ===

    /// Draw the top event card into `player`'s hand. `Ok(None)` when empty.
    pub fn draw_event(&mut self, player: PlayerId) -> Result<Option<EventCard>, StoreError> {
        self.check_player(player)?;
        let Some(card) = self.data.event_pile.draw() else {
            return Ok(None);
        };
        self.data.players[player].events.push(card);
        self.publish(GameEvent::EventDrawn { player, card });
        Ok(Some(card))
    }

    pub fn add_event(&mut self, player: PlayerId, card: EventCard) -> Result<(), StoreError> {
        self.check_player(player)?;
        self.data.players[player].events.push(card);
        self.announce_hand(player);
        Ok(())
    }

    pub fn take_event(&mut self, player: PlayerId, index: usize) -> Result<EventCard, StoreError> {
        self.check_player(player)?;
        let events = &mut self.data.players[player].events;
        if index >= events.len() {
            return Err(StoreError::EventIndex { player, index });
        }
        let card = events.remove(index);
        self.announce_hand(player);
        Ok(card)
    }

    /// Discard from the tail of `player`'s event hand down to `limit` cards.
    pub fn enforce_event_limit(&mut self, player: PlayerId, limit: usize) -> Result<Vec<EventCard>, StoreError> {
        self.check_player(player)?;
        let events = &mut self.data.players[player].events;
        if events.len() <= limit {
            return Ok(Vec::new());
        }
        let cards = events.split_off(limit);
        self.publish(GameEvent::EventsDiscarded {
            player,
            cards: cards.clone(),
        });
        Ok(cards)
    }

    pub fn set_flags(&mut self, player: PlayerId, flags: PlayerFlags) -> Result<(), StoreError> {
        self.check_player(player)?;
        self.data.players[player].flags = flags;
        self.publish(GameEvent::FlagsChanged { player, flags });
        Ok(())
    }

    // === Piles ===

    /// Rearrange the top of the draw pile; see [`Pile::reorder_top`].
    pub fn reorder_draw_pile(&mut self, order: &[usize]) -> Result<(), StoreError> {
        if !self.data.draw_pile.reorder_top(order) {
            return Err(StoreError::InvalidReorder(order.len()));
        }
        self.publish(GameEvent::DrawPileReordered { count: order.len() });
        Ok(())
    }

    // === Turn ===

    /// Pass the turn to the next seat.
    pub fn end_turn(&mut self) {
        let count = self.player_count();
        let turn = &mut self.data.turn;
        let from = turn.current;
        let ended = turn.number;

        let to = from.next(count);
        if to.index() == 0 {
            turn.number += 1;
        }
        turn.current = to;
        turn.phase = Phase::initial(self.turn_model);
        turn.reset_counters();
        let started = turn.number;
        self.data.players[from].flags.ignore_adjacency = false;

        info!(turn = started, player = %to, "turn started");
        self.publish(GameEvent::TurnEnded {
            turn: ended,
            player: from,
        });
        self.publish(GameEvent::TurnStarted {
            turn: started,
            player: to,
        });
        self.publish(GameEvent::PlayerChanged { from, to });
    }

    pub fn set_phase(&mut self, phase: Phase) {
        self.data.turn.phase = phase;
        self.publish(GameEvent::PhaseChanged { phase });
    }

    /// Hand the turn to `player` without ending one (setup only).
    pub fn set_current_player(&mut self, player: PlayerId) -> Result<(), StoreError> {
        self.check_player(player)?;
        let from = self.data.turn.current;
        self.data.turn.current = player;
        self.publish(GameEvent::PlayerChanged { from, to: player });
        Ok(())
    }

    // === Undo ===

    /// Remember the current state. The oldest snapshot is dropped once the
    /// window is full.
    pub fn save_snapshot(&mut self) {
        self.history.push_back(self.data.clone());
        while self.history.len() > self.undo_capacity {
            self.history.pop_front();
        }
    }

    /// Restore the newest snapshot. False (and no change) if there is none.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.pop_back() else {
            return false;
        };
        self.data = snapshot;
        info!(turn = self.data.turn.number, "state restored");
        self.publish(GameEvent::StateRestored {
            turn: self.data.turn.number,
        });
        true
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    // === Save / restore ===

    #[must_use]
    pub fn serialize(&self) -> SaveData {
        SaveData::from_data(&self.data)
    }

    /// Replace all state with `save`, after checking it is consistent with
    /// this game's rules. Clears undo history and re-announces the phase.
    pub fn deserialize(&mut self, save: SaveData) -> Result<(), StoreError> {
        let data = save
            .into_data(self.player_count(), self.data.board.size(), self.turn_model, self.agent_cap)
            .inspect_err(|err| warn!(%err, "rejected saved game"))?;
        self.data = data;
        self.history.clear();
        let phase = self.data.turn.phase;
        self.publish(GameEvent::PhaseChanged { phase });
        Ok(())
    }

    // === Crate-internal bookkeeping ===
    //
    // Pile access for setup and per-turn counters. These are not domain
    // events; the controller announces what they add up to.

    pub(crate) fn set_piles(&mut self, draw_pile: Pile<Tile>, event_pile: Pile<EventCard>) {
        self.data.draw_pile = draw_pile;
        self.data.event_pile = event_pile;
    }

    pub(crate) fn pop_draw_pile(&mut self) -> Option<Tile> {
        self.data.draw_pile.draw()
    }

    pub(crate) fn push_draw_pile_bottom(&mut self, tile: Tile) {
        self.data.draw_pile.push_bottom(Tile::new(tile.tile_type));
    }

    pub(crate) fn pop_event_pile(&mut self) -> Option<EventCard> {
        self.data.event_pile.draw()
    }

    /// Drop the newest snapshot without restoring it.
    pub(crate) fn discard_snapshot(&mut self) {
        self.history.pop_back();
    }

    pub(crate) fn count_placement(&mut self, player: PlayerId, combo: bool) {
        self.data.turn.tiles_placed += 1;
        if combo {
            self.data.turn.combo_chain += 1;
        }
        if let Some(p) = self.data.players.get_mut(player) {
            p.tiles_placed += 1;
        }
    }

    pub(crate) fn count_agent_move(&mut self) {
        self.data.turn.agent_moves += 1;
    }

    pub(crate) fn count_event_played(&mut self) {
        self.data.turn.events_played += 1;
    }

    // === Helpers ===

    fn check_player(&self, player: PlayerId) -> Result<(), StoreError> {
        if self.data.players.contains(player) {
            Ok(())
        } else {
            Err(StoreError::UnknownPlayer(player))
        }
    }

    fn check_bounds(&self, pos: Position) -> Result<(), StoreError> {
        if self.data.board.in_bounds(pos) {
            Ok(())
        } else {
            Err(StoreError::OutOfBounds(pos))
        }
    }

    fn announce_hand(&mut self, player: PlayerId) {
        let p = &self.data.players[player];
        let event = GameEvent::HandChanged {
            player,
            tiles: p.hand.len(),
            events: p.events.len(),
        };
        self.publish(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn p(i: u8) -> PlayerId {
        PlayerId::new(i)
    }

    fn store() -> StateStore {
        StateStore::new(&RuleConfig::default())
    }

    fn recorder(store: &mut StateStore) -> Rc<RefCell<Vec<GameEvent>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        store.subscribe(move |e| sink.borrow_mut().push(e.clone()));
        log
    }

    fn place(store: &mut StateStore, x: u8, y: u8, tile_type: TileType, owner: u8) {
        store
            .place_tile(Position::new(x, y), Tile::owned(tile_type, p(owner)))
            .unwrap();
    }

    fn trinity_at_origin(store: &mut StateStore) {
        place(store, 0, 0, TileType::Housing, 0);
        place(store, 1, 0, TileType::Commerce, 0);
        place(store, 0, 1, TileType::Industry, 0);
    }

    #[test]
    fn test_place_tile_contract() {
        let mut store = store();
        let pos = Position::new(2, 2);
        place(&mut store, 2, 2, TileType::Housing, 0);

        assert!(matches!(
            store.place_tile(pos, Tile::owned(TileType::Commerce, p(1))),
            Err(StoreError::Occupied(_))
        ));
        assert!(matches!(
            store.place_tile(Position::new(9, 0), Tile::owned(TileType::Commerce, p(0))),
            Err(StoreError::OutOfBounds(_))
        ));
        assert!(matches!(
            store.place_tile(Position::new(3, 3), Tile::new(TileType::Commerce)),
            Err(StoreError::OwnerlessTile(_))
        ));
        assert!(matches!(
            store.place_tile(Position::new(3, 3), Tile::owned(TileType::Commerce, p(7))),
            Err(StoreError::UnknownPlayer(_))
        ));
        assert_eq!(store.remove_tile(pos).map(|t| t.tile_type), Some(TileType::Housing));
        assert_eq!(store.remove_tile(pos), None);
    }

    #[test]
    fn test_one_event_per_mutation() {
        let mut store = store();
        let log = recorder(&mut store);

        place(&mut store, 0, 0, TileType::Housing, 0);
        store.set_tile_owner(Position::new(0, 0), p(1)).unwrap();
        store.set_tile_type(Position::new(0, 0), TileType::Industry).unwrap();
        let _ = store.place_tile(Position::new(0, 0), Tile::owned(TileType::Housing, p(0)));

        let names: Vec<_> = log.borrow().iter().map(GameEvent::name).collect();
        assert_eq!(names, vec!["tile_placed", "tile_owner_changed", "tile_retyped"]);
    }

    #[test]
    fn test_form_landmark() {
        let mut store = store();
        trinity_at_origin(&mut store);
        let origin = Position::new(0, 0);

        store
            .form_landmark(origin, [origin, Position::new(1, 0), Position::new(0, 1)])
            .unwrap();

        let board = store.board();
        assert!(board.landmark(origin).is_some());
        assert!(board.tile(origin).is_none());
        assert!(board.tile(Position::new(1, 0)).is_none());
        assert!(board.tile(Position::new(0, 1)).is_none());
        assert_eq!(store.player(p(0)).map(|pl| pl.landmarks), Some(1));
    }

    #[test]
    fn test_form_landmark_rejects_bad_sources() {
        let mut store = store();
        place(&mut store, 0, 0, TileType::Housing, 0);
        place(&mut store, 1, 0, TileType::Housing, 0);
        place(&mut store, 0, 1, TileType::Industry, 0);
        place(&mut store, 2, 0, TileType::Commerce, 1);
        let o = Position::new(0, 0);

        assert!(matches!(
            store.form_landmark(o, [o, Position::new(1, 0), Position::new(0, 1)]),
            Err(StoreError::MalformedLandmark(_))
        ));
        assert!(matches!(
            store.form_landmark(o, [o, Position::new(2, 0), Position::new(0, 1)]),
            Err(StoreError::MalformedLandmark(_))
        ));
        assert!(matches!(
            store.form_landmark(o, [o, o, Position::new(0, 1)]),
            Err(StoreError::MalformedLandmark(_))
        ));
        assert!(matches!(
            store.form_landmark(o, [o, Position::new(5, 5), Position::new(0, 1)]),
            Err(StoreError::NoTile(_))
        ));
        assert_eq!(store.board().tiles().len(), 4);
    }

    #[test]
    fn test_convert_to_hq() {
        let mut store = store();
        trinity_at_origin(&mut store);
        let o = Position::new(0, 0);
        store.form_landmark(o, [o, Position::new(1, 0), Position::new(0, 1)]).unwrap();

        assert!(matches!(
            store.convert_to_hq(o, p(1), 2),
            Err(StoreError::NotOwner { .. })
        ));
        assert_eq!(store.convert_to_hq(o, p(0), 2).unwrap(), 2);

        let player = store.player(p(0)).unwrap();
        assert_eq!(player.headquarters, 1);
        assert_eq!(player.landmarks, 1);
        assert_eq!(store.board().agent_count_at(o, p(0)), 2);
        assert!(matches!(
            store.convert_to_hq(o, p(0), 2),
            Err(StoreError::AlreadyHeadquarters(_))
        ));

        let removed = store.remove_landmark(o).unwrap();
        assert!(removed.is_hq);
        let player = store.player(p(0)).unwrap();
        assert_eq!((player.landmarks, player.headquarters), (0, 0));
    }

    #[test]
    fn test_hq_spawn_clamped_to_cap() {
        let config = RuleConfig::default().with_agents(crate::core::AgentRules {
            max_per_player: 3,
            ..Default::default()
        });
        let mut store = StateStore::new(&config);
        trinity_at_origin(&mut store);
        let o = Position::new(0, 0);
        store.form_landmark(o, [o, Position::new(1, 0), Position::new(0, 1)]).unwrap();
        store.place_agent(Position::new(5, 5), p(0)).unwrap();
        store.place_agent(Position::new(5, 5), p(0)).unwrap();

        assert_eq!(store.convert_to_hq(o, p(0), 2).unwrap(), 1);
        assert!(matches!(
            store.place_agent(o, p(0)),
            Err(StoreError::AgentCap { cap: 3, .. })
        ));
    }

    #[test]
    fn test_agent_ops() {
        let mut store = store();
        let a = Position::new(1, 1);
        let b = Position::new(1, 2);
        store.place_agent(a, p(0)).unwrap();
        store.place_agent(a, p(1)).unwrap();

        assert!(matches!(store.move_agent(b, a, p(0)), Err(StoreError::NoAgent { .. })));
        store.move_agent(a, b, p(0)).unwrap();
        assert_eq!(store.board().agent_count_at(b, p(0)), 1);
        assert_eq!(store.board().agent_count_at(a, p(0)), 0);

        store.remove_agent(a, p(1)).unwrap();
        assert!(store.board().agents(a).is_none());
        assert!(matches!(store.remove_agent(a, p(1)), Err(StoreError::NoAgent { .. })));

        store.place_agent(b, p(1)).unwrap();
        assert_eq!(store.clear_agents(b).unwrap().len(), 2);
        assert!(store.board().agents(b).is_none());
    }

    #[test]
    fn test_hand_limit() {
        let mut store = store();
        store.set_piles(
            Pile::from_bottom_up(TileType::ALL.into_iter().cycle().take(6).map(Tile::new)),
            Pile::new(),
        );
        for _ in 0..6 {
            store.draw_tile(p(0)).unwrap();
        }
        let hand_before = store.player(p(0)).unwrap().hand.clone();
        let discarded = store.enforce_hand_limit(p(0), 4).unwrap();

        assert_eq!(discarded, hand_before[4..].to_vec());
        assert_eq!(store.player(p(0)).unwrap().hand.len(), 4);
        assert!(store.enforce_hand_limit(p(0), 4).unwrap().is_empty());
        assert_eq!(store.draw_tile(p(0)).unwrap(), None);
    }

    #[test]
    fn test_draw_assigns_owner() {
        let mut store = store();
        store.set_piles(Pile::from_bottom_up([Tile::new(TileType::Commerce)]), Pile::new());
        let tile = store.draw_tile(p(1)).unwrap().unwrap();
        assert_eq!(tile.owner, Some(p(1)));
    }

    #[test]
    fn test_end_turn_events_and_wraparound() {
        let mut store = store();
        let log = recorder(&mut store);

        store.end_turn();
        assert_eq!(store.current_player(), p(1));
        assert_eq!(store.turn().number, 1);
        store.end_turn();
        assert_eq!(store.current_player(), p(0));
        assert_eq!(store.turn().number, 2);

        let log = log.borrow();
        assert_eq!(
            log[..3],
            [
                GameEvent::TurnEnded { turn: 1, player: p(0) },
                GameEvent::TurnStarted { turn: 1, player: p(1) },
                GameEvent::PlayerChanged { from: p(0), to: p(1) },
            ]
        );
        assert_eq!(log[4], GameEvent::TurnStarted { turn: 2, player: p(0) });
    }

    #[test]
    fn test_end_turn_resets_counters() {
        let mut store = store();
        store.count_placement(p(0), false);
        store.count_agent_move();
        store.end_turn();
        assert_eq!(store.turn().tiles_placed, 0);
        assert_eq!(store.turn().agent_moves, 0);
        assert_eq!(store.phase(), Phase::Play);
    }

    #[test]
    fn test_undo_window() {
        let config = RuleConfig {
            undo_capacity: 2,
            ..RuleConfig::default()
        };
        let mut store = StateStore::new(&config);
        for x in 0..3 {
            store.save_snapshot();
            place(&mut store, x, 0, TileType::Housing, 0);
        }
        assert_eq!(store.history_len(), 2);

        assert!(store.undo());
        assert_eq!(store.board().tiles().len(), 2);
        assert!(store.undo());
        assert_eq!(store.board().tiles().len(), 1);
        assert!(!store.undo());
        assert_eq!(store.board().tiles().len(), 1);
    }

    #[test]
    fn test_reorder_draw_pile() {
        let mut store = store();
        store.set_piles(
            Pile::from_bottom_up([Tile::new(TileType::Housing), Tile::new(TileType::Commerce), Tile::new(TileType::Industry)]),
            Pile::new(),
        );
        store.reorder_draw_pile(&[1, 0]).unwrap();
        let top: Vec<_> = store.peek_draw_pile(2).into_iter().map(|t| t.tile_type).collect();
        assert_eq!(top, vec![TileType::Commerce, TileType::Industry]);
        assert!(matches!(store.reorder_draw_pile(&[0, 0]), Err(StoreError::InvalidReorder(2))));
    }
}
