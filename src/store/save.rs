//! Save games.
//!
//! [`SaveData`] is a flat, serde-friendly copy of the whole game state.
//! Binary saves go through bincode; the same struct round-trips through any
//! serde format (JSON for debugging, for instance).
//!
//! Loading validates the data against the running game's rules before any
//! of it replaces live state.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::player::Player;
use super::store::GameData;
use super::turn::Turn;
use crate::board::{AgentStack, Board, Landmark, Pile, Tile};
use crate::cards::EventCard;
use crate::core::{PlayerId, PlayerMap, Position, StoreError, TurnModel};

/// Complete, self-contained game state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveData {
    pub board_size: u8,
    /// One entry per seat, in seat order.
    pub players: Vec<Player>,
    /// Board tiles in row-major order.
    pub tiles: Vec<(Position, Tile)>,
    pub landmarks: Vec<Landmark>,
    pub agents: Vec<(Position, AgentStack)>,
    /// Draw pile, bottom first.
    pub draw_pile: Vec<Tile>,
    /// Event pile, bottom first.
    pub event_pile: Vec<EventCard>,
    pub turn: Turn,
}

impl SaveData {
    pub(crate) fn from_data(data: &GameData) -> Self {
        Self {
            board_size: data.board.size(),
            players: data.players.values().cloned().collect(),
            tiles: data.board.tiles(),
            landmarks: data.board.landmarks().into_iter().cloned().collect(),
            agents: data
                .board
                .agent_stacks()
                .into_iter()
                .map(|(pos, stack)| (pos, stack.clone()))
                .collect(),
            draw_pile: data.draw_pile.to_vec(),
            event_pile: data.event_pile.to_vec(),
            turn: data.turn.clone(),
        }
    }

    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, StoreError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a bincode save. The result is not yet validated; that happens
    /// when it is loaded into a store.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, StoreError> {
        Ok(bincode::deserialize(bytes)?)
    }

    /// Rebuild live state, rejecting anything the rules could not produce.
    pub(crate) fn into_data(
        self,
        player_count: usize,
        board_size: u8,
        turn_model: TurnModel,
        agent_cap: u32,
    ) -> Result<GameData, StoreError> {
        if self.players.len() != player_count {
            return Err(StoreError::PlayerCountMismatch {
                expected: player_count,
                found: self.players.len(),
            });
        }
        if self.board_size != board_size {
            return Err(StoreError::InconsistentSave("board size differs from the rules"));
        }
        if self
            .players
            .iter()
            .enumerate()
            .any(|(i, p)| p.id.index() != i)
        {
            return Err(StoreError::InconsistentSave("player ids out of seat order"));
        }
        let known = |player: PlayerId| player.index() < player_count;
        if !known(self.turn.current) {
            return Err(StoreError::UnknownPlayer(self.turn.current));
        }
        if !self.turn.phase.belongs_to(turn_model) {
            return Err(StoreError::InconsistentSave("phase does not fit the turn model"));
        }

        for player in &self.players {
            if player.hand.iter().any(|t| t.owner != Some(player.id) || t.in_landmark) {
                return Err(StoreError::InconsistentSave("hand tile with a foreign owner"));
            }
        }
        if self.draw_pile.iter().any(|t| t.owner.is_some() || t.in_landmark) {
            return Err(StoreError::InconsistentSave("owned tile in the draw pile"));
        }

        let mut board = Board::new(self.board_size);
        let mut taken = FxHashSet::default();

        for (pos, tile) in self.tiles {
            if !board.in_bounds(pos) {
                return Err(StoreError::OutOfBounds(pos));
            }
            let owner = tile.owner.ok_or(StoreError::OwnerlessTile(pos))?;
            if !known(owner) {
                return Err(StoreError::UnknownPlayer(owner));
            }
            if tile.in_landmark {
                return Err(StoreError::InconsistentSave("board tile flagged as landmark source"));
            }
            if !taken.insert(pos) {
                return Err(StoreError::Occupied(pos));
            }
            board.insert_tile(pos, tile);
        }

        let mut landmark_counts = vec![(0u32, 0u32); player_count];
        for landmark in self.landmarks {
            let pos = landmark.anchor;
            if !board.in_bounds(pos) {
                return Err(StoreError::OutOfBounds(pos));
            }
            if !known(landmark.owner) {
                return Err(StoreError::UnknownPlayer(landmark.owner));
            }
            if landmark.sources.iter().any(|(_, t)| !t.in_landmark) {
                return Err(StoreError::InconsistentSave("landmark source not flagged"));
            }
            if !taken.insert(pos) {
                return Err(StoreError::Occupied(pos));
            }
            let counts = &mut landmark_counts[landmark.owner.index()];
            counts.0 += 1;
            if landmark.is_hq {
                counts.1 += 1;
            }
            board.insert_landmark(landmark);
        }
        for (player, (landmarks, hqs)) in self.players.iter().zip(landmark_counts) {
            if player.landmarks != landmarks || player.headquarters != hqs {
                return Err(StoreError::InconsistentSave("landmark counters disagree with the board"));
            }
        }

        for (pos, stack) in self.agents {
            if !board.in_bounds(pos) {
                return Err(StoreError::OutOfBounds(pos));
            }
            for owner in stack.iter() {
                if !known(owner) {
                    return Err(StoreError::UnknownPlayer(owner));
                }
                board.push_agent(pos, owner);
            }
        }
        if self.players.iter().any(|p| board.agents_on_board(p.id) > agent_cap) {
            return Err(StoreError::InconsistentSave("more agents than the cap allows"));
        }

        Ok(GameData {
            players: PlayerMap::from_vec(self.players),
            board,
            draw_pile: Pile::from_bottom_up(self.draw_pile),
            event_pile: Pile::from_bottom_up(self.event_pile),
            turn: self.turn,
        })
    }
}
