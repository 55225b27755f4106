//! The N×N board: tiles, landmarks, and agents keyed by position.
//!
//! Three persistent maps back the board so a full copy is a handful of
//! pointer bumps; the store relies on that for undo snapshots. Reads are
//! public. Writes are crate-private and only the store calls them, after
//! checking its own preconditions.

use im::HashMap;
use serde::{Deserialize, Serialize};

use super::agents::AgentStack;
use super::landmark::Landmark;
use super::tile::Tile;
use crate::core::{PlayerId, Position};

/// Board contents.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    size: u8,
    tiles: HashMap<Position, Tile>,
    landmarks: HashMap<Position, Landmark>,
    agents: HashMap<Position, AgentStack>,
}

impl Board {
    /// Empty board of `size`×`size` cells.
    #[must_use]
    pub fn new(size: u8) -> Self {
        Self {
            size,
            tiles: HashMap::new(),
            landmarks: HashMap::new(),
            agents: HashMap::new(),
        }
    }

    #[must_use]
    pub fn size(&self) -> u8 {
        self.size
    }

    #[must_use]
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.in_bounds(self.size)
    }

    #[must_use]
    pub fn tile(&self, pos: Position) -> Option<&Tile> {
        self.tiles.get(&pos)
    }

    #[must_use]
    pub fn landmark(&self, pos: Position) -> Option<&Landmark> {
        self.landmarks.get(&pos)
    }

    #[must_use]
    pub fn agents(&self, pos: Position) -> Option<&AgentStack> {
        self.agents.get(&pos)
    }

    /// Agents of `player` at `pos`.
    #[must_use]
    pub fn agent_count_at(&self, pos: Position, player: PlayerId) -> u32 {
        self.agents.get(&pos).map_or(0, |s| s.count_for(player))
    }

    /// True if a tile or a landmark sits at `pos`.
    #[must_use]
    pub fn is_occupied(&self, pos: Position) -> bool {
        self.tiles.contains_key(&pos) || self.landmarks.contains_key(&pos)
    }

    /// True if anything at all sits at `pos`, agents included.
    #[must_use]
    pub fn is_filled(&self, pos: Position) -> bool {
        self.is_occupied(pos) || self.agents.contains_key(&pos)
    }

    /// Every cell holds a tile, a landmark, or at least one agent.
    #[must_use]
    pub fn is_full(&self) -> bool {
        Position::all(self.size).all(|pos| self.is_filled(pos))
    }

    /// Tiles in row-major order.
    #[must_use]
    pub fn tiles(&self) -> Vec<(Position, Tile)> {
        let mut out: Vec<_> = self.tiles.iter().map(|(p, t)| (*p, *t)).collect();
        out.sort_unstable_by_key(|(p, _)| (p.y, p.x));
        out
    }

    /// Landmarks in row-major order of their anchors.
    #[must_use]
    pub fn landmarks(&self) -> Vec<&Landmark> {
        let mut out: Vec<_> = self.landmarks.values().collect();
        out.sort_unstable_by_key(|l| (l.anchor.y, l.anchor.x));
        out
    }

    /// Agent stacks in row-major order.
    #[must_use]
    pub fn agent_stacks(&self) -> Vec<(Position, &AgentStack)> {
        let mut out: Vec<_> = self.agents.iter().map(|(p, s)| (*p, s)).collect();
        out.sort_unstable_by_key(|(p, _)| (p.y, p.x));
        out
    }

    /// Positions of tiles owned by `player`, row-major.
    #[must_use]
    pub fn owned_tiles(&self, player: PlayerId) -> Vec<Position> {
        self.tiles()
            .into_iter()
            .filter(|(_, t)| t.is_owned_by(player))
            .map(|(p, _)| p)
            .collect()
    }

    /// Does `player` own at least one tile on the board?
    #[must_use]
    pub fn has_tiles(&self, player: PlayerId) -> bool {
        self.tiles.values().any(|t| t.is_owned_by(player))
    }

    /// Landmarks owned by `player`, row-major.
    #[must_use]
    pub fn landmarks_of(&self, player: PlayerId) -> Vec<&Landmark> {
        self.landmarks()
            .into_iter()
            .filter(|l| l.owner == player)
            .collect()
    }

    /// Total agents `player` has on the board.
    #[must_use]
    pub fn agents_on_board(&self, player: PlayerId) -> u32 {
        self.agents.values().map(|s| s.count_for(player)).sum()
    }

    /// Agents of `player` on cells orthogonally adjacent to `pos`.
    #[must_use]
    pub fn adjacent_agents(&self, pos: Position, player: PlayerId) -> u32 {
        pos.neighbors(self.size)
            .into_iter()
            .map(|n| self.agent_count_at(n, player))
            .sum()
    }

    // -- writes, store only ------------------------------------------------

    pub(crate) fn insert_tile(&mut self, pos: Position, tile: Tile) {
        self.tiles.insert(pos, tile);
    }

    pub(crate) fn take_tile(&mut self, pos: Position) -> Option<Tile> {
        self.tiles.remove(&pos)
    }

    pub(crate) fn tile_mut(&mut self, pos: Position) -> Option<&mut Tile> {
        self.tiles.get_mut(&pos)
    }

    pub(crate) fn insert_landmark(&mut self, landmark: Landmark) {
        self.landmarks.insert(landmark.anchor, landmark);
    }

    pub(crate) fn take_landmark(&mut self, pos: Position) -> Option<Landmark> {
        self.landmarks.remove(&pos)
    }

    pub(crate) fn landmark_mut(&mut self, pos: Position) -> Option<&mut Landmark> {
        self.landmarks.get_mut(&pos)
    }

    pub(crate) fn push_agent(&mut self, pos: Position, player: PlayerId) {
        self.agents.entry(pos).or_insert_with(AgentStack::new).push(player);
    }

    /// Remove one agent of `player`; empty stacks leave the map.
    pub(crate) fn pop_agent(&mut self, pos: Position, player: PlayerId) -> bool {
        let Some(stack) = self.agents.get_mut(&pos) else {
            return false;
        };
        let removed = stack.remove_one(player);
        if stack.is_empty() {
            self.agents.remove(&pos);
        }
        removed
    }

    pub(crate) fn take_agents(&mut self, pos: Position) -> AgentStack {
        self.agents.remove(&pos).unwrap_or_default()
    }
}
