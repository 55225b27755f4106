//! Per-player state.

use serde::{Deserialize, Serialize};

use crate::board::Tile;
use crate::cards::EventCard;
use crate::core::PlayerId;

/// Transient flags set by cards and consumed by the controller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerFlags {
    /// Next placement this turn skips the adjacency rule.
    pub ignore_adjacency: bool,
    /// Skip the next Agent phase (Classic turns).
    pub skip_next_phase: bool,
    /// The one allowed mulligan has been taken.
    pub mulligan_used: bool,
}

/// A seat at the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    /// Tiles in hand; discards come off the tail.
    pub hand: Vec<Tile>,
    pub events: Vec<EventCard>,
    /// Landmarks owned, headquarters included.
    pub landmarks: u32,
    pub headquarters: u32,
    pub flags: PlayerFlags,
    /// Tiles placed from hand over the whole game.
    pub tiles_placed: u32,
}

impl Player {
    #[must_use]
    pub fn new(id: PlayerId) -> Self {
        Self {
            id,
            hand: Vec::new(),
            events: Vec::new(),
            landmarks: 0,
            headquarters: 0,
            flags: PlayerFlags::default(),
            tiles_placed: 0,
        }
    }

    /// Landmarks that are not headquarters.
    #[must_use]
    pub fn plain_landmarks(&self) -> u32 {
        self.landmarks.saturating_sub(self.headquarters)
    }

    /// Index of the first hand tile of `tile_type`.
    #[must_use]
    pub fn find_in_hand(&self, tile_type: crate::board::TileType) -> Option<usize> {
        self.hand.iter().position(|t| t.tile_type == tile_type)
    }
}
