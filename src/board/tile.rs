//! Tiles - the basic building pieces.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// The three tile types. One of each forms a trinity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TileType {
    Housing,
    Commerce,
    Industry,
}

impl TileType {
    /// All tile types, in draw-off rank order (strongest first).
    pub const ALL: [TileType; 3] = [TileType::Housing, TileType::Commerce, TileType::Industry];

    /// Draw-off rank: Housing beats Commerce beats Industry.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            TileType::Housing => 3,
            TileType::Commerce => 2,
            TileType::Industry => 1,
        }
    }
}

impl std::fmt::Display for TileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TileType::Housing => "Housing",
            TileType::Commerce => "Commerce",
            TileType::Industry => "Industry",
        };
        f.write_str(name)
    }
}

/// A tile in the pile, a hand, on the board, or folded into a landmark.
///
/// Tiles are created ownerless in the draw pile and receive an owner when
/// drawn into a hand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub tile_type: TileType,
    pub owner: Option<PlayerId>,
    /// Set while the tile is one of a landmark's three sources.
    pub in_landmark: bool,
}

impl Tile {
    /// An ownerless tile as it sits in the draw pile.
    #[must_use]
    pub const fn new(tile_type: TileType) -> Self {
        Self {
            tile_type,
            owner: None,
            in_landmark: false,
        }
    }

    /// A tile belonging to `owner`.
    #[must_use]
    pub const fn owned(tile_type: TileType, owner: PlayerId) -> Self {
        Self {
            tile_type,
            owner: Some(owner),
            in_landmark: false,
        }
    }

    #[must_use]
    pub fn is_owned_by(&self, player: PlayerId) -> bool {
        self.owner == Some(player)
    }

    /// Copy of this tile with a new owner.
    #[must_use]
    pub fn with_owner(self, owner: PlayerId) -> Self {
        Self {
            owner: Some(owner),
            ..self
        }
    }
}
