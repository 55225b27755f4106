//! Landmarks: three folded tiles occupying a single cell.

use serde::{Deserialize, Serialize};

use super::tile::Tile;
use crate::core::{PlayerId, Position};

/// A formed trinity.
///
/// The landmark occupies only its anchor cell. Its source tiles are kept
/// (with `in_landmark` set) so they can be handed back when an insured
/// landmark is lost.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Landmark {
    pub anchor: Position,
    pub owner: PlayerId,
    /// The Housing, Commerce and Industry sources with their old cells.
    pub sources: [(Position, Tile); 3],
    pub is_hq: bool,
}

impl Landmark {
    /// Build a landmark from its three source tiles.
    #[must_use]
    pub fn new(anchor: Position, owner: PlayerId, sources: [(Position, Tile); 3]) -> Self {
        let sources = sources.map(|(pos, tile)| {
            (
                pos,
                Tile {
                    in_landmark: true,
                    ..tile
                },
            )
        });
        Self {
            anchor,
            owner,
            sources,
            is_hq: false,
        }
    }

    /// The source tiles as hand tiles again (owner `to`, flag cleared).
    #[must_use]
    pub fn released_tiles(&self, to: PlayerId) -> [Tile; 3] {
        self.sources.map(|(_, tile)| Tile::owned(tile.tile_type, to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::TileType;

    fn sample() -> Landmark {
        let p = PlayerId::new(0);
        Landmark::new(
            Position::new(0, 0),
            p,
            [
                (Position::new(0, 0), Tile::owned(TileType::Housing, p)),
                (Position::new(1, 0), Tile::owned(TileType::Commerce, p)),
                (Position::new(0, 1), Tile::owned(TileType::Industry, p)),
            ],
        )
    }

    #[test]
    fn test_sources_are_flagged() {
        let landmark = sample();
        assert!(landmark.sources.iter().all(|(_, t)| t.in_landmark));
        assert!(!landmark.is_hq);
    }

    #[test]
    fn test_released_tiles() {
        let tiles = sample().released_tiles(PlayerId::new(0));
        assert!(tiles.iter().all(|t| !t.in_landmark && t.is_owned_by(PlayerId::new(0))));
        assert_eq!(tiles[0].tile_type, TileType::Housing);
    }
}
