//! Card effect definitions.
//!
//! Every event card resolves to exactly one [`CardEffect`]. The set is
//! closed: the resolver matches on it exhaustively, so adding a kind means
//! adding its handler.

use serde::{Deserialize, Serialize};

use crate::board::Tile;
use crate::core::PlayerId;

/// What an event card does.
///
/// ## Hand and pile
///
/// - `DrawTiles` / `DrawEvents`: draw for the acting player
/// - `ForceDiscard`: target opponent discards from the tail of their hand
/// - `PeekDrawPile` / `ReorderDrawPile`: look at or rearrange the top of the draw pile
/// - `ViewHand`: reveal an opponent's hand
///
/// ## Tiles
///
/// - `ReturnTile`: own tile back to hand
/// - `RemoveTile`: opponent tile removed from the game
/// - `StealTile`: take ownership of an opponent tile next to one of yours
/// - `SwapTiles`: exchange an opponent tile with one of yours
/// - `MoveTile`: move an own tile to an empty cell next to another of yours
/// - `RetypeOwnTile` / `RetypeOpponentTile`: change a tile's type in place
/// - `IgnoreAdjacency`: the next placement this turn skips the adjacency rule
///
/// ## Agents
///
/// - `SpawnAgent`: add agents at the target cell
/// - `MoveOpponentAgent`: push an opponent agent one step
/// - `FreeCapture`: capture an opponent tile next to one of your agents
///   without spending any; the owner's agents on it are lost
///
/// ## Reactive
///
/// - `Insurance`: never played; returns a lost landmark's tiles to hand
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardEffect {
    DrawTiles { count: usize },
    DrawEvents { count: usize },
    ForceDiscard { count: usize },
    ReturnTile,
    RemoveTile,
    StealTile,
    SwapTiles,
    MoveTile,
    RetypeOwnTile,
    RetypeOpponentTile,
    IgnoreAdjacency,
    SpawnAgent { count: u32 },
    MoveOpponentAgent,
    FreeCapture,
    PeekDrawPile { count: usize },
    ReorderDrawPile { count: usize },
    ViewHand,
    Insurance,
}

impl CardEffect {
    /// Effects that change which tiles a player owns or where they sit,
    /// after which new landmarks may be detectable.
    #[must_use]
    pub fn reshapes_tiles(&self) -> bool {
        matches!(
            self,
            CardEffect::StealTile
                | CardEffect::SwapTiles
                | CardEffect::MoveTile
                | CardEffect::RetypeOwnTile
                | CardEffect::RetypeOpponentTile
                | CardEffect::FreeCapture
        )
    }
}

/// What a successful play produced, beyond the state changes themselves.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectOutcome {
    /// Applied; nothing to report.
    Applied,
    /// Tiles actually drawn (may be fewer than asked when the pile runs out).
    TilesDrawn(usize),
    /// Event cards actually drawn.
    EventsDrawn(usize),
    /// Tiles an opponent discarded.
    Discarded { player: PlayerId, tiles: Vec<Tile> },
    /// Top of the draw pile, topmost first.
    Peeked(Vec<Tile>),
    /// An opponent's hand.
    HandRevealed { player: PlayerId, tiles: Vec<Tile> },
    /// Agents placed by a spawn effect.
    AgentsSpawned(u32),
    /// A tile taken by capture.
    Captured { defender: PlayerId, defenders_lost: u32 },
}
