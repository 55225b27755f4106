//! Landmark ("Trinity") detection.
//!
//! A Housing tile anchors a candidate landmark together with a Commerce and
//! an Industry tile of the same owner. The three need not be pairwise
//! adjacent: they qualify when at least two of the three possible pairs
//! share an edge, which covers straight H-C-I runs as well as L shapes.
//!
//! Candidates are gathered by a breadth-first walk of at most two steps from
//! the anchor. Any partner in a connected triad is within two steps of the
//! Housing tile, so nothing is missed and the search stays tiny.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::VecDeque;

use crate::board::{Board, TileType};
use crate::core::{PlayerId, Position};

/// How far the search walks from the anchor.
const SEARCH_DEPTH: u32 = 2;

/// One formable landmark.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TrinityProposal {
    pub housing: Position,
    pub commerce: Position,
    pub industry: Position,
    pub owner: PlayerId,
}

impl TrinityProposal {
    /// Source cells in Housing, Commerce, Industry order.
    #[must_use]
    pub fn positions(&self) -> [Position; 3] {
        [self.housing, self.commerce, self.industry]
    }

    /// The landmark would sit on the Housing tile's cell.
    #[must_use]
    pub fn anchor(&self) -> Position {
        self.housing
    }
}

/// At least two of the three pairs are orthogonal neighbours.
#[must_use]
pub fn is_connected(a: Position, b: Position, c: Position) -> bool {
    let links = [a.is_adjacent(b), b.is_adjacent(c), a.is_adjacent(c)];
    links.iter().filter(|&&l| l).count() >= 2
}

/// Cells within `depth` steps of `start`, nearest first, `start` excluded.
fn cells_within(board: &Board, start: Position, depth: u32) -> Vec<Position> {
    let mut seen: SmallVec<[Position; 16]> = SmallVec::new();
    seen.push(start);
    let mut queue = VecDeque::from([(start, 0u32)]);
    let mut out = Vec::new();

    while let Some((pos, d)) = queue.pop_front() {
        if d == depth {
            continue;
        }
        for next in pos.neighbors(board.size()) {
            if seen.contains(&next) {
                continue;
            }
            seen.push(next);
            out.push(next);
            queue.push_back((next, d + 1));
        }
    }
    out
}

/// Every landmark anchored at the Housing tile on `anchor`.
///
/// Returns nothing if `anchor` holds no owned, unfolded Housing tile.
#[must_use]
pub fn detect_from(board: &Board, anchor: Position) -> Vec<TrinityProposal> {
    let Some(housing) = board.tile(anchor) else {
        return Vec::new();
    };
    let Some(owner) = housing.owner else {
        return Vec::new();
    };
    if housing.tile_type != TileType::Housing || housing.in_landmark {
        return Vec::new();
    }

    let mut commerce: SmallVec<[Position; 8]> = SmallVec::new();
    let mut industry: SmallVec<[Position; 8]> = SmallVec::new();
    for pos in cells_within(board, anchor, SEARCH_DEPTH) {
        let Some(tile) = board.tile(pos) else { continue };
        if !tile.is_owned_by(owner) || tile.in_landmark {
            continue;
        }
        match tile.tile_type {
            TileType::Commerce => commerce.push(pos),
            TileType::Industry => industry.push(pos),
            TileType::Housing => {}
        }
    }

    let mut out = Vec::new();
    for &c in &commerce {
        for &i in &industry {
            if is_connected(anchor, c, i) {
                out.push(TrinityProposal {
                    housing: anchor,
                    commerce: c,
                    industry: i,
                    owner,
                });
            }
        }
    }
    out.sort_unstable();
    out
}

/// Landmarks a tile at `pos` may have completed.
///
/// Runs [`detect_from`] on every Housing tile within two steps of `pos`,
/// `pos` included, since a new Commerce or Industry tile can complete a
/// neighbour's triad. Sorted and deduplicated.
#[must_use]
pub fn detect_after_placement(board: &Board, pos: Position) -> Vec<TrinityProposal> {
    let mut anchors = cells_within(board, pos, SEARCH_DEPTH);
    anchors.push(pos);

    let mut out: Vec<_> = anchors
        .into_iter()
        .filter(|&a| board.tile(a).is_some_and(|t| t.tile_type == TileType::Housing))
        .flat_map(|a| detect_from(board, a))
        .collect();
    out.sort_unstable();
    out.dedup();
    out
}

/// Every landmark `player` could form anywhere on the board.
#[must_use]
pub fn detect_for_player(board: &Board, player: PlayerId) -> Vec<TrinityProposal> {
    let mut out: Vec<_> = board
        .owned_tiles(player)
        .into_iter()
        .flat_map(|pos| detect_from(board, pos))
        .collect();
    out.sort_unstable();
    out
}
