//! Combo placement.
//!
//! After a turn's first tile, further placements are only legal if the new
//! tile touches one of the player's board tiles of a different type. Tiles
//! folded into landmarks are no longer on the board and never serve as
//! anchors.

use crate::board::{Board, Tile, TileType};
use crate::core::{PlayerId, Position, RuleViolation};

use super::placement::check_placement;

/// Does a `tile_type` tile at `pos` touch an owned tile of another type?
#[must_use]
pub fn is_combo_connected(board: &Board, player: PlayerId, pos: Position, tile_type: TileType) -> bool {
    pos.neighbors(board.size()).into_iter().any(|n| {
        board
            .tile(n)
            .is_some_and(|t| t.is_owned_by(player) && t.tile_type != tile_type)
    })
}

/// Full legality of a combo placement: the ordinary placement rules plus
/// combo connection.
pub fn check_combo_placement(
    board: &Board,
    player_count: usize,
    player: PlayerId,
    pos: Position,
    tile_type: TileType,
    ignore_adjacency: bool,
) -> Result<(), RuleViolation> {
    check_placement(board, player_count, player, pos, ignore_adjacency)?;
    if is_combo_connected(board, player, pos, tile_type) {
        Ok(())
    } else {
        Err(RuleViolation::NotComboConnected(pos))
    }
}

/// Can the chain go on? True if some tile type in `hand` has at least one
/// legal combo cell.
#[must_use]
pub fn can_continue(board: &Board, player_count: usize, player: PlayerId, hand: &[Tile]) -> bool {
    let candidates: Vec<Position> = Position::all(board.size())
        .filter(|&pos| !board.is_occupied(pos))
        .filter(|&pos| {
            pos.neighbors(board.size())
                .into_iter()
                .any(|n| board.tile(n).is_some_and(|t| t.is_owned_by(player)))
        })
        .collect();

    TileType::ALL
        .into_iter()
        .filter(|tt| hand.iter().any(|t| t.tile_type == *tt))
        .any(|tt| {
            candidates
                .iter()
                .any(|&pos| check_combo_placement(board, player_count, player, pos, tt, false).is_ok())
        })
}
