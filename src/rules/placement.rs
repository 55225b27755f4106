//! Placement legality and starting zones.
//!
//! A placement is legal when the cell is on the board, holds no tile or
//! landmark, and either lies in the player's starting zone (if they own no
//! tiles yet) or touches one of their tiles orthogonally. Landmarks do not
//! count as owned tiles here, and agents never block a placement.

use crate::board::Board;
use crate::core::{PlayerId, Position, RuleViolation};

/// Is `pos` in `player`'s starting zone?
///
/// Two players split the board into horizontal halves: player 0 takes the
/// rows `y < N/2`, player 1 the rest. With three or four players each seat
/// gets a 2×2 corner: 0 top-left, 1 top-right, 2 bottom-left, 3 bottom-right.
#[must_use]
pub fn in_starting_zone(size: u8, player_count: usize, player: PlayerId, pos: Position) -> bool {
    if !pos.in_bounds(size) {
        return false;
    }
    let half = size / 2;
    if player_count <= 2 {
        return match player.index() {
            0 => pos.y < half,
            _ => pos.y >= half,
        };
    }

    let far = size.saturating_sub(2);
    let (left, top) = match player.index() {
        0 => (true, true),
        1 => (false, true),
        2 => (true, false),
        _ => (false, false),
    };
    let x_ok = if left { pos.x < 2 } else { pos.x >= far };
    let y_ok = if top { pos.y < 2 } else { pos.y >= far };
    x_ok && y_ok
}

/// Decide whether `player` may put a tile at `pos`.
///
/// `ignore_adjacency` waives the adjacency requirement but never the
/// starting zone.
///
/// ```
/// use rust_trinity::board::Board;
/// use rust_trinity::core::{PlayerId, Position, RuleViolation};
/// use rust_trinity::rules::check_placement;
///
/// let board = Board::new(8);
/// let p0 = PlayerId::new(0);
/// assert!(check_placement(&board, 2, p0, Position::new(3, 0), false).is_ok());
/// assert_eq!(
///     check_placement(&board, 2, p0, Position::new(3, 7), false),
///     Err(RuleViolation::NotInStartingZone(Position::new(3, 7)))
/// );
/// ```
pub fn check_placement(
    board: &Board,
    player_count: usize,
    player: PlayerId,
    pos: Position,
    ignore_adjacency: bool,
) -> Result<(), RuleViolation> {
    if !board.in_bounds(pos) {
        return Err(RuleViolation::OutOfBounds(pos));
    }
    if board.is_occupied(pos) {
        return Err(RuleViolation::Occupied(pos));
    }
    if !board.has_tiles(player) {
        if in_starting_zone(board.size(), player_count, player, pos) {
            return Ok(());
        }
        return Err(RuleViolation::NotInStartingZone(pos));
    }
    if ignore_adjacency || touches_own_tile(board, player, pos) {
        Ok(())
    } else {
        Err(RuleViolation::NotAdjacent(pos))
    }
}

/// Every cell where `player` may place, row-major.
#[must_use]
pub fn valid_placements(
    board: &Board,
    player_count: usize,
    player: PlayerId,
    ignore_adjacency: bool,
) -> Vec<Position> {
    Position::all(board.size())
        .filter(|&pos| check_placement(board, player_count, player, pos, ignore_adjacency).is_ok())
        .collect()
}

pub(crate) fn touches_own_tile(board: &Board, player: PlayerId, pos: Position) -> bool {
    pos.neighbors(board.size())
        .into_iter()
        .any(|n| board.tile(n).is_some_and(|t| t.is_owned_by(player)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Tile, TileType};

    fn p(i: u8) -> PlayerId {
        PlayerId::new(i)
    }

    #[test]
    fn test_two_player_halves() {
        assert!(in_starting_zone(8, 2, p(0), Position::new(7, 3)));
        assert!(!in_starting_zone(8, 2, p(0), Position::new(0, 4)));
        assert!(in_starting_zone(8, 2, p(1), Position::new(0, 4)));
        assert!(!in_starting_zone(8, 2, p(1), Position::new(0, 3)));
    }

    #[test]
    fn test_corner_zones() {
        assert!(in_starting_zone(8, 4, p(0), Position::new(1, 1)));
        assert!(in_starting_zone(8, 4, p(1), Position::new(6, 0)));
        assert!(in_starting_zone(8, 4, p(2), Position::new(0, 7)));
        assert!(in_starting_zone(8, 4, p(3), Position::new(7, 6)));
        assert!(!in_starting_zone(8, 4, p(0), Position::new(2, 0)));
        assert!(!in_starting_zone(8, 3, p(1), Position::new(0, 0)));
    }

    #[test]
    fn test_rejections() {
        let mut board = Board::new(6);
        board.insert_tile(Position::new(0, 0), Tile::owned(TileType::Housing, p(0)));

        assert_eq!(
            check_placement(&board, 2, p(0), Position::new(6, 0), false),
            Err(RuleViolation::OutOfBounds(Position::new(6, 0)))
        );
        assert_eq!(
            check_placement(&board, 2, p(0), Position::new(0, 0), false),
            Err(RuleViolation::Occupied(Position::new(0, 0)))
        );
        assert_eq!(
            check_placement(&board, 2, p(0), Position::new(2, 0), false),
            Err(RuleViolation::NotAdjacent(Position::new(2, 0)))
        );
        assert!(check_placement(&board, 2, p(0), Position::new(1, 0), false).is_ok());
        assert!(check_placement(&board, 2, p(0), Position::new(2, 0), true).is_ok());
    }

    #[test]
    fn test_agents_do_not_block() {
        let mut board = Board::new(6);
        board.push_agent(Position::new(0, 0), p(1));
        assert!(check_placement(&board, 2, p(0), Position::new(0, 0), false).is_ok());
    }

    #[test]
    fn test_valid_placements_first_tile() {
        let board = Board::new(4);
        let cells = valid_placements(&board, 2, p(1), false);
        assert_eq!(cells.len(), 8);
        assert!(cells.iter().all(|c| c.y >= 2));
    }
}
