//! Property tests for placement legality and landmark detection.

use proptest::prelude::*;

use rust_trinity::board::{Tile, TileType};
use rust_trinity::core::{PlayerId, Position, RuleConfig};
use rust_trinity::rules::{
    check_placement, detect_after_placement, detect_for_player, detect_from, in_starting_zone, valid_placements,
    TrinityProposal,
};
use rust_trinity::store::StateStore;

/// Connected H, C, I layouts inside a 3x3 box.
const SHAPES: [[(u8, u8); 3]; 7] = [
    [(0, 0), (1, 0), (0, 1)],
    [(1, 1), (0, 1), (1, 0)],
    [(0, 0), (1, 0), (2, 0)],
    [(1, 0), (0, 0), (2, 0)],
    [(2, 0), (0, 0), (1, 0)],
    [(0, 0), (0, 2), (0, 1)],
    [(1, 1), (0, 0), (0, 1)],
];

fn scattered_tiles() -> impl Strategy<Value = Vec<(u8, u8, usize, u8)>> {
    prop::collection::vec((0u8..8, 0u8..8, 0usize..3, 0u8..2), 0..24)
}

fn store_with(tiles: &[(u8, u8, usize, u8)]) -> StateStore {
    let mut store = StateStore::new(&RuleConfig::new(2));
    for &(x, y, t, owner) in tiles {
        let pos = Position::new(x, y);
        if store.board().is_occupied(pos) {
            continue;
        }
        store
            .place_tile(pos, Tile::owned(TileType::ALL[t], PlayerId::new(owner)))
            .unwrap();
    }
    store
}

proptest! {
    #[test]
    fn valid_placements_match_check(tiles in scattered_tiles(), who in 0u8..2) {
        let store = store_with(&tiles);
        let board = store.board();
        let player = PlayerId::new(who);

        let valid = valid_placements(board, 2, player, false);
        for pos in Position::all(8) {
            let legal = check_placement(board, 2, player, pos, false).is_ok();
            prop_assert_eq!(valid.contains(&pos), legal);
        }
        for &pos in &valid {
            prop_assert!(!board.is_occupied(pos));
            if !board.has_tiles(player) {
                prop_assert!(in_starting_zone(8, 2, player, pos));
            }
        }

        let loose = valid_placements(board, 2, player, true);
        prop_assert!(valid.iter().all(|pos| loose.contains(pos)));
    }

    #[test]
    fn starting_zones_never_overlap(count in 2usize..=4, size in 4u8..=16) {
        for pos in Position::all(size) {
            let owners = PlayerId::all(count)
                .filter(|&p| in_starting_zone(size, count, p, pos))
                .count();
            prop_assert!(owners <= 1);
        }
        for player in PlayerId::all(count) {
            prop_assert!(Position::all(size).any(|pos| in_starting_zone(size, count, player, pos)));
        }
    }

    #[test]
    fn trinity_found_in_any_placement_order(
        x in 0u8..6,
        y in 0u8..6,
        shape in 0usize..SHAPES.len(),
        order in Just(vec![0usize, 1, 2]).prop_shuffle(),
    ) {
        let owner = PlayerId::new(0);
        let cells = SHAPES[shape].map(|(dx, dy)| Position::new(x + dx, y + dy));
        let expected = TrinityProposal {
            housing: cells[0],
            commerce: cells[1],
            industry: cells[2],
            owner,
        };

        let mut store = StateStore::new(&RuleConfig::new(2));
        for (n, &i) in order.iter().enumerate() {
            store.place_tile(cells[i], Tile::owned(TileType::ALL[i], owner)).unwrap();
            let found = detect_after_placement(store.board(), cells[i]);
            if n < 2 {
                prop_assert!(found.is_empty());
            } else {
                prop_assert_eq!(found, vec![expected]);
            }
        }
        prop_assert_eq!(detect_for_player(store.board(), owner), vec![expected]);
        prop_assert_eq!(detect_from(store.board(), cells[0]), vec![expected]);
        prop_assert!(detect_for_player(store.board(), PlayerId::new(1)).is_empty());
    }

    #[test]
    fn local_detection_is_subset_of_global(tiles in scattered_tiles(), x in 0u8..8, y in 0u8..8) {
        let store = store_with(&tiles);
        let board = store.board();
        let pos = Position::new(x, y);

        let mut global = detect_for_player(board, PlayerId::new(0));
        global.extend(detect_for_player(board, PlayerId::new(1)));
        for proposal in detect_after_placement(board, pos) {
            prop_assert!(global.contains(&proposal));
            prop_assert!(proposal.positions().iter().all(|&p| p.distance(pos) <= 4));
        }
    }
}
