//! Scoring, standings, and end-of-game tests.

use serde::{Deserialize, Serialize};

use crate::board::{Board, Pile, Tile};
use crate::core::{PlayerId, PlayerMap};
use crate::store::Player;

/// Result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Every tiebreak exhausted; these players share the top spot.
    Draw(Vec<PlayerId>),
}

impl GameResult {
    /// Check if a player won outright.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }
}

/// One row of the standings table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub player: PlayerId,
    pub score: i64,
    /// Landmarks with at least one of the owner's agents on them.
    pub secured: u32,
    pub hand: usize,
}

impl Standing {
    fn key(&self) -> (i64, u32, usize) {
        (self.score, self.secured, self.hand)
    }
}

/// Landmarks minus headquarters. HQs do not score.
#[must_use]
pub fn score(player: &Player) -> i64 {
    i64::from(player.landmarks) - i64::from(player.headquarters)
}

/// Landmarks of `player` with one of their own agents standing on them.
#[must_use]
pub fn secured_landmarks(board: &Board, player: PlayerId) -> u32 {
    board
        .landmarks_of(player)
        .into_iter()
        .filter(|l| board.agent_count_at(l.anchor, player) > 0)
        .count() as u32
}

/// Players ranked best first: score, then secured landmarks, then tiles in
/// hand. Equal rows keep seat order.
#[must_use]
pub fn standings(board: &Board, players: &PlayerMap<Player>) -> Vec<Standing> {
    let mut rows: Vec<_> = players
        .iter()
        .map(|(id, player)| Standing {
            player: id,
            score: score(player),
            secured: secured_landmarks(board, id),
            hand: player.hand.len(),
        })
        .collect();
    rows.sort_by(|a, b| b.key().cmp(&a.key()));
    rows
}

/// Winner, or the players tied on every tiebreak.
#[must_use]
pub fn decide(standings: &[Standing]) -> Option<GameResult> {
    let top = standings.first()?;
    let tied: Vec<_> = standings
        .iter()
        .filter(|s| s.key() == top.key())
        .map(|s| s.player)
        .collect();
    Some(if tied.len() == 1 {
        GameResult::Winner(top.player)
    } else {
        GameResult::Draw(tied)
    })
}

/// The draw pile and every hand are empty.
#[must_use]
pub fn is_exhausted(draw_pile: &Pile<Tile>, players: &PlayerMap<Player>) -> bool {
    draw_pile.is_empty() && players.values().all(|p| p.hand.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(player: u8, score: i64, secured: u32, hand: usize) -> Standing {
        Standing {
            player: PlayerId::new(player),
            score,
            secured,
            hand,
        }
    }

    #[test]
    fn test_score_excludes_headquarters() {
        let mut player = Player::new(PlayerId::new(0));
        player.landmarks = 3;
        player.headquarters = 1;
        assert_eq!(score(&player), 2);
    }

    #[test]
    fn test_tiebreak_order() {
        let mut rows = vec![row(0, 2, 0, 5), row(1, 2, 1, 0), row(2, 1, 3, 9)];
        rows.sort_by(|a, b| b.key().cmp(&a.key()));
        assert_eq!(decide(&rows), Some(GameResult::Winner(PlayerId::new(1))));

        let mut hand_decides = vec![row(0, 1, 1, 2), row(1, 1, 1, 4)];
        hand_decides.sort_by(|a, b| b.key().cmp(&a.key()));
        assert_eq!(decide(&hand_decides), Some(GameResult::Winner(PlayerId::new(1))));
    }

    #[test]
    fn test_full_tie_is_draw() {
        let rows = [row(0, 1, 0, 2), row(1, 1, 0, 2), row(2, 0, 0, 2)];
        assert_eq!(
            decide(&rows),
            Some(GameResult::Draw(vec![PlayerId::new(0), PlayerId::new(1)]))
        );
        assert!(!GameResult::Draw(vec![PlayerId::new(0)]).is_winner(PlayerId::new(0)));
    }

    #[test]
    fn test_exhaustion() {
        let players = PlayerMap::new(2, Player::new);
        assert!(is_exhausted(&Pile::new(), &players));
        assert!(!is_exhausted(&Pile::from_bottom_up([Tile::new(crate::board::TileType::Housing)]), &players));
    }
}
