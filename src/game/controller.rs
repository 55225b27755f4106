//! The game controller.
//!
//! [`Game`] owns the rule table, the card catalog, the state store and the
//! RNG, and exposes the player-facing actions. Actions are split by theme
//! across this module's siblings:
//!
//! - `setup`: pile construction, starting player, opening hands, mulligan
//! - `turn`: placement, landmarks, headquarters, phases and turn end
//! - `agents`: agent movement, takeovers, tile capture, reposition
//! - `events`: event card play
//!
//! Every action checks the rules first and returns a [`RuleViolation`]
//! without touching state if the move is illegal. Reversible actions run
//! inside [`Game::transact`], which records an undo snapshot and rolls the
//! store back if a store call fails midway. An action that shows a player
//! hidden information (a draw, a peek at the pile, an opponent's hand) ends
//! the undo window once it commits.

use tracing::{info, instrument};

use crate::board::{Board, Pile, Tile};
use crate::cards::{CardCatalog, EventCard};
use crate::core::{ActionError, ConfigError, GameRng, PlayerId, Position, RuleConfig, RuleViolation, StoreError};
use crate::rules::{self, GameResult, Standing};
use crate::store::{Phase, Player, SaveData, StateStore, Turn};
use crate::triggers::{GameEvent, SubscriptionId};

/// A game of Trinity.
///
/// ## Example
///
/// ```
/// use rust_trinity::core::{PlayerId, RuleConfig, StartingPlayer};
/// use rust_trinity::game::Game;
///
/// let config = RuleConfig::new(2).with_starting_player(StartingPlayer::Fixed(PlayerId::new(0)));
/// let mut game = Game::new(config, 42).unwrap();
/// let first = game.setup().unwrap();
///
/// assert_eq!(first, PlayerId::new(0));
/// assert_eq!(game.player(first).unwrap().hand.len(), 3);
/// assert!(!game.valid_placements().is_empty());
/// ```
#[derive(Debug)]
pub struct Game {
    pub(super) config: RuleConfig,
    pub(super) catalog: CardCatalog,
    pub(super) store: StateStore,
    pub(super) rng: GameRng,
    pub(super) setup_done: bool,
    pub(super) result: Option<GameResult>,
    /// Set by an action in progress that revealed hidden information.
    pub(super) revealed: bool,
}

impl Game {
    /// Create a game with the standard event deck. Call [`Game::setup`]
    /// before the first turn.
    pub fn new(config: RuleConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let store = StateStore::new(&config);
        Ok(Self {
            config,
            catalog: CardCatalog::standard(),
            store,
            rng: GameRng::new(seed),
            setup_done: false,
            result: None,
            revealed: false,
        })
    }

    /// Replace the event deck (builder pattern). Only meaningful before setup.
    #[must_use]
    pub fn with_catalog(mut self, catalog: CardCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    // === Read access ===

    #[must_use]
    pub fn config(&self) -> &RuleConfig {
        &self.config
    }

    #[must_use]
    pub fn catalog(&self) -> &CardCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn store(&self) -> &StateStore {
        &self.store
    }

    /// Direct store access for scripted scenarios and tools. Store calls
    /// bypass every rule check.
    pub fn store_mut(&mut self) -> &mut StateStore {
        &mut self.store
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        self.store.board()
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.store.player(id)
    }

    #[must_use]
    pub fn turn(&self) -> &Turn {
        self.store.turn()
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.store.current_player()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.store.phase()
    }

    #[must_use]
    pub fn draw_pile(&self) -> &Pile<Tile> {
        self.store.draw_pile()
    }

    #[must_use]
    pub fn event_pile(&self) -> &Pile<EventCard> {
        self.store.event_pile()
    }

    #[must_use]
    pub fn is_set_up(&self) -> bool {
        self.setup_done
    }

    /// The final result, once the game has ended.
    #[must_use]
    pub fn result(&self) -> Option<&GameResult> {
        self.result.as_ref()
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.result.is_some()
    }

    /// Current standings, best first.
    #[must_use]
    pub fn standings(&self) -> Vec<Standing> {
        rules::standings(self.store.board(), self.store.players())
    }

    /// Cells where the current player could place a tile right now.
    #[must_use]
    pub fn valid_placements(&self) -> Vec<Position> {
        self.valid_placements_for(self.current_player())
    }

    /// Cells where `player` could place a tile, ignoring whose turn it is.
    #[must_use]
    pub fn valid_placements_for(&self, player: PlayerId) -> Vec<Position> {
        let ignore = self.store.player(player).is_some_and(|p| p.flags.ignore_adjacency);
        rules::valid_placements(self.store.board(), self.store.player_count(), player, ignore)
    }

    // === Event feed ===

    /// Listen to every [`GameEvent`]. Listeners run synchronously, in
    /// registration order, after each change has been fully applied.
    pub fn subscribe(&mut self, listener: impl FnMut(&GameEvent) + 'static) -> SubscriptionId {
        self.store.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }

    // === Undo and saves ===

    /// Take back the last reversible action of the current turn.
    #[instrument(skip(self))]
    pub fn undo(&mut self) -> bool {
        if self.is_over() {
            return false;
        }
        self.store.undo()
    }

    #[must_use]
    pub fn serialize(&self) -> SaveData {
        self.store.serialize()
    }

    /// Load a saved game in place of the current one.
    pub fn deserialize(&mut self, save: SaveData) -> Result<(), StoreError> {
        self.store.deserialize(save)?;
        self.setup_done = true;
        self.result = None;
        Ok(())
    }

    // === Shared helpers ===

    /// The game is running and it is `player`'s turn.
    pub(super) fn ensure_turn(&self, player: PlayerId) -> Result<(), RuleViolation> {
        if self.is_over() {
            return Err(RuleViolation::GameOver);
        }
        let current = self.current_player();
        if player != current {
            return Err(RuleViolation::NotYourTurn { player, current });
        }
        Ok(())
    }

    /// Run `action` as one undoable step.
    ///
    /// A snapshot is recorded first. If the action is rejected by a rule the
    /// snapshot is dropped (nothing changed); if a store call fails partway
    /// the snapshot is restored.
    pub(super) fn transact<T>(
        &mut self,
        action: impl FnOnce(&mut Self) -> Result<T, ActionError>,
    ) -> Result<T, ActionError> {
        self.store.save_snapshot();
        let result = action(self);
        let revealed = std::mem::take(&mut self.revealed);
        match result {
            Ok(value) => {
                if revealed {
                    self.store.clear_history();
                }
                Ok(value)
            }
            Err(err @ ActionError::Rule(_)) => {
                self.store.discard_snapshot();
                Err(err)
            }
            Err(err @ ActionError::Store(_)) => {
                self.store.undo();
                Err(err)
            }
        }
    }

    /// End the game if a win condition holds. Returns the result if the
    /// game is (now) over.
    pub(super) fn check_win(&mut self) -> Option<GameResult> {
        if self.result.is_some() {
            return self.result.clone();
        }

        let win = self.config.win;
        let board = self.store.board();
        let players = self.store.players();
        let target_reached = win
            .landmark_target
            .is_some_and(|target| players.values().any(|p| rules::score(p) >= i64::from(target)));
        let ended = (win.board_full && board.is_full())
            || (win.exhaustion && rules::is_exhausted(self.store.draw_pile(), players))
            || target_reached;
        if !ended {
            return None;
        }

        let result = rules::decide(&self.standings())?;
        info!(?result, "game over");
        self.store.clear_history();
        self.store.publish(GameEvent::GameOver { result: result.clone() });
        self.result = Some(result.clone());
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::TileType;
    use crate::core::{StartingPlayer, WinConditions};

    fn p(i: u8) -> PlayerId {
        PlayerId::new(i)
    }

    fn game() -> Game {
        let config = RuleConfig::new(2).with_starting_player(StartingPlayer::Fixed(p(0)));
        Game::new(config, 1).unwrap()
    }

    #[test]
    fn test_new_rejects_bad_config() {
        assert!(matches!(
            Game::new(RuleConfig::new(6), 0),
            Err(ConfigError::PlayerCount(6))
        ));
    }

    #[test]
    fn test_ensure_turn() {
        let game = game();
        assert!(game.ensure_turn(p(0)).is_ok());
        assert_eq!(
            game.ensure_turn(p(1)),
            Err(RuleViolation::NotYourTurn { player: p(1), current: p(0) })
        );
    }

    #[test]
    fn test_transact_rolls_back_store_failures() {
        let mut game = game();
        let result: Result<(), ActionError> = game.transact(|g| {
            g.store.place_tile(Position::new(0, 0), Tile::owned(TileType::Housing, p(0)))?;
            g.store.place_tile(Position::new(0, 0), Tile::owned(TileType::Commerce, p(0)))?;
            Ok(())
        });

        assert!(matches!(result, Err(ActionError::Store(StoreError::Occupied(_)))));
        assert!(game.board().tile(Position::new(0, 0)).is_none());
        assert_eq!(game.store().history_len(), 0);
    }

    #[test]
    fn test_transact_keeps_snapshot_on_success() {
        let mut game = game();
        game.transact(|g| Ok(g.store.place_agent(Position::new(1, 1), p(0))?)).unwrap();
        assert_eq!(game.store().history_len(), 1);
        assert!(game.undo());
        assert!(game.board().agents(Position::new(1, 1)).is_none());
    }

    #[test]
    fn test_transact_seals_history_after_reveal() {
        let mut game = game();
        game.transact(|g| Ok(g.store.place_agent(Position::new(1, 1), p(0))?)).unwrap();
        game.transact(|g| {
            g.revealed = true;
            Ok(g.store.place_agent(Position::new(2, 2), p(0))?)
        })
        .unwrap();
        assert_eq!(game.store().history_len(), 0);
        assert!(!game.undo());
        assert!(!game.revealed);
    }

    #[test]
    fn test_landmark_target_ends_game() {
        let config = RuleConfig::new(2).with_win(WinConditions {
            board_full: false,
            exhaustion: false,
            landmark_target: Some(1),
        });
        let mut game = Game::new(config, 0).unwrap();
        assert_eq!(game.check_win(), None);

        let o = Position::new(0, 0);
        game.store.place_tile(o, Tile::owned(TileType::Housing, p(1))).unwrap();
        game.store.place_tile(Position::new(1, 0), Tile::owned(TileType::Commerce, p(1))).unwrap();
        game.store.place_tile(Position::new(0, 1), Tile::owned(TileType::Industry, p(1))).unwrap();
        game.store.form_landmark(o, [o, Position::new(1, 0), Position::new(0, 1)]).unwrap();

        assert_eq!(game.check_win(), Some(GameResult::Winner(p(1))));
        assert!(game.is_over());
        assert_eq!(game.ensure_turn(p(0)), Err(RuleViolation::GameOver));
    }
}
