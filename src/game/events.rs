//! Event card play.

use tracing::{info, instrument};

use super::controller::Game;
use crate::cards::EventCardDefinition;
use crate::core::{ActionError, PlayerId, RuleViolation};
use crate::effects::{resolver, EffectOutcome, PlayArgs, Target, TargetSelector};
use crate::triggers::GameEvent;

impl Game {
    /// Legal targets for the event card at `index` of `player`'s hand. Empty
    /// for untargeted cards.
    pub fn event_targets(&self, player: PlayerId, index: usize) -> Result<Vec<Target>, RuleViolation> {
        let card = self.event_definition(player, index)?;
        let selector = TargetSelector::new(card.target, player, self.store.player_count());
        Ok(selector.valid_targets(self.store.board()))
    }

    /// Play the event card at `index` of `player`'s hand.
    ///
    /// Cards may be played in any phase of the player's own turn, up to
    /// `events_per_turn` per turn. Reactive cards are refused. If the effect
    /// moved or re-owned tiles, newly completed landmarks are formed (when
    /// auto-forming is on). A card that draws or shows hidden cards cannot
    /// be undone.
    #[instrument(skip(self, args))]
    pub fn play_event(&mut self, player: PlayerId, index: usize, args: PlayArgs) -> Result<EffectOutcome, ActionError> {
        self.ensure_turn(player)?;
        if self.turn().events_played >= self.config.events_per_turn {
            return Err(RuleViolation::EventLimitReached.into());
        }
        let definition = self.event_definition(player, index)?.clone();
        let plan = resolver::validate(&self.store, player, &definition, &args)?;
        let reveals = plan.reveals_hidden();

        let outcome = self.transact(|g| {
            g.revealed = reveals;
            let card = g.store.take_event(player, index)?;
            let outcome = resolver::apply(&mut g.store, &g.config, player, plan)?;
            g.store.count_event_played();
            g.store.publish(GameEvent::EventPlayed { player, card });
            if definition.effect.reshapes_tiles() && g.config.auto_form_landmarks {
                g.auto_form(player, None)?;
            }
            Ok(outcome)
        })?;
        info!(card = %definition.name, "event played");
        self.check_win();
        Ok(outcome)
    }

    fn event_definition(&self, player: PlayerId, index: usize) -> Result<&EventCardDefinition, RuleViolation> {
        let card = self
            .store
            .player(player)
            .and_then(|p| p.events.get(index))
            .ok_or(RuleViolation::NoSuchEventCard(index))?;
        self.catalog
            .get(card.card)
            .ok_or(RuleViolation::InvalidTarget("card is not in this game's deck"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Tile, TileType};
    use crate::cards::{CardId, EventCard};
    use crate::core::{Position, RuleConfig, StartingPlayer, WinConditions};

    fn p(i: u8) -> PlayerId {
        PlayerId::new(i)
    }

    fn game() -> Game {
        let mut config = RuleConfig::new(2)
            .with_starting_player(StartingPlayer::Fixed(p(0)))
            .with_shuffle(false)
            .with_starting_hand(0)
            .with_win(WinConditions {
                board_full: false,
                exhaustion: false,
                landmark_target: None,
            });
        config.starting_events = 0;
        let mut game = Game::new(config, 0).unwrap();
        game.setup().unwrap();
        game
    }

    fn give_card(game: &mut Game, player: PlayerId, id: u32) {
        let instance = 500 + game.player(player).unwrap().events.len() as u32;
        game.store.add_event(player, EventCard::new(instance, CardId::new(id))).unwrap();
    }

    fn tile(game: &mut Game, x: u8, y: u8, tile_type: TileType, owner: PlayerId) {
        game.store.place_tile(Position::new(x, y), Tile::owned(tile_type, owner)).unwrap();
    }

    #[test]
    fn test_draw_card_and_turn_limit() {
        let mut game = game();
        give_card(&mut game, p(0), 1);
        give_card(&mut game, p(0), 1);

        assert_eq!(game.play_event(p(0), 0, PlayArgs::new()).unwrap(), EffectOutcome::TilesDrawn(2));
        let state = game.player(p(0)).unwrap();
        assert_eq!(state.hand.len(), 2);
        assert_eq!(state.events.len(), 1);
        assert_eq!(game.turn().events_played, 1);

        assert!(matches!(
            game.play_event(p(0), 0, PlayArgs::new()),
            Err(ActionError::Rule(RuleViolation::EventLimitReached))
        ));
    }

    #[test]
    fn test_bad_index_and_reactive() {
        let mut game = game();
        assert!(matches!(
            game.play_event(p(0), 0, PlayArgs::new()),
            Err(ActionError::Rule(RuleViolation::NoSuchEventCard(0)))
        ));
        give_card(&mut game, p(0), 19);
        assert!(matches!(
            game.play_event(p(0), 0, PlayArgs::new()),
            Err(ActionError::Rule(RuleViolation::ReactiveOnly))
        ));
        assert_eq!(game.player(p(0)).unwrap().events.len(), 1);
    }

    #[test]
    fn test_event_targets() {
        let mut game = game();
        tile(&mut game, 3, 3, TileType::Housing, p(0));
        tile(&mut game, 3, 4, TileType::Commerce, p(1));
        tile(&mut game, 6, 6, TileType::Industry, p(1));
        give_card(&mut game, p(0), 6);
        give_card(&mut game, p(0), 18);

        assert_eq!(
            game.event_targets(p(0), 0).unwrap(),
            vec![Target::Cell(Position::new(3, 4))]
        );
        assert_eq!(game.event_targets(p(0), 1).unwrap(), vec![Target::Player(p(1))]);
        assert_eq!(game.event_targets(p(0), 2), Err(RuleViolation::NoSuchEventCard(2)));
    }

    #[test]
    fn test_steal_completes_landmark() {
        let mut game = game();
        tile(&mut game, 3, 2, TileType::Housing, p(0));
        tile(&mut game, 4, 2, TileType::Commerce, p(0));
        tile(&mut game, 3, 3, TileType::Industry, p(1));
        give_card(&mut game, p(0), 6);

        let args = PlayArgs::targeting(Target::Cell(Position::new(3, 3)));
        game.play_event(p(0), 0, args).unwrap();
        assert!(game.board().landmark(Position::new(3, 2)).is_some());
        assert_eq!(game.player(p(0)).unwrap().landmarks, 1);
        assert!(game.board().tile(Position::new(3, 3)).is_none());
    }

    #[test]
    fn test_invalid_target_keeps_card() {
        let mut game = game();
        tile(&mut game, 3, 3, TileType::Housing, p(0));
        tile(&mut game, 6, 6, TileType::Industry, p(1));
        give_card(&mut game, p(0), 6);

        let args = PlayArgs::targeting(Target::Cell(Position::new(6, 6)));
        assert!(matches!(
            game.play_event(p(0), 0, args),
            Err(ActionError::Rule(RuleViolation::InvalidTarget(_)))
        ));
        assert_eq!(game.player(p(0)).unwrap().events.len(), 1);
        assert!(game.board().tile(Position::new(6, 6)).unwrap().is_owned_by(p(1)));
        assert_eq!(game.store().history_len(), 0);
    }

    #[test]
    fn test_airlift_then_distant_placement() {
        let mut game = game();
        tile(&mut game, 0, 0, TileType::Housing, p(0));
        game.store.add_to_hand(p(0), Tile::new(TileType::Commerce)).unwrap();
        give_card(&mut game, p(0), 11);

        game.play_event(p(0), 0, PlayArgs::new()).unwrap();
        assert!(game.player(p(0)).unwrap().flags.ignore_adjacency);
        game.place_tile(p(0), 0, Position::new(6, 6)).unwrap();
        assert!(game.board().tile(Position::new(6, 6)).is_some());
        assert!(!game.player(p(0)).unwrap().flags.ignore_adjacency);
    }

    #[test]
    fn test_undo_open_event_play() {
        let mut game = game();
        give_card(&mut game, p(0), 11);
        let before = game.serialize();

        game.play_event(p(0), 0, PlayArgs::new()).unwrap();
        assert!(game.undo());
        assert_eq!(game.serialize(), before);
    }

    #[test]
    fn test_hidden_information_cannot_be_undone() {
        // draw tiles, draw events, survey, logistics, espionage
        let plays = [
            (1, PlayArgs::new()),
            (2, PlayArgs::new()),
            (16, PlayArgs::new()),
            (17, PlayArgs::new().with_order([2usize, 1, 0])),
            (18, PlayArgs::targeting(Target::Player(p(1)))),
        ];
        for (id, args) in plays {
            let mut game = game();
            game.store.place_agent(Position::new(5, 5), p(0)).unwrap();
            game.transact(|g| Ok(g.store.move_agent(Position::new(5, 5), Position::new(5, 6), p(0))?))
                .unwrap();
            give_card(&mut game, p(0), id);

            game.play_event(p(0), 0, args).unwrap();
            assert!(!game.undo(), "card {id} was undone");
            assert_eq!(game.turn().events_played, 1);
            assert_eq!(game.board().agent_count_at(Position::new(5, 6), p(0)), 1);
        }
    }
}
