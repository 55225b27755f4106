//! Game setup: piles, starting player, opening hands, mulligan.

use tracing::{debug, info, instrument};

use super::controller::Game;
use crate::board::{Pile, Tile, TileType};
use crate::cards::EventCard;
use crate::core::{ActionError, PlayerId, RuleViolation, StartingPlayer, StoreError};
use crate::triggers::GameEvent;

impl Game {
    /// Set the game up, keeping the first offered card in any event draft.
    /// Returns the starting player.
    pub fn setup(&mut self) -> Result<PlayerId, ActionError> {
        self.setup_with_chooser(|_, _| 0)
    }

    /// Set the game up.
    ///
    /// Builds and (optionally) shuffles both piles, picks the starting
    /// player, deals opening hands and starting event cards. With
    /// `event_draft` enabled, `chooser(player, offered)` returns the index of
    /// the card `player` keeps; the other is passed to the next seat.
    #[instrument(skip(self, chooser))]
    pub fn setup_with_chooser(
        &mut self,
        mut chooser: impl FnMut(PlayerId, &[EventCard]) -> usize,
    ) -> Result<PlayerId, ActionError> {
        if self.setup_done {
            return Err(RuleViolation::AlreadySetUp.into());
        }

        let (draw_pile, event_pile) = self.build_piles();
        self.store.set_piles(draw_pile, event_pile);

        let count = self.store.player_count();
        let starting = self.config.starting_player;
        let first = match starting {
            StartingPlayer::Fixed(player) => player,
            StartingPlayer::Random => PlayerId::new(self.rng.gen_range_usize(0..count) as u8),
            StartingPlayer::DrawOff => self.draw_off(),
        };
        self.store.set_current_player(first)?;

        for player in first.turn_order(count) {
            for _ in 0..self.config.starting_hand {
                self.store.draw_tile(player)?;
            }
            self.store.enforce_hand_limit(player, self.config.hand_size)?;
        }

        if self.config.event_draft {
            self.draft_events(&mut chooser)?;
        } else {
            for player in first.turn_order(count) {
                for _ in 0..self.config.starting_events {
                    self.store.draw_event(player)?;
                }
            }
        }
        for player in first.turn_order(count) {
            self.store.enforce_event_limit(player, self.config.event_hand_size)?;
        }

        self.store.clear_history();
        self.setup_done = true;
        info!(%first, "setup complete");
        Ok(first)
    }

    /// Give back the whole hand and draw the same number of tiles again.
    ///
    /// Allowed once per player, before their first placement, when the
    /// rules enable it. Returns the number of tiles redrawn.
    #[instrument(skip(self))]
    pub fn mulligan(&mut self, player: PlayerId) -> Result<usize, ActionError> {
        if self.is_over() {
            return Err(RuleViolation::GameOver.into());
        }
        let state = self
            .store
            .player(player)
            .ok_or(StoreError::UnknownPlayer(player))?;
        if !self.config.mulligan || state.flags.mulligan_used || state.tiles_placed > 0 {
            return Err(RuleViolation::MulliganUnavailable.into());
        }
        let mut flags = state.flags;

        let returned = self.store.return_hand(player)?;
        let mut redrawn = 0;
        while redrawn < returned && self.store.draw_tile(player)?.is_some() {
            redrawn += 1;
        }
        flags.mulligan_used = true;
        self.store.set_flags(player, flags)?;
        // the old hand is hidden information again
        self.store.clear_history();
        Ok(redrawn)
    }

    fn build_piles(&self) -> (Pile<Tile>, Pile<EventCard>) {
        let tiles = TileType::ALL
            .into_iter()
            .flat_map(|tt| std::iter::repeat(Tile::new(tt)).take(self.config.tiles_per_type));
        let mut draw_pile = Pile::from_bottom_up(tiles);

        let mut instance = 0;
        let mut cards = Vec::new();
        for id in self.catalog.ids() {
            for _ in 0..self.config.event_copies {
                cards.push(EventCard::new(instance, id));
                instance += 1;
            }
        }
        let mut event_pile = Pile::from_bottom_up(cards);

        if self.config.shuffle {
            draw_pile.shuffle(&mut self.rng.for_context("draw-pile"));
            event_pile.shuffle(&mut self.rng.for_context("event-pile"));
        }
        (draw_pile, event_pile)
    }

    /// Everyone draws a tile; the best type starts, ties draw again.
    ///
    /// Drawn tiles go back under the pile. Once the contenders have gone
    /// through the whole pile without a winner (or it is empty) the lowest
    /// remaining seat starts.
    fn draw_off(&mut self) -> PlayerId {
        let mut contenders: Vec<PlayerId> = PlayerId::all(self.store.player_count()).collect();
        self.store.publish(GameEvent::DrawOffStarted {
            contenders: contenders.clone(),
        });

        let mut budget = self.store.draw_pile().len();
        let winner = loop {
            if budget < contenders.len() {
                debug!("draw-off went through the whole pile");
                break contenders[0];
            }
            budget -= contenders.len();

            let mut drawn = Vec::with_capacity(contenders.len());
            for &player in &contenders {
                if let Some(tile) = self.store.pop_draw_pile() {
                    self.store.publish(GameEvent::DrawOffTileDrawn {
                        player,
                        tile_type: tile.tile_type,
                    });
                    drawn.push((player, tile));
                }
            }
            for &(_, tile) in &drawn {
                self.store.push_draw_pile_bottom(tile);
            }

            let best = drawn.iter().map(|(_, t)| t.tile_type.rank()).max().unwrap_or(0);
            let tied: Vec<PlayerId> = drawn
                .iter()
                .filter(|(_, t)| t.tile_type.rank() == best)
                .map(|&(p, _)| p)
                .collect();
            match tied[..] {
                [] => break contenders[0],
                [winner] => break winner,
                _ => {
                    self.store.publish(GameEvent::DrawOffTie { players: tied.clone() });
                    contenders = tied;
                }
            }
        };
        self.store.publish(GameEvent::DrawOffResolved { winner });
        winner
    }

    /// Deal-two, keep-one, pass-one-left, once per starting event.
    fn draft_events(
        &mut self,
        chooser: &mut impl FnMut(PlayerId, &[EventCard]) -> usize,
    ) -> Result<(), StoreError> {
        let count = self.store.player_count();
        for _ in 0..self.config.starting_events {
            for player in PlayerId::all(count) {
                let offered: Vec<EventCard> = (0..2).filter_map(|_| self.store.pop_event_pile()).collect();
                if offered.is_empty() {
                    return Ok(());
                }
                let keep = chooser(player, &offered).min(offered.len() - 1);
                for (i, card) in offered.into_iter().enumerate() {
                    let to = if i == keep { player } else { player.next(count) };
                    self.store.add_event(to, card)?;
                }
            }
        }
        Ok(())
    }
}
