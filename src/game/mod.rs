//! Game flow: the controller that turns player intents into store changes.
//!
//! ## Example
//!
//! ```
//! use rust_trinity::core::{PlayerId, Position, RuleConfig, StartingPlayer};
//! use rust_trinity::game::Game;
//!
//! let p0 = PlayerId::new(0);
//! let config = RuleConfig::new(2).with_starting_player(StartingPlayer::Fixed(p0));
//! let mut game = Game::new(config, 7).unwrap();
//! game.setup().unwrap();
//!
//! let outcome = game.place_tile(p0, 0, Position::new(3, 0)).unwrap();
//! assert!(outcome.turn_ended);
//! assert_eq!(game.current_player(), PlayerId::new(1));
//! ```

mod agents;
mod controller;
mod events;
mod setup;
mod turn;

pub use agents::TakeoverOutcome;
pub use controller::Game;
pub use turn::PlacementOutcome;
