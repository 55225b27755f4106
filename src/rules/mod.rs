//! Rules engine: pure functions over a board snapshot.
//!
//! Nothing here stores state or mutates the board. Expected rejections come
//! back as [`RuleViolation`](crate::core::RuleViolation) so callers can show
//! the reason to the player.
//!
//! - [`placement`]: placement legality and starting zones
//! - [`trinity`]: landmark detection
//! - [`combo`]: combo-chain connection
//! - [`scoring`]: score, standings, and game-end tests

pub mod combo;
pub mod placement;
pub mod scoring;
pub mod trinity;

pub use combo::{can_continue, check_combo_placement, is_combo_connected};
pub use placement::{check_placement, in_starting_zone, valid_placements};
pub use scoring::{decide, is_exhausted, score, secured_landmarks, standings, GameResult, Standing};
pub use trinity::{detect_after_placement, detect_for_player, detect_from, is_connected, TrinityProposal};
