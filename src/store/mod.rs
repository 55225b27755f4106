//! Game state: the store, per-player records, turn bookkeeping, and saves.
//!
//! All mutation goes through [`StateStore`]; everything else reads.

mod player;
mod save;
#[allow(clippy::module_inception)]
mod store;
mod turn;

pub use player::{Player, PlayerFlags};
pub use save::SaveData;
pub use store::StateStore;
pub use turn::{Phase, Turn};
