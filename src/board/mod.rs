//! Board data: tiles, landmarks, agent stacks, and the draw piles.
//!
//! ## Key Types
//!
//! - [`TileType`] / [`Tile`]: the three building types and a placed or held tile
//! - [`Landmark`]: three folded tiles occupying one cell
//! - [`AgentStack`]: owners of the agents standing on one cell
//! - [`Pile`]: LIFO draw pile for tiles and event cards
//! - [`Board`]: the grid itself
//!
//! A cell holds a tile, a landmark, or nothing. Agents may share any cell.

mod agents;
mod grid;
mod landmark;
mod pile;
mod tile;

pub use agents::AgentStack;
pub use grid::Board;
pub use landmark::Landmark;
pub use pile::Pile;
pub use tile::{Tile, TileType};
