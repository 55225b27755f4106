//! Event cards: definitions, instances, and the catalog.
//!
//! ## Key Types
//!
//! - `CardId`: identifier for a card definition
//! - `EventCardDefinition`: static card data (target, effect, reactive trigger)
//! - `EventCard`: one copy of a card in a pile or hand
//! - `CardCatalog`: definition lookup

pub mod catalog;
pub mod definition;
pub mod instance;

pub use catalog::CardCatalog;
pub use definition::{CardId, Category, EventCardDefinition};
pub use instance::EventCard;
