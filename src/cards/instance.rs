//! Event card instances.

use serde::{Deserialize, Serialize};

use super::definition::CardId;

/// One physical copy of an event card.
///
/// The instance number is unique within a game so two copies of the same
/// definition can be told apart in hands and in the event feed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventCard {
    pub instance: u32,
    pub card: CardId,
}

impl EventCard {
    #[must_use]
    pub const fn new(instance: u32, card: CardId) -> Self {
        Self { instance, card }
    }
}

impl std::fmt::Display for EventCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.card, self.instance)
    }
}
