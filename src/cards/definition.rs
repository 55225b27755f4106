//! Event card definitions - static card data.
//!
//! `EventCardDefinition` holds the immutable properties of a card kind:
//! its name, what it targets, and the effect it resolves to. Copies in a
//! game are [`EventCard`](super::EventCard) instances pointing back here.

use serde::{Deserialize, Serialize};

use crate::effects::{CardEffect, TargetFilter, TargetSpec, TargetType};
use crate::triggers::ReactiveTrigger;

/// Unique identifier for an event card definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Broad grouping of event cards, for display and filtering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Hand and pile manipulation.
    Growth,
    /// Changes to other players' tiles.
    Sabotage,
    /// Agent effects.
    Military,
    /// Hidden information.
    Intel,
    /// Fires in response to something happening to you.
    Reactive,
}

/// Static event card definition.
///
/// ## Example
///
/// ```
/// use rust_trinity::cards::{CardId, Category, EventCardDefinition};
/// use rust_trinity::effects::{CardEffect, TargetFilter, TargetType};
///
/// let wreck = EventCardDefinition::new(CardId::new(1), "Wrecking Ball", Category::Sabotage, CardEffect::RemoveTile)
///     .with_target(TargetType::Cell, TargetFilter::OpponentTiles);
///
/// assert_eq!(wreck.target.filter, Some(TargetFilter::OpponentTiles));
/// assert!(!wreck.is_reactive());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventCardDefinition {
    pub id: CardId,
    pub name: String,
    pub category: Category,
    /// What the card is aimed at when played.
    pub target: TargetSpec,
    pub effect: CardEffect,
    /// Set for cards that fire in response to an event instead of being played.
    pub trigger: Option<ReactiveTrigger>,
}

impl EventCardDefinition {
    /// Create an untargeted card.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>, category: Category, effect: CardEffect) -> Self {
        Self {
            id,
            name: name.into(),
            category,
            target: TargetSpec::none(),
            effect,
            trigger: None,
        }
    }

    /// Aim the card at entities of `target_type` passing `filter` (builder pattern).
    #[must_use]
    pub fn with_target(mut self, target_type: TargetType, filter: TargetFilter) -> Self {
        self.target = TargetSpec::new(target_type, filter);
        self
    }

    /// Make the card reactive (builder pattern).
    #[must_use]
    pub fn with_trigger(mut self, trigger: ReactiveTrigger) -> Self {
        self.trigger = Some(trigger);
        self
    }

    /// Cards that only fire in response to an event.
    #[must_use]
    pub fn is_reactive(&self) -> bool {
        self.trigger.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id() {
        let id = CardId::new(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(format!("{}", id), "Card(42)");
    }

    #[test]
    fn test_reactive_builder() {
        let card = EventCardDefinition::new(CardId::new(3), "Policy", Category::Reactive, CardEffect::Insurance)
            .with_trigger(ReactiveTrigger::OnLandmarkLost);

        assert!(card.is_reactive());
        assert_eq!(card.target.target_type, TargetType::None);
    }

    #[test]
    fn test_definition_serialization() {
        let card = EventCardDefinition::new(CardId::new(1), "Survey", Category::Intel, CardEffect::PeekDrawPile { count: 3 });
        let json = serde_json::to_string(&card).unwrap();
        let back: EventCardDefinition = serde_json::from_str(&json).unwrap();
        assert_eq!(card, back);
    }
}
