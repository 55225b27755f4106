//! Event card catalog.
//!
//! The `CardCatalog` stores every event card definition for a game and
//! provides lookup by `CardId`. [`CardCatalog::standard`] is the stock deck.

use rustc_hash::FxHashMap;

use super::definition::{CardId, Category, EventCardDefinition};
use crate::effects::{CardEffect, TargetFilter, TargetType};
use crate::triggers::ReactiveTrigger;

/// Registry of event card definitions.
///
/// ```
/// use rust_trinity::cards::{CardCatalog, CardId, Category, EventCardDefinition};
/// use rust_trinity::effects::CardEffect;
///
/// let mut catalog = CardCatalog::new();
/// assert!(catalog.register(EventCardDefinition::new(CardId::new(1), "Windfall", Category::Growth, CardEffect::DrawTiles { count: 3 })));
/// assert_eq!(catalog.get(CardId::new(1)).map(|c| c.name.as_str()), Some("Windfall"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: FxHashMap<CardId, EventCardDefinition>,
}

impl CardCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The stock event deck.
    #[must_use]
    pub fn standard() -> Self {
        use CardEffect as E;
        use TargetFilter as F;
        use TargetType as T;

        let defs = [
            EventCardDefinition::new(CardId::new(1), "Urban Planning", Category::Growth, E::DrawTiles { count: 2 }),
            EventCardDefinition::new(CardId::new(2), "Briefing", Category::Growth, E::DrawEvents { count: 2 }),
            EventCardDefinition::new(CardId::new(3), "Labor Strike", Category::Sabotage, E::ForceDiscard { count: 2 })
                .with_target(T::Player, F::Opponents),
            EventCardDefinition::new(CardId::new(4), "Demolition Permit", Category::Growth, E::ReturnTile)
                .with_target(T::Cell, F::OwnTiles),
            EventCardDefinition::new(CardId::new(5), "Wrecking Ball", Category::Sabotage, E::RemoveTile)
                .with_target(T::Cell, F::OpponentTiles),
            EventCardDefinition::new(CardId::new(6), "Hostile Acquisition", Category::Sabotage, E::StealTile)
                .with_target(T::Cell, F::OpponentTilesAdjacentToOwn),
            EventCardDefinition::new(CardId::new(7), "Land Swap", Category::Sabotage, E::SwapTiles)
                .with_target(T::Cell, F::OpponentTiles),
            EventCardDefinition::new(CardId::new(8), "Relocation", Category::Growth, E::MoveTile)
                .with_target(T::Cell, F::OwnTiles),
            EventCardDefinition::new(CardId::new(9), "Rezoning", Category::Growth, E::RetypeOwnTile)
                .with_target(T::Cell, F::OwnTiles),
            EventCardDefinition::new(CardId::new(10), "Eminent Domain", Category::Sabotage, E::RetypeOpponentTile)
                .with_target(T::Cell, F::OpponentTiles),
            EventCardDefinition::new(CardId::new(11), "Airlift", Category::Growth, E::IgnoreAdjacency),
            EventCardDefinition::new(CardId::new(12), "Reinforcements", Category::Military, E::SpawnAgent { count: 2 })
                .with_target(T::Cell, F::OwnHeadquarters),
            EventCardDefinition::new(CardId::new(13), "Infiltration", Category::Military, E::SpawnAgent { count: 1 })
                .with_target(T::Cell, F::AdjacentOpponentLandmarks),
            EventCardDefinition::new(CardId::new(14), "Diversion", Category::Military, E::MoveOpponentAgent)
                .with_target(T::Agent, F::OpponentAgents),
            EventCardDefinition::new(CardId::new(15), "Coup", Category::Military, E::FreeCapture)
                .with_target(T::Cell, F::OpponentTilesInAgentReach),
            EventCardDefinition::new(CardId::new(16), "Survey", Category::Intel, E::PeekDrawPile { count: 3 }),
            EventCardDefinition::new(CardId::new(17), "Logistics", Category::Intel, E::ReorderDrawPile { count: 3 }),
            EventCardDefinition::new(CardId::new(18), "Espionage", Category::Intel, E::ViewHand)
                .with_target(T::Player, F::Opponents),
            EventCardDefinition::new(CardId::new(19), "Insurance Policy", Category::Reactive, E::Insurance)
                .with_trigger(ReactiveTrigger::OnLandmarkLost),
        ];

        let mut catalog = Self::new();
        for def in defs {
            catalog.register(def);
        }
        catalog
    }

    /// Register a definition. Returns false (and keeps the existing entry)
    /// if the ID is already taken.
    pub fn register(&mut self, card: EventCardDefinition) -> bool {
        if self.cards.contains_key(&card.id) {
            return false;
        }
        self.cards.insert(card.id, card);
        true
    }

    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&EventCardDefinition> {
        self.cards.get(&id)
    }

    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Registered IDs in ascending order. Pile construction walks this so
    /// the unshuffled event pile is the same on every run.
    #[must_use]
    pub fn ids(&self) -> Vec<CardId> {
        let mut ids: Vec<_> = self.cards.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Iterate over all definitions (unordered).
    pub fn iter(&self) -> impl Iterator<Item = &EventCardDefinition> {
        self.cards.values()
    }

    /// First definition (lowest ID) whose effect matches `predicate`.
    pub fn find<F>(&self, predicate: F) -> Option<&EventCardDefinition>
    where
        F: Fn(&EventCardDefinition) -> bool,
    {
        self.ids()
            .into_iter()
            .filter_map(|id| self.cards.get(&id))
            .find(|c| predicate(c))
    }
}
