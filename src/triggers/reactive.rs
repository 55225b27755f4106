//! Reactive card triggers.
//!
//! A reactive card is never played from hand. It sits there until the
//! situation named by its trigger arises, and is then consumed on the
//! holder's behalf.

use serde::{Deserialize, Serialize};

use crate::cards::{CardCatalog, EventCard};

/// Situations a reactive card can answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReactiveTrigger {
    /// One of the holder's landmarks is about to be destroyed.
    OnLandmarkLost,
}

/// Index of the first card in `hand` that answers `trigger`.
#[must_use]
pub fn find_responder(catalog: &CardCatalog, hand: &[EventCard], trigger: ReactiveTrigger) -> Option<usize> {
    hand.iter().position(|card| {
        catalog
            .get(card.card)
            .is_some_and(|def| def.trigger == Some(trigger))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardId;
    use crate::effects::CardEffect;

    #[test]
    fn test_find_responder() {
        let catalog = CardCatalog::standard();
        let insurance = catalog
            .find(|c| c.effect == CardEffect::Insurance)
            .map(|c| c.id)
            .unwrap();
        let other = catalog.find(|c| c.effect == CardEffect::ViewHand).map(|c| c.id).unwrap();

        let hand = [EventCard::new(0, other), EventCard::new(1, insurance)];
        assert_eq!(find_responder(&catalog, &hand, ReactiveTrigger::OnLandmarkLost), Some(1));
        assert_eq!(find_responder(&catalog, &hand[..1], ReactiveTrigger::OnLandmarkLost), None);
        assert_eq!(
            find_responder(&catalog, &[EventCard::new(2, CardId::new(999))], ReactiveTrigger::OnLandmarkLost),
            None
        );
    }
}
