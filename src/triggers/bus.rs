//! Observer registry for the event feed.
//!
//! Listeners are plain closures called synchronously, in registration
//! order, for every event published after they subscribe. They receive a
//! shared reference to a value that owns copies of its data.
//!
//! The bus is owned by the state store and `publish` runs while the store
//! is mutably borrowed, so a listener has no safe path back into the
//! engine's mutators. Listeners that need to react with a game action
//! should record the event and act after the current call returns.

use serde::{Deserialize, Serialize};

use super::event::GameEvent;

/// Handle returned by [`EventBus::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(pub u32);

type Listener = Box<dyn FnMut(&GameEvent)>;

/// Registration-ordered list of listeners.
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u32,
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. It sees every event published from now on.
    pub fn subscribe(&mut self, listener: impl FnMut(&GameEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if the ID was unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    /// Deliver `event` to every listener in registration order.
    pub fn publish(&mut self, event: &GameEvent) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Phase;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::new();

        for tag in ["first", "second"] {
            let log = Rc::clone(&log);
            bus.subscribe(move |e| log.borrow_mut().push((tag, e.name())));
        }
        bus.publish(&GameEvent::PhaseChanged { phase: Phase::Play });

        assert_eq!(
            *log.borrow(),
            vec![("first", "phase_changed"), ("second", "phase_changed")]
        );
    }

    #[test]
    fn test_unsubscribe() {
        let count = Rc::new(RefCell::new(0));
        let mut bus = EventBus::new();

        let c = Rc::clone(&count);
        let id = bus.subscribe(move |_| *c.borrow_mut() += 1);
        bus.publish(&GameEvent::StateRestored { turn: 1 });

        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        bus.publish(&GameEvent::StateRestored { turn: 1 });

        assert_eq!(*count.borrow(), 1);
        assert!(bus.is_empty());
    }
}
