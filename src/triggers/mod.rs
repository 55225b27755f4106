//! Event feed and reactive triggers.
//!
//! ## Key Components
//!
//! - [`GameEvent`]: typed record of one state change
//! - [`EventBus`]: synchronous, registration-ordered observer registry
//! - [`ReactiveTrigger`]: situations that fire reactive cards from hand
//!
//! ## Example Usage
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use rust_trinity::triggers::{EventBus, GameEvent};
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let mut bus = EventBus::new();
//! let sink = Rc::clone(&seen);
//! bus.subscribe(move |event: &GameEvent| sink.borrow_mut().push(event.name()));
//!
//! bus.publish(&GameEvent::StateRestored { turn: 3 });
//! assert_eq!(*seen.borrow(), vec!["state_restored"]);
//! ```

mod bus;
mod event;
mod reactive;

pub use bus::{EventBus, SubscriptionId};
pub use event::GameEvent;
pub use reactive::{find_responder, ReactiveTrigger};
