//! Event card effects.
//!
//! - [`CardEffect`]: the closed set of things a card can do
//! - [`TargetSpec`] / [`TargetSelector`]: what a card may aim at
//! - [`resolver`]: validation and application against the state store
//!
//! The selector is shared by the resolver and any UI, so highlighting and
//! validation never disagree.

mod effect;
pub mod resolver;
mod targeting;

pub use effect::{CardEffect, EffectOutcome};
pub use resolver::{PlayArgs, Plan};
pub use targeting::{Target, TargetFilter, TargetSelector, TargetSpec, TargetType};
