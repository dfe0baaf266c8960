//! Effect data and behavior application.
//!
//! Card behaviors are plain data: inputs to pay, outputs to apply, and the
//! triggers that decide when. This module defines that data and the
//! [`BehaviorApplier`] that turns it into changes on players and the game.
//!
//! ## Key Components
//!
//! - [`ResourceCondition`]: one input or output line
//! - [`PerCondition`]: scaling rule for an output
//! - [`Target`]: who or what an output applies to
//! - [`CardBehavior`]: triggers, inputs, outputs and choices of an ability
//! - [`ApplyContext`]: validated bindings for one application
//! - [`BehaviorApplier`]: pays inputs, applies outputs, starts card draws
//!
//! ## Sign Convention
//!
//! An input always costs `|amount|`. An output is a signed change, so a
//! negative output is a loss, except that any-player and steal targets
//! always remove `|amount|` from the chosen player.

mod applier;
mod behavior;
mod condition;
mod context;
mod counting;
mod targeting;

pub use applier::BehaviorApplier;
pub use behavior::{CalculatedOutput, CardBehavior, Choice, TriggeredEffect};
pub use condition::{
    resources_from_selectors, CardLocation, PerCondition, ResourceCondition, Selector, Target,
    TileRestrictions,
};
pub use context::{ApplyContext, ApplyContextBuilder};
pub use counting::count_player_tags;
