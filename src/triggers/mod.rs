//! Triggers: when behaviors fire.
//!
//! ## Key Components
//!
//! - [`Trigger`]: activation mode plus an optional event condition
//! - [`ResourceTriggerCondition`]: which events fire a passive effect
//! - [`GameEvent`]: something that just happened in the game
//! - [`TriggerRegistry`]: passive effects of played cards, looked up by event
//!
//! ## Flow
//!
//! ```
//! use terraform_rules::board::{TileKind, TileLocation};
//! use terraform_rules::cards::{Card, CardType};
//! use terraform_rules::core::{PlayerId, ResourceKind};
//! use terraform_rules::effects::{CardBehavior, ResourceCondition, Target};
//! use terraform_rules::triggers::{
//!     GameEvent, ResourceTriggerCondition, Trigger, TriggerRegistry, TriggerType,
//! };
//!
//! // "When any city is placed, gain 2 credits."
//! let card = Card::new("141", "Rover Construction", CardType::Active).with_behavior(
//!     CardBehavior::new()
//!         .with_trigger(Trigger::on(
//!             ResourceTriggerCondition::new(TriggerType::CityPlaced).with_target(Target::AnyPlayer),
//!         ))
//!         .with_output(ResourceCondition::new(ResourceKind::Credits, 2)),
//! );
//!
//! let mut registry = TriggerRegistry::new();
//! registry.register_card(PlayerId::new(0), &card);
//!
//! let event = GameEvent::tile_placed(PlayerId::new(1), TileKind::City, TileLocation::Mars);
//! assert_eq!(registry.find_triggers(&event).len(), 1);
//! ```

mod condition;
mod event;
mod registry;
mod trigger;

pub use event::GameEvent;
pub use registry::{EffectId, PlayerEffect, TriggerRegistry};
pub use trigger::{ResourceTriggerCondition, Trigger, TriggerMode, TriggerType};
