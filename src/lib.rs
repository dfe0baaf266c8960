//! # terraform-rules
//!
//! Server-side behavior resolution for a terraforming board game.
//!
//! Cards carry behaviors as data: what they cost, what they yield, and when
//! they fire. This crate applies that data to one game's state, authoritatively.
//!
//! ## Design Principles
//!
//! 1. **One session per game**: a [`GameSession`] owns the players, board,
//!    global parameters, deck and pending selections of one game. It is
//!    passed explicitly; nothing is global.
//!
//! 2. **Validated context**: an [`ApplyContext`] is built once, checked, and
//!    never changes while a behavior resolves.
//!
//! 3. **Closed dispatch**: targets and resource kinds are enums matched
//!    exhaustively.
//!
//! 4. **Deferred choices are states**: tile placements and card draws that
//!    need the player wait in a per-player [`SelectionState`].
//!
//! ## Modules
//!
//! - `core`: ids, resource kinds, errors, config, events, the game session
//! - `cards`: card definitions, registry, deck, requirements
//! - `board`: spaces, tiles and tile counts
//! - `parameters`: temperature, oxygen and oceans
//! - `player`: the player aggregate, its ledger and pending selections
//! - `effects`: behavior data and the applier
//! - `triggers`: game events and the passive effects they fire

pub mod board;
pub mod cards;
pub mod core;
pub mod effects;
pub mod parameters;
pub mod player;
pub mod triggers;

// Re-export commonly used types
pub use crate::core::{
    CancelToken, DomainEvent, EngineConfig, EngineError, EventBus, GameSession, PlayerId, ResourceKind,
    Result,
};

pub use crate::cards::{Card, CardId, CardLookup, CardRegistry, CardTag, CardType, Deck};

pub use crate::board::{Board, HexPosition, TileKind, TileLocation};

pub use crate::effects::{
    ApplyContext, BehaviorApplier, CalculatedOutput, CardBehavior, PerCondition, ResourceCondition, Target,
};

pub use crate::player::{PendingCardDrawSelection, PendingTileSelection, Player, SelectionState};

pub use crate::triggers::{GameEvent, Trigger, TriggerRegistry, TriggerType};
