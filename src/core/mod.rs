//! Core engine types: players, resources, errors, configuration, events and
//! the per-game session.
//!
//! Everything a behavior touches is reached through a [`GameSession`]. There
//! is no process-wide state; different games never share a lock.

pub mod cancel;
pub mod config;
pub mod error;
pub mod events;
pub mod player;
pub mod resource;
pub mod rng;
pub mod session;

pub use cancel::CancelToken;
pub use config::{EngineConfig, ParameterRange};
pub use error::{EngineError, Result};
pub use events::{DomainEvent, EventBus};
pub use player::{PlayerId, PlayerMap};
pub use resource::{ResourceKind, BASIC_RESOURCES};
pub use rng::GameRng;
pub use session::{GameSession, GameSessionBuilder};
