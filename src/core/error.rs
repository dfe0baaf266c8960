//! Engine error type.
//!
//! Every fallible operation returns [`Result`]. Errors here are *hard*
//! failures: they stop the current sequence and propagate to the caller.
//! Expected no-op situations (stealing in a solo game, a saturated global
//! parameter, an empty card store) are not errors and only log.

use thiserror::Error;

use crate::board::HexPosition;
use crate::cards::CardId;
use crate::core::{PlayerId, ResourceKind};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("insufficient {kind}: need {needed}, have {available}")]
    InsufficientResource {
        kind: ResourceKind,
        needed: i32,
        available: i32,
    },

    #[error("cannot {operation}: no {missing} context")]
    MissingContext {
        operation: &'static str,
        missing: &'static str,
    },

    #[error("no target card bound for any-card {kind} placement")]
    MissingTargetCard { kind: ResourceKind },

    #[error("unknown player: {0}")]
    UnknownPlayer(PlayerId),

    #[error("{0} is not seated in this game")]
    PlayerNotInGame(PlayerId),

    #[error("card not found: {0}")]
    CardNotFound(CardId),

    #[error("card already registered: {0}")]
    DuplicateCard(CardId),

    #[error("not enough cards in deck: requested {requested}, available {available}")]
    DeckExhausted { requested: usize, available: usize },

    #[error("operation cancelled")]
    Cancelled,

    #[error("{0} already has a pending card selection")]
    SelectionPending(PlayerId),

    #[error("{player} has no pending {what} selection")]
    NoPendingSelection {
        player: PlayerId,
        what: &'static str,
    },

    #[error("invalid selection: {0}")]
    InvalidSelection(String),

    #[error("requirement not met for {card}: {reason}")]
    RequirementNotMet { card: CardId, reason: String },

    #[error("tile at {0} is already occupied")]
    TileOccupied(HexPosition),

    #[error("no tile at {0}")]
    TileNotFound(HexPosition),

    #[error("invalid session: {0}")]
    InvalidSession(String),

    #[error("data error: {0}")]
    Data(String),
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        Self::Data(err.to_string())
    }
}

impl From<bincode::Error> for EngineError {
    fn from(err: bincode::Error) -> Self {
        Self::Data(err.to_string())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EngineError>;

impl EngineError {
    pub(crate) const fn missing_player(operation: &'static str) -> Self {
        Self::MissingContext {
            operation,
            missing: "player",
        }
    }

    pub(crate) const fn missing_session(operation: &'static str) -> Self {
        Self::MissingContext {
            operation,
            missing: "game",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = EngineError::InsufficientResource {
            kind: ResourceKind::Credits,
            needed: 5,
            available: 2,
        };
        assert_eq!(err.to_string(), "insufficient credits: need 5, have 2");

        let err = EngineError::missing_session("apply oxygen");
        assert_eq!(err.to_string(), "cannot apply oxygen: no game context");
    }

    #[test]
    fn test_json_error_converts() {
        let parse: std::result::Result<i32, _> = serde_json::from_str("not json");
        let err: EngineError = parse.unwrap_err().into();
        assert!(matches!(err, EngineError::Data(_)));
    }
}
