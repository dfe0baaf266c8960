//! Game events that passive effects react to.
//!
//! The caller fires a `GameEvent` after it has resolved something (a tile
//! placed, a card played, a parameter raised) and asks the
//! [`TriggerRegistry`](super::TriggerRegistry) which effects respond.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::trigger::TriggerType;
use crate::board::{TileKind, TileLocation};
use crate::cards::{Card, CardTag, CardType};
use crate::core::PlayerId;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    pub kind: TriggerType,
    /// Player who caused the event.
    pub player: PlayerId,
    pub tags: SmallVec<[CardTag; 4]>,
    pub card_type: Option<CardType>,
    pub tile: Option<TileKind>,
    pub location: Option<TileLocation>,
    /// Steps applied, for parameter events.
    pub steps: i32,
}

impl GameEvent {
    pub fn new(kind: TriggerType, player: PlayerId) -> Self {
        Self {
            kind,
            player,
            tags: SmallVec::new(),
            card_type: None,
            tile: None,
            location: None,
            steps: 0,
        }
    }

    /// A tile was put on the board.
    pub fn tile_placed(player: PlayerId, tile: TileKind, location: TileLocation) -> Self {
        let kind = match tile {
            TileKind::City => TriggerType::CityPlaced,
            TileKind::Ocean => TriggerType::OceanPlaced,
            TileKind::Greenery => TriggerType::GreeneryPlaced,
            TileKind::LandClaim => TriggerType::TilePlaced,
        };
        Self {
            tile: Some(tile),
            location: Some(location),
            ..Self::new(kind, player)
        }
    }

    /// A card was played. Carries the tags visible once played.
    pub fn card_played(player: PlayerId, card: &Card) -> Self {
        Self {
            tags: card.played_tags().collect(),
            card_type: Some(card.card_type),
            ..Self::new(TriggerType::CardPlayed, player)
        }
    }

    /// Temperature or oxygen rose by `steps`.
    pub fn parameter_raised(kind: TriggerType, player: PlayerId, steps: i32) -> Self {
        Self {
            steps,
            ..Self::new(kind, player)
        }
    }
}
