//! Pending player selections.
//!
//! Some outputs cannot finish without a player decision: where to put a
//! tile, or which drawn cards to keep. Each player has exactly one
//! `SelectionState`:
//!
//! ```text
//! Idle ──enqueue_tiles──▶ AwaitingTileSelection ──complete_tile (last)──▶ Idle
//!   │                            │
//!   └──begin_card_selection──▶ AwaitingCardSelection ◀─┘
//!                                │ complete_card_selection
//!                                ▼
//!                  AwaitingTileSelection (deferred tiles) or Idle
//! ```
//!
//! A card selection takes precedence: tiles queued before or during it
//! wait in `deferred_tiles` and resume, in order, once it is resolved.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::board::TileKind;
use crate::cards::CardId;
use crate::core::{EngineError, PlayerId, Result};
use crate::effects::TileRestrictions;

/// One tile the player still has to place.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingTileSelection {
    pub tile: TileKind,
    /// Card or project that queued the placement.
    pub source: String,
    pub restrictions: Option<TileRestrictions>,
}

/// Drawn cards waiting for the player to take or buy some of them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingCardDrawSelection {
    pub available_cards: Vec<CardId>,
    pub free_take_count: usize,
    pub max_buy_count: usize,
    pub card_buy_cost: i32,
    pub source: String,
    pub source_card: Option<CardId>,
    pub source_behavior_index: Option<usize>,
}

impl PendingCardDrawSelection {
    /// Every drawn card must be kept and nothing can be bought.
    #[must_use]
    pub fn is_pure_draw(&self) -> bool {
        self.max_buy_count == 0 && self.free_take_count == self.available_cards.len()
    }

    /// Validate a take/buy choice and return the credit cost of the buys.
    pub fn validate(&self, take: &[CardId], buy: &[CardId]) -> Result<i32> {
        let selected = take.len() + buy.len();
        let allowed = self.free_take_count + self.max_buy_count;
        if selected > allowed {
            return Err(EngineError::InvalidSelection(format!(
                "too many cards selected: {selected}, max {allowed}"
            )));
        }
        if take.len() > self.free_take_count {
            return Err(EngineError::InvalidSelection(format!(
                "too many free cards: {}, max {}",
                take.len(),
                self.free_take_count
            )));
        }
        if self.is_pure_draw() && take.len() != self.free_take_count {
            return Err(EngineError::InvalidSelection(format!(
                "must take all {} drawn cards",
                self.free_take_count
            )));
        }
        if buy.len() > self.max_buy_count {
            return Err(EngineError::InvalidSelection(format!(
                "too many cards to buy: {}, max {}",
                buy.len(),
                self.max_buy_count
            )));
        }

        let mut seen: Vec<&CardId> = Vec::with_capacity(selected);
        for card in take.iter().chain(buy) {
            if !self.available_cards.contains(card) {
                return Err(EngineError::InvalidSelection(format!(
                    "card {card} was not drawn"
                )));
            }
            if seen.contains(&card) {
                return Err(EngineError::InvalidSelection(format!(
                    "card {card} selected twice"
                )));
            }
            seen.push(card);
        }

        Ok(buy.len() as i32 * self.card_buy_cost)
    }

    /// Drawn cards not in `kept`, in draw order.
    #[must_use]
    pub fn unselected(&self, kept: &[CardId]) -> Vec<CardId> {
        self.available_cards
            .iter()
            .filter(|c| !kept.contains(c))
            .cloned()
            .collect()
    }
}

/// Per-player selection state machine.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionState {
    #[default]
    Idle,
    AwaitingTileSelection(VecDeque<PendingTileSelection>),
    AwaitingCardSelection {
        selection: PendingCardDrawSelection,
        deferred_tiles: VecDeque<PendingTileSelection>,
    },
}

impl SelectionState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Append tiles in order behind anything already queued.
    pub fn enqueue_tiles(&mut self, tiles: impl IntoIterator<Item = PendingTileSelection>) {
        let mut tiles = tiles.into_iter().peekable();
        if tiles.peek().is_none() {
            return;
        }
        match self {
            Self::Idle => *self = Self::AwaitingTileSelection(tiles.collect()),
            Self::AwaitingTileSelection(queue) => queue.extend(tiles),
            Self::AwaitingCardSelection { deferred_tiles, .. } => deferred_tiles.extend(tiles),
        }
    }

    /// Enter card selection. Fails if one is already pending.
    pub fn begin_card_selection(&mut self, player: PlayerId, selection: PendingCardDrawSelection) -> Result<()> {
        match std::mem::take(self) {
            Self::Idle => {
                *self = Self::AwaitingCardSelection {
                    selection,
                    deferred_tiles: VecDeque::new(),
                };
                Ok(())
            }
            Self::AwaitingTileSelection(queue) => {
                *self = Self::AwaitingCardSelection {
                    selection,
                    deferred_tiles: queue,
                };
                Ok(())
            }
            pending @ Self::AwaitingCardSelection { .. } => {
                *self = pending;
                Err(EngineError::SelectionPending(player))
            }
        }
    }

    /// Put back a card selection that was taken out but not resolved.
    ///
    /// Tiles queued meanwhile are deferred behind it again. Hands the
    /// selection back if another card selection has begun.
    pub fn restore_card_selection(
        &mut self,
        selection: PendingCardDrawSelection,
    ) -> std::result::Result<(), PendingCardDrawSelection> {
        match std::mem::take(self) {
            Self::Idle => {
                *self = Self::AwaitingCardSelection {
                    selection,
                    deferred_tiles: VecDeque::new(),
                };
                Ok(())
            }
            Self::AwaitingTileSelection(queue) => {
                *self = Self::AwaitingCardSelection {
                    selection,
                    deferred_tiles: queue,
                };
                Ok(())
            }
            pending @ Self::AwaitingCardSelection { .. } => {
                *self = pending;
                Err(selection)
            }
        }
    }

    /// Tile the player must place next, if tile placement is active.
    #[must_use]
    pub fn next_tile(&self) -> Option<&PendingTileSelection> {
        match self {
            Self::AwaitingTileSelection(queue) => queue.front(),
            _ => None,
        }
    }

    /// Every queued tile, active or deferred, in order.
    #[must_use]
    pub fn pending_tiles(&self) -> Vec<PendingTileSelection> {
        match self {
            Self::Idle => Vec::new(),
            Self::AwaitingTileSelection(queue) => queue.iter().cloned().collect(),
            Self::AwaitingCardSelection { deferred_tiles, .. } => {
                deferred_tiles.iter().cloned().collect()
            }
        }
    }

    #[must_use]
    pub fn pending_card_selection(&self) -> Option<&PendingCardDrawSelection> {
        match self {
            Self::AwaitingCardSelection { selection, .. } => Some(selection),
            _ => None,
        }
    }

    /// Pop the front tile once the player has placed it.
    pub fn complete_tile(&mut self, player: PlayerId) -> Result<PendingTileSelection> {
        match self {
            Self::AwaitingTileSelection(queue) => {
                let tile = queue.pop_front().ok_or(EngineError::NoPendingSelection {
                    player,
                    what: "tile",
                })?;
                if queue.is_empty() {
                    *self = Self::Idle;
                }
                Ok(tile)
            }
            Self::AwaitingCardSelection { .. } => Err(EngineError::InvalidSelection(
                "resolve the pending card selection first".to_string(),
            )),
            Self::Idle => Err(EngineError::NoPendingSelection {
                player,
                what: "tile",
            }),
        }
    }

    /// Leave card selection, resuming any deferred tiles.
    pub fn complete_card_selection(&mut self, player: PlayerId) -> Result<PendingCardDrawSelection> {
        match std::mem::take(self) {
            Self::AwaitingCardSelection {
                selection,
                deferred_tiles,
            } => {
                if !deferred_tiles.is_empty() {
                    *self = Self::AwaitingTileSelection(deferred_tiles);
                }
                Ok(selection)
            }
            other => {
                *self = other;
                Err(EngineError::NoPendingSelection {
                    player,
                    what: "card",
                })
            }
        }
    }
}
