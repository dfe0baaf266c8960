//! Project card deck.
//!
//! Cards are drawn from the top of the draw pile. Cards a player looked at
//! but did not keep go to the discard pile.

use serde::{Deserialize, Serialize};

use super::definition::CardId;
use crate::core::{CancelToken, EngineError, GameRng, Result};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    draw_pile: Vec<CardId>,
    discard_pile: Vec<CardId>,
}

impl Deck {
    /// Deck in the given order; the first id is the top card.
    pub fn new(cards: impl IntoIterator<Item = CardId>) -> Self {
        Self {
            draw_pile: cards.into_iter().collect(),
            discard_pile: Vec::new(),
        }
    }

    /// Deck shuffled with `rng`.
    pub fn shuffled(cards: impl IntoIterator<Item = CardId>, rng: &mut GameRng) -> Self {
        let mut deck = Self::new(cards);
        rng.shuffle(&mut deck.draw_pile);
        deck
    }

    /// Draw `count` cards from the top.
    ///
    /// Fails without drawing anything when fewer than `count` remain.
    pub fn draw(&mut self, cancel: &CancelToken, count: usize) -> Result<Vec<CardId>> {
        cancel.check()?;
        if count > self.draw_pile.len() {
            return Err(EngineError::DeckExhausted {
                requested: count,
                available: self.draw_pile.len(),
            });
        }
        Ok(self.draw_pile.drain(..count).collect())
    }

    /// Put cards back on top of the draw pile; the first id becomes the top card.
    pub fn return_to_top(&mut self, cards: impl IntoIterator<Item = CardId>) {
        self.draw_pile.splice(0..0, cards);
    }

    pub fn discard(&mut self, cards: impl IntoIterator<Item = CardId>) {
        self.discard_pile.extend(cards);
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.draw_pile.len()
    }

    #[must_use]
    pub fn discarded(&self) -> &[CardId] {
        &self.discard_pile
    }
}
