//! Card registry for definition lookup.
//!
//! The `CardRegistry` holds every card definition of a game, keyed by
//! `CardId`. Code that only needs to resolve ids (tag counting, requirement
//! checks) depends on the `CardLookup` trait instead.
//!
//! Definitions arrive already parsed: either as a JSON card list or as a
//! bincode cache produced by [`CardRegistry::encode`].

use rustc_hash::FxHashMap;

use super::definition::{Card, CardId};
use crate::core::{EngineError, Result};

/// Read-only card resolution.
pub trait CardLookup: Send + Sync {
    /// Resolve a card id, failing with `CardNotFound`.
    fn card(&self, id: &CardId) -> Result<&Card>;
}

/// Registry of card definitions.
///
/// ## Example
///
/// ```
/// use terraform_rules::cards::{Card, CardId, CardLookup, CardRegistry, CardType};
///
/// let mut registry = CardRegistry::new();
/// registry.register(Card::new("B04", "Adaptation Technology", CardType::Active)).unwrap();
///
/// let found = registry.card(&CardId::new("B04")).unwrap();
/// assert_eq!(found.name, "Adaptation Technology");
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<CardId, Card>,
}

impl CardRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from definitions, rejecting duplicate ids.
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Result<Self> {
        let mut registry = Self::new();
        for card in cards {
            registry.register(card)?;
        }
        Ok(registry)
    }

    /// Load a JSON array of card definitions.
    pub fn from_json(json: &str) -> Result<Self> {
        let cards: Vec<Card> = serde_json::from_str(json)?;
        Self::from_cards(cards)
    }

    /// Register a card definition.
    pub fn register(&mut self, card: Card) -> Result<()> {
        if self.cards.contains_key(&card.id) {
            return Err(EngineError::DuplicateCard(card.id));
        }
        self.cards.insert(card.id.clone(), card);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, id: &CardId) -> Option<&Card> {
        self.cards.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &CardId) -> bool {
        self.cards.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.values()
    }

    /// Find cards matching a predicate.
    pub fn find<F>(&self, predicate: F) -> impl Iterator<Item = &Card>
    where
        F: Fn(&Card) -> bool,
    {
        self.cards.values().filter(move |c| predicate(c))
    }

    /// Ids of every registered card, sorted.
    #[must_use]
    pub fn ids(&self) -> Vec<CardId> {
        let mut ids: Vec<CardId> = self.cards.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Compact binary snapshot of all definitions, in id order.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut cards: Vec<&Card> = self.cards.values().collect();
        cards.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(bincode::serialize(&cards)?)
    }

    /// Rebuild a registry from [`encode`](Self::encode) output.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let cards: Vec<Card> = bincode::deserialize(bytes)?;
        Self::from_cards(cards)
    }
}

impl CardLookup for CardRegistry {
    fn card(&self, id: &CardId) -> Result<&Card> {
        self.get(id)
            .ok_or_else(|| EngineError::CardNotFound(id.clone()))
    }
}
