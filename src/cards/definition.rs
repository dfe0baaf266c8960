//! Card definitions: static card data.
//!
//! A `Card` is immutable once registered. Per-game state that hangs off a
//! card (resources stored on it, whether it has been played) lives on the
//! owning player, keyed by `CardId`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::requirements::Requirement;
use super::tags::CardTag;
use crate::core::ResourceKind;
use crate::effects::CardBehavior;

/// Card identifier as printed in the card data (e.g. `"B04"`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub String);

impl CardId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CardType {
    Automated,
    Active,
    Event,
    Corporation,
    Prelude,
}

/// Resource counter a card can hold (animals, microbes, floaters).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceStorage {
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    #[serde(default)]
    pub capacity: Option<i32>,
    #[serde(default)]
    pub starting: i32,
}

/// Static definition of a card.
///
/// ## Example
///
/// ```
/// use terraform_rules::cards::{Card, CardTag, CardType};
///
/// let card = Card::new("019", "Deep Well Heating", CardType::Automated)
///     .with_cost(13)
///     .with_tag(CardTag::Power)
///     .with_tag(CardTag::Building);
///
/// assert!(card.has_tag(CardTag::Power));
/// assert_eq!(card.cost, 13);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    pub name: String,
    #[serde(rename = "type")]
    pub card_type: CardType,
    #[serde(default)]
    pub cost: i32,
    #[serde(default)]
    pub tags: SmallVec<[CardTag; 4]>,
    #[serde(default)]
    pub requirements: Vec<Requirement>,
    #[serde(default)]
    pub behaviors: Vec<CardBehavior>,
    #[serde(default)]
    pub resource_storage: Option<ResourceStorage>,
}

impl Card {
    pub fn new(id: impl Into<String>, name: impl Into<String>, card_type: CardType) -> Self {
        Self {
            id: CardId::new(id),
            name: name.into(),
            card_type,
            cost: 0,
            tags: SmallVec::new(),
            requirements: Vec::new(),
            behaviors: Vec::new(),
            resource_storage: None,
        }
    }

    #[must_use]
    pub fn with_cost(mut self, cost: i32) -> Self {
        self.cost = cost;
        self
    }

    #[must_use]
    pub fn with_tag(mut self, tag: CardTag) -> Self {
        self.tags.push(tag);
        self
    }

    #[must_use]
    pub fn with_requirement(mut self, requirement: Requirement) -> Self {
        self.requirements.push(requirement);
        self
    }

    #[must_use]
    pub fn with_behavior(mut self, behavior: CardBehavior) -> Self {
        self.behaviors.push(behavior);
        self
    }

    #[must_use]
    pub fn with_storage(mut self, kind: ResourceKind, starting: i32) -> Self {
        self.resource_storage = Some(ResourceStorage {
            kind,
            capacity: None,
            starting,
        });
        self
    }

    #[must_use]
    pub fn has_tag(&self, tag: CardTag) -> bool {
        self.tags.contains(&tag)
    }

    /// How many times `tag` is printed on the card.
    #[must_use]
    pub fn tag_count(&self, tag: CardTag) -> usize {
        self.tags.iter().filter(|t| **t == tag).count()
    }

    /// Tags that stay visible once the card is played.
    ///
    /// Played events only show their event tag.
    pub fn played_tags(&self) -> impl Iterator<Item = CardTag> + '_ {
        let is_event = self.card_type == CardType::Event;
        self.tags
            .iter()
            .copied()
            .filter(move |tag| !is_event || *tag == CardTag::Event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_played_tags_of_event() {
        let event = Card::new("E1", "Comet", CardType::Event)
            .with_tag(CardTag::Space)
            .with_tag(CardTag::Event);
        let played: Vec<_> = event.played_tags().collect();
        assert_eq!(played, vec![CardTag::Event]);

        let automated = Card::new("A1", "Mine", CardType::Automated)
            .with_tag(CardTag::Building)
            .with_tag(CardTag::Building);
        assert_eq!(automated.played_tags().count(), 2);
        assert_eq!(automated.tag_count(CardTag::Building), 2);
    }

    #[test]
    fn test_card_from_json() {
        let json = r#"{
            "id": "172",
            "name": "Pets",
            "type": "active",
            "cost": 10,
            "tags": ["earth", "animal"],
            "resourceStorage": {"type": "animals", "starting": 1}
        }"#;
        let card: Card = serde_json::from_str(json).unwrap();

        assert_eq!(card.id, CardId::new("172"));
        assert_eq!(card.card_type, CardType::Active);
        assert!(card.has_tag(CardTag::Animal));
        let storage = card.resource_storage.unwrap();
        assert_eq!(storage.kind, ResourceKind::Animals);
        assert_eq!(storage.starting, 1);
        assert!(card.behaviors.is_empty());
    }
}
