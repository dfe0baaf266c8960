//! Card requirements and the check against live game state.
//!
//! A card lists its requirements as data ("oxygen at least 6%", "two
//! science tags"). [`RequirementValidator`] evaluates them against a player
//! and a session. Whether a card with failing requirements may still be
//! played is the caller's decision.

use serde::{Deserialize, Serialize};

use super::definition::Card;
use super::registry::CardLookup;
use super::tags::CardTag;
use crate::board::TileKind;
use crate::core::{EngineError, GameSession, ResourceKind, Result};
use crate::effects::{count_player_tags, CardLocation};
use crate::player::Player;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RequirementType {
    Temperature,
    Oxygen,
    Oceans,
    Venus,
    Cities,
    Greeneries,
    Tags,
    Production,
    Tr,
    Resource,
}

/// One requirement with an optional inclusive range.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    #[serde(rename = "type")]
    pub kind: RequirementType,
    #[serde(default)]
    pub min: Option<i32>,
    #[serde(default)]
    pub max: Option<i32>,
    #[serde(default)]
    pub location: Option<CardLocation>,
    #[serde(default)]
    pub tag: Option<CardTag>,
    #[serde(default)]
    pub resource: Option<ResourceKind>,
}

impl Requirement {
    pub fn min(kind: RequirementType, min: i32) -> Self {
        Self {
            kind,
            min: Some(min),
            max: None,
            location: None,
            tag: None,
            resource: None,
        }
    }

    pub fn max(kind: RequirementType, max: i32) -> Self {
        Self {
            max: Some(max),
            min: None,
            ..Self::min(kind, 0)
        }
    }

    pub fn tags(tag: CardTag, min: i32) -> Self {
        Self {
            tag: Some(tag),
            ..Self::min(RequirementType::Tags, min)
        }
    }

    #[must_use]
    pub fn with_resource(mut self, resource: ResourceKind) -> Self {
        self.resource = Some(resource);
        self
    }

    #[must_use]
    pub fn with_location(mut self, location: CardLocation) -> Self {
        self.location = Some(location);
        self
    }

    fn in_range(&self, value: i32) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }
}

/// Whether a player currently meets a card's requirements.
pub trait PlayabilityCheck {
    fn check(&self, card: &Card, player: &Player, session: &GameSession) -> Result<()>;
}

/// Checks requirements against players, the board and global parameters.
pub struct RequirementValidator<'a> {
    cards: &'a dyn CardLookup,
}

impl<'a> RequirementValidator<'a> {
    #[must_use]
    pub fn new(cards: &'a dyn CardLookup) -> Self {
        Self { cards }
    }

    /// Current value a requirement is compared against, if tracked.
    fn current_value(&self, requirement: &Requirement, player: &Player, session: &GameSession) -> Option<i32> {
        let parameters = session.parameters();
        let location = requirement.location.unwrap_or_default().tile_filter();
        let owned_tiles = |kind| {
            i32::try_from(session.board().count_player_tiles(player.id(), kind, location)).unwrap_or(i32::MAX)
        };

        match requirement.kind {
            RequirementType::Temperature => Some(parameters.temperature()),
            RequirementType::Oxygen => Some(parameters.oxygen()),
            RequirementType::Oceans => Some(parameters.oceans()),
            RequirementType::Tr => Some(player.terraform_rating()),
            RequirementType::Cities => Some(owned_tiles(TileKind::City)),
            RequirementType::Greeneries => Some(owned_tiles(TileKind::Greenery)),
            RequirementType::Tags => {
                let tag = requirement.tag?;
                let wild = count_player_tags_with_wild(player, self.cards);
                Some(count_player_tags(player, self.cards, tag) + wild)
            }
            RequirementType::Production => {
                let resource = requirement.resource?;
                let production = resource.production_of().unwrap_or(resource);
                production.is_production().then(|| player.amount(production))
            }
            RequirementType::Resource => {
                let resource = requirement.resource?;
                resource.is_basic().then(|| player.amount(resource))
            }
            RequirementType::Venus => None,
        }
    }
}

impl PlayabilityCheck for RequirementValidator<'_> {
    fn check(&self, card: &Card, player: &Player, session: &GameSession) -> Result<()> {
        for requirement in &card.requirements {
            let Some(value) = self.current_value(requirement, player, session) else {
                continue;
            };
            if !requirement.in_range(value) {
                return Err(EngineError::RequirementNotMet {
                    card: card.id.clone(),
                    reason: describe(requirement, value),
                });
            }
        }
        Ok(())
    }
}

/// Wild tags in play, which stand in for any tag a requirement asks for.
fn count_player_tags_with_wild(player: &Player, cards: &dyn CardLookup) -> i32 {
    let count = player
        .tableau()
        .iter()
        .filter_map(|id| cards.card(id).ok())
        .map(|card| card.played_tags().filter(|t| *t == CardTag::Wild).count())
        .sum::<usize>();
    i32::try_from(count).unwrap_or(i32::MAX)
}

fn describe(requirement: &Requirement, value: i32) -> String {
    let what = match (requirement.kind, requirement.tag, requirement.resource) {
        (RequirementType::Tags, Some(tag), _) => format!("{tag} tags"),
        (RequirementType::Production, _, Some(resource)) => format!("{resource} production"),
        (RequirementType::Resource, _, Some(resource)) => resource.to_string(),
        (kind, _, _) => format!("{kind:?}").to_lowercase(),
    };
    match (requirement.min, requirement.max) {
        (Some(min), _) if value < min => format!("need at least {min} {what}, have {value}"),
        (_, Some(max)) => format!("need at most {max} {what}, have {value}"),
        _ => format!("{what} out of range: {value}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardId, CardRegistry, CardType};
    use crate::core::PlayerId;

    fn setup() -> (GameSession, CardRegistry) {
        let session = GameSession::builder("req").player("Ada").build().unwrap();
        let cards = CardRegistry::from_cards([
            Card::new("s1", "Research", CardType::Automated).with_tag(CardTag::Science),
            Card::new("w1", "Hub", CardType::Automated).with_tag(CardTag::Wild),
        ])
        .unwrap();
        (session, cards)
    }

    #[test]
    fn test_global_parameter_range() {
        let (session, cards) = setup();
        let ada = session.player(PlayerId::new(0)).unwrap();
        let validator = RequirementValidator::new(&cards);

        let warm = Card::new("x", "Kelp", CardType::Automated)
            .with_requirement(Requirement::min(RequirementType::Temperature, -12));
        let err = validator.check(&warm, ada, &session).unwrap_err();
        assert!(matches!(err, EngineError::RequirementNotMet { .. }));

        session.parameters().set_temperature(-12);
        assert!(validator.check(&warm, ada, &session).is_ok());

        let cold = Card::new("y", "Arctic Algae", CardType::Automated)
            .with_requirement(Requirement::max(RequirementType::Temperature, -14));
        assert!(validator.check(&cold, ada, &session).is_err());
    }

    #[test]
    fn test_wild_tags_count_for_requirements() {
        let (session, cards) = setup();
        let ada = session.player(PlayerId::new(0)).unwrap();
        let validator = RequirementValidator::new(&cards);
        let card = Card::new("z", "Physics Complex", CardType::Active)
            .with_requirement(Requirement::tags(CardTag::Science, 2));

        ada.play_card(CardId::new("s1"));
        assert!(validator.check(&card, ada, &session).is_err());

        ada.play_card(CardId::new("w1"));
        assert!(validator.check(&card, ada, &session).is_ok());
    }

    #[test]
    fn test_production_requirement() {
        let (session, cards) = setup();
        let ada = session.player(PlayerId::new(0)).unwrap();
        let validator = RequirementValidator::new(&cards);
        let card = Card::new("p", "Power Supply Consortium", CardType::Automated).with_requirement(
            Requirement::min(RequirementType::Production, 2).with_resource(ResourceKind::Energy),
        );

        ada.add_production(ResourceKind::Energy, 1);
        let err = validator.check(&card, ada, &session).unwrap_err();
        assert_eq!(
            err.to_string(),
            "requirement not met for p: need at least 2 energy production, have 1"
        );
        ada.add_production(ResourceKind::Energy, 1);
        assert!(validator.check(&card, ada, &session).is_ok());
    }

    #[test]
    fn test_requirement_json() {
        let json = r#"{"type":"tags","min":1,"tag":"jovian"}"#;
        let requirement: Requirement = serde_json::from_str(json).unwrap();
        assert_eq!(requirement, Requirement::tags(CardTag::Jovian, 1));
    }
}
