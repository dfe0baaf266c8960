//! Trigger data attached to card behaviors.

use serde::{Deserialize, Serialize};

use crate::cards::{CardTag, CardType};
use crate::core::ResourceKind;
use crate::effects::{CardLocation, Target};

/// How a behavior is activated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TriggerMode {
    /// Player-activated action.
    Manual,
    /// Fires when the card is played, or on its condition.
    Auto,
    AutoCorporationFirstAction,
    AutoCorporationStart,
}

/// Game event a passive behavior listens for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TriggerType {
    OceanPlaced,
    TemperatureRaise,
    OxygenRaise,
    CityPlaced,
    GreeneryPlaced,
    /// Any tile, including cities, greeneries and oceans.
    TilePlaced,
    CardPlayed,
    StandardProjectPlayed,
    /// A played card carrying one of the affected tags.
    TagPlayed,
    ProductionIncreased,
    PlacementBonusGained,
    AlwaysActive,
}

impl TriggerType {
    /// Listener types an event of this type wakes up.
    #[must_use]
    pub fn listeners(self) -> &'static [TriggerType] {
        use TriggerType::*;
        match self {
            OceanPlaced => &[OceanPlaced, TilePlaced],
            CityPlaced => &[CityPlaced, TilePlaced],
            GreeneryPlaced => &[GreeneryPlaced, TilePlaced],
            CardPlayed => &[CardPlayed, TagPlayed],
            TemperatureRaise => &[TemperatureRaise],
            OxygenRaise => &[OxygenRaise],
            TilePlaced => &[TilePlaced],
            StandardProjectPlayed => &[StandardProjectPlayed],
            TagPlayed => &[TagPlayed],
            ProductionIncreased => &[ProductionIncreased],
            PlacementBonusGained => &[PlacementBonusGained],
            AlwaysActive => &[AlwaysActive],
        }
    }
}

/// Which events fire a passive behavior.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceTriggerCondition {
    #[serde(rename = "type")]
    pub event: TriggerType,
    #[serde(default)]
    pub location: Option<CardLocation>,
    #[serde(default)]
    pub affected_tags: Vec<CardTag>,
    #[serde(default)]
    pub affected_resources: Vec<ResourceKind>,
    #[serde(default)]
    pub affected_card_types: Vec<CardType>,
    /// Whose events count; the owner's own when absent.
    #[serde(default)]
    pub target: Option<Target>,
}

impl ResourceTriggerCondition {
    pub fn new(event: TriggerType) -> Self {
        Self {
            event,
            location: None,
            affected_tags: Vec::new(),
            affected_resources: Vec::new(),
            affected_card_types: Vec::new(),
            target: None,
        }
    }

    #[must_use]
    pub fn with_target(mut self, target: Target) -> Self {
        self.target = Some(target);
        self
    }

    #[must_use]
    pub fn with_location(mut self, location: CardLocation) -> Self {
        self.location = Some(location);
        self
    }

    #[must_use]
    pub fn with_tag(mut self, tag: CardTag) -> Self {
        self.affected_tags.push(tag);
        self
    }

    #[must_use]
    pub fn with_card_type(mut self, card_type: CardType) -> Self {
        self.affected_card_types.push(card_type);
        self
    }
}

/// Activation of a behavior.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trigger {
    #[serde(rename = "type")]
    pub mode: TriggerMode,
    #[serde(default)]
    pub condition: Option<ResourceTriggerCondition>,
}

impl Trigger {
    #[must_use]
    pub fn manual() -> Self {
        Self {
            mode: TriggerMode::Manual,
            condition: None,
        }
    }

    /// Fires once, when the card is played.
    #[must_use]
    pub fn auto() -> Self {
        Self {
            mode: TriggerMode::Auto,
            condition: None,
        }
    }

    /// Passive effect firing on `condition`.
    #[must_use]
    pub fn on(condition: ResourceTriggerCondition) -> Self {
        Self {
            mode: TriggerMode::Auto,
            condition: Some(condition),
        }
    }
}
