//! Inputs and outputs of card behaviors.
//!
//! A `ResourceCondition` is one line of effect data: a resource kind, a
//! signed amount and who it applies to. It may scale with a `PerCondition`
//! ("+1 credit per 2 jovian tags"), carry selectors (which cards a discount
//! or payment substitute applies to) and carry tile restrictions for
//! placements.
//!
//! ## Targets
//!
//! `Target` is closed. Dispatch is an exhaustive `match`, so a new target
//! cannot be silently ignored.

use serde::{Deserialize, Serialize};

use crate::board::{TileKind, TileLocation};
use crate::cards::{CardTag, CardType};
use crate::core::ResourceKind;

/// Who or what a resource condition applies to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Target {
    #[default]
    SelfPlayer,
    /// The card whose behavior is resolving.
    SelfCard,
    /// A card chosen by the player.
    AnyCard,
    /// Remove from a chosen player; nothing is gained.
    AnyPlayer,
    /// Move from a chosen player to the acting player.
    StealAnyPlayer,
    /// Move from a chosen card's storage to the source card.
    StealFromAnyCard,
    Opponent,
    None,
}

impl Target {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SelfPlayer => "self-player",
            Self::SelfCard => "self-card",
            Self::AnyCard => "any-card",
            Self::AnyPlayer => "any-player",
            Self::StealAnyPlayer => "steal-any-player",
            Self::StealFromAnyCard => "steal-from-any-card",
            Self::Opponent => "opponent",
            Self::None => "none",
        }
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where counted tiles must be.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CardLocation {
    #[default]
    Anywhere,
    Mars,
}

impl CardLocation {
    /// Board location filter, `None` meaning any.
    #[must_use]
    pub const fn tile_filter(self) -> Option<TileLocation> {
        match self {
            Self::Anywhere => None,
            Self::Mars => Some(TileLocation::Mars),
        }
    }
}

/// Scaling unit: "per `amount` of `kind`".
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerCondition {
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    /// Divisor; the multiplier is `floor(count / amount)`.
    pub amount: i32,
    #[serde(default)]
    pub location: Option<CardLocation>,
    #[serde(default)]
    pub target: Option<Target>,
    #[serde(default)]
    pub tag: Option<CardTag>,
}

impl PerCondition {
    pub fn new(kind: ResourceKind, amount: i32) -> Self {
        Self {
            kind,
            amount,
            location: None,
            target: None,
            tag: None,
        }
    }

    /// Count a tag instead of `kind`.
    pub fn tag(tag: CardTag, amount: i32) -> Self {
        Self {
            tag: Some(tag),
            ..Self::new(ResourceKind::Tag, amount)
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

    /// Target, defaulting to the acting player.
    #[must_use]
    pub fn target_or_default(&self) -> Target {
        self.target.unwrap_or_default()
    }
}

/// Which cards, resources or projects a modifier applies to.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Selector {
    pub tags: Vec<CardTag>,
    pub card_types: Vec<CardType>,
    pub resources: Vec<ResourceKind>,
    pub standard_projects: Vec<String>,
}

impl Selector {
    pub fn resources(resources: impl IntoIterator<Item = ResourceKind>) -> Self {
        Self {
            resources: resources.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn tags(tags: impl IntoIterator<Item = CardTag>) -> Self {
        Self {
            tags: tags.into_iter().collect(),
            ..Self::default()
        }
    }
}

/// Every resource named by `selectors`, in first-seen order, without repeats.
#[must_use]
pub fn resources_from_selectors(selectors: &[Selector]) -> Vec<ResourceKind> {
    let mut resources = Vec::new();
    for resource in selectors.iter().flat_map(|s| s.resources.iter()) {
        if !resources.contains(resource) {
            resources.push(*resource);
        }
    }
    resources
}

/// Placement constraints handed through to the placement layer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TileRestrictions {
    /// Space tags the tile must be placed on (e.g. `"volcanic"`).
    pub board_tags: Vec<String>,
    /// Adjacency rule name (e.g. `"none"`, `"own-tile"`).
    pub adjacency: Option<String>,
    /// Tile that must already occupy the space.
    pub on_tile_type: Option<TileKind>,
}

/// One input or output of a behavior.
///
/// ## Example
///
/// ```
/// use terraform_rules::core::ResourceKind;
/// use terraform_rules::effects::{PerCondition, ResourceCondition, Target};
///
/// let output = ResourceCondition::new(ResourceKind::Credits, 1)
///     .with_per(PerCondition::new(ResourceKind::CityTile, 1));
/// assert_eq!(output.target, Target::SelfPlayer);
/// assert!(output.per.is_some());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceCondition {
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    #[serde(default)]
    pub amount: i32,
    #[serde(default)]
    pub target: Target,
    #[serde(default)]
    pub per: Option<PerCondition>,
    #[serde(default)]
    pub tile_restrictions: Option<TileRestrictions>,
    #[serde(default)]
    pub selectors: Vec<Selector>,
    /// Upper bound on the scaling multiplier.
    #[serde(default)]
    pub max_trigger: Option<i32>,
}

impl ResourceCondition {
    pub fn new(kind: ResourceKind, amount: i32) -> Self {
        Self {
            kind,
            amount,
            target: Target::SelfPlayer,
            per: None,
            tile_restrictions: None,
            selectors: Vec::new(),
            max_trigger: None,
        }
    }

    #[must_use]
    pub fn with_target(mut self, target: Target) -> Self {
        self.target = target;
        self
    }

    #[must_use]
    pub fn with_per(mut self, per: PerCondition) -> Self {
        self.per = Some(per);
        self
    }

    #[must_use]
    pub fn with_selector(mut self, selector: Selector) -> Self {
        self.selectors.push(selector);
        self
    }

    #[must_use]
    pub fn with_tile_restrictions(mut self, restrictions: TileRestrictions) -> Self {
        self.tile_restrictions = Some(restrictions);
        self
    }

    #[must_use]
    pub fn with_max_trigger(mut self, max: i32) -> Self {
        self.max_trigger = Some(max);
        self
    }
}
