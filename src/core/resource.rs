//! Resource kinds carried by effect data.
//!
//! `ResourceKind` is a closed enum covering everything a card can name as an
//! input, output or scaling unit. Serialized names match the card data files
//! (`"credits"`, `"plants-production"`, `"city-placement"`, ...).
//!
//! The helpers group kinds the way the applier dispatches them:
//!
//! - **basic**: spendable player resources
//! - **production**: per-generation income, one per basic kind
//! - **card resources**: counters stored on individual cards
//! - **placements**: queue tile selections
//! - **card draw**: handled by the card-draw path only

use serde::{Deserialize, Serialize};

use crate::board::TileKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    // === Basic ===
    Credits,
    Steel,
    Titanium,
    Plants,
    Energy,
    Heat,

    // === Production ===
    CreditsProduction,
    SteelProduction,
    TitaniumProduction,
    PlantsProduction,
    EnergyProduction,
    HeatProduction,

    // === Terraforming ===
    #[serde(rename = "tr")]
    TerraformRating,
    Temperature,
    Oxygen,

    // === Tile placement ===
    CityPlacement,
    OceanPlacement,
    GreeneryPlacement,
    LandClaim,

    // === Tile counts (scaling units) ===
    CityTile,
    OceanTile,
    GreeneryTile,

    // === Player modifiers ===
    PaymentSubstitute,
    ValueModifier,
    Discount,

    // === Card storage ===
    Animals,
    Microbes,
    Floaters,

    // === Card draw ===
    CardPeek,
    CardTake,
    CardBuy,

    // === Present in card data, resolved elsewhere ===
    Science,
    Asteroid,
    Venus,
    Oceans,
    GlobalParameterLenience,
    Defense,
    Effect,
    Tag,
}

/// The six basic resources, in ledger order.
pub const BASIC_RESOURCES: [ResourceKind; 6] = [
    ResourceKind::Credits,
    ResourceKind::Steel,
    ResourceKind::Titanium,
    ResourceKind::Plants,
    ResourceKind::Energy,
    ResourceKind::Heat,
];

impl ResourceKind {
    /// Data-file name of this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        use ResourceKind::*;
        match self {
            Credits => "credits",
            Steel => "steel",
            Titanium => "titanium",
            Plants => "plants",
            Energy => "energy",
            Heat => "heat",
            CreditsProduction => "credits-production",
            SteelProduction => "steel-production",
            TitaniumProduction => "titanium-production",
            PlantsProduction => "plants-production",
            EnergyProduction => "energy-production",
            HeatProduction => "heat-production",
            TerraformRating => "tr",
            Temperature => "temperature",
            Oxygen => "oxygen",
            CityPlacement => "city-placement",
            OceanPlacement => "ocean-placement",
            GreeneryPlacement => "greenery-placement",
            LandClaim => "land-claim",
            CityTile => "city-tile",
            OceanTile => "ocean-tile",
            GreeneryTile => "greenery-tile",
            PaymentSubstitute => "payment-substitute",
            ValueModifier => "value-modifier",
            Discount => "discount",
            Animals => "animals",
            Microbes => "microbes",
            Floaters => "floaters",
            CardPeek => "card-peek",
            CardTake => "card-take",
            CardBuy => "card-buy",
            Science => "science",
            Asteroid => "asteroid",
            Venus => "venus",
            Oceans => "oceans",
            GlobalParameterLenience => "global-parameter-lenience",
            Defense => "defense",
            Effect => "effect",
            Tag => "tag",
        }
    }

    /// Spendable player resource.
    #[must_use]
    pub const fn is_basic(self) -> bool {
        self.ledger_slot().is_some() && !self.is_production()
    }

    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(
            self,
            Self::CreditsProduction
                | Self::SteelProduction
                | Self::TitaniumProduction
                | Self::PlantsProduction
                | Self::EnergyProduction
                | Self::HeatProduction
        )
    }

    /// Counter stored on an individual card.
    #[must_use]
    pub const fn is_card_resource(self) -> bool {
        matches!(self, Self::Animals | Self::Microbes | Self::Floaters)
    }

    #[must_use]
    pub const fn is_card_draw(self) -> bool {
        matches!(self, Self::CardPeek | Self::CardTake | Self::CardBuy)
    }

    /// Tile queued by a placement kind, if this is one.
    #[must_use]
    pub const fn placement_tile(self) -> Option<TileKind> {
        match self {
            Self::CityPlacement => Some(TileKind::City),
            Self::OceanPlacement => Some(TileKind::Ocean),
            Self::GreeneryPlacement => Some(TileKind::Greenery),
            Self::LandClaim => Some(TileKind::LandClaim),
            _ => None,
        }
    }

    /// Tile counted by a tile-count kind, if this is one.
    #[must_use]
    pub const fn counted_tile(self) -> Option<TileKind> {
        match self {
            Self::CityTile => Some(TileKind::City),
            Self::OceanTile => Some(TileKind::Ocean),
            Self::GreeneryTile => Some(TileKind::Greenery),
            _ => None,
        }
    }

    /// Production counterpart of a basic resource.
    #[must_use]
    pub const fn production_of(self) -> Option<ResourceKind> {
        match self {
            Self::Credits => Some(Self::CreditsProduction),
            Self::Steel => Some(Self::SteelProduction),
            Self::Titanium => Some(Self::TitaniumProduction),
            Self::Plants => Some(Self::PlantsProduction),
            Self::Energy => Some(Self::EnergyProduction),
            Self::Heat => Some(Self::HeatProduction),
            _ => None,
        }
    }

    /// Basic resource a production kind yields.
    #[must_use]
    pub const fn base_of(self) -> Option<ResourceKind> {
        match self {
            Self::CreditsProduction => Some(Self::Credits),
            Self::SteelProduction => Some(Self::Steel),
            Self::TitaniumProduction => Some(Self::Titanium),
            Self::PlantsProduction => Some(Self::Plants),
            Self::EnergyProduction => Some(Self::Energy),
            Self::HeatProduction => Some(Self::Heat),
            _ => None,
        }
    }

    /// Index into a `ResourceSet` for basic and production kinds.
    pub(crate) const fn ledger_slot(self) -> Option<usize> {
        match self {
            Self::Credits | Self::CreditsProduction => Some(0),
            Self::Steel | Self::SteelProduction => Some(1),
            Self::Titanium | Self::TitaniumProduction => Some(2),
            Self::Plants | Self::PlantsProduction => Some(3),
            Self::Energy | Self::EnergyProduction => Some(4),
            Self::Heat | Self::HeatProduction => Some(5),
            _ => None,
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
