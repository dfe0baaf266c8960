//! Cards: definitions, tags, the registry, the project deck and requirements.
//!
//! ## Key Types
//!
//! - `CardId`: identifier as printed in the card data
//! - `Card`: immutable definition with tags, requirements and behaviors
//! - `CardRegistry`: definition lookup, behind the `CardLookup` trait
//! - `Deck`: draw and discard piles of project cards
//! - `RequirementValidator`: checks a card's requirements against live state

pub mod deck;
pub mod definition;
pub mod registry;
pub mod requirements;
pub mod tags;

pub use deck::Deck;
pub use definition::{Card, CardId, CardType, ResourceStorage};
pub use registry::{CardLookup, CardRegistry};
pub use requirements::{PlayabilityCheck, Requirement, RequirementType, RequirementValidator};
pub use tags::CardTag;
