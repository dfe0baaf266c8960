//! Player state: the aggregate, its resource ledger and pending selections.

pub mod aggregate;
pub mod ledger;
pub mod selection;

pub use aggregate::{Player, PlayerCards};
pub use ledger::{
    Debit, Discount, PaymentSubstitute, PlayerResources, ResourceSet, BASE_STEEL_VALUE,
    BASE_TITANIUM_VALUE, MIN_CREDITS_PRODUCTION,
};
pub use selection::{PendingCardDrawSelection, PendingTileSelection, SelectionState};
