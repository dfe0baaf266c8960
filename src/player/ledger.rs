//! Player resource ledger.
//!
//! ## ResourceSet
//!
//! Six counters, one per basic resource. A player carries two: stock and
//! production.
//!
//! ## PlayerResources
//!
//! Everything a player owns that effects read or write: stock, production,
//! terraform rating, per-card storage and registered payment modifiers.
//! Card storage is an `im::HashMap`, so cloning a ledger for a snapshot is
//! O(1).
//!
//! ## Floors
//!
//! Credit production may go down to −5, every other production to 0. Card
//! storage never goes below 0.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::core::{EngineError, ResourceKind, Result};
use crate::effects::Selector;

/// Lowest credit production a player can be reduced to.
pub const MIN_CREDITS_PRODUCTION: i32 = -5;

/// Credits one steel is worth before modifiers.
pub const BASE_STEEL_VALUE: i32 = 2;
/// Credits one titanium is worth before modifiers.
pub const BASE_TITANIUM_VALUE: i32 = 3;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSet {
    pub credits: i32,
    pub steel: i32,
    pub titanium: i32,
    pub plants: i32,
    pub energy: i32,
    pub heat: i32,
}

impl ResourceSet {
    /// Counter for a basic or production kind; 0 for anything else.
    #[must_use]
    pub fn get(&self, kind: ResourceKind) -> i32 {
        match kind.ledger_slot() {
            Some(0) => self.credits,
            Some(1) => self.steel,
            Some(2) => self.titanium,
            Some(3) => self.plants,
            Some(4) => self.energy,
            Some(5) => self.heat,
            _ => 0,
        }
    }

    fn slot_mut(&mut self, kind: ResourceKind) -> Option<&mut i32> {
        match kind.ledger_slot() {
            Some(0) => Some(&mut self.credits),
            Some(1) => Some(&mut self.steel),
            Some(2) => Some(&mut self.titanium),
            Some(3) => Some(&mut self.plants),
            Some(4) => Some(&mut self.energy),
            Some(5) => Some(&mut self.heat),
            _ => None,
        }
    }
}

/// Alternative currency accepted when paying for cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSubstitute {
    pub resource: ResourceKind,
    pub conversion_rate: i32,
}

/// Cost reduction registered by a card, evaluated by the payment layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discount {
    pub amount: i32,
    pub selectors: Vec<Selector>,
    pub source: String,
}

/// One cost line of an input list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Debit {
    pub kind: ResourceKind,
    pub amount: i32,
    /// Card whose storage pays for card-resource debits.
    pub card: Option<CardId>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerResources {
    pub resources: ResourceSet,
    pub production: ResourceSet,
    pub terraform_rating: i32,
    pub storage: im::HashMap<CardId, i32>,
    pub payment_substitutes: Vec<PaymentSubstitute>,
    pub value_modifiers: FxHashMap<ResourceKind, i32>,
    pub discounts: Vec<Discount>,
}

impl PlayerResources {
    #[must_use]
    pub fn new(terraform_rating: i32) -> Self {
        Self {
            terraform_rating,
            ..Self::default()
        }
    }

    /// Current value of a basic, production or `tr` kind.
    #[must_use]
    pub fn amount(&self, kind: ResourceKind) -> i32 {
        if kind.is_production() {
            self.production.get(kind)
        } else if kind == ResourceKind::TerraformRating {
            self.terraform_rating
        } else {
            self.resources.get(kind)
        }
    }

    /// Lowest value a production kind may reach.
    #[must_use]
    pub fn production_floor(kind: ResourceKind) -> i32 {
        if kind == ResourceKind::CreditsProduction {
            MIN_CREDITS_PRODUCTION
        } else {
            0
        }
    }

    /// How much of `kind` can be taken away without crossing its floor.
    #[must_use]
    pub fn removable(&self, kind: ResourceKind) -> i32 {
        if kind.is_production() {
            (self.production.get(kind) - Self::production_floor(kind)).max(0)
        } else {
            self.resources.get(kind).max(0)
        }
    }

    /// Apply a signed delta to a basic or production kind.
    ///
    /// Production stops at its floor. Returns the delta actually applied.
    pub fn adjust(&mut self, kind: ResourceKind, delta: i32) -> i32 {
        let floor = kind
            .is_production()
            .then(|| Self::production_floor(kind));
        let set = if kind.is_production() {
            &mut self.production
        } else {
            &mut self.resources
        };
        let Some(slot) = set.slot_mut(kind) else {
            return 0;
        };
        let old = *slot;
        let mut new = old.saturating_add(delta);
        if let Some(floor) = floor {
            if delta < 0 {
                new = new.max(floor.min(old));
            }
        }
        *slot = new;
        new - old
    }

    #[must_use]
    pub fn storage_of(&self, card: &CardId) -> i32 {
        self.storage.get(card).copied().unwrap_or(0)
    }

    /// Apply a signed delta to a card's storage, stopping at 0.
    pub fn adjust_storage(&mut self, card: &CardId, delta: i32) -> i32 {
        let old = self.storage_of(card);
        let new = old.saturating_add(delta).max(0);
        self.storage.insert(card.clone(), new);
        new - old
    }

    /// Register or update a payment substitute.
    pub fn add_payment_substitute(&mut self, resource: ResourceKind, conversion_rate: i32) {
        match self
            .payment_substitutes
            .iter_mut()
            .find(|s| s.resource == resource)
        {
            Some(existing) => existing.conversion_rate = conversion_rate,
            None => self.payment_substitutes.push(PaymentSubstitute {
                resource,
                conversion_rate,
            }),
        }
    }

    pub fn add_value_modifier(&mut self, resource: ResourceKind, amount: i32) {
        *self.value_modifiers.entry(resource).or_insert(0) += amount;
    }

    /// Credits one unit of `kind` is worth when paying.
    #[must_use]
    pub fn payment_value(&self, kind: ResourceKind) -> i32 {
        let modifier = self.value_modifiers.get(&kind).copied().unwrap_or(0);
        match kind {
            ResourceKind::Credits => 1,
            ResourceKind::Steel => BASE_STEEL_VALUE + modifier,
            ResourceKind::Titanium => BASE_TITANIUM_VALUE + modifier,
            _ => self
                .payment_substitutes
                .iter()
                .find(|s| s.resource == kind)
                .map_or(0, |s| s.conversion_rate + modifier),
        }
    }

    /// Check every debit against the ledger, then apply all of them.
    ///
    /// Debits of the same kind (and card) are summed before checking. On
    /// failure the ledger is untouched. Returns the applied changes.
    pub fn spend(&mut self, debits: &[Debit]) -> Result<Vec<(ResourceKind, i32)>> {
        let mut totals: Vec<(ResourceKind, Option<&CardId>, i32)> = Vec::new();
        for debit in debits {
            let card = debit.card.as_ref();
            match totals
                .iter_mut()
                .find(|(kind, c, _)| *kind == debit.kind && *c == card)
            {
                Some(entry) => entry.2 += debit.amount,
                None => totals.push((debit.kind, card, debit.amount)),
            }
        }

        for (kind, card, needed) in &totals {
            let available = match card {
                Some(card) => self.storage_of(card),
                None => self.removable(*kind),
            };
            if available < *needed {
                return Err(EngineError::InsufficientResource {
                    kind: *kind,
                    needed: *needed,
                    available,
                });
            }
        }

        let mut applied = Vec::with_capacity(totals.len());
        for (kind, card, needed) in totals {
            match card {
                Some(card) => {
                    self.adjust_storage(card, -needed);
                }
                None => {
                    self.adjust(kind, -needed);
                }
            }
            applied.push((kind, -needed));
        }
        Ok(applied)
    }
}
