//! The player aggregate.
//!
//! A `Player` guards its ledger and its card holdings with independent
//! locks. Each mutation takes the lock, changes state, releases it and only
//! then publishes a domain event, so subscribers can read the player again
//! without deadlocking.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ledger::{Debit, Discount, PlayerResources};
use crate::cards::CardId;
use crate::core::{DomainEvent, EventBus, PlayerId, ResourceKind, Result};

/// Cards a player holds or has played.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerCards {
    pub corporation: Option<CardId>,
    pub hand: im::Vector<CardId>,
    pub played: im::Vector<CardId>,
}

#[derive(Debug)]
pub struct Player {
    id: PlayerId,
    name: String,
    resources: RwLock<PlayerResources>,
    cards: RwLock<PlayerCards>,
    events: EventBus,
}

impl Player {
    /// A player with the given starting terraform rating.
    pub fn new(id: PlayerId, name: impl Into<String>, terraform_rating: i32) -> Self {
        Self::with_events(id, name, terraform_rating, EventBus::new())
    }

    pub(crate) fn with_events(
        id: PlayerId,
        name: impl Into<String>,
        terraform_rating: i32,
        events: EventBus,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            resources: RwLock::new(PlayerResources::new(terraform_rating)),
            cards: RwLock::new(PlayerCards::default()),
            events,
        }
    }

    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    // === Ledger reads ===

    /// O(1) copy of the whole ledger.
    #[must_use]
    pub fn resources(&self) -> PlayerResources {
        self.resources.read().clone()
    }

    /// Stock of a basic kind, production of a production kind, or TR.
    #[must_use]
    pub fn amount(&self, kind: ResourceKind) -> i32 {
        self.resources.read().amount(kind)
    }

    #[must_use]
    pub fn terraform_rating(&self) -> i32 {
        self.resources.read().terraform_rating
    }

    #[must_use]
    pub fn card_storage(&self, card: &CardId) -> i32 {
        self.resources.read().storage_of(card)
    }

    #[must_use]
    pub fn payment_value(&self, kind: ResourceKind) -> i32 {
        self.resources.read().payment_value(kind)
    }

    // === Ledger writes ===

    /// Apply a signed delta to a basic or production kind.
    ///
    /// Returns the delta actually applied after production floors.
    pub fn add_resource(&self, kind: ResourceKind, delta: i32) -> i32 {
        let (applied, total) = {
            let mut ledger = self.resources.write();
            let applied = ledger.adjust(kind, delta);
            (applied, ledger.amount(kind))
        };
        if applied != 0 {
            self.publish_change(kind, applied, total);
        }
        applied
    }

    /// Change production. Accepts either a production kind or its basic
    /// counterpart; the result stops at the production floor.
    pub fn add_production(&self, kind: ResourceKind, delta: i32) -> i32 {
        match kind.production_of() {
            Some(production) => self.add_resource(production, delta),
            None if kind.is_production() => self.add_resource(kind, delta),
            None => 0,
        }
    }

    /// Take up to `amount` of `kind`, never crossing its floor.
    ///
    /// Returns how much was taken.
    pub fn take_resource(&self, kind: ResourceKind, amount: i32) -> i32 {
        let (taken, total) = {
            let mut ledger = self.resources.write();
            let taken = amount.max(0).min(ledger.removable(kind));
            ledger.adjust(kind, -taken);
            (taken, ledger.amount(kind))
        };
        if taken > 0 {
            self.publish_change(kind, -taken, total);
        }
        taken
    }

    pub fn update_terraform_rating(&self, delta: i32) {
        if delta == 0 {
            return;
        }
        let (old, new) = {
            let mut ledger = self.resources.write();
            let old = ledger.terraform_rating;
            ledger.terraform_rating += delta;
            (old, ledger.terraform_rating)
        };
        self.events.publish(DomainEvent::TerraformRatingChanged {
            player: self.id,
            old,
            new,
        });
    }

    /// Apply a signed delta to a card's storage; returns the applied delta.
    pub fn add_to_storage(&self, card: &CardId, delta: i32) -> i32 {
        self.resources.write().adjust_storage(card, delta)
    }

    /// Validate and pay a list of costs atomically.
    pub fn spend(&self, debits: &[Debit]) -> Result<()> {
        let applied = self.resources.write().spend(debits)?;
        for (kind, delta) in applied {
            if kind.is_basic() || kind.is_production() {
                let total = self.amount(kind);
                self.publish_change(kind, delta, total);
            }
        }
        Ok(())
    }

    pub fn add_payment_substitute(&self, resource: ResourceKind, conversion_rate: i32) {
        self.resources
            .write()
            .add_payment_substitute(resource, conversion_rate);
    }

    pub fn add_value_modifier(&self, resource: ResourceKind, amount: i32) {
        self.resources.write().add_value_modifier(resource, amount);
    }

    pub fn register_discount(&self, discount: Discount) {
        self.resources.write().discounts.push(discount);
    }

    fn publish_change(&self, kind: ResourceKind, delta: i32, total: i32) {
        let event = if kind.is_production() {
            DomainEvent::ProductionChanged {
                player: self.id,
                kind,
                delta,
                total,
            }
        } else {
            DomainEvent::ResourcesChanged {
                player: self.id,
                kind,
                delta,
                total,
            }
        };
        self.events.publish(event);
    }

    // === Cards ===

    #[must_use]
    pub fn cards(&self) -> PlayerCards {
        self.cards.read().clone()
    }

    #[must_use]
    pub fn hand(&self) -> Vec<CardId> {
        self.cards.read().hand.iter().cloned().collect()
    }

    pub fn add_to_hand(&self, cards: impl IntoIterator<Item = CardId>) {
        let mut holdings = self.cards.write();
        for card in cards {
            holdings.hand.push_back(card);
        }
    }

    /// Record a played card, removing it from hand if it was there.
    pub fn play_card(&self, card: CardId) {
        let mut holdings = self.cards.write();
        if let Some(index) = holdings.hand.index_of(&card) {
            holdings.hand.remove(index);
        }
        debug!(player = %self.id, card = %card, "card played");
        holdings.played.push_back(card);
    }

    pub fn set_corporation(&self, card: CardId) {
        self.cards.write().corporation = Some(card);
    }

    /// Corporation and played cards, in play order.
    #[must_use]
    pub fn tableau(&self) -> Vec<CardId> {
        let holdings = self.cards.read();
        holdings
            .corporation
            .iter()
            .chain(holdings.played.iter())
            .cloned()
            .collect()
    }
}
