//! Target resolution for outputs.
//!
//! Currency and production outputs go to the acting player or are taken
//! from a chosen one. Card resources go to a card's storage. Which path an
//! output takes is decided by an exhaustive match on [`Target`].
//!
//! Situations that can legitimately happen during play (no opponent in a
//! solo game, nothing left to steal) log and do nothing. A missing target
//! card for an any-card output is a caller bug and fails.

use tracing::{debug, warn};

use super::applier::BehaviorApplier;
use super::condition::Target;
use crate::cards::CardId;
use crate::core::{EngineError, ResourceKind, Result};
use crate::player::Player;

impl BehaviorApplier<'_> {
    // === Currency and production ===

    /// Apply a basic or production output according to its target.
    pub(super) fn resolve_currency(&self, kind: ResourceKind, amount: i32, target: Target) -> Result<()> {
        let player = self.context().require_player("apply resource output")?;
        match target {
            Target::StealAnyPlayer => self.steal_from_player(player, kind, amount),
            Target::AnyPlayer => self.remove_from_player(kind, amount),
            Target::SelfPlayer
            | Target::SelfCard
            | Target::AnyCard
            | Target::StealFromAnyCard
            | Target::Opponent
            | Target::None => {
                let applied = player.add_resource(kind, amount);
                if applied != amount {
                    debug!(player = %player.id(), %kind, requested = amount, applied, "clamped at floor");
                }
            }
        }
        Ok(())
    }

    fn steal_from_player(&self, thief: &Player, kind: ResourceKind, amount: i32) {
        let Some(victim) = self.context().target_player_ref() else {
            debug!(source = self.context().source(), %kind, "no player to steal from");
            return;
        };
        let taken = victim.take_resource(kind, amount.saturating_abs());
        if taken > 0 {
            thief.add_resource(kind, taken);
        }
        debug!(from = %victim.id(), to = %thief.id(), %kind, requested = amount, taken, "stole resources");
    }

    fn remove_from_player(&self, kind: ResourceKind, amount: i32) {
        let Some(victim) = self.context().target_player_ref() else {
            debug!(source = self.context().source(), %kind, "no player to remove resources from");
            return;
        };
        let removed = victim.take_resource(kind, amount.saturating_abs());
        debug!(from = %victim.id(), %kind, requested = amount, removed, "removed resources");
    }

    // === Card resources ===

    /// Apply an animal, microbe or floater output according to its target.
    pub(super) fn resolve_card_resource(&self, kind: ResourceKind, amount: i32, target: Target) -> Result<()> {
        let ctx = self.context();
        let player = ctx.require_player("apply card resource output")?;

        match target {
            Target::SelfCard => match ctx.source_card() {
                Some(card) => {
                    player.add_to_storage(card, amount);
                }
                None => warn!(source = ctx.source(), %kind, "no source card for self-card output"),
            },
            Target::AnyCard => {
                let card = ctx
                    .target_card()
                    .ok_or(EngineError::MissingTargetCard { kind })?;
                self.owner_of(card).unwrap_or(player).add_to_storage(card, amount);
            }
            Target::StealFromAnyCard => self.steal_from_card(player, kind, amount),
            Target::SelfPlayer
            | Target::AnyPlayer
            | Target::StealAnyPlayer
            | Target::Opponent
            | Target::None => match ctx.source_card() {
                Some(card) => {
                    player.add_to_storage(card, amount);
                }
                None => warn!(source = ctx.source(), %kind, %target, "card resource output ignored"),
            },
        }
        Ok(())
    }

    fn steal_from_card(&self, thief: &Player, kind: ResourceKind, amount: i32) {
        let ctx = self.context();
        let Some(from) = ctx.steal_source_card() else {
            return;
        };
        let holders: Vec<&Player> = match ctx.session() {
            Some(session) => session.players().collect(),
            None => vec![thief],
        };
        let Some(holder) = holders.into_iter().find(|p| p.card_storage(from) > 0) else {
            debug!(card = %from, %kind, "nothing stored to steal");
            return;
        };

        let taken = -holder.add_to_storage(from, -amount.saturating_abs());
        if let Some(to) = ctx.source_card() {
            thief.add_to_storage(to, taken);
        }
        debug!(from = %from, holder = %holder.id(), taken, "stole card resources");
    }

    /// Seated player holding `card` in play.
    fn owner_of(&self, card: &CardId) -> Option<&Player> {
        self.context()
            .session()?
            .players()
            .find(|p| p.tableau().contains(card))
    }
}
