//! Behavior application.
//!
//! A [`BehaviorApplier`] applies the inputs and outputs of one behavior
//! within an [`ApplyContext`]. It holds no state of its own between calls;
//! everything it changes lives on the player or the game session.
//!
//! ## Flow
//!
//! 1. [`apply_inputs`](BehaviorApplier::apply_inputs): validate every cost,
//!    then pay all of them, or pay nothing.
//! 2. [`apply_outputs_and_get_calculated`](BehaviorApplier::apply_outputs_and_get_calculated):
//!    scale each output by its per condition, apply it, and report what was
//!    applied.
//! 3. [`apply_card_draw_outputs`](BehaviorApplier::apply_card_draw_outputs):
//!    draw cards and leave a selection pending for the player.
//!
//! ## Errors
//!
//! Missing context an output structurally needs, an unaffordable input or
//! a missing any-card target fail and stop the call. Outputs applied before
//! the failure stay applied.
//!
//! ## Example
//!
//! ```
//! use terraform_rules::core::{CancelToken, GameSession, PlayerId, ResourceKind};
//! use terraform_rules::effects::{ApplyContext, BehaviorApplier, ResourceCondition};
//!
//! let session = GameSession::builder("g").player("Ada").build().unwrap();
//! let ada = session.player(PlayerId::new(0)).unwrap();
//!
//! let ctx = ApplyContext::builder("Power Plant")
//!     .player(ada)
//!     .session(&session)
//!     .build()
//!     .unwrap();
//! let applied = BehaviorApplier::new(ctx)
//!     .apply_outputs_and_get_calculated(
//!         &CancelToken::new(),
//!         &[ResourceCondition::new(ResourceKind::EnergyProduction, 1)],
//!     )
//!     .unwrap();
//!
//! assert_eq!(applied[0].amount, 1);
//! assert_eq!(ada.amount(ResourceKind::EnergyProduction), 1);
//! ```

use tracing::{debug, debug_span, info, warn};

use super::behavior::{CalculatedOutput, TriggeredEffect};
use super::condition::{resources_from_selectors, ResourceCondition};
use super::context::ApplyContext;
use crate::core::{CancelToken, EngineError, ResourceKind, Result};
use crate::player::{Debit, Discount, PendingCardDrawSelection, PendingTileSelection};

/// Applies behavior inputs and outputs within one context.
pub struct BehaviorApplier<'a> {
    ctx: ApplyContext<'a>,
}

impl<'a> BehaviorApplier<'a> {
    #[must_use]
    pub fn new(ctx: ApplyContext<'a>) -> Self {
        Self { ctx }
    }

    #[must_use]
    pub fn context(&self) -> &ApplyContext<'a> {
        &self.ctx
    }

    // === Inputs ===

    /// Pay the costs of a behavior.
    ///
    /// Every input costs `|amount|`. Costs of the same kind add up and are
    /// checked together; if any is short, nothing is paid and
    /// `InsufficientResource` names the short kind.
    pub fn apply_inputs(&self, cancel: &CancelToken, inputs: &[ResourceCondition]) -> Result<()> {
        if inputs.is_empty() {
            return Ok(());
        }
        let player = self.ctx.require_player("apply inputs")?;
        cancel.check()?;

        let mut debits = Vec::with_capacity(inputs.len());
        for input in inputs {
            let amount = input.amount.saturating_abs();
            if amount == 0 {
                continue;
            }
            if input.kind.is_basic() || input.kind.is_production() {
                debits.push(Debit {
                    kind: input.kind,
                    amount,
                    card: None,
                });
            } else if input.kind.is_card_resource() {
                let card = self.ctx.source_card().ok_or(EngineError::MissingContext {
                    operation: "pay card resource input",
                    missing: "source card",
                })?;
                debits.push(Debit {
                    kind: input.kind,
                    amount,
                    card: Some(card.clone()),
                });
            } else {
                warn!(source = self.ctx.source(), kind = %input.kind, "unsupported input kind ignored");
            }
        }

        player.spend(&debits)?;
        debug!(source = self.ctx.source(), player = %player.id(), paid = debits.len(), "inputs paid");
        Ok(())
    }

    // === Outputs ===

    pub fn apply_outputs(&self, cancel: &CancelToken, outputs: &[ResourceCondition]) -> Result<()> {
        self.apply_outputs_and_get_calculated(cancel, outputs).map(|_| ())
    }

    /// Apply outputs in order and report what each one applied.
    ///
    /// Card-draw kinds and kinds this engine does not resolve produce no
    /// record. When a player and a session are bound, one
    /// [`TriggeredEffect`] for the whole list is queued on the session.
    pub fn apply_outputs_and_get_calculated(
        &self,
        cancel: &CancelToken,
        outputs: &[ResourceCondition],
    ) -> Result<Vec<CalculatedOutput>> {
        let _span = debug_span!("apply_outputs", source = self.ctx.source(), outputs = outputs.len()).entered();

        let mut calculated = Vec::with_capacity(outputs.len());
        for output in outputs {
            cancel.check()?;
            let (amount, scaled) = self.scaled_amount(output);
            if self.apply_output(cancel, output, amount)? {
                info!(
                    source = self.ctx.source(),
                    kind = %output.kind,
                    target = %output.target,
                    amount,
                    scaled,
                    "output applied"
                );
                calculated.push(CalculatedOutput {
                    kind: output.kind,
                    amount,
                    scaled,
                });
            }
        }

        if let (Some(player), Some(session)) = (self.ctx.player(), self.ctx.session()) {
            if !outputs.is_empty() {
                session.record_triggered_effect(TriggeredEffect {
                    source: self.ctx.source().to_string(),
                    player: player.id(),
                    outputs: outputs.to_vec(),
                });
            }
        }

        Ok(calculated)
    }

    /// Output amount after per-condition scaling, and whether it scaled.
    ///
    /// Scaling needs a player and a session and a positive divisor. The
    /// multiplier is `floor(count / divisor)`, capped by `max_trigger`.
    fn scaled_amount(&self, output: &ResourceCondition) -> (i32, bool) {
        let Some(per) = &output.per else {
            return (output.amount, false);
        };
        if self.ctx.player().is_none() || self.ctx.session().is_none() || per.amount <= 0 {
            return (output.amount, false);
        }

        let count = self.count_per_condition(per);
        let mut multiplier = count / per.amount;
        if let Some(max) = output.max_trigger {
            multiplier = multiplier.min(max.max(0));
        }
        let amount = output.amount.saturating_mul(multiplier);
        debug!(kind = %output.kind, count, multiplier, amount, "scaled output");
        (amount, true)
    }

    /// Apply one output. Returns `false` when the kind was skipped.
    fn apply_output(&self, cancel: &CancelToken, output: &ResourceCondition, amount: i32) -> Result<bool> {
        let kind = output.kind;

        if kind.is_basic() || kind.is_production() {
            self.resolve_currency(kind, amount, output.target)?;
            return Ok(true);
        }
        if kind.is_card_resource() {
            self.resolve_card_resource(kind, amount, output.target)?;
            return Ok(true);
        }
        if let Some(tile) = kind.placement_tile() {
            let player = self.ctx.require_player("queue tile placement")?;
            let session = self.ctx.require_session("queue tile placement")?;
            let count = usize::try_from(amount).unwrap_or(0);
            if count == 0 {
                debug!(%kind, amount, "no tiles to queue");
                return Ok(false);
            }
            let tiles = (0..count)
                .map(|_| PendingTileSelection {
                    tile,
                    source: self.ctx.source().to_string(),
                    restrictions: output.tile_restrictions.clone(),
                })
                .collect();
            session.append_pending_tiles(cancel, player.id(), tiles)?;
            return Ok(true);
        }
        if kind.is_card_draw() {
            debug!(%kind, "card draw resolved separately");
            return Ok(false);
        }

        match kind {
            ResourceKind::TerraformRating => {
                self.ctx.require_player("change terraform rating")?.update_terraform_rating(amount);
            }
            ResourceKind::Temperature | ResourceKind::Oxygen => {
                let player = self.ctx.require_player("raise global parameter")?;
                let parameters = self.ctx.require_session("raise global parameter")?.parameters();
                let steps = if kind == ResourceKind::Temperature {
                    parameters.increase_temperature(cancel, amount)?
                } else {
                    parameters.increase_oxygen(cancel, amount)?
                };
                if steps > 0 {
                    player.update_terraform_rating(steps);
                }
                debug!(%kind, requested = amount, steps, "global parameter raised");
            }
            ResourceKind::PaymentSubstitute => {
                let player = self.ctx.require_player("register payment substitute")?;
                let Some(resource) = resources_from_selectors(&output.selectors).first().copied() else {
                    warn!(source = self.ctx.source(), "payment substitute without a resource");
                    return Ok(false);
                };
                player.add_payment_substitute(resource, amount);
            }
            ResourceKind::ValueModifier => {
                let player = self.ctx.require_player("register value modifier")?;
                let resources = resources_from_selectors(&output.selectors);
                if resources.is_empty() {
                    warn!(source = self.ctx.source(), "value modifier without a resource");
                    return Ok(false);
                }
                for resource in resources {
                    player.add_value_modifier(resource, amount);
                }
            }
            ResourceKind::Discount => {
                self.ctx.require_player("register discount")?.register_discount(Discount {
                    amount,
                    selectors: output.selectors.clone(),
                    source: self.ctx.source().to_string(),
                });
            }
            _ => {
                warn!(source = self.ctx.source(), %kind, "output kind not handled");
                return Ok(false);
            }
        }
        Ok(true)
    }

    // === Card draw ===

    /// Draw cards for a peek/take/buy output set and leave the choice
    /// pending. Returns `false` when the outputs peek at nothing.
    pub fn apply_card_draw_outputs(&self, cancel: &CancelToken, outputs: &[ResourceCondition]) -> Result<bool> {
        let (mut peek, mut take, mut buy) = (0_i32, 0_i32, 0_i32);
        for output in outputs {
            match output.kind {
                ResourceKind::CardPeek => peek += output.amount,
                ResourceKind::CardTake => take += output.amount,
                ResourceKind::CardBuy => buy += output.amount,
                _ => {}
            }
        }
        if peek <= 0 {
            return Ok(false);
        }

        let player = self.ctx.require_player("draw cards")?;
        let session = self.ctx.require_session("draw cards")?;
        cancel.check()?;
        if session.pending_card_draw(player.id()).is_some() {
            return Err(EngineError::SelectionPending(player.id()));
        }

        let drawn = session.draw_project_cards(cancel, usize::try_from(peek).unwrap_or(0))?;
        let selection = PendingCardDrawSelection {
            available_cards: drawn,
            free_take_count: usize::try_from(take).unwrap_or(0),
            max_buy_count: usize::try_from(buy).unwrap_or(0),
            card_buy_cost: session.config().card_buy_cost,
            source: self.ctx.source().to_string(),
            source_card: self.ctx.source_card().cloned(),
            source_behavior_index: self.ctx.behavior_index(),
        };
        session.begin_card_draw_selection(cancel, player.id(), selection)?;

        info!(source = self.ctx.source(), player = %player.id(), peek, take, buy, "card draw pending");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::TileKind;
    use crate::cards::{CardId, Deck};
    use crate::core::{GameSession, PlayerId};
    use crate::effects::{PerCondition, Selector, Target};
    use crate::player::SelectionState;

    fn session() -> GameSession {
        GameSession::builder("apply")
            .player("Ada")
            .player("Bo")
            .deck(Deck::new((1..=6).map(|i| CardId::new(format!("c{i}")))))
            .build()
            .unwrap()
    }

    fn applier<'a>(session: &'a GameSession, source: &'a str) -> BehaviorApplier<'a> {
        let ctx = ApplyContext::builder(source)
            .player(session.player(PlayerId::new(0)).unwrap())
            .session(session)
            .build()
            .unwrap();
        BehaviorApplier::new(ctx)
    }

    #[test]
    fn test_inputs_all_or_nothing() {
        let session = session();
        let ada = session.player(PlayerId::new(0)).unwrap();
        ada.add_resource(ResourceKind::Credits, 5);
        ada.add_resource(ResourceKind::Energy, 1);
        let applier = applier(&session, "Steelworks");

        let short = [
            ResourceCondition::new(ResourceKind::Credits, 3),
            ResourceCondition::new(ResourceKind::Energy, 4),
        ];
        let err = applier.apply_inputs(&CancelToken::new(), &short).unwrap_err();
        assert!(matches!(
            err,
            EngineError::InsufficientResource { kind: ResourceKind::Energy, needed: 4, available: 1 }
        ));
        assert_eq!(ada.amount(ResourceKind::Credits), 5);

        let ok = [
            ResourceCondition::new(ResourceKind::Credits, -3),
            ResourceCondition::new(ResourceKind::Energy, 1),
        ];
        applier.apply_inputs(&CancelToken::new(), &ok).unwrap();
        assert_eq!(ada.amount(ResourceKind::Credits), 2);
        assert_eq!(ada.amount(ResourceKind::Energy), 0);
    }

    #[test]
    fn test_inputs_need_player() {
        let bare = BehaviorApplier::new(ApplyContext::builder("x").build().unwrap());
        assert!(bare.apply_inputs(&CancelToken::new(), &[]).is_ok());
        let err = bare
            .apply_inputs(&CancelToken::new(), &[ResourceCondition::new(ResourceKind::Heat, 1)])
            .unwrap_err();
        assert!(matches!(err, EngineError::MissingContext { missing: "player", .. }));
    }

    #[test]
    fn test_scaling_floor_and_cap() {
        let session = session();
        let ada = session.player(PlayerId::new(0)).unwrap();
        ada.add_to_storage(&CardId::new("src"), 5);
        let ctx = ApplyContext::builder("Scaler")
            .player(ada)
            .session(&session)
            .source_card(CardId::new("src"))
            .build()
            .unwrap();
        let applier = BehaviorApplier::new(ctx);
        let per = PerCondition::new(ResourceKind::Animals, 2).with_target(Target::SelfCard);

        let out = applier
            .apply_outputs_and_get_calculated(
                &CancelToken::new(),
                &[ResourceCondition::new(ResourceKind::Credits, 1).with_per(per.clone())],
            )
            .unwrap();
        assert_eq!(out, vec![CalculatedOutput { kind: ResourceKind::Credits, amount: 2, scaled: true }]);

        let capped = applier
            .apply_outputs_and_get_calculated(
                &CancelToken::new(),
                &[ResourceCondition::new(ResourceKind::Credits, 1)
                    .with_per(per)
                    .with_max_trigger(1)],
            )
            .unwrap();
        assert_eq!(capped[0].amount, 1);
        assert_eq!(ada.amount(ResourceKind::Credits), 3);
    }

    #[test]
    fn test_temperature_awards_rating() {
        let session = session();
        let ada = session.player(PlayerId::new(0)).unwrap();
        session.parameters().set_temperature(4);
        let applier = applier(&session, "Comet");

        applier
            .apply_outputs(&CancelToken::new(), &[ResourceCondition::new(ResourceKind::Temperature, 3)])
            .unwrap();
        assert_eq!(session.parameters().temperature(), 8);
        assert_eq!(ada.terraform_rating(), 22);

        applier
            .apply_outputs(&CancelToken::new(), &[ResourceCondition::new(ResourceKind::Temperature, 1)])
            .unwrap();
        assert_eq!(ada.terraform_rating(), 22);
    }

    #[test]
    fn test_placements_queue_in_order() {
        let session = session();
        let applier = applier(&session, "Urbanized Area");
        applier
            .apply_outputs(
                &CancelToken::new(),
                &[
                    ResourceCondition::new(ResourceKind::CityPlacement, 1),
                    ResourceCondition::new(ResourceKind::OceanPlacement, 2),
                ],
            )
            .unwrap();

        let tiles: Vec<_> = session
            .pending_tiles(PlayerId::new(0))
            .into_iter()
            .map(|t| t.tile)
            .collect();
        assert_eq!(tiles, vec![TileKind::City, TileKind::Ocean, TileKind::Ocean]);
    }

    #[test]
    fn test_empty_placement_is_not_reported() {
        let session = session();
        let applier = applier(&session, "Land Grab");
        let per = PerCondition::new(ResourceKind::CityTile, 1).with_target(Target::SelfPlayer);

        let out = applier
            .apply_outputs_and_get_calculated(
                &CancelToken::new(),
                &[
                    ResourceCondition::new(ResourceKind::GreeneryPlacement, 1).with_per(per),
                    ResourceCondition::new(ResourceKind::OceanPlacement, 0),
                ],
            )
            .unwrap();

        assert!(out.is_empty());
        assert!(session.pending_tiles(PlayerId::new(0)).is_empty());
        assert!(session.selection_state(PlayerId::new(0)).is_idle());
    }

    #[test]
    fn test_modifiers_and_skips() {
        let session = session();
        let ada = session.player(PlayerId::new(0)).unwrap();
        let applier = applier(&session, "Advanced Alloys");

        let out = applier
            .apply_outputs_and_get_calculated(
                &CancelToken::new(),
                &[
                    ResourceCondition::new(ResourceKind::ValueModifier, 1)
                        .with_selector(Selector::resources([ResourceKind::Steel, ResourceKind::Titanium])),
                    ResourceCondition::new(ResourceKind::PaymentSubstitute, 1)
                        .with_selector(Selector::resources([ResourceKind::Heat])),
                    ResourceCondition::new(ResourceKind::CardPeek, 2),
                    ResourceCondition::new(ResourceKind::Science, 1),
                ],
            )
            .unwrap();

        assert_eq!(out.len(), 2);
        assert_eq!(ada.payment_value(ResourceKind::Steel), 3);
        assert_eq!(ada.payment_value(ResourceKind::Titanium), 4);
        assert_eq!(ada.payment_value(ResourceKind::Heat), 1);
        assert_eq!(session.triggered_effects().len(), 1);
        assert_eq!(session.triggered_effects()[0].outputs.len(), 4);
    }

    #[test]
    fn test_card_draw_pending() {
        let session = session();
        let applier = applier(&session, "Invention Contest");
        let outputs = [
            ResourceCondition::new(ResourceKind::CardPeek, 3),
            ResourceCondition::new(ResourceKind::CardTake, 1),
        ];

        assert!(applier.apply_card_draw_outputs(&CancelToken::new(), &outputs).unwrap());
        let pending = session.pending_card_draw(PlayerId::new(0)).unwrap();
        assert_eq!(pending.available_cards.len(), 3);
        assert_eq!(pending.free_take_count, 1);
        assert_eq!(pending.max_buy_count, 0);
        assert_eq!(session.deck_remaining(), 3);

        let err = applier.apply_card_draw_outputs(&CancelToken::new(), &outputs).unwrap_err();
        assert!(matches!(err, EngineError::SelectionPending(_)));
        assert_eq!(session.deck_remaining(), 3);
        assert!(matches!(
            session.selection_state(PlayerId::new(0)),
            SelectionState::AwaitingCardSelection { .. }
        ));
    }

    #[test]
    fn test_card_draw_without_peek_is_noop() {
        let session = session();
        let applier = applier(&session, "x");
        let drawn = applier
            .apply_card_draw_outputs(&CancelToken::new(), &[ResourceCondition::new(ResourceKind::CardTake, 1)])
            .unwrap();
        assert!(!drawn);
        assert_eq!(session.deck_remaining(), 6);
    }

    #[test]
    fn test_cancelled_before_outputs() {
        let session = session();
        let cancel = CancelToken::new();
        cancel.cancel();
        let err = applier(&session, "x")
            .apply_outputs(&cancel, &[ResourceCondition::new(ResourceKind::Heat, 1)])
            .unwrap_err();
        assert!(matches!(err, EngineError::Cancelled));
        assert_eq!(session.player(PlayerId::new(0)).unwrap().amount(ResourceKind::Heat), 0);
    }
}
