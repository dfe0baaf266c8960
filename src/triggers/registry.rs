//! Registry of passive card effects.
//!
//! When a card with conditional auto behaviors is played, each such
//! behavior is registered as a `PlayerEffect`. When the caller fires a
//! `GameEvent`, `find_triggers` returns the effects whose conditions match,
//! in registration order, ready to be resolved through the applier.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::event::GameEvent;
use super::trigger::TriggerType;
use crate::cards::{Card, CardId};
use crate::core::{GameSession, PlayerId, Result};
use crate::effects::{ApplyContextBuilder, ApplyContext, CardBehavior};

/// Registration handle, increasing in registration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EffectId(pub u32);

impl std::fmt::Display for EffectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Effect({})", self.0)
    }
}

/// A passive behavior a player owns through a played card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerEffect {
    pub player: PlayerId,
    pub card_id: CardId,
    pub card_name: String,
    pub behavior_index: usize,
    pub behavior: CardBehavior,
}

impl PlayerEffect {
    /// Context builder bound to this effect's owner and source card.
    pub fn context<'a>(&'a self, session: &'a GameSession) -> Result<ApplyContextBuilder<'a>> {
        Ok(ApplyContext::builder(self.card_name.as_str())
            .player(session.player(self.player)?)
            .session(session)
            .source_card(self.card_id.clone())
            .behavior_index(self.behavior_index))
    }

    /// Whether `event` fires this effect.
    #[must_use]
    pub fn responds_to(&self, event: &GameEvent) -> bool {
        self.behavior
            .triggers
            .iter()
            .filter_map(|t| t.condition.as_ref())
            .any(|condition| condition.matches(event, self.player))
    }
}

#[derive(Clone, Debug, Default)]
pub struct TriggerRegistry {
    effects: FxHashMap<EffectId, PlayerEffect>,
    by_event_type: FxHashMap<TriggerType, Vec<EffectId>>,
    next_id: u32,
}

impl TriggerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one effect and index it by the events it listens for.
    pub fn register(&mut self, effect: PlayerEffect) -> EffectId {
        let id = EffectId(self.next_id);
        self.next_id += 1;

        for trigger in &effect.behavior.triggers {
            if let Some(condition) = &trigger.condition {
                let ids = self.by_event_type.entry(condition.event).or_default();
                if !ids.contains(&id) {
                    ids.push(id);
                }
            }
        }
        self.effects.insert(id, effect);
        id
    }

    /// Register every passive behavior of a played card.
    pub fn register_card(&mut self, player: PlayerId, card: &Card) -> Vec<EffectId> {
        card.behaviors
            .iter()
            .enumerate()
            .filter(|(_, behavior)| behavior.is_passive_effect())
            .map(|(index, behavior)| {
                self.register(PlayerEffect {
                    player,
                    card_id: card.id.clone(),
                    card_name: card.name.clone(),
                    behavior_index: index,
                    behavior: behavior.clone(),
                })
            })
            .collect()
    }

    /// Drop every effect a player owns through `card_id`.
    pub fn remove_card(&mut self, player: PlayerId, card_id: &CardId) -> usize {
        let doomed: Vec<EffectId> = self
            .effects
            .iter()
            .filter(|(_, e)| e.player == player && &e.card_id == card_id)
            .map(|(id, _)| *id)
            .collect();

        for id in &doomed {
            self.effects.remove(id);
        }
        self.by_event_type.retain(|_, ids| {
            ids.retain(|id| !doomed.contains(id));
            !ids.is_empty()
        });
        doomed.len()
    }

    #[must_use]
    pub fn get(&self, id: EffectId) -> Option<&PlayerEffect> {
        self.effects.get(&id)
    }

    /// Effects that respond to `event`, in registration order.
    #[must_use]
    pub fn find_triggers(&self, event: &GameEvent) -> Vec<&PlayerEffect> {
        let mut ids: Vec<EffectId> = event
            .kind
            .listeners()
            .iter()
            .filter_map(|kind| self.by_event_type.get(kind))
            .flatten()
            .copied()
            .collect();
        ids.sort_unstable();
        ids.dedup();

        ids.into_iter()
            .filter_map(|id| self.effects.get(&id))
            .filter(|effect| effect.responds_to(event))
            .collect()
    }

    /// Effects owned by one player.
    pub fn effects_for(&self, player: PlayerId) -> impl Iterator<Item = &PlayerEffect> {
        self.effects.values().filter(move |e| e.player == player)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{TileKind, TileLocation};
    use crate::cards::CardType;
    use crate::core::ResourceKind;
    use crate::effects::{ResourceCondition, Target};
    use crate::triggers::{ResourceTriggerCondition, Trigger};

    fn city_watcher(id: &str, target: Target) -> Card {
        Card::new(id, format!("Watcher {id}"), CardType::Active)
            .with_behavior(
                CardBehavior::new()
                    .with_trigger(Trigger::on(
                        ResourceTriggerCondition::new(TriggerType::CityPlaced).with_target(target),
                    ))
                    .with_output(ResourceCondition::new(ResourceKind::CreditsProduction, 1)),
            )
            .with_behavior(
                CardBehavior::new()
                    .with_trigger(Trigger::auto())
                    .with_output(ResourceCondition::new(ResourceKind::Credits, 2)),
            )
    }

    #[test]
    fn test_register_card_only_passive() {
        let mut registry = TriggerRegistry::new();
        let ids = registry.register_card(PlayerId::new(0), &city_watcher("W1", Target::AnyPlayer));

        assert_eq!(ids.len(), 1);
        assert_eq!(registry.get(ids[0]).unwrap().behavior_index, 0);
    }

    #[test]
    fn test_find_in_registration_order() {
        let mut registry = TriggerRegistry::new();
        registry.register_card(PlayerId::new(1), &city_watcher("W2", Target::AnyPlayer));
        registry.register_card(PlayerId::new(0), &city_watcher("W1", Target::AnyPlayer));
        registry.register_card(PlayerId::new(0), &city_watcher("W3", Target::SelfPlayer));

        let event = GameEvent::tile_placed(PlayerId::new(1), TileKind::City, TileLocation::Mars);
        let found: Vec<_> = registry
            .find_triggers(&event)
            .into_iter()
            .map(|e| e.card_id.as_str().to_string())
            .collect();
        assert_eq!(found, vec!["W2".to_string(), "W1".to_string()]);
    }

    #[test]
    fn test_unrelated_event_finds_nothing() {
        let mut registry = TriggerRegistry::new();
        registry.register_card(PlayerId::new(0), &city_watcher("W1", Target::AnyPlayer));

        let event = GameEvent::tile_placed(PlayerId::new(0), TileKind::Ocean, TileLocation::Mars);
        assert!(registry.find_triggers(&event).is_empty());
    }

    #[test]
    fn test_remove_card() {
        let mut registry = TriggerRegistry::new();
        let p0 = PlayerId::new(0);
        registry.register_card(p0, &city_watcher("W1", Target::AnyPlayer));
        registry.register_card(p0, &city_watcher("W2", Target::AnyPlayer));

        assert_eq!(registry.remove_card(p0, &CardId::new("W1")), 1);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.effects_for(p0).count(), 1);

        let event = GameEvent::tile_placed(p0, TileKind::City, TileLocation::Mars);
        assert_eq!(registry.find_triggers(&event).len(), 1);
    }
}
