//! Matching trigger conditions against events.

use super::event::GameEvent;
use super::trigger::{ResourceTriggerCondition, TriggerType};
use crate::core::PlayerId;
use crate::effects::Target;

impl ResourceTriggerCondition {
    /// Whether `event` fires this condition for an effect owned by `owner`.
    #[must_use]
    pub fn matches(&self, event: &GameEvent, owner: PlayerId) -> bool {
        if !event.kind.listeners().contains(&self.event) {
            return false;
        }

        let actor_ok = match self.target.unwrap_or(Target::SelfPlayer) {
            Target::SelfPlayer | Target::SelfCard => event.player == owner,
            Target::Opponent => event.player != owner,
            _ => true,
        };
        if !actor_ok {
            return false;
        }

        if let Some(wanted) = self.location.and_then(|l| l.tile_filter()) {
            if event.location != Some(wanted) {
                return false;
            }
        }

        let needs_tags = self.event == TriggerType::TagPlayed || !self.affected_tags.is_empty();
        if needs_tags
            && !event
                .tags
                .iter()
                .any(|tag| self.affected_tags.contains(tag))
        {
            return false;
        }

        if !self.affected_card_types.is_empty() {
            match event.card_type {
                Some(card_type) if self.affected_card_types.contains(&card_type) => {}
                _ => return false,
            }
        }

        true
    }
}
