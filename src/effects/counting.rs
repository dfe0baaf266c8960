//! Counting for scaled outputs.
//!
//! `count_per_condition` answers "how many X does the player have" for a
//! [`PerCondition`]. It only reads state and never fails: missing context
//! or an unknown card simply counts as zero.
//!
//! ## Priority
//!
//! The first branch that applies wins:
//!
//! 1. self-card target: storage on the source card
//! 2. tag filter with a card lookup: tags in play
//! 3. tile-count kind with a session: tiles on the board
//! 4. card lookup: the counted kind's name read as a tag
//! 5. otherwise zero

use tracing::debug;

use super::applier::BehaviorApplier;
use super::condition::{PerCondition, Target};
use crate::board::TileKind;
use crate::cards::{CardLookup, CardTag};
use crate::player::Player;

impl BehaviorApplier<'_> {
    /// Live count for a scaling rule.
    #[must_use]
    pub fn count_per_condition(&self, per: &PerCondition) -> i32 {
        let ctx = self.context();

        if per.target == Some(Target::SelfCard) {
            return match (ctx.player(), ctx.source_card()) {
                (Some(player), Some(card)) => player.card_storage(card),
                _ => 0,
            };
        }

        if let (Some(tag), Some(cards)) = (per.tag, ctx.cards()) {
            return self.count_tag(tag, per.target_or_default(), cards);
        }

        if let (Some(session), Some(tile)) = (ctx.session(), per.kind.counted_tile()) {
            let location = per.location.unwrap_or_default().tile_filter();
            let board = session.board();
            // only an explicit self-player target scopes to the player
            let count = match (tile, per.target, ctx.player()) {
                (TileKind::Ocean, _, _) => board.count_tiles(tile, location),
                (_, Some(Target::SelfPlayer), Some(player)) => {
                    board.count_player_tiles(player.id(), tile, location)
                }
                _ => board.count_tiles(tile, location),
            };
            return to_count(count);
        }

        if let Some(cards) = ctx.cards() {
            return match per.kind.as_str().parse::<CardTag>() {
                Ok(tag) => self.count_tag(tag, per.target_or_default(), cards),
                Err(_) => {
                    debug!(kind = %per.kind, "per kind is not countable");
                    0
                }
            };
        }

        0
    }

    fn count_tag(&self, tag: CardTag, target: Target, cards: &dyn CardLookup) -> i32 {
        let ctx = self.context();
        match (target, ctx.session(), ctx.player()) {
            (Target::AnyPlayer, Some(session), _) => session
                .players()
                .map(|player| count_player_tags(player, cards, tag))
                .sum(),
            (_, _, Some(player)) => count_player_tags(player, cards, tag),
            _ => 0,
        }
    }
}

/// Tags of `tag` on a player's corporation and played cards.
///
/// Events show only their event tag. Wild tags are not counted here.
#[must_use]
pub fn count_player_tags(player: &Player, cards: &dyn CardLookup, tag: CardTag) -> i32 {
    if tag == CardTag::Wild {
        return 0;
    }
    let count = player
        .tableau()
        .iter()
        .filter_map(|id| match cards.card(id) {
            Ok(card) => Some(card.played_tags().filter(|t| *t == tag).count()),
            Err(err) => {
                debug!(card = %id, error = %err, "skipping unknown card while counting tags");
                None
            }
        })
        .sum::<usize>();
    to_count(count)
}

fn to_count(count: usize) -> i32 {
    i32::try_from(count).unwrap_or(i32::MAX)
}
