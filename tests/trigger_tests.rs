//! Trigger system integration tests.
//!
//! These tests verify that passive card effects fire for the right players
//! and resolve through the applier against the game session.

mod common;

use terraform_rules::board::{TileKind, TileLocation};
use terraform_rules::cards::{Card, CardId, CardRegistry, CardTag, CardType};
use terraform_rules::core::{CancelToken, PlayerId, ResourceKind};
use terraform_rules::effects::{BehaviorApplier, CardBehavior, CardLocation, ResourceCondition, Target};
use terraform_rules::triggers::{
    GameEvent, ResourceTriggerCondition, Trigger, TriggerRegistry, TriggerType,
};

fn on(event: TriggerType, target: Target) -> Trigger {
    Trigger::on(ResourceTriggerCondition::new(event).with_target(target))
}

/// "Whenever a city is placed, gain 1 credit production."
fn city_card(id: &str, target: Target) -> Card {
    Card::new(id, format!("Watcher {id}"), CardType::Active).with_behavior(
        CardBehavior::new()
            .with_trigger(on(TriggerType::CityPlaced, target))
            .with_output(ResourceCondition::new(ResourceKind::CreditsProduction, 1)),
    )
}

/// Fire an event and resolve every effect it triggers.
fn fire(registry: &TriggerRegistry, session: &terraform_rules::GameSession, event: &GameEvent) -> usize {
    let effects = registry.find_triggers(event);
    for effect in &effects {
        let ctx = effect.context(session).unwrap().build().unwrap();
        BehaviorApplier::new(ctx)
            .apply_outputs(&CancelToken::new(), &effect.behavior.outputs)
            .unwrap();
    }
    effects.len()
}

/// Self-targeted triggers fire only for their owner, for any player count.
#[test]
fn test_n_player_self_triggers() {
    for player_count in 1..=5 {
        let session = common::session(player_count, 0);
        let mut registry = TriggerRegistry::new();
        for seat in 0..player_count as u8 {
            registry.register_card(PlayerId::new(seat), &city_card(&format!("C{seat}"), Target::SelfPlayer));
        }

        for seat in 0..player_count as u8 {
            let event = GameEvent::tile_placed(PlayerId::new(seat), TileKind::City, TileLocation::Mars);
            assert_eq!(fire(&registry, &session, &event), 1, "seat {seat} of {player_count}");
        }
        for player in session.players() {
            assert_eq!(player.amount(ResourceKind::CreditsProduction), 1);
        }
    }
}

/// Any-player triggers fire for everyone's tiles.
#[test]
fn test_global_trigger() {
    let session = common::session(3, 0);
    let mut registry = TriggerRegistry::new();
    registry.register_card(PlayerId::new(0), &city_card("Tharsis", Target::AnyPlayer));

    for seat in 0..3 {
        let event = GameEvent::tile_placed(PlayerId::new(seat), TileKind::City, TileLocation::Mars);
        fire(&registry, &session, &event);
    }
    assert_eq!(session.player(PlayerId::new(0)).unwrap().amount(ResourceKind::CreditsProduction), 3);
    assert_eq!(session.player(PlayerId::new(1)).unwrap().amount(ResourceKind::CreditsProduction), 0);
}

/// Opponent triggers ignore the owner's own tiles.
#[test]
fn test_opponent_trigger() {
    let session = common::session(2, 0);
    let mut registry = TriggerRegistry::new();
    registry.register_card(PlayerId::new(0), &city_card("Rival", Target::Opponent));

    let own = GameEvent::tile_placed(PlayerId::new(0), TileKind::City, TileLocation::Mars);
    let theirs = GameEvent::tile_placed(PlayerId::new(1), TileKind::City, TileLocation::Mars);
    assert_eq!(fire(&registry, &session, &own), 0);
    assert_eq!(fire(&registry, &session, &theirs), 1);
}

/// Tag triggers add resources to the card that owns the effect.
#[test]
fn test_tag_trigger_feeds_source_card() {
    let session = common::session(1, 0);
    let owner = PlayerId::new(0);
    let mut registry = TriggerRegistry::new();
    let card = Card::new("ECO", "Ecological Zone", CardType::Active)
        .with_storage(ResourceKind::Animals, 0)
        .with_behavior(
            CardBehavior::new()
                .with_trigger(Trigger::on(
                    ResourceTriggerCondition::new(TriggerType::TagPlayed)
                        .with_tag(CardTag::Plant)
                        .with_tag(CardTag::Animal),
                ))
                .with_output(ResourceCondition::new(ResourceKind::Animals, 1).with_target(Target::SelfCard)),
        );
    registry.register_card(owner, &card);

    let plant = Card::new("P1", "Grass", CardType::Automated).with_tag(CardTag::Plant);
    let power = Card::new("P2", "Power Plant", CardType::Automated).with_tag(CardTag::Power);
    fire(&registry, &session, &GameEvent::card_played(owner, &plant));
    fire(&registry, &session, &GameEvent::card_played(owner, &power));

    assert_eq!(session.player(owner).unwrap().card_storage(&CardId::new("ECO")), 1);
}

/// Location filters exclude space tiles.
#[test]
fn test_mars_only_trigger() {
    let session = common::session(1, 0);
    let mut registry = TriggerRegistry::new();
    let card = Card::new("MARS", "Surface Watch", CardType::Active).with_behavior(
        CardBehavior::new()
            .with_trigger(Trigger::on(
                ResourceTriggerCondition::new(TriggerType::CityPlaced).with_location(CardLocation::Mars),
            ))
            .with_output(ResourceCondition::new(ResourceKind::Credits, 2)),
    );
    registry.register_card(PlayerId::new(0), &card);

    let space = GameEvent::tile_placed(PlayerId::new(0), TileKind::City, TileLocation::Space);
    let mars = GameEvent::tile_placed(PlayerId::new(0), TileKind::City, TileLocation::Mars);
    assert_eq!(fire(&registry, &session, &space), 0);
    assert_eq!(fire(&registry, &session, &mars), 1);
    assert_eq!(session.player(PlayerId::new(0)).unwrap().amount(ResourceKind::Credits), 2);
}

/// Cards loaded from JSON register the same passive effects.
#[test]
fn test_registry_from_json_card() {
    let json = r#"[{
        "id": "B10",
        "name": "Arctic Algae",
        "type": "active",
        "cost": 12,
        "tags": ["plant"],
        "behaviors": [{
            "triggers": [{"type": "auto", "condition": {"type": "ocean-placed", "target": "any-player"}}],
            "outputs": [{"type": "plants", "amount": 2}]
        }]
    }]"#;
    let cards = CardRegistry::from_json(json).unwrap();
    let session = common::session(2, 0);
    let mut registry = TriggerRegistry::new();
    registry.register_card(PlayerId::new(0), cards.get(&CardId::new("B10")).unwrap());

    let event = GameEvent::tile_placed(PlayerId::new(1), TileKind::Ocean, TileLocation::Mars);
    assert_eq!(fire(&registry, &session, &event), 1);
    assert_eq!(session.player(PlayerId::new(0)).unwrap().amount(ResourceKind::Plants), 2);
}
