//! Shared fixtures for integration tests.

#![allow(dead_code)]

use terraform_rules::board::Board;
use terraform_rules::cards::{CardId, Deck};
use terraform_rules::core::{GameSession, PlayerId};
use terraform_rules::effects::{ApplyContext, BehaviorApplier};
use tracing_subscriber::EnvFilter;

/// Route engine logs to the test output. Set `RUST_LOG=debug` to see them.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A session with `players` seats, the standard map and `deck_size` cards.
pub fn session(players: usize, deck_size: usize) -> GameSession {
    init_tracing();
    let mut builder = GameSession::builder(format!("test-{players}p"))
        .board(Board::hexagon(4))
        .deck(Deck::new((0..deck_size).map(|i| CardId::new(format!("P{i:03}")))));
    for seat in 0..players {
        builder = builder.player(format!("Player {seat}"));
    }
    builder.build().expect("valid session")
}

/// Applier for `seat` with the session bound and nothing else.
pub fn applier<'a>(session: &'a GameSession, seat: u8, source: &'a str) -> BehaviorApplier<'a> {
    let ctx = ApplyContext::builder(source)
        .player(session.player(PlayerId::new(seat)).expect("seated"))
        .session(session)
        .build()
        .expect("valid context");
    BehaviorApplier::new(ctx)
}
