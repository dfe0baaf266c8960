//! Per-game session handle.
//!
//! A `GameSession` owns every mutable aggregate of one game: the players,
//! the board, the global parameters, the project deck, the per-player
//! selection states and the queue of triggered effects. It is passed
//! explicitly to whatever needs game state; nothing is global.
//!
//! ## Locking
//!
//! Each aggregate has its own lock and no method holds two at once. The
//! selection map sits behind a single game-level mutex so concurrent
//! enqueues for the same game serialize. Events are published after the
//! lock that produced them is released.

use parking_lot::{Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info, warn};

use super::cancel::CancelToken;
use super::config::EngineConfig;
use super::error::{EngineError, Result};
use super::events::{DomainEvent, EventBus};
use super::player::{PlayerId, PlayerMap};
use crate::board::{Board, TileKind};
use crate::cards::{CardId, Deck};
use crate::core::ResourceKind;
use crate::effects::TriggeredEffect;
use crate::parameters::GlobalParameters;
use crate::player::{
    Debit, PendingCardDrawSelection, PendingTileSelection, Player, SelectionState,
};

#[derive(Debug)]
pub struct GameSession {
    id: String,
    config: EngineConfig,
    players: PlayerMap<Player>,
    board: RwLock<Board>,
    parameters: GlobalParameters,
    deck: Mutex<Deck>,
    selections: Mutex<PlayerMap<SelectionState>>,
    triggered_effects: Mutex<Vec<TriggeredEffect>>,
    events: EventBus,
}

/// Builder for [`GameSession`].
///
/// ```
/// use terraform_rules::core::GameSession;
/// use terraform_rules::board::Board;
///
/// let session = GameSession::builder("game-1")
///     .player("Ada")
///     .player("Bo")
///     .board(Board::hexagon(4))
///     .build()
///     .unwrap();
///
/// assert_eq!(session.player_count(), 2);
/// ```
#[derive(Debug)]
pub struct GameSessionBuilder {
    id: String,
    config: EngineConfig,
    player_names: Vec<String>,
    board: Board,
    deck: Deck,
    events: EventBus,
}

impl GameSessionBuilder {
    #[must_use]
    pub fn player(mut self, name: impl Into<String>) -> Self {
        self.player_names.push(name.into());
        self
    }

    #[must_use]
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn board(mut self, board: Board) -> Self {
        self.board = board;
        self
    }

    #[must_use]
    pub fn deck(mut self, deck: Deck) -> Self {
        self.deck = deck;
        self
    }

    /// Share an existing bus instead of creating one.
    #[must_use]
    pub fn events(mut self, events: EventBus) -> Self {
        self.events = events;
        self
    }

    pub fn build(self) -> Result<GameSession> {
        let count = self.player_names.len();
        if count == 0 || count > usize::from(u8::MAX) {
            return Err(EngineError::InvalidSession(format!(
                "a game needs 1 to 255 players, got {count}"
            )));
        }

        let rating = self.config.starting_terraform_rating;
        let events = self.events;
        let names = self.player_names;
        let players = PlayerMap::new(count, |id| {
            Player::with_events(id, names[id.index()].clone(), rating, events.clone())
        });

        debug!(game = %self.id, players = count, "game session created");
        Ok(GameSession {
            parameters: GlobalParameters::with_events(&self.config, events.clone()),
            id: self.id,
            config: self.config,
            players,
            board: RwLock::new(self.board),
            deck: Mutex::new(self.deck),
            selections: Mutex::new(PlayerMap::with_default(count)),
            triggered_effects: Mutex::new(Vec::new()),
            events,
        })
    }
}

impl GameSession {
    pub fn builder(id: impl Into<String>) -> GameSessionBuilder {
        GameSessionBuilder {
            id: id.into(),
            config: EngineConfig::default(),
            player_names: Vec::new(),
            board: Board::default(),
            deck: Deck::default(),
            events: EventBus::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    // === Players ===

    pub fn player(&self, id: PlayerId) -> Result<&Player> {
        self.players.get(id).ok_or(EngineError::UnknownPlayer(id))
    }

    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    /// Whether `player` is this session's own aggregate for its seat.
    #[must_use]
    pub fn owns(&self, player: &Player) -> bool {
        self.players
            .get(player.id())
            .is_some_and(|seated| std::ptr::eq(seated, player))
    }

    // === Board and parameters ===

    pub fn board(&self) -> RwLockReadGuard<'_, Board> {
        self.board.read()
    }

    pub fn board_mut(&self) -> RwLockWriteGuard<'_, Board> {
        self.board.write()
    }

    #[must_use]
    pub fn parameters(&self) -> &GlobalParameters {
        &self.parameters
    }

    // === Deck ===

    /// Draw from the top of the project deck.
    pub fn draw_project_cards(&self, cancel: &CancelToken, count: usize) -> Result<Vec<CardId>> {
        self.deck.lock().draw(cancel, count)
    }

    pub fn discard_cards(&self, cards: impl IntoIterator<Item = CardId>) {
        self.deck.lock().discard(cards);
    }

    #[must_use]
    pub fn deck_remaining(&self) -> usize {
        self.deck.lock().remaining()
    }

    #[must_use]
    pub fn discarded_cards(&self) -> Vec<CardId> {
        self.deck.lock().discarded().to_vec()
    }

    // === Pending selections ===

    /// Append tile placements to a player's queue, in order.
    pub fn append_pending_tiles(
        &self,
        cancel: &CancelToken,
        player: PlayerId,
        tiles: Vec<PendingTileSelection>,
    ) -> Result<()> {
        cancel.check()?;
        if tiles.is_empty() {
            return Ok(());
        }
        let kinds: Vec<TileKind> = tiles.iter().map(|t| t.tile).collect();
        let source = tiles[0].source.clone();
        {
            let mut selections = self.selections.lock();
            let state = selections
                .get_mut(player)
                .ok_or(EngineError::PlayerNotInGame(player))?;
            state.enqueue_tiles(tiles);
        }
        self.events.publish(DomainEvent::TilesQueued {
            player,
            tiles: kinds,
            source,
        });
        Ok(())
    }

    #[must_use]
    pub fn selection_state(&self, player: PlayerId) -> SelectionState {
        self.selections
            .lock()
            .get(player)
            .cloned()
            .unwrap_or_default()
    }

    /// Every tile the player still has to place, in order.
    #[must_use]
    pub fn pending_tiles(&self, player: PlayerId) -> Vec<PendingTileSelection> {
        self.selections
            .lock()
            .get(player)
            .map(SelectionState::pending_tiles)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn pending_card_draw(&self, player: PlayerId) -> Option<PendingCardDrawSelection> {
        self.selections
            .lock()
            .get(player)
            .and_then(|state| state.pending_card_selection().cloned())
    }

    /// Mark the front tile as placed and return it.
    pub fn complete_tile_selection(&self, cancel: &CancelToken, player: PlayerId) -> Result<PendingTileSelection> {
        cancel.check()?;
        let mut selections = self.selections.lock();
        selections
            .get_mut(player)
            .ok_or(EngineError::PlayerNotInGame(player))?
            .complete_tile(player)
    }

    /// Put a card-draw selection in front of the player.
    ///
    /// On failure the drawn cards go back on top of the deck, in order.
    pub fn begin_card_draw_selection(
        &self,
        cancel: &CancelToken,
        player: PlayerId,
        selection: PendingCardDrawSelection,
    ) -> Result<()> {
        let drawn = selection.available_cards.clone();
        let source = selection.source.clone();
        let begun = cancel.check().and_then(|()| {
            let mut selections = self.selections.lock();
            selections
                .get_mut(player)
                .ok_or(EngineError::PlayerNotInGame(player))?
                .begin_card_selection(player, selection)
        });
        if let Err(err) = begun {
            debug!(player = %player, cards = drawn.len(), error = %err, "returning drawn cards to the deck");
            self.deck.lock().return_to_top(drawn);
            return Err(err);
        }

        self.events.publish(DomainEvent::CardDrawSelectionCreated {
            player,
            available: drawn.len(),
            source,
        });
        Ok(())
    }

    /// Resolve a pending card draw: keep `take` for free, pay for `buy`.
    ///
    /// The selection is validated and taken out of the player's state in
    /// one step, so a selection resolves at most once. If the buys cannot
    /// be paid it is put back. Cards not chosen go to the discard pile.
    pub fn confirm_card_draw(
        &self,
        cancel: &CancelToken,
        player: PlayerId,
        take: &[CardId],
        buy: &[CardId],
    ) -> Result<()> {
        cancel.check()?;
        let seated = self.player(player)?;
        let (selection, cost) = {
            let mut selections = self.selections.lock();
            let state = selections
                .get_mut(player)
                .ok_or(EngineError::PlayerNotInGame(player))?;
            let cost = state
                .pending_card_selection()
                .ok_or(EngineError::NoPendingSelection { player, what: "card" })?
                .validate(take, buy)?;
            (state.complete_card_selection(player)?, cost)
        };

        if cost > 0 {
            let paid = seated.spend(&[Debit {
                kind: ResourceKind::Credits,
                amount: cost,
                card: None,
            }]);
            if let Err(err) = paid {
                self.restore_card_selection(player, selection);
                return Err(err);
            }
        }

        let kept: Vec<CardId> = take.iter().chain(buy).cloned().collect();
        let discarded = selection.unselected(&kept);
        seated.add_to_hand(kept);
        self.discard_cards(discarded);

        info!(
            player = %player,
            taken = take.len(),
            bought = buy.len(),
            cost,
            source = %selection.source,
            "card draw confirmed"
        );
        self.events.publish(DomainEvent::CardDrawSelectionResolved {
            player,
            taken: take.len(),
            bought: buy.len(),
        });
        Ok(())
    }

    fn restore_card_selection(&self, player: PlayerId, selection: PendingCardDrawSelection) {
        let mut selections = self.selections.lock();
        let Some(state) = selections.get_mut(player) else {
            return;
        };
        if let Err(rejected) = state.restore_card_selection(selection) {
            drop(selections);
            warn!(player = %player, source = %rejected.source, "another card draw began, discarding");
            self.discard_cards(rejected.available_cards);
        }
    }

    // === Triggered effects ===

    pub fn record_triggered_effect(&self, effect: TriggeredEffect) {
        let player = effect.player;
        let source = effect.source.clone();
        self.triggered_effects.lock().push(effect);
        self.events
            .publish(DomainEvent::TriggeredEffectRecorded { player, source });
    }

    #[must_use]
    pub fn triggered_effects(&self) -> Vec<TriggeredEffect> {
        self.triggered_effects.lock().clone()
    }

    /// Hand the queued notifications to the caller and clear the queue.
    pub fn drain_triggered_effects(&self) -> Vec<TriggeredEffect> {
        std::mem::take(&mut *self.triggered_effects.lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> GameSession {
        GameSession::builder("g")
            .player("Ada")
            .player("Bo")
            .deck(Deck::new(["a", "b", "c"].map(CardId::new)))
            .build()
            .unwrap()
    }

    fn tile(kind: TileKind) -> PendingTileSelection {
        PendingTileSelection {
            tile: kind,
            source: "src".to_string(),
            restrictions: None,
        }
    }

    #[test]
    fn test_build_requires_players() {
        let err = GameSession::builder("empty").build().unwrap_err();
        assert!(matches!(err, EngineError::InvalidSession(_)));
    }

    #[test]
    fn test_players_start_with_configured_rating() {
        let session = GameSession::builder("g")
            .player("Ada")
            .config(EngineConfig::default().with_starting_terraform_rating(14))
            .build()
            .unwrap();
        assert_eq!(session.player(PlayerId::new(0)).unwrap().terraform_rating(), 14);
        assert!(matches!(
            session.player(PlayerId::new(3)),
            Err(EngineError::UnknownPlayer(_))
        ));
    }

    #[test]
    fn test_owns_only_seated_aggregate() {
        let session = session();
        let stranger = Player::new(PlayerId::new(0), "Ada", 20);
        assert!(session.owns(session.player(PlayerId::new(0)).unwrap()));
        assert!(!session.owns(&stranger));
    }

    #[test]
    fn test_append_tiles_unknown_player() {
        let session = session();
        let err = session
            .append_pending_tiles(&CancelToken::new(), PlayerId::new(9), vec![tile(TileKind::City)])
            .unwrap_err();
        assert!(matches!(err, EngineError::PlayerNotInGame(_)));
    }

    #[test]
    fn test_tile_queue_per_player() {
        let session = session();
        let cancel = CancelToken::new();
        let p0 = PlayerId::new(0);
        session
            .append_pending_tiles(&cancel, p0, vec![tile(TileKind::City), tile(TileKind::Greenery)])
            .unwrap();

        assert_eq!(session.pending_tiles(p0).len(), 2);
        assert!(session.pending_tiles(PlayerId::new(1)).is_empty());
        assert_eq!(session.complete_tile_selection(&cancel, p0).unwrap().tile, TileKind::City);
        assert_eq!(session.pending_tiles(p0).len(), 1);
    }

    fn selection_of(cards: Vec<CardId>) -> PendingCardDrawSelection {
        PendingCardDrawSelection {
            free_take_count: cards.len(),
            available_cards: cards,
            max_buy_count: 0,
            card_buy_cost: 3,
            source: "src".to_string(),
            source_card: None,
            source_behavior_index: None,
        }
    }

    #[test]
    fn test_rejected_selection_returns_cards() {
        let session = session();
        let p0 = PlayerId::new(0);
        let cancel = CancelToken::new();
        let first = session.draw_project_cards(&cancel, 1).unwrap();
        session.begin_card_draw_selection(&cancel, p0, selection_of(first)).unwrap();

        let second = session.draw_project_cards(&cancel, 2).unwrap();
        assert_eq!(session.deck_remaining(), 0);
        let err = session
            .begin_card_draw_selection(&cancel, p0, selection_of(second))
            .unwrap_err();

        assert!(matches!(err, EngineError::SelectionPending(_)));
        assert_eq!(session.deck_remaining(), 2);
        assert_eq!(session.draw_project_cards(&cancel, 2).unwrap(), vec![CardId::new("b"), CardId::new("c")]);
    }

    #[test]
    fn test_cancelled_selection_returns_cards() {
        let session = session();
        let p0 = PlayerId::new(0);
        let drawn = session.draw_project_cards(&CancelToken::new(), 2).unwrap();

        let cancel = CancelToken::new();
        cancel.cancel();
        let err = session
            .begin_card_draw_selection(&cancel, p0, selection_of(drawn))
            .unwrap_err();

        assert!(matches!(err, EngineError::Cancelled));
        assert_eq!(session.deck_remaining(), 3);
        assert!(session.pending_card_draw(p0).is_none());
        assert!(session.discarded_cards().is_empty());
    }

    #[test]
    fn test_unaffordable_confirm_restores_selection() {
        let session = session();
        let p0 = PlayerId::new(0);
        let cancel = CancelToken::new();
        session
            .append_pending_tiles(&cancel, p0, vec![tile(TileKind::Ocean)])
            .unwrap();
        let drawn = session.draw_project_cards(&cancel, 2).unwrap();
        let selection = PendingCardDrawSelection {
            free_take_count: 0,
            max_buy_count: 2,
            ..selection_of(drawn.clone())
        };
        session.begin_card_draw_selection(&cancel, p0, selection).unwrap();

        let err = session.confirm_card_draw(&cancel, p0, &[], &drawn).unwrap_err();

        assert!(matches!(err, EngineError::InsufficientResource { .. }));
        assert_eq!(session.pending_card_draw(p0).unwrap().available_cards, drawn);
        assert_eq!(session.pending_tiles(p0).len(), 1);
        assert!(session.complete_tile_selection(&cancel, p0).is_err());
    }

    #[test]
    fn test_drain_triggered_effects() {
        let session = session();
        session.record_triggered_effect(TriggeredEffect {
            source: "Arctic Algae".to_string(),
            player: PlayerId::new(1),
            outputs: Vec::new(),
        });

        assert_eq!(session.triggered_effects().len(), 1);
        assert_eq!(session.drain_triggered_effects().len(), 1);
        assert!(session.triggered_effects().is_empty());
    }
}
