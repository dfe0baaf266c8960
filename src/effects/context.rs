//! Application context.
//!
//! An `ApplyContext` is everything one behavior application may touch:
//! the acting player, the game session, a card lookup for tag counting,
//! and the cards and players the behavior points at. It is built once,
//! validated by [`ApplyContextBuilder::build`], and never changes.

use crate::cards::{CardId, CardLookup};
use crate::core::{EngineError, GameSession, PlayerId, Result};
use crate::player::Player;

#[derive(Clone)]
pub struct ApplyContext<'a> {
    source: &'a str,
    player: Option<&'a Player>,
    session: Option<&'a GameSession>,
    cards: Option<&'a dyn CardLookup>,
    source_card: Option<CardId>,
    target_card: Option<CardId>,
    target_player: Option<PlayerId>,
    steal_source_card: Option<CardId>,
    behavior_index: Option<usize>,
}

impl std::fmt::Debug for ApplyContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApplyContext")
            .field("source", &self.source)
            .field("player", &self.player.map(Player::id))
            .field("has_session", &self.session.is_some())
            .field("has_cards", &self.cards.is_some())
            .field("source_card", &self.source_card)
            .field("target_card", &self.target_card)
            .field("target_player", &self.target_player)
            .field("steal_source_card", &self.steal_source_card)
            .field("behavior_index", &self.behavior_index)
            .finish()
    }
}

/// Builder for [`ApplyContext`].
///
/// ```
/// use terraform_rules::core::{GameSession, PlayerId};
/// use terraform_rules::effects::ApplyContext;
///
/// let session = GameSession::builder("g").player("Ada").player("Bo").build().unwrap();
/// let ada = session.player(PlayerId::new(0)).unwrap();
///
/// let ctx = ApplyContext::builder("Asteroid")
///     .player(ada)
///     .session(&session)
///     .target_player(PlayerId::new(1))
///     .build()
///     .unwrap();
///
/// assert_eq!(ctx.source(), "Asteroid");
/// assert!(ctx.target_player().is_some());
/// ```
pub struct ApplyContextBuilder<'a> {
    source: &'a str,
    player: Option<&'a Player>,
    session: Option<&'a GameSession>,
    cards: Option<&'a dyn CardLookup>,
    source_card: Option<CardId>,
    target_card: Option<CardId>,
    target_player: Option<PlayerId>,
    steal_source_card: Option<CardId>,
    behavior_index: Option<usize>,
}

impl<'a> ApplyContextBuilder<'a> {
    #[must_use]
    pub fn player(mut self, player: &'a Player) -> Self {
        self.player = Some(player);
        self
    }

    #[must_use]
    pub fn session(mut self, session: &'a GameSession) -> Self {
        self.session = Some(session);
        self
    }

    /// Card definitions for tag counting.
    #[must_use]
    pub fn cards(mut self, cards: &'a dyn CardLookup) -> Self {
        self.cards = Some(cards);
        self
    }

    /// Card whose behavior is being applied.
    #[must_use]
    pub fn source_card(mut self, card: CardId) -> Self {
        self.source_card = Some(card);
        self
    }

    /// Card chosen for an any-card output.
    #[must_use]
    pub fn target_card(mut self, card: CardId) -> Self {
        self.target_card = Some(card);
        self
    }

    /// Player chosen for an any-player or steal output.
    #[must_use]
    pub fn target_player(mut self, player: PlayerId) -> Self {
        self.target_player = Some(player);
        self
    }

    /// Card to steal from for a steal-from-any-card output.
    #[must_use]
    pub fn steal_source_card(mut self, card: CardId) -> Self {
        self.steal_source_card = Some(card);
        self
    }

    #[must_use]
    pub fn behavior_index(mut self, index: usize) -> Self {
        self.behavior_index = Some(index);
        self
    }

    /// Validate the bindings and produce the context.
    ///
    /// Fails if the player is not the session's own aggregate for its seat,
    /// or if a target player is named without a session or is not seated.
    pub fn build(self) -> Result<ApplyContext<'a>> {
        if let (Some(player), Some(session)) = (self.player, self.session) {
            if !session.owns(player) {
                return Err(EngineError::PlayerNotInGame(player.id()));
            }
        }
        if let Some(target) = self.target_player {
            let session = self
                .session
                .ok_or(EngineError::missing_session("resolve target player"))?;
            session.player(target)?;
        }

        Ok(ApplyContext {
            source: self.source,
            player: self.player,
            session: self.session,
            cards: self.cards,
            source_card: self.source_card,
            target_card: self.target_card,
            target_player: self.target_player,
            steal_source_card: self.steal_source_card,
            behavior_index: self.behavior_index,
        })
    }
}

impl<'a> ApplyContext<'a> {
    pub fn builder(source: &'a str) -> ApplyContextBuilder<'a> {
        ApplyContextBuilder {
            source,
            player: None,
            session: None,
            cards: None,
            source_card: None,
            target_card: None,
            target_player: None,
            steal_source_card: None,
            behavior_index: None,
        }
    }

    /// Card or project name used in logs and notifications.
    #[must_use]
    pub fn source(&self) -> &'a str {
        self.source
    }

    #[must_use]
    pub fn player(&self) -> Option<&'a Player> {
        self.player
    }

    #[must_use]
    pub fn session(&self) -> Option<&'a GameSession> {
        self.session
    }

    #[must_use]
    pub fn cards(&self) -> Option<&'a dyn CardLookup> {
        self.cards
    }

    #[must_use]
    pub fn source_card(&self) -> Option<&CardId> {
        self.source_card.as_ref()
    }

    #[must_use]
    pub fn target_card(&self) -> Option<&CardId> {
        self.target_card.as_ref()
    }

    #[must_use]
    pub fn target_player(&self) -> Option<PlayerId> {
        self.target_player
    }

    #[must_use]
    pub fn steal_source_card(&self) -> Option<&CardId> {
        self.steal_source_card.as_ref()
    }

    #[must_use]
    pub fn behavior_index(&self) -> Option<usize> {
        self.behavior_index
    }

    /// The acting player, or `MissingContext` naming `operation`.
    pub fn require_player(&self, operation: &'static str) -> Result<&'a Player> {
        self.player.ok_or(EngineError::missing_player(operation))
    }

    /// The game session, or `MissingContext` naming `operation`.
    pub fn require_session(&self, operation: &'static str) -> Result<&'a GameSession> {
        self.session.ok_or(EngineError::missing_session(operation))
    }

    /// The seated aggregate of the bound target player, if any.
    #[must_use]
    pub fn target_player_ref(&self) -> Option<&'a Player> {
        let session = self.session?;
        session.player(self.target_player?).ok()
    }
}
