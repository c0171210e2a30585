//! Local mirror of everything a view shows

use tokio::time::Instant;
use tracing::info;

use crate::core::Notices;
use crate::game::{GameSnapshot, Phase, Player, PlayerId, SupporterToken};

/// State shared between the poll task and user actions
///
/// Server data is only ever replaced wholesale; the last response to resolve
/// wins.
#[derive(Debug, Default)]
pub struct SessionState {
    pub phase: Phase,
    /// Identity returned by registration, stored verbatim
    pub player: Option<Player>,
    pub snapshot: Option<GameSnapshot>,
    pub tokens: Vec<SupporterToken>,
    pub notices: Notices,
    pub last_refresh: Option<Instant>,
    /// Most recent background poll failure; cleared by the next successful poll
    pub last_poll_error: Option<String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn player_id(&self) -> Option<PlayerId> {
        self.player.as_ref().map(|player| player.id)
    }

    /// Stores the registered identity and leaves Registration
    pub fn record_registration(&mut self, player: Player) {
        let next = self.phase.on_registered();
        if next != self.phase {
            info!(player_id = player.id, "registered, moving to {}", next.label());
        }
        self.phase = next;
        self.player = Some(player);
    }

    /// Replaces the snapshot and lets the server state advance the phase
    pub fn replace_snapshot(&mut self, snapshot: GameSnapshot) {
        let next = self.phase.observe(snapshot.phase());
        if next != self.phase {
            info!(from = self.phase.label(), to = next.label(), "phase changed by server");
        }
        self.phase = next;
        self.snapshot = Some(snapshot);
        self.last_refresh = Some(Instant::now());
        self.last_poll_error = None;
    }

    pub fn replace_tokens(&mut self, tokens: Vec<SupporterToken>) {
        self.tokens = tokens;
    }

    /// The caller's active supporter token, if any
    pub fn player_token(&self) -> Option<&SupporterToken> {
        let player_id = self.player_id()?;
        self.tokens
            .iter()
            .find(|token| token.player_id == player_id && token.is_active)
    }

    /// The server's latest view of the registered player, falling back to the
    /// identity from registration
    pub fn current_player(&self) -> Option<&Player> {
        let player = self.player.as_ref()?;
        self.snapshot
            .as_ref()
            .and_then(|snapshot| snapshot.player(player.id))
            .or(Some(player))
    }
}
