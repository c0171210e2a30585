//! Moderator control panel session
//!
//! Access is granted by exchanging the shared secret code once. The code is
//! then kept in memory for the life of the session and sent along with every
//! moderator action; it is never written anywhere.

use async_trait::async_trait;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::{info, warn};

use super::client::SyncClient;
use super::poller::{Pollable, Poller};
use crate::client::{Reply, Transport};
use crate::core::{Action, SyncError, DEFAULT_DRINK_BREAK_MESSAGE};
use crate::game::validation::{validate_secret_code, validate_team_change, validate_text};
use crate::game::{
    BalanceReport, GameSettings, ModeratorActionEntry, ModeratorStats, PlayerId,
    SettingsPreset, TeamId, VotingResult,
};

/// The secret code, held only while the session lives
#[derive(Clone, PartialEq, Eq)]
pub struct ModeratorCredential(String);

impl ModeratorCredential {
    fn secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ModeratorCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ModeratorCredential(***)")
    }
}

/// Moderator-only data shown next to the game snapshot
#[derive(Debug, Default)]
pub struct ModeratorState {
    pub credential: Option<ModeratorCredential>,
    pub stats: Option<ModeratorStats>,
    pub recent_actions: Vec<ModeratorActionEntry>,
    pub settings: Option<GameSettings>,
    pub presets: Vec<(String, SettingsPreset)>,
    pub last_result: Option<VotingResult>,
    pub balance: Option<BalanceReport>,
}

pub struct ModeratorSession<T: Transport> {
    client: Arc<SyncClient<T>>,
    state: Mutex<ModeratorState>,
}

impl<T: Transport> ModeratorSession<T> {
    pub fn new(client: Arc<SyncClient<T>>) -> Self {
        Self { client, state: Mutex::new(ModeratorState::default()) }
    }

    pub fn client(&self) -> &Arc<SyncClient<T>> {
        &self.client
    }

    pub fn state(&self) -> MutexGuard<'_, ModeratorState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_authenticated(&self) -> bool {
        self.state().credential.is_some()
    }

    /// Forgets the credential; moderator actions fail locally afterwards
    pub fn sign_out(&self) {
        self.state().credential = None;
    }

    fn credential(&self, action: Action) -> Result<ModeratorCredential, SyncError> {
        self.state()
            .credential
            .clone()
            .ok_or_else(|| self.client.fail(action, SyncError::NotAuthenticated))
    }

    /// Exchanges the secret code for moderator access
    pub async fn authenticate(&self, secret_code: &str) -> Result<(), SyncError> {
        let code = validate_secret_code(secret_code)
            .map_err(|err| self.client.fail(Action::Authenticate, err))?;

        match self.client.api().authenticate_moderator(&code).await {
            Ok(reply) => {
                self.state().credential = Some(ModeratorCredential(code));
                info!("moderator access granted");
                self.client.succeed(reply.message_or("Moderator access granted! 🔓"));
                Ok(())
            }
            Err(err) => Err(self.client.fail(Action::Authenticate, err)),
        }
    }

    /// Starts the statistics poll loop; only available once authenticated
    pub fn spawn_stats_poller(self: &Arc<Self>, interval: Duration) -> Result<Poller, SyncError>
    where
        T: 'static,
    {
        if !self.is_authenticated() {
            return Err(SyncError::NotAuthenticated);
        }
        Ok(Poller::spawn(Arc::clone(self), interval))
    }

    /// Fetches the moderator statistics and recent action log
    pub async fn refresh_stats(&self) -> Result<(), SyncError> {
        let response = self.client.api().moderator_stats().await?;
        let mut state = self.state();
        state.stats = Some(response.stats);
        state.recent_actions = response.recent_actions;
        Ok(())
    }

    /// State refresh plus statistics refresh after a successful mutation
    async fn after_mutation(&self) {
        let (_, stats) = futures::join!(self.client.refresh_after_action(), self.refresh_stats());
        if let Err(err) = stats {
            warn!(error = %err, "{}", Action::ModeratorStats.failure_label());
        }
    }

    /// Shows the reply's message and runs the post-mutation refreshes
    async fn finish<R>(&self, reply: Reply<R>, fallback: &str) -> R {
        self.client.succeed(reply.message_or(fallback));
        self.after_mutation().await;
        reply.payload
    }

    pub async fn start_round(&self) -> Result<(), SyncError> {
        let credential = self.credential(Action::StartRound)?;
        match self.client.api().moderator_start_round(credential.secret()).await {
            Ok(reply) => {
                self.finish(reply, "Round started!").await;
                Ok(())
            }
            Err(err) => Err(self.client.fail(Action::StartRound, err)),
        }
    }

    /// Toggles the pause; returns whether the game is now paused
    pub async fn pause_game(&self) -> Result<bool, SyncError> {
        let credential = self.credential(Action::PauseGame)?;
        match self.client.api().pause_game(credential.secret()).await {
            Ok(reply) => {
                let paused = self.finish(reply, "Game pause toggled").await.is_paused;
                Ok(paused)
            }
            Err(err) => Err(self.client.fail(Action::PauseGame, err)),
        }
    }

    /// Announces a drink break; an empty message is rejected locally
    pub async fn announce_drink_break(&self, message: Option<&str>) -> Result<(), SyncError> {
        let credential = self.credential(Action::DrinkBreak)?;
        let message = validate_text(message.unwrap_or(DEFAULT_DRINK_BREAK_MESSAGE), "a message")
            .map_err(|err| self.client.fail(Action::DrinkBreak, err))?;

        match self
            .client
            .api()
            .announce_drink_break(credential.secret(), &message)
            .await
        {
            Ok(reply) => {
                self.finish(reply, &message).await;
                Ok(())
            }
            Err(err) => Err(self.client.fail(Action::DrinkBreak, err)),
        }
    }

    pub async fn manual_team_change(
        &self,
        player_id: Option<PlayerId>,
        team_id: Option<TeamId>,
    ) -> Result<(), SyncError> {
        let credential = self.credential(Action::ManualTeamChange)?;
        let (player_id, team_id) = validate_team_change(player_id, team_id)
            .map_err(|err| self.client.fail(Action::ManualTeamChange, err))?;

        match self
            .client
            .api()
            .manual_team_change(credential.secret(), player_id, team_id)
            .await
        {
            Ok(reply) => {
                self.finish(reply, "Player moved!").await;
                Ok(())
            }
            Err(err) => Err(self.client.fail(Action::ManualTeamChange, err)),
        }
    }

    /// Wipes the game on the server; callers confirm with the user first
    pub async fn reset_game(&self) -> Result<(), SyncError> {
        let credential = self.credential(Action::ResetGame)?;
        match self.client.api().reset_game(credential.secret()).await {
            Ok(reply) => {
                self.finish(reply, "Game reset!").await;
                Ok(())
            }
            Err(err) => Err(self.client.fail(Action::ResetGame, err)),
        }
    }

    /// Closes the round's voting and records the result
    pub async fn finalize_voting(&self) -> Result<VotingResult, SyncError> {
        self.credential(Action::FinalizeVoting)?;
        match self.client.api().finalize_voting().await {
            Ok(reply) => {
                let fallback = if reply.payload.is_tie { "It's a tie!" } else { "Voting finalized" };
                let result = self.finish(reply, fallback).await;
                self.state().last_result = Some(result.clone());
                Ok(result)
            }
            Err(err) => Err(self.client.fail(Action::FinalizeVoting, err)),
        }
    }

    /// Loads the current settings and the available presets
    pub async fn load_settings(&self) -> Result<(), SyncError> {
        self.credential(Action::LoadSettings)?;
        let api = self.client.api();
        let (settings, presets) = futures::join!(api.game_settings(), api.settings_presets());
        let settings = settings.map_err(|err| self.client.fail(Action::LoadSettings, err))?;
        let presets = presets.map_err(|err| self.client.fail(Action::LoadSettings, err))?;

        let mut state = self.state();
        state.settings = Some(settings.settings);
        state.presets = presets.presets.into_iter().collect();
        Ok(())
    }

    pub async fn apply_preset(&self, preset_name: &str) -> Result<GameSettings, SyncError> {
        let credential = self.credential(Action::ApplyPreset)?;
        let preset_name = validate_text(preset_name, "a preset name")
            .map_err(|err| self.client.fail(Action::ApplyPreset, err))?;

        match self.client.api().apply_preset(credential.secret(), &preset_name).await {
            Ok(reply) => {
                let settings = self.finish(reply, "Preset applied").await.settings;
                self.state().settings = Some(settings.clone());
                Ok(settings)
            }
            Err(err) => Err(self.client.fail(Action::ApplyPreset, err)),
        }
    }

    pub async fn balance_check(&self) -> Result<BalanceReport, SyncError> {
        self.credential(Action::BalanceCheck)?;
        let report = self
            .client
            .api()
            .balance_check()
            .await
            .map_err(|err| self.client.fail(Action::BalanceCheck, err))?;
        self.state().balance = Some(report.clone());
        Ok(report)
    }
}

#[async_trait]
impl<T: Transport + 'static> Pollable for ModeratorSession<T> {
    fn label(&self) -> &'static str {
        "moderator stats"
    }

    async fn poll(&self) -> Result<(), SyncError> {
        if !self.is_authenticated() {
            return Err(SyncError::NotAuthenticated);
        }
        self.refresh_stats().await
    }
}
