//! Supporter screen: predictions by eliminated players and rejoining

use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;

use super::client::SyncClient;
use super::poller::Pollable;
use crate::client::Transport;
use crate::core::{Action, SyncError};
use crate::game::validation::validate_prediction_choice;
use crate::game::{SupporterToken, TeamId};

pub struct SupporterSession<T: Transport> {
    client: Arc<SyncClient<T>>,
}

impl<T: Transport> SupporterSession<T> {
    pub fn new(client: Arc<SyncClient<T>>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Arc<SyncClient<T>> {
        &self.client
    }

    /// Reloads the active supporter tokens
    ///
    /// Failures are logged only; the token list keeps its previous content.
    pub async fn load_tokens(&self) -> Result<(), SyncError> {
        match self.client.api().supporter_tokens().await {
            Ok(response) => {
                self.client.state().replace_tokens(response.tokens);
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "{}", Action::LoadTokens.failure_label());
                Err(err)
            }
        }
    }

    /// The registered player's active token
    pub fn player_token(&self) -> Option<SupporterToken> {
        self.client.state().player_token().cloned()
    }

    /// `submitPrediction(playerId, number, teamId)`
    pub async fn submit_prediction(
        &self,
        number: Option<i64>,
        team_id: Option<TeamId>,
    ) -> Result<(), SyncError> {
        let (player_id, number, team_id) = match self.check_prediction(number, team_id) {
            Ok(checked) => checked,
            Err(err) => return Err(self.client.fail(Action::SubmitPrediction, err)),
        };

        match self.client.api().submit_prediction(player_id, number, team_id).await {
            Ok(reply) => {
                self.client.succeed(reply.message_or(format!("Prediction submitted: {number}")));
                let _ = self.load_tokens().await;
                self.client.refresh_after_action().await;
                Ok(())
            }
            Err(err) => Err(self.client.fail(Action::SubmitPrediction, err)),
        }
    }

    fn check_prediction(
        &self,
        number: Option<i64>,
        team_id: Option<TeamId>,
    ) -> Result<(u64, u32, TeamId), SyncError> {
        let (number, team_id) = validate_prediction_choice(number, team_id)?;
        let player_id = self.client.registered_player_id()?;
        if self.player_token().is_none() {
            return Err(SyncError::validation("You have no supporter token yet."));
        }
        Ok((player_id, number, team_id))
    }

    /// Rejoins the game with a token whose prediction was correct
    pub async fn rejoin(&self) -> Result<(), SyncError> {
        let token_id = match self.player_token() {
            Some(token) if token.can_rejoin() => token.id,
            Some(_) => {
                let err = SyncError::validation("Only a correct prediction lets you rejoin.");
                return Err(self.client.fail(Action::RejoinGame, err));
            }
            None => {
                let err = SyncError::validation("You have no supporter token yet.");
                return Err(self.client.fail(Action::RejoinGame, err));
            }
        };

        match self.client.api().rejoin_game(token_id).await {
            Ok(reply) => {
                self.client.succeed(reply.message_or("Welcome back to the game!"));
                let _ = self.load_tokens().await;
                self.client.refresh_after_action().await;
                Ok(())
            }
            Err(err) => Err(self.client.fail(Action::RejoinGame, err)),
        }
    }
}

#[async_trait]
impl<T: Transport + 'static> Pollable for SupporterSession<T> {
    fn label(&self) -> &'static str {
        "supporter"
    }

    async fn poll(&self) -> Result<(), SyncError> {
        let (state, tokens) = futures::join!(self.client.poll(), self.load_tokens());
        state.and(tokens)
    }
}
