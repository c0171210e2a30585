//! The sync client: shared session state plus the player-facing actions

use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

use super::poller::Pollable;
use super::state::SessionState;
use crate::client::{QuizApi, Transport};
use crate::core::{Action, SyncError, NOT_REGISTERED_MESSAGE};
use crate::game::validation::{validate_name, validate_partner, validate_text, validate_vote};
use crate::game::{
    Player, PlayerId, RoundVotingStatus, TeamId, TeamVotingStatusResponse,
};

/// Translates user intents into requests and keeps the local mirror current
///
/// Every mutating action follows the same shape: validate locally, send,
/// show a success or error message, and on success refresh the game state
/// exactly once.
pub struct SyncClient<T: Transport> {
    api: QuizApi<T>,
    state: Arc<Mutex<SessionState>>,
}

impl<T: Transport> SyncClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            api: QuizApi::new(transport),
            state: Arc::new(Mutex::new(SessionState::new())),
        }
    }

    pub fn api(&self) -> &QuizApi<T> {
        &self.api
    }

    /// Locks the session state; never hold the guard across an `.await`
    pub fn state(&self) -> MutexGuard<'_, SessionState> {
        acquire_state_lock(&self.state)
    }

    /// Records a failure as a user-visible error message and hands it back
    pub(crate) fn fail(&self, action: Action, err: SyncError) -> SyncError {
        let message = err.user_message(action);
        if err.is_local() {
            debug!(?action, %message, "rejected locally");
        } else {
            warn!(?action, error = %err, "action failed");
        }
        self.state().notices.set_error(message);
        err
    }

    pub(crate) fn succeed(&self, message: impl Into<String>) {
        self.state().notices.set_success(message);
    }

    pub(crate) fn registered_player_id(&self) -> Result<PlayerId, SyncError> {
        self.state()
            .player_id()
            .ok_or_else(|| SyncError::validation(NOT_REGISTERED_MESSAGE))
    }

    fn current_team_id(&self) -> Result<TeamId, SyncError> {
        let state = self.state();
        let player = state
            .current_player()
            .ok_or_else(|| SyncError::validation(NOT_REGISTERED_MESSAGE))?;
        player
            .team_id
            .ok_or_else(|| SyncError::validation("You are not in a team yet."))
    }

    /// Fetches the game state and replaces the local snapshot
    pub async fn refresh(&self) -> Result<(), SyncError> {
        let snapshot = self.api.game_state().await?;
        self.state().replace_snapshot(snapshot);
        Ok(())
    }

    /// The single refresh that follows a successful action
    ///
    /// A failure here is treated like a failed poll: logged and recorded, not
    /// shown as an error for the action that already succeeded.
    pub(crate) async fn refresh_after_action(&self) {
        if let Err(err) = self.refresh().await {
            self.record_poll_failure(&err);
        }
    }

    pub(crate) fn record_poll_failure(&self, err: &SyncError) {
        warn!(error = %err, "state refresh failed");
        self.state().last_poll_error = Some(err.to_string());
    }

    /// `register(name)`
    pub async fn register(&self, name: &str) -> Result<Player, SyncError> {
        let name = match self.check_registration(name) {
            Ok(name) => name,
            Err(err) => return Err(self.fail(Action::Register, err)),
        };

        match self.api.register(&name).await {
            Ok(reply) => {
                let player = reply.payload.player;
                {
                    let mut state = self.state();
                    state.record_registration(player.clone());
                    state
                        .notices
                        .set_success(format!("Registered! Your nickname: {}", player.nickname));
                }
                self.refresh_after_action().await;
                Ok(player)
            }
            Err(err) => Err(self.fail(Action::Register, err)),
        }
    }

    fn check_registration(&self, name: &str) -> Result<String, SyncError> {
        let name = validate_name(name)?;
        if self.state().player.is_some() {
            return Err(SyncError::validation("You are already registered."));
        }
        Ok(name)
    }

    /// Takes over an identity registered earlier, e.g. a supporter returning
    /// after elimination
    pub async fn resume_as(&self, player_id: PlayerId) -> Result<Player, SyncError> {
        if let Err(err) = self.refresh().await {
            self.record_poll_failure(&err);
        }
        let mut state = self.state();
        let player = state
            .snapshot
            .as_ref()
            .and_then(|snapshot| snapshot.player(player_id).cloned())
            .unwrap_or_else(|| Player {
                id: player_id,
                name: format!("Player #{player_id}"),
                nickname: String::new(),
                team_id: None,
                is_active: true,
            });
        state.record_registration(player.clone());
        if let Some(server_phase) = state.snapshot.as_ref().map(|snapshot| snapshot.phase()) {
            state.phase = state.phase.observe(server_phase);
        }
        Ok(player)
    }

    /// `selectPartner(playerId, partnerId)` for the registered player
    pub async fn select_partner(&self, partner_id: PlayerId) -> Result<(), SyncError> {
        let player_id = match self
            .registered_player_id()
            .and_then(|me| validate_partner(me, partner_id).map(|_| me))
        {
            Ok(id) => id,
            Err(err) => return Err(self.fail(Action::SelectPartner, err)),
        };

        match self.api.select_partner(player_id, partner_id).await {
            Ok(reply) => {
                self.succeed(reply.message_or("Partner selected!"));
                self.refresh_after_action().await;
                Ok(())
            }
            Err(err) => Err(self.fail(Action::SelectPartner, err)),
        }
    }

    /// `submitVote(playerId, number)`; out-of-range numbers never leave the client
    pub async fn submit_vote(&self, number: i64) -> Result<u32, SyncError> {
        let (player_id, number) = match self
            .registered_player_id()
            .and_then(|id| validate_vote(number).map(|n| (id, n)))
        {
            Ok(checked) => checked,
            Err(err) => return Err(self.fail(Action::SubmitVote, err)),
        };

        match self.api.submit_vote(player_id, number).await {
            Ok(_) => {
                {
                    let mut state = self.state();
                    state.phase = state.phase.on_vote_accepted();
                    state.notices.set_success(format!("Vote submitted: {number}"));
                }
                self.refresh_after_action().await;
                Ok(number)
            }
            Err(err) => Err(self.fail(Action::SubmitVote, err)),
        }
    }

    /// Answers the quiz question for the caller's team; returns whether the
    /// team may now steal a player
    pub async fn submit_quiz_answer(&self, answer: &str) -> Result<bool, SyncError> {
        let (team_id, answer) = match self
            .current_team_id()
            .and_then(|team| validate_text(answer, "an answer").map(|a| (team, a)))
        {
            Ok(checked) => checked,
            Err(err) => return Err(self.fail(Action::QuizAnswer, err)),
        };

        match self.api.submit_quiz_answer(team_id, &answer).await {
            Ok(reply) => {
                let can_steal = reply.payload.can_steal;
                let fallback = if can_steal {
                    "Correct answer! Pick a player to steal."
                } else {
                    "Answer submitted."
                };
                self.succeed(reply.message_or(fallback));
                self.refresh_after_action().await;
                Ok(can_steal)
            }
            Err(err) => Err(self.fail(Action::QuizAnswer, err)),
        }
    }

    /// Moves `target_player_id` into the caller's (winning) team
    pub async fn steal_player(&self, target_player_id: PlayerId) -> Result<(), SyncError> {
        let team_id = match self.current_team_id() {
            Ok(team_id) => team_id,
            Err(err) => return Err(self.fail(Action::StealPlayer, err)),
        };

        match self.api.steal_player(team_id, target_player_id).await {
            Ok(reply) => {
                self.succeed(reply.message_or("Player stolen!"));
                self.refresh_after_action().await;
                Ok(())
            }
            Err(err) => Err(self.fail(Action::StealPlayer, err)),
        }
    }

    pub async fn start_next_round(&self) -> Result<(), SyncError> {
        match self.api.start_next_round().await {
            Ok(reply) => {
                self.succeed(reply.message_or("Next round started!"));
                self.refresh_after_action().await;
                Ok(())
            }
            Err(err) => Err(self.fail(Action::StartNextRound, err)),
        }
    }

    /// Votes of the caller's team in the current round
    pub async fn team_voting_status(&self) -> Result<TeamVotingStatusResponse, SyncError> {
        let team_id = self
            .current_team_id()
            .map_err(|err| self.fail(Action::VotingStatus, err))?;
        self.api
            .team_voting_status(team_id)
            .await
            .map_err(|err| self.fail(Action::VotingStatus, err))
    }

    pub async fn round_voting_status(&self) -> Result<RoundVotingStatus, SyncError> {
        self.api
            .round_voting_status()
            .await
            .map_err(|err| self.fail(Action::VotingStatus, err))
    }
}

#[async_trait]
impl<T: Transport + 'static> Pollable for SyncClient<T> {
    fn label(&self) -> &'static str {
        "game state"
    }

    async fn poll(&self) -> Result<(), SyncError> {
        self.refresh().await.inspect_err(|err| {
            self.state().last_poll_error = Some(err.to_string());
        })
    }
}

pub(crate) fn acquire_state_lock(state: &Arc<Mutex<SessionState>>) -> MutexGuard<'_, SessionState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
