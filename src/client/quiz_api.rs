//! Typed calls for every endpoint the client uses

use serde::de::DeserializeOwned;
use serde_json::json;

use super::endpoints;
use super::envelope::{decode, Reply};
use super::transport::{ApiRequest, Transport};
use crate::core::SyncError;
use crate::game::{
    Ack, BalanceReport, GameSettingsResponse, GameSnapshot, GameStateResponse,
    ModeratorStatsResponse, PauseResponse, PlayerId, QuizAnswerResponse, RegisterResponse,
    RoundVotingStatus, SettingsPresetsResponse, SupporterTokensResponse, TeamId,
    TeamVotingStatusResponse, TokenId, VotingResult,
};

/// One method per endpoint; no validation, no state
///
/// Input checks live in `game::validation` and are applied by the sessions
/// before these are called.
pub struct QuizApi<T: Transport> {
    transport: T,
}

impl<T: Transport> QuizApi<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn call<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<Reply<R>, SyncError> {
        let raw = self.transport.send(request).await?;
        decode(raw)
    }

    pub async fn register(&self, name: &str) -> Result<Reply<RegisterResponse>, SyncError> {
        self.call(ApiRequest::post_json(endpoints::REGISTER, json!({ "name": name })))
            .await
    }

    pub async fn game_state(&self) -> Result<GameSnapshot, SyncError> {
        let reply: Reply<GameStateResponse> = self.call(ApiRequest::get(endpoints::GAME_STATE)).await?;
        Ok(GameSnapshot::from_response(reply.payload))
    }

    pub async fn select_partner(
        &self,
        player_id: PlayerId,
        partner_id: PlayerId,
    ) -> Result<Reply<Ack>, SyncError> {
        let body = json!({ "player_id": player_id, "partner_id": partner_id });
        self.call(ApiRequest::post_json(endpoints::SELECT_PARTNER, body)).await
    }

    pub async fn submit_vote(&self, player_id: PlayerId, number: u32) -> Result<Reply<Ack>, SyncError> {
        let body = json!({ "player_id": player_id, "number": number });
        self.call(ApiRequest::post_json(endpoints::SUBMIT_VOTE, body)).await
    }

    pub async fn submit_quiz_answer(
        &self,
        team_id: TeamId,
        answer: &str,
    ) -> Result<Reply<QuizAnswerResponse>, SyncError> {
        let body = json!({ "team_id": team_id, "answer": answer });
        self.call(ApiRequest::post_json(endpoints::QUIZ_ANSWER, body)).await
    }

    pub async fn steal_player(
        &self,
        winner_team_id: TeamId,
        target_player_id: PlayerId,
    ) -> Result<Reply<Ack>, SyncError> {
        let body = json!({ "winner_team_id": winner_team_id, "target_player_id": target_player_id });
        self.call(ApiRequest::post_json(endpoints::STEAL_PLAYER, body)).await
    }

    pub async fn start_next_round(&self) -> Result<Reply<Ack>, SyncError> {
        self.call(ApiRequest::post(endpoints::START_ROUND)).await
    }

    pub async fn team_voting_status(
        &self,
        team_id: TeamId,
    ) -> Result<TeamVotingStatusResponse, SyncError> {
        let reply = self
            .call(ApiRequest::get(endpoints::team_voting_status(team_id)))
            .await?;
        Ok(reply.payload)
    }

    pub async fn round_voting_status(&self) -> Result<RoundVotingStatus, SyncError> {
        let reply = self.call(ApiRequest::get(endpoints::ROUND_VOTING_STATUS)).await?;
        Ok(reply.payload)
    }

    pub async fn finalize_voting(&self) -> Result<Reply<VotingResult>, SyncError> {
        self.call(ApiRequest::post(endpoints::FINALIZE_VOTING)).await
    }

    pub async fn supporter_tokens(&self) -> Result<SupporterTokensResponse, SyncError> {
        let reply = self.call(ApiRequest::get(endpoints::SUPPORTER_TOKENS)).await?;
        Ok(reply.payload)
    }

    pub async fn submit_prediction(
        &self,
        player_id: PlayerId,
        number: u32,
        team_id: TeamId,
    ) -> Result<Reply<Ack>, SyncError> {
        let body = json!({
            "player_id": player_id,
            "predicted_number": number,
            "predicted_team_id": team_id,
        });
        self.call(ApiRequest::post_json(endpoints::SUPPORTER_PREDICT, body)).await
    }

    pub async fn rejoin_game(&self, token_id: TokenId) -> Result<Reply<Ack>, SyncError> {
        let body = json!({ "token_id": token_id });
        self.call(ApiRequest::post_json(endpoints::SUPPORTER_REJOIN, body)).await
    }

    pub async fn authenticate_moderator(&self, secret_code: &str) -> Result<Reply<Ack>, SyncError> {
        let body = json!({ "secret_code": secret_code });
        self.call(ApiRequest::post_json(endpoints::MODERATOR_AUTHENTICATE, body)).await
    }

    pub async fn moderator_stats(&self) -> Result<ModeratorStatsResponse, SyncError> {
        let reply = self.call(ApiRequest::get(endpoints::MODERATOR_STATS)).await?;
        Ok(reply.payload)
    }

    pub async fn moderator_start_round(&self, secret_code: &str) -> Result<Reply<Ack>, SyncError> {
        let body = json!({ "secret_code": secret_code });
        self.call(ApiRequest::post_json(endpoints::MODERATOR_START_ROUND, body)).await
    }

    pub async fn pause_game(&self, secret_code: &str) -> Result<Reply<PauseResponse>, SyncError> {
        let body = json!({ "secret_code": secret_code });
        self.call(ApiRequest::post_json(endpoints::MODERATOR_PAUSE, body)).await
    }

    pub async fn announce_drink_break(
        &self,
        secret_code: &str,
        message: &str,
    ) -> Result<Reply<Ack>, SyncError> {
        let body = json!({ "secret_code": secret_code, "message": message });
        self.call(ApiRequest::post_json(endpoints::MODERATOR_DRINK_BREAK, body)).await
    }

    pub async fn manual_team_change(
        &self,
        secret_code: &str,
        player_id: PlayerId,
        target_team_id: TeamId,
    ) -> Result<Reply<Ack>, SyncError> {
        let body = json!({
            "secret_code": secret_code,
            "player_id": player_id,
            "target_team_id": target_team_id,
        });
        self.call(ApiRequest::post_json(endpoints::MODERATOR_TEAM_CHANGE, body)).await
    }

    pub async fn reset_game(&self, secret_code: &str) -> Result<Reply<Ack>, SyncError> {
        let body = json!({ "secret_code": secret_code });
        self.call(ApiRequest::post_json(endpoints::MODERATOR_RESET, body)).await
    }

    pub async fn game_settings(&self) -> Result<GameSettingsResponse, SyncError> {
        let reply = self.call(ApiRequest::get(endpoints::SETTINGS)).await?;
        Ok(reply.payload)
    }

    pub async fn settings_presets(&self) -> Result<SettingsPresetsResponse, SyncError> {
        let reply = self.call(ApiRequest::get(endpoints::SETTINGS_PRESETS)).await?;
        Ok(reply.payload)
    }

    pub async fn apply_preset(
        &self,
        secret_code: &str,
        preset_name: &str,
    ) -> Result<Reply<GameSettingsResponse>, SyncError> {
        let body = json!({ "secret_code": secret_code, "preset_name": preset_name });
        self.call(ApiRequest::post_json(endpoints::SETTINGS_APPLY_PRESET, body)).await
    }

    pub async fn balance_check(&self) -> Result<BalanceReport, SyncError> {
        let reply = self.call(ApiRequest::get(endpoints::BALANCE_CHECK)).await?;
        Ok(reply.payload)
    }
}
