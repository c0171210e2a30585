//! Read-only mirrors of server-owned game entities
//!
//! Every type here is deserialized from server responses and replaced
//! wholesale on refresh. Unknown fields are ignored and optional fields
//! default, so the client keeps working when the server adds data.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type PlayerId = u64;
pub type TeamId = u64;
pub type TokenId = u64;

/// A registered participant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Server-assigned nickname
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub team_id: Option<TeamId>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Player {
    pub fn is_unpaired(&self) -> bool {
        self.team_id.is_none()
    }

    /// "Name (nickname)", or just the name when no nickname was assigned
    pub fn display_name(&self) -> String {
        if self.nickname.is_empty() {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, self.nickname)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    #[serde(default)]
    pub score: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub member_count: usize,
    /// Active members in server order
    #[serde(default)]
    pub members: Vec<Player>,
}

/// Coarse game state as reported by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    #[default]
    Registration,
    Pairing,
    Playing,
    Quiz,
    Finished,
    #[serde(other)]
    Unknown,
}

impl GamePhase {
    pub fn label(&self) -> &'static str {
        match self {
            GamePhase::Registration => "registration",
            GamePhase::Pairing => "pairing",
            GamePhase::Playing => "playing",
            GamePhase::Quiz => "quiz",
            GamePhase::Finished => "finished",
            GamePhase::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub state: GamePhase,
    #[serde(default)]
    pub current_round: u32,
    #[serde(default)]
    pub is_paused: bool,
    /// Active teams only
    #[serde(default)]
    pub teams: Vec<Team>,
}

/// Body of `GET /game/state`
#[derive(Debug, Clone, Deserialize)]
pub struct GameStateResponse {
    pub game: Game,
    #[serde(default)]
    pub players: Option<Vec<Player>>,
}

/// The polled aggregate of players, teams and phase metadata
///
/// Built once per successful poll and never patched afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub game: Game,
    pub players: Vec<Player>,
}

impl GameSnapshot {
    /// Builds a snapshot, deriving the player list from team members when the
    /// server did not send one
    pub fn from_response(response: GameStateResponse) -> Self {
        let players = match response.players {
            Some(players) => players,
            None => response
                .game
                .teams
                .iter()
                .flat_map(|team| team.members.iter().cloned())
                .collect(),
        };
        Self { game: response.game, players }
    }

    pub fn phase(&self) -> GamePhase {
        self.game.state
    }

    pub fn teams(&self) -> &[Team] {
        &self.game.teams
    }

    pub fn active_teams(&self) -> impl Iterator<Item = &Team> {
        self.game.teams.iter().filter(|team| team.is_active)
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|player| player.id == id)
    }

    pub fn team(&self, id: TeamId) -> Option<&Team> {
        self.game.teams.iter().find(|team| team.id == id)
    }

    /// Players other than `me` who have no team yet
    pub fn partner_candidates(&self, me: PlayerId) -> Vec<&Player> {
        self.players
            .iter()
            .filter(|player| player.id != me && player.is_unpaired())
            .collect()
    }

    /// Every team member, paired with the team's name, for moderator team changes
    pub fn members_with_team(&self) -> Vec<(&Player, &str)> {
        self.game
            .teams
            .iter()
            .flat_map(|team| team.members.iter().map(move |m| (m, team.name.as_str())))
            .collect()
    }
}

/// Correctness of a supporter's prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictionOutcome {
    Unset,
    Correct,
    Incorrect,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupporterToken {
    pub id: TokenId,
    pub player_id: PlayerId,
    #[serde(default)]
    pub round_number: u32,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub predicted_number: Option<u32>,
    #[serde(default)]
    pub predicted_team_id: Option<TeamId>,
    #[serde(default)]
    pub is_prediction_correct: Option<bool>,
    #[serde(default)]
    pub used_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub predicted_team: Option<Team>,
}

impl SupporterToken {
    pub fn outcome(&self) -> PredictionOutcome {
        match self.is_prediction_correct {
            None => PredictionOutcome::Unset,
            Some(true) => PredictionOutcome::Correct,
            Some(false) => PredictionOutcome::Incorrect,
        }
    }

    pub fn has_prediction(&self) -> bool {
        self.predicted_number.is_some() && self.predicted_team_id.is_some()
    }

    pub fn can_rejoin(&self) -> bool {
        self.is_active && self.outcome() == PredictionOutcome::Correct && self.used_at.is_none()
    }
}

/// Body of `GET /supporter/tokens`
#[derive(Debug, Clone, Deserialize)]
pub struct SupporterTokensResponse {
    #[serde(default)]
    pub tokens: Vec<SupporterToken>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ModeratorStats {
    #[serde(default)]
    pub total_players: u32,
    #[serde(default)]
    pub active_teams: u32,
    #[serde(default)]
    pub current_round: u32,
    #[serde(default)]
    pub game_state: GamePhase,
    #[serde(default)]
    pub is_paused: bool,
    #[serde(default)]
    pub active_tokens: u32,
}

/// One entry of the moderator action log
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ModeratorActionEntry {
    #[serde(rename = "type")]
    pub action_type: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

/// Body of `GET /moderator/stats`
#[derive(Debug, Clone, Deserialize)]
pub struct ModeratorStatsResponse {
    pub stats: ModeratorStats,
    #[serde(default)]
    pub recent_actions: Vec<ModeratorActionEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MemberVote {
    pub player_id: PlayerId,
    pub player_name: String,
    #[serde(default)]
    pub number: Option<u32>,
    #[serde(default)]
    pub voted_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TeamVotingStatus {
    pub team_id: TeamId,
    pub team_name: String,
    #[serde(default)]
    pub member_votes: Vec<MemberVote>,
    #[serde(default)]
    pub is_unanimous: bool,
    #[serde(default)]
    pub smallest_number: Option<u32>,
    #[serde(default)]
    pub final_number: Option<u32>,
    #[serde(default)]
    pub votes_count: usize,
    #[serde(default)]
    pub total_members: usize,
}

impl TeamVotingStatus {
    pub fn everyone_voted(&self) -> bool {
        self.total_members > 0 && self.votes_count >= self.total_members
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RoundInfo {
    pub round_number: u32,
    #[serde(default)]
    pub is_voting_active: bool,
    #[serde(default)]
    pub time_remaining: f64,
}

/// Body of `GET /vote/team-status/{teamId}`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TeamVotingStatusResponse {
    /// `null` when the server has no round for the team
    #[serde(default)]
    pub team_status: Option<TeamVotingStatus>,
    pub round_info: RoundInfo,
}

/// Body of `GET /vote/round-status`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RoundVotingStatus {
    pub round_info: RoundInfo,
    /// Keyed by team id as sent over the wire; a team without a round is `null`
    #[serde(default)]
    pub teams_status: BTreeMap<String, Option<TeamVotingStatus>>,
}

/// Body of `POST /vote/finalize`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VotingResult {
    #[serde(default)]
    pub winner_team_id: Option<TeamId>,
    #[serde(default)]
    pub winning_number: Option<u32>,
    #[serde(default)]
    pub is_tie: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GameSettings {
    pub voting_duration_seconds: u32,
    #[serde(default)]
    pub is_sprint_mode: bool,
    #[serde(default)]
    pub protection_enabled: bool,
    #[serde(default)]
    pub rescue_round_enabled: bool,
    pub number_range_max: u32,
    #[serde(default)]
    pub effective_voting_duration: Option<u32>,
}

/// Body of `GET /settings/get` and `POST /settings/apply-preset`
#[derive(Debug, Clone, Deserialize)]
pub struct GameSettingsResponse {
    pub settings: GameSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SettingsPreset {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub voting_duration_seconds: u32,
    #[serde(default)]
    pub is_sprint_mode: bool,
    #[serde(default)]
    pub protection_enabled: bool,
    #[serde(default)]
    pub rescue_round_enabled: bool,
    pub number_range_max: u32,
}

/// Body of `GET /settings/presets`, keyed by preset id
#[derive(Debug, Clone, Deserialize)]
pub struct SettingsPresetsResponse {
    #[serde(default)]
    pub presets: BTreeMap<String, SettingsPreset>,
}

/// Body of `GET /balance/check`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BalanceReport {
    #[serde(default)]
    pub needs_balance: bool,
    #[serde(default)]
    pub snowball_risk: bool,
    #[serde(default)]
    pub smallest_team: Option<Team>,
    #[serde(default)]
    pub team_sizes: Vec<usize>,
    #[serde(default)]
    pub size_difference: usize,
}

/// Body of `POST /register`
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterResponse {
    pub player: Player,
}

/// Body of `POST /moderator/pause-game`
#[derive(Debug, Clone, Deserialize)]
pub struct PauseResponse {
    #[serde(default)]
    pub is_paused: bool,
}

/// Body of `POST /quiz-answer`
#[derive(Debug, Clone, Deserialize)]
pub struct QuizAnswerResponse {
    #[serde(default)]
    pub can_steal: bool,
}

/// Response with nothing beyond the envelope
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Ack {}

fn default_true() -> bool {
    true
}
