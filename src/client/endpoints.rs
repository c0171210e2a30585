//! Endpoint paths relative to the API base URL

pub const REGISTER: &str = "/register";
pub const GAME_STATE: &str = "/game/state";
pub const SELECT_PARTNER: &str = "/select-partner";
pub const SUBMIT_VOTE: &str = "/vote/submit";
pub const QUIZ_ANSWER: &str = "/quiz-answer";
pub const STEAL_PLAYER: &str = "/steal-player";
pub const START_ROUND: &str = "/start-round";
pub const ROUND_VOTING_STATUS: &str = "/vote/round-status";
pub const FINALIZE_VOTING: &str = "/vote/finalize";

pub const SUPPORTER_TOKENS: &str = "/supporter/tokens";
pub const SUPPORTER_PREDICT: &str = "/supporter/predict";
pub const SUPPORTER_REJOIN: &str = "/supporter/rejoin";

pub const MODERATOR_AUTHENTICATE: &str = "/moderator/authenticate";
pub const MODERATOR_STATS: &str = "/moderator/stats";
pub const MODERATOR_START_ROUND: &str = "/moderator/start-round";
pub const MODERATOR_PAUSE: &str = "/moderator/pause-game";
pub const MODERATOR_DRINK_BREAK: &str = "/moderator/drink-break";
pub const MODERATOR_TEAM_CHANGE: &str = "/moderator/manual-team-change";
pub const MODERATOR_RESET: &str = "/moderator/reset-game";

pub const SETTINGS: &str = "/settings/get";
pub const SETTINGS_PRESETS: &str = "/settings/presets";
pub const SETTINGS_APPLY_PRESET: &str = "/settings/apply-preset";
pub const BALANCE_CHECK: &str = "/balance/check";

pub fn team_voting_status(team_id: u64) -> String {
    format!("/vote/team-status/{team_id}")
}
