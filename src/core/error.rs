//! Error taxonomy for the sync client

use thiserror::Error;

/// Everything that can go wrong between a user intent and the server's answer
#[derive(Error, Debug)]
pub enum SyncError {
    /// Input rejected locally; no request was sent
    #[error("{0}")]
    Validation(String),

    /// A moderator action was attempted without a held credential
    #[error("Moderator access required")]
    NotAuthenticated,

    /// The request never produced an HTTP response
    #[error("network error: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status
    #[error("HTTP error, status {status}{}", .detail.as_deref().map(|d| format!(": {d}")).unwrap_or_default())]
    Http { status: u16, detail: Option<String> },

    /// The server answered `success: false`
    #[error("{}", .message.as_deref().unwrap_or("request rejected by server"))]
    Rejected { message: Option<String> },

    /// The response body did not have the expected shape
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl SyncError {
    pub fn validation(message: impl Into<String>) -> Self {
        SyncError::Validation(message.into())
    }

    /// True for failures raised before any request was sent
    pub fn is_local(&self) -> bool {
        matches!(self, SyncError::Validation(_) | SyncError::NotAuthenticated)
    }

    /// Text shown to the user for a failed `action`
    ///
    /// Local failures are shown verbatim, transport and HTTP failures get the
    /// action label with the underlying message appended, and server rejections
    /// use the server's message or fall back to the action label.
    pub fn user_message(&self, action: Action) -> String {
        match self {
            SyncError::Validation(message) => message.clone(),
            SyncError::NotAuthenticated => self.to_string(),
            SyncError::Transport(_) | SyncError::Http { .. } | SyncError::Decode(_) => {
                format!("{}: {}", action.failure_label(), self)
            }
            SyncError::Rejected { message } => match message.as_deref() {
                Some(text) if !text.trim().is_empty() => text.to_string(),
                _ => action.failure_label().to_string(),
            },
        }
    }
}

impl From<reqwest::Error> for SyncError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => SyncError::Http { status: status.as_u16(), detail: None },
            None => SyncError::Transport(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for SyncError {
    fn from(err: serde_json::Error) -> Self {
        SyncError::Decode(err.to_string())
    }
}

/// User intents, used to label failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Register,
    RefreshState,
    SelectPartner,
    SubmitVote,
    QuizAnswer,
    StealPlayer,
    StartNextRound,
    VotingStatus,
    LoadTokens,
    SubmitPrediction,
    RejoinGame,
    Authenticate,
    ModeratorStats,
    StartRound,
    PauseGame,
    DrinkBreak,
    ManualTeamChange,
    ResetGame,
    FinalizeVoting,
    LoadSettings,
    ApplyPreset,
    BalanceCheck,
}

impl Action {
    pub fn failure_label(&self) -> &'static str {
        match self {
            Action::Register => "Registration failed",
            Action::RefreshState => "Refreshing game state failed",
            Action::SelectPartner => "Partner selection failed",
            Action::SubmitVote => "Voting failed",
            Action::QuizAnswer => "Submitting the quiz answer failed",
            Action::StealPlayer => "Stealing the player failed",
            Action::StartNextRound => "Starting the next round failed",
            Action::VotingStatus => "Loading voting status failed",
            Action::LoadTokens => "Loading supporter tokens failed",
            Action::SubmitPrediction => "Submitting the prediction failed",
            Action::RejoinGame => "Rejoining the game failed",
            Action::Authenticate => "Invalid secret code",
            Action::ModeratorStats => "Refreshing statistics failed",
            Action::StartRound => "Starting the round failed",
            Action::PauseGame => "Pausing the game failed",
            Action::DrinkBreak => "Announcing the drink break failed",
            Action::ManualTeamChange => "Team change failed",
            Action::ResetGame => "Resetting the game failed",
            Action::FinalizeVoting => "Finalizing the vote failed",
            Action::LoadSettings => "Loading settings failed",
            Action::ApplyPreset => "Applying the preset failed",
            Action::BalanceCheck => "Checking team balance failed",
        }
    }
}
