//! Local input validation
//!
//! Every check here runs before a request is built; a failure means nothing is
//! sent over the network.

use std::ops::RangeInclusive;

use crate::core::{SyncError, PREDICTION_RANGE, VOTE_RANGE};

use super::model::{PlayerId, TeamId};

/// Trimmed, non-empty display name
pub fn validate_name(name: &str) -> Result<String, SyncError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(SyncError::validation("Enter your name!"));
    }
    Ok(trimmed.to_string())
}

pub fn validate_vote(number: i64) -> Result<u32, SyncError> {
    in_range(number, &VOTE_RANGE)
}

pub fn validate_prediction(number: i64) -> Result<u32, SyncError> {
    in_range(number, &PREDICTION_RANGE)
}

/// A prediction needs both a number and a team
pub fn validate_prediction_choice(
    number: Option<i64>,
    team_id: Option<TeamId>,
) -> Result<(u32, TeamId), SyncError> {
    match (number, team_id) {
        (Some(number), Some(team_id)) => Ok((validate_prediction(number)?, team_id)),
        _ => Err(SyncError::validation("Choose a number and a team!")),
    }
}

pub fn validate_partner(me: PlayerId, partner: PlayerId) -> Result<(), SyncError> {
    if me == partner {
        return Err(SyncError::validation("You cannot pair with yourself."));
    }
    Ok(())
}

/// A manual team change needs both a player and a target team
pub fn validate_team_change(
    player_id: Option<PlayerId>,
    team_id: Option<TeamId>,
) -> Result<(PlayerId, TeamId), SyncError> {
    match (player_id, team_id) {
        (Some(player_id), Some(team_id)) => Ok((player_id, team_id)),
        _ => Err(SyncError::validation("Choose a player and a team!")),
    }
}

pub fn validate_secret_code(code: &str) -> Result<String, SyncError> {
    let trimmed = code.trim();
    if trimmed.is_empty() {
        return Err(SyncError::validation("Enter the moderator code!"));
    }
    Ok(trimmed.to_string())
}

/// Non-empty free text such as a quiz answer or drink break announcement
pub fn validate_text(text: &str, what: &str) -> Result<String, SyncError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(SyncError::validation(format!("Enter {what}!")));
    }
    Ok(trimmed.to_string())
}

fn in_range(number: i64, range: &RangeInclusive<i64>) -> Result<u32, SyncError> {
    if !range.contains(&number) {
        return Err(out_of_range(range));
    }
    u32::try_from(number).map_err(|_| out_of_range(range))
}

fn out_of_range(range: &RangeInclusive<i64>) -> SyncError {
    SyncError::validation(format!(
        "Enter a number between {} and {}!",
        range.start(),
        range.end()
    ))
}
