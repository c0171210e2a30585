//! Plain-text rendering of session state for the terminal views
//!
//! Everything here is a pure function of the state it is handed, so views can
//! lock the session, render, and release the lock before printing.

use crate::core::{Notices, TEAM_TREE_INDENT};
use crate::game::{
    GameSnapshot, Phase, PlayerId, PredictionOutcome, RoundVotingStatus, SupporterToken, Team,
    TeamVotingStatus, TeamVotingStatusResponse,
};
use crate::session::{ModeratorState, SessionState};
use crate::utils::truncate;

const NAME_COLUMN_WIDTH: usize = 24;
const RECENT_ACTIONS_SHOWN: usize = 5;

fn tree_char(index: usize, len: usize) -> &'static str {
    if index + 1 == len {
        "└─"
    } else {
        "├─"
    }
}

/// Visible error and success messages
pub fn render_notices(notices: &Notices) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(error) = notices.error() {
        lines.push(format!("❌ {error}"));
    }
    if let Some(success) = notices.success() {
        lines.push(format!("✅ {success}"));
    }
    lines
}

/// Round, phase and pause line followed by the poll health warning
pub fn render_header(snapshot: Option<&GameSnapshot>, phase: Phase, poll_error: Option<&str>) -> Vec<String> {
    let mut lines = Vec::new();
    match snapshot {
        Some(snapshot) => {
            let mut header = format!(
                "💍 Round {} • {} • server: {}",
                snapshot.game.current_round,
                phase.label(),
                snapshot.phase().label()
            );
            if snapshot.game.is_paused {
                header.push_str(" • ⏸ paused");
            }
            lines.push(header);
        }
        None => lines.push(format!("💍 {} • waiting for game state...", phase.label())),
    }
    if let Some(err) = poll_error {
        lines.push(format!("⚠️  Connection problem, retrying: {err}"));
    }
    lines
}

/// One team heading plus its members as a tree; `me` is marked
pub fn render_team(team: &Team, me: Option<PlayerId>) -> Vec<String> {
    let mut lines = Vec::new();
    let status = if team.is_active { "" } else { " (eliminated)" };
    lines.push(format!(
        "{TEAM_TREE_INDENT}[{}] {} • score {}{status}",
        team.id, team.name, team.score
    ));
    for (i, member) in team.members.iter().enumerate() {
        let marker = if Some(member.id) == me { " ← you" } else { "" };
        lines.push(format!(
            "{TEAM_TREE_INDENT}{} [{}] {}{marker}",
            tree_char(i, team.members.len()),
            member.id,
            truncate(&member.display_name(), NAME_COLUMN_WIDTH)
        ));
    }
    lines
}

pub fn render_teams(snapshot: &GameSnapshot, me: Option<PlayerId>) -> Vec<String> {
    if snapshot.teams().is_empty() {
        return vec![format!("{TEAM_TREE_INDENT}No teams yet.")];
    }
    let mut lines = vec!["🏆 Teams".to_string()];
    for team in snapshot.teams() {
        lines.extend(render_team(team, me));
    }
    lines
}

/// Highest-scoring active team, if any team is left
pub fn leading_team(snapshot: &GameSnapshot) -> Option<&Team> {
    snapshot.active_teams().max_by_key(|team| team.score)
}

/// The player screen for the current phase
pub fn render_player_view(state: &SessionState) -> String {
    let mut lines = render_header(
        state.snapshot.as_ref(),
        state.phase,
        state.last_poll_error.as_deref(),
    );
    let me = state.current_player();

    match (state.phase, state.snapshot.as_ref()) {
        (Phase::Registration, _) => {
            lines.push("Welcome to the wedding quiz! Enter your name to register.".to_string());
        }
        (_, None) => {}
        (Phase::Pairing, Some(snapshot)) => {
            let team = me.and_then(|player| player.team_id).and_then(|id| snapshot.team(id));
            match (me, team) {
                (Some(_), Some(team)) => {
                    lines.push(format!("You are in {}. Waiting for the game to start...", team.name));
                }
                (Some(player), None) => {
                    let candidates = snapshot.partner_candidates(player.id);
                    if candidates.is_empty() {
                        lines.push("Waiting for other players to register...".to_string());
                    } else {
                        lines.push("Pick a partner with: partner <id>".to_string());
                        for (i, candidate) in candidates.iter().enumerate() {
                            lines.push(format!(
                                "{TEAM_TREE_INDENT}{} [{}] {}",
                                tree_char(i, candidates.len()),
                                candidate.id,
                                candidate.display_name()
                            ));
                        }
                    }
                }
                (None, _) => {}
            }
            lines.extend(render_teams(snapshot, me.map(|player| player.id)));
        }
        (Phase::Playing, Some(snapshot)) => {
            lines.extend(render_teams(snapshot, me.map(|player| player.id)));
            lines.push("Vote with: vote <1-25>".to_string());
        }
        (Phase::Quiz, Some(snapshot)) => {
            lines.push("🎤 Quiz time! Watch the host.".to_string());
            lines.extend(render_teams(snapshot, me.map(|player| player.id)));
        }
        (Phase::Finished, Some(snapshot)) => {
            lines.push("🎉 Game over!".to_string());
            if let Some(winner) = leading_team(snapshot) {
                lines.push(format!("Winner: {} with {} points", winner.name, winner.score));
            }
            lines.extend(render_teams(snapshot, me.map(|player| player.id)));
        }
    }

    if let Some(player) = me {
        lines.push(format!("You: {}", player.display_name()));
    }
    lines.extend(render_notices(&state.notices));
    lines.join("\n")
}

/// Summary of a supporter token and what can be done with it
pub fn render_token(token: Option<&SupporterToken>) -> Vec<String> {
    let Some(token) = token else {
        return vec!["You have no supporter token yet.".to_string()];
    };
    let mut lines = vec![format!("🎟️  Supporter token for round {}", token.round_number)];
    if let (Some(number), Some(team_id)) = (token.predicted_number, token.predicted_team_id) {
        let team = token
            .predicted_team
            .as_ref()
            .map(|team| team.name.clone())
            .unwrap_or_else(|| format!("team #{team_id}"));
        lines.push(format!("Your prediction: {number} for {team}"));
    }
    match token.outcome() {
        PredictionOutcome::Unset if !token.has_prediction() => {
            lines.push("Predict with: predict <1-100> <team id>".to_string());
        }
        PredictionOutcome::Unset => lines.push("Waiting for the round result...".to_string()),
        PredictionOutcome::Correct if token.can_rejoin() => {
            lines.push("🎉 Correct! Type 'rejoin' to get back into the game.".to_string());
        }
        PredictionOutcome::Correct => lines.push("🎉 Correct prediction.".to_string()),
        PredictionOutcome::Incorrect => lines.push("Not this time. Keep cheering!".to_string()),
    }
    lines
}

/// The supporter screen: game overview plus the caller's token
pub fn render_supporter_view(state: &SessionState) -> String {
    let mut lines = render_header(
        state.snapshot.as_ref(),
        state.phase,
        state.last_poll_error.as_deref(),
    );
    if let Some(snapshot) = state.snapshot.as_ref() {
        lines.extend(render_teams(snapshot, None));
    }
    lines.extend(render_token(state.player_token()));
    if let Some(player) = state.current_player() {
        lines.push(format!("You: {}", player.display_name()));
    }
    lines.extend(render_notices(&state.notices));
    lines.join("\n")
}

/// The moderator control panel
pub fn render_moderator_view(state: &SessionState, moderator: &ModeratorState) -> String {
    let mut lines = render_header(
        state.snapshot.as_ref(),
        state.phase,
        state.last_poll_error.as_deref(),
    );

    if let Some(stats) = &moderator.stats {
        lines.push(format!(
            "📊 {} players • {} active teams • round {} • {} supporter tokens",
            stats.total_players, stats.active_teams, stats.current_round, stats.active_tokens
        ));
    }
    if let Some(snapshot) = state.snapshot.as_ref() {
        lines.extend(render_teams(snapshot, None));
    }

    let recent: Vec<_> = moderator.recent_actions.iter().take(RECENT_ACTIONS_SHOWN).collect();
    if !recent.is_empty() {
        lines.push("📝 Recent actions".to_string());
        for (i, entry) in recent.iter().enumerate() {
            let when = entry
                .created_at
                .map(|at| at.format("%H:%M:%S").to_string())
                .unwrap_or_default();
            lines.push(format!(
                "{TEAM_TREE_INDENT}{} {:8} {:20} {}",
                tree_char(i, recent.len()),
                when,
                entry.action_type,
                entry.description.as_deref().unwrap_or("")
            ));
        }
    }

    if let Some(settings) = &moderator.settings {
        lines.push(format!(
            "⚙️  Voting {}s • numbers 1-{} • sprint {} • protection {} • rescue {}",
            settings.effective_voting_duration.unwrap_or(settings.voting_duration_seconds),
            settings.number_range_max,
            on_off(settings.is_sprint_mode),
            on_off(settings.protection_enabled),
            on_off(settings.rescue_round_enabled)
        ));
    }
    if !moderator.presets.is_empty() {
        lines.push("Presets:".to_string());
        for (i, (key, preset)) in moderator.presets.iter().enumerate() {
            lines.push(format!(
                "{TEAM_TREE_INDENT}{} {:12} {}",
                tree_char(i, moderator.presets.len()),
                key,
                preset.description
            ));
        }
    }
    if let Some(result) = &moderator.last_result {
        let line = match (result.is_tie, result.winner_team_id, result.winning_number) {
            (true, _, _) => "🗳️  Last vote: tie".to_string(),
            (false, Some(team), Some(number)) => format!("🗳️  Last vote: team #{team} won with {number}"),
            _ => "🗳️  Last vote: no winner".to_string(),
        };
        lines.push(line);
    }
    if let Some(balance) = &moderator.balance {
        lines.push(format!(
            "⚖️  Team sizes {:?} • difference {} • rebalance {} • snowball risk {}",
            balance.team_sizes,
            balance.size_difference,
            yes_no(balance.needs_balance),
            yes_no(balance.snowball_risk)
        ));
    }

    lines.extend(render_notices(&state.notices));
    lines.join("\n")
}

/// Read-only overview used by the watch view
pub fn render_watch_view(state: &SessionState) -> String {
    let mut lines = render_header(
        state.snapshot.as_ref(),
        state.phase,
        state.last_poll_error.as_deref(),
    );
    if let Some(snapshot) = state.snapshot.as_ref() {
        lines.push(format!("{} players registered", snapshot.players.len()));
        lines.extend(render_teams(snapshot, None));
    }
    lines.join("\n")
}

/// Player and team ids for the moderator's `move` command
pub fn render_move_targets(snapshot: &GameSnapshot) -> String {
    let members = snapshot.members_with_team();
    if members.is_empty() {
        return "No players in teams yet.".to_string();
    }
    let mut lines = vec!["Players (id • team):".to_string()];
    for (i, (player, team_name)) in members.iter().enumerate() {
        lines.push(format!(
            "{TEAM_TREE_INDENT}{} #{:<4} {:width$} {team_name} (#{})",
            tree_char(i, members.len()),
            player.id,
            truncate(&player.name, NAME_COLUMN_WIDTH),
            player.team_id.map(|id| id.to_string()).unwrap_or_default(),
            width = NAME_COLUMN_WIDTH
        ));
    }
    lines.join("\n")
}

fn render_team_votes(status: &TeamVotingStatus) -> Vec<String> {
    let mut lines = vec![format!(
        "{TEAM_TREE_INDENT}{} • {}/{} voted{}",
        status.team_name,
        status.votes_count,
        status.total_members,
        if status.is_unanimous { " • unanimous" } else { "" }
    )];
    for (i, vote) in status.member_votes.iter().enumerate() {
        let number = vote
            .number
            .map(|n| n.to_string())
            .unwrap_or_else(|| "…".to_string());
        lines.push(format!(
            "{TEAM_TREE_INDENT}{} {:width$} {number}",
            tree_char(i, status.member_votes.len()),
            truncate(&vote.player_name, NAME_COLUMN_WIDTH),
            width = NAME_COLUMN_WIDTH
        ));
    }
    lines
}

pub fn render_team_voting_status(response: &TeamVotingStatusResponse) -> String {
    let mut lines = vec![format!(
        "🗳️  Round {} • voting {}",
        response.round_info.round_number,
        if response.round_info.is_voting_active { "open" } else { "closed" }
    )];
    match response.team_status.as_ref() {
        Some(team) => lines.extend(render_team_votes(team)),
        None => lines.push(format!("{TEAM_TREE_INDENT}No votes for your team this round.")),
    }
    lines.join("\n")
}

pub fn render_round_voting_status(status: &RoundVotingStatus) -> String {
    let mut lines = vec![format!(
        "🗳️  Round {} • voting {} • {:.0}s left",
        status.round_info.round_number,
        if status.round_info.is_voting_active { "open" } else { "closed" },
        status.round_info.time_remaining
    )];
    for team in status.teams_status.values().flatten() {
        lines.extend(render_team_votes(team));
    }
    lines.join("\n")
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Game, GamePhase, Player};

    fn player(id: PlayerId, name: &str, team_id: Option<u64>) -> Player {
        Player {
            id,
            name: name.to_string(),
            nickname: String::new(),
            team_id,
            is_active: true,
        }
    }

    fn snapshot(state: GamePhase, teams: Vec<Team>, loose: Vec<Player>) -> GameSnapshot {
        let mut players: Vec<Player> = teams.iter().flat_map(|t| t.members.clone()).collect();
        players.extend(loose);
        GameSnapshot {
            game: Game { id: 1, name: "Wedding".into(), state, current_round: 2, is_paused: false, teams },
            players,
        }
    }

    fn team(id: u64, name: &str, score: i64, members: Vec<Player>) -> Team {
        Team {
            id,
            name: name.to_string(),
            score,
            is_active: true,
            member_count: members.len(),
            members,
        }
    }

    #[test]
    fn test_move_targets_list_every_member_with_team() {
        let roses = team(1, "Roses", 3, vec![player(1, "Anna", Some(1)), player(2, "Ben", Some(1))]);
        let tulips = team(2, "Tulips", 0, vec![player(3, "Cili", Some(2))]);
        let rendered = render_move_targets(&snapshot(GamePhase::Playing, vec![roses, tulips], vec![]));

        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].contains("#1") && lines[1].contains("Roses (#1)"));
        assert!(lines[3].contains("└─") && lines[3].contains("Tulips (#2)"));

        let empty = render_move_targets(&snapshot(GamePhase::Pairing, vec![], vec![player(4, "Dani", None)]));
        assert_eq!(empty, "No players in teams yet.");
    }

    #[test]
    fn test_missing_team_status_renders_a_note() {
        let response = TeamVotingStatusResponse {
            team_status: None,
            round_info: crate::game::RoundInfo { round_number: 3, is_voting_active: true, time_remaining: 8.0 },
        };
        let rendered = render_team_voting_status(&response);
        assert!(rendered.contains("Round 3"));
        assert!(rendered.contains("No votes for your team this round."));
    }

    #[test]
    fn test_team_tree_marks_last_member() {
        let lines = render_team(
            &team(1, "Roses", 3, vec![player(1, "Anna", Some(1)), player(2, "Ben", Some(1))]),
            Some(2),
        );
        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("├─ [1] Anna"));
        assert!(lines[2].contains("└─ [2] Ben ← you"));
    }

    #[tokio::test]
    async fn test_pairing_view_lists_candidates_without_me() {
        let mut state = SessionState::new();
        state.record_registration(player(1, "Anna", None));
        state.replace_snapshot(snapshot(
            GamePhase::Pairing,
            vec![],
            vec![player(1, "Anna", None), player(2, "Ben", None)],
        ));

        let view = render_player_view(&state);
        assert!(view.contains("partner <id>"));
        assert!(view.contains("[2] Ben"));
        assert!(!view.contains("[1] Anna"));
    }

    #[tokio::test]
    async fn test_finished_view_names_winner() {
        let mut state = SessionState::new();
        state.record_registration(player(1, "Anna", Some(1)));
        state.replace_snapshot(snapshot(
            GamePhase::Finished,
            vec![
                team(1, "Roses", 3, vec![player(1, "Anna", Some(1))]),
                team(2, "Tulips", 7, vec![player(2, "Ben", Some(2))]),
            ],
            vec![],
        ));

        let view = render_player_view(&state);
        assert!(view.contains("Game over"));
        assert!(view.contains("Winner: Tulips with 7 points"));
    }

    #[tokio::test]
    async fn test_notices_are_rendered() {
        let mut state = SessionState::new();
        state.notices.set_error("Enter your name!");
        let view = render_player_view(&state);
        assert!(view.contains("❌ Enter your name!"));
    }

    #[test]
    fn test_token_without_prediction_prompts_for_one() {
        let token = SupporterToken {
            id: 4,
            player_id: 1,
            round_number: 2,
            is_active: true,
            predicted_number: None,
            predicted_team_id: None,
            is_prediction_correct: None,
            used_at: None,
            predicted_team: None,
        };
        let lines = render_token(Some(&token));
        assert!(lines.iter().any(|line| line.contains("predict <1-100>")));
        assert_eq!(render_token(None), vec!["You have no supporter token yet.".to_string()]);
    }
}
