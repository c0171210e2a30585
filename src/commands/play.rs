//! Player view: registration, pairing and voting
//!
//! The game state poller runs in the background for the whole session while
//! the player types commands. The screen is redrawn after every command; an
//! empty line redraws with the latest polled state.

use anyhow::Result;
use std::sync::Arc;

use super::input::{create_spinner_style, id_arg, number_arg, split_command, with_spinner, InputLines};
use super::render::{render_player_view, render_round_voting_status, render_team_voting_status};
use crate::client::Transport;
use crate::core::{ClientConfig, VOTE_RANGE};
use crate::game::{Phase, PlayerId};
use crate::session::{Poller, SyncClient};
use crate::utils::{set_terminal_title, set_terminal_title_and_flush};

const PLAY_HELP: &str = "\
Commands:
   partner <id>     pick your partner (pairing)
   vote <1-25>      vote for your team's number (playing)
   answer <text>    answer the quiz question for your team
   steal <id>       steal a player after a correct answer
   next             start the next round
   status           your team's votes this round
   round            every team's votes this round
   <enter>          redraw
   quit             leave";

/// A line typed in the player view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayInput {
    Register(String),
    Partner(PlayerId),
    Vote(i64),
    Answer(String),
    Steal(PlayerId),
    NextRound,
    TeamStatus,
    RoundStatus,
    Redraw,
    Help,
    Quit,
}

/// Interprets a line for the given phase
///
/// During Registration every line other than help/quit is a name, so an empty
/// line reaches name validation. Bare numbers mean a partner id while pairing
/// and a vote while playing. Quiz and Finished take no partner or vote input.
pub fn parse_play_input(phase: Phase, line: &str) -> Result<PlayInput, String> {
    let (word, rest) = split_command(line);
    match word.as_str() {
        "quit" | "exit" | "q" => return Ok(PlayInput::Quit),
        "help" | "?" => return Ok(PlayInput::Help),
        _ => {}
    }

    if phase == Phase::Registration {
        return Ok(PlayInput::Register(line.trim().to_string()));
    }

    let bare_number = word.parse::<i64>().is_ok() && rest.is_empty();
    match word.as_str() {
        "" | "r" | "refresh" => Ok(PlayInput::Redraw),
        _ if bare_number && phase == Phase::Pairing => id_arg(Some(word.as_str()))
            .map(PlayInput::Partner)
            .ok_or_else(|| "Usage: partner <id>".to_string()),
        _ if bare_number && phase == Phase::Playing => {
            number_arg(Some(word.as_str()), &VOTE_RANGE).map(PlayInput::Vote)
        }
        "partner" | "pair" | "vote" | "v" if phase.is_display_only() => {
            Err(format!("Nothing to choose during {}.", phase.label()))
        }
        "partner" | "pair" => id_arg(Some(rest))
            .map(PlayInput::Partner)
            .ok_or_else(|| "Usage: partner <id>".to_string()),
        "vote" | "v" => number_arg(Some(rest), &VOTE_RANGE).map(PlayInput::Vote),
        "answer" | "a" => Ok(PlayInput::Answer(rest.to_string())),
        "steal" => id_arg(Some(rest))
            .map(PlayInput::Steal)
            .ok_or_else(|| "Usage: steal <player id>".to_string()),
        "next" => Ok(PlayInput::NextRound),
        "status" => Ok(PlayInput::TeamStatus),
        "round" => Ok(PlayInput::RoundStatus),
        other => Err(format!("Unknown command '{other}'. Type 'help'.")),
    }
}

fn prompt_for(phase: Phase) -> &'static str {
    match phase {
        Phase::Registration => "Your name: ",
        Phase::Pairing => "pairing> ",
        Phase::Playing => "vote> ",
        Phase::Quiz => "quiz> ",
        Phase::Finished => "finished> ",
    }
}

/// Handles the play command
pub async fn handle_play_command<T: Transport + 'static>(
    client: Arc<SyncClient<T>>,
    config: &ClientConfig,
    resume: Option<PlayerId>,
) -> Result<()> {
    // Set terminal title to indicate the quiz is running
    set_terminal_title("💍 quiz play");

    let spinner = create_spinner_style()?;
    if let Some(player_id) = resume {
        with_spinner(&spinner, "Loading game...", client.resume_as(player_id)).await?;
    }

    let poller = Poller::spawn(Arc::clone(&client), config.poll_interval());
    let mut input = InputLines::stdin();
    println!("{}", render_player_view(&client.state()));

    loop {
        let phase = client.state().phase;
        let Some(line) = input.read(prompt_for(phase)).await? else {
            break;
        };

        let command = match parse_play_input(phase, &line) {
            Ok(command) => command,
            Err(message) => {
                client.state().notices.set_error(message);
                println!("{}", render_player_view(&client.state()));
                continue;
            }
        };

        match command {
            PlayInput::Quit => break,
            PlayInput::Help => {
                println!("{PLAY_HELP}");
                continue;
            }
            PlayInput::Redraw => {}
            PlayInput::Register(name) => {
                let _ = with_spinner(&spinner, "Registering...", client.register(&name)).await;
            }
            PlayInput::Partner(partner_id) => {
                let _ = with_spinner(&spinner, "Pairing...", client.select_partner(partner_id)).await;
            }
            PlayInput::Vote(number) => {
                let _ = with_spinner(&spinner, "Voting...", client.submit_vote(number)).await;
            }
            PlayInput::Answer(answer) => {
                let _ = with_spinner(&spinner, "Answering...", client.submit_quiz_answer(&answer)).await;
            }
            PlayInput::Steal(target) => {
                let _ = with_spinner(&spinner, "Stealing...", client.steal_player(target)).await;
            }
            PlayInput::NextRound => {
                let _ = with_spinner(&spinner, "Starting round...", client.start_next_round()).await;
            }
            PlayInput::TeamStatus => {
                if let Ok(status) = client.team_voting_status().await {
                    println!("{}", render_team_voting_status(&status));
                }
            }
            PlayInput::RoundStatus => {
                if let Ok(status) = client.round_voting_status().await {
                    println!("{}", render_round_voting_status(&status));
                }
            }
        }

        println!("{}", render_player_view(&client.state()));
    }

    poller.stop().await;

    // Set terminal title to green checkbox to indicate completion
    set_terminal_title_and_flush("✅ quiz play");

    Ok(())
}
