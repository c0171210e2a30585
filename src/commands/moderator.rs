//! Moderator control panel
//!
//! The view asks for the secret code first. Once access is granted it polls
//! both the game state and the moderator statistics until the moderator
//! leaves; the credential is dropped with the session.

use anyhow::Result;
use std::sync::Arc;

use super::input::{create_spinner_style, id_arg, split_command, with_spinner, InputLines};
use super::render::{render_moderator_view, render_move_targets, render_round_voting_status};
use crate::client::Transport;
use crate::core::ClientConfig;
use crate::game::{PlayerId, TeamId};
use crate::session::{ModeratorSession, Poller};
use crate::utils::{set_terminal_title, set_terminal_title_and_flush};

const MODERATOR_HELP: &str = "\
Commands:
   start                     start the round
   pause                     pause or resume the game
   break [message]           announce a drink break
   players                   list player and team ids
   move <player id> <team>   move a player to another team
   finalize                  close voting for the round
   votes                     every team's votes this round
   settings                  show settings and presets
   preset <name>             apply a settings preset
   balance                   check team balance
   reset                     reset the whole game
   <enter>                   redraw
   quit                      sign out and leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModeratorInput {
    StartRound,
    Pause,
    DrinkBreak(Option<String>),
    Players,
    TeamChange(Option<PlayerId>, Option<TeamId>),
    Finalize,
    Votes,
    Settings,
    Preset(String),
    Balance,
    Reset,
    Redraw,
    Help,
    Quit,
}

pub fn parse_moderator_input(line: &str) -> Result<ModeratorInput, String> {
    let (word, rest) = split_command(line);
    let input = match word.as_str() {
        "" | "r" | "refresh" => ModeratorInput::Redraw,
        "quit" | "exit" | "q" | "logout" => ModeratorInput::Quit,
        "help" | "?" => ModeratorInput::Help,
        "start" => ModeratorInput::StartRound,
        "pause" | "resume" => ModeratorInput::Pause,
        "break" => ModeratorInput::DrinkBreak((!rest.is_empty()).then(|| rest.to_string())),
        "players" | "who" => ModeratorInput::Players,
        "move" => {
            let mut args = rest.split_whitespace();
            ModeratorInput::TeamChange(id_arg(args.next()), id_arg(args.next()))
        }
        "finalize" => ModeratorInput::Finalize,
        "votes" => ModeratorInput::Votes,
        "settings" => ModeratorInput::Settings,
        "preset" => ModeratorInput::Preset(rest.to_string()),
        "balance" => ModeratorInput::Balance,
        "reset" => ModeratorInput::Reset,
        other => return Err(format!("Unknown command '{other}'. Type 'help'.")),
    };
    Ok(input)
}

/// Prompts for the code until access is granted; `false` if input ended first
async fn sign_in<T: Transport>(
    moderator: &ModeratorSession<T>,
    input: &mut InputLines,
    spinner: &indicatif::ProgressStyle,
) -> Result<bool> {
    while !moderator.is_authenticated() {
        let Some(code) = input.read("Moderator code: ").await? else {
            return Ok(false);
        };
        let _ = with_spinner(spinner, "Checking code...", moderator.authenticate(&code)).await;
        let state = moderator.client().state();
        if let Some(error) = state.notices.error() {
            println!("❌ {error}");
        }
    }
    Ok(true)
}

/// Handles the moderator command
pub async fn handle_moderator_command<T: Transport + 'static>(
    moderator: Arc<ModeratorSession<T>>,
    config: &ClientConfig,
) -> Result<()> {
    set_terminal_title("💍 quiz moderator");

    let spinner = create_spinner_style()?;
    let mut input = InputLines::stdin();
    if !sign_in(&moderator, &mut input, &spinner).await? {
        set_terminal_title_and_flush("✅ quiz moderator");
        return Ok(());
    }

    let client = Arc::clone(moderator.client());
    let state_poller = Poller::spawn(Arc::clone(&client), config.poll_interval());
    let stats_poller = moderator.spawn_stats_poller(config.poll_interval())?;
    print_panel(&moderator);

    while let Some(line) = input.read("moderator> ").await? {
        let command = match parse_moderator_input(&line) {
            Ok(command) => command,
            Err(message) => {
                client.state().notices.set_error(message);
                print_panel(&moderator);
                continue;
            }
        };

        match command {
            ModeratorInput::Quit => break,
            ModeratorInput::Help => {
                println!("{MODERATOR_HELP}");
                continue;
            }
            ModeratorInput::Redraw => {}
            ModeratorInput::StartRound => {
                let _ = with_spinner(&spinner, "Starting round...", moderator.start_round()).await;
            }
            ModeratorInput::Pause => {
                let _ = with_spinner(&spinner, "Toggling pause...", moderator.pause_game()).await;
            }
            ModeratorInput::DrinkBreak(message) => {
                let _ = with_spinner(
                    &spinner,
                    "Announcing...",
                    moderator.announce_drink_break(message.as_deref()),
                )
                .await;
            }
            ModeratorInput::Players => {
                let listing = client.state().snapshot.as_ref().map(render_move_targets);
                println!("{}", listing.as_deref().unwrap_or("No game state yet."));
                continue;
            }
            ModeratorInput::TeamChange(player_id, team_id) => {
                let _ = with_spinner(
                    &spinner,
                    "Moving player...",
                    moderator.manual_team_change(player_id, team_id),
                )
                .await;
            }
            ModeratorInput::Finalize => {
                let _ = with_spinner(&spinner, "Counting votes...", moderator.finalize_voting()).await;
            }
            ModeratorInput::Votes => {
                if let Ok(status) = client.round_voting_status().await {
                    println!("{}", render_round_voting_status(&status));
                }
            }
            ModeratorInput::Settings => {
                let _ = with_spinner(&spinner, "Loading settings...", moderator.load_settings()).await;
            }
            ModeratorInput::Preset(name) => {
                let _ = with_spinner(&spinner, "Applying preset...", moderator.apply_preset(&name)).await;
            }
            ModeratorInput::Balance => {
                let _ = with_spinner(&spinner, "Checking balance...", moderator.balance_check()).await;
            }
            ModeratorInput::Reset => {
                if input.confirm("Reset the whole game? Everyone will have to register again.").await? {
                    let _ = with_spinner(&spinner, "Resetting...", moderator.reset_game()).await;
                }
            }
        }

        print_panel(&moderator);
    }

    stats_poller.stop().await;
    state_poller.stop().await;
    moderator.sign_out();
    set_terminal_title_and_flush("✅ quiz moderator");

    Ok(())
}

fn print_panel<T: Transport>(moderator: &ModeratorSession<T>) {
    let panel = {
        let state = moderator.client().state();
        let moderator_state = moderator.state();
        render_moderator_view(&state, &moderator_state)
    };
    println!("{panel}");
}
