//! Supporter view for eliminated players

use anyhow::Result;
use std::sync::Arc;

use super::input::{create_spinner_style, id_arg, split_command, with_spinner, InputLines};
use super::render::render_supporter_view;
use crate::client::Transport;
use crate::core::ClientConfig;
use crate::game::{PlayerId, TeamId};
use crate::session::{Poller, SupporterSession};
use crate::utils::{set_terminal_title, set_terminal_title_and_flush};

const SUPPORTER_HELP: &str = "\
Commands:
   predict <1-100> <team id>   predict the winning number and team
   rejoin                      rejoin after a correct prediction
   <enter>                     redraw
   quit                        leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SupporterInput {
    /// Missing or unreadable parts stay `None` and are reported by validation
    Predict(Option<i64>, Option<TeamId>),
    Rejoin,
    Redraw,
    Help,
    Quit,
}

pub fn parse_supporter_input(line: &str) -> Result<SupporterInput, String> {
    let (word, rest) = split_command(line);
    match word.as_str() {
        "" | "r" | "refresh" => Ok(SupporterInput::Redraw),
        "quit" | "exit" | "q" => Ok(SupporterInput::Quit),
        "help" | "?" => Ok(SupporterInput::Help),
        "rejoin" => Ok(SupporterInput::Rejoin),
        "predict" | "p" => {
            let mut args = rest.split_whitespace();
            let number = args.next().and_then(|arg| arg.parse::<i64>().ok());
            let team_id = id_arg(args.next());
            Ok(SupporterInput::Predict(number, team_id))
        }
        other => Err(format!("Unknown command '{other}'. Type 'help'.")),
    }
}

/// Handles the supporter command for a previously registered player
pub async fn handle_supporter_command<T: Transport + 'static>(
    supporter: Arc<SupporterSession<T>>,
    config: &ClientConfig,
    player_id: PlayerId,
) -> Result<()> {
    set_terminal_title("💍 quiz supporter");

    let spinner = create_spinner_style()?;
    let client = Arc::clone(supporter.client());
    with_spinner(&spinner, "Loading game...", client.resume_as(player_id)).await?;

    let poller = Poller::spawn(Arc::clone(&supporter), config.poll_interval());
    let mut input = InputLines::stdin();
    println!("{}", render_supporter_view(&client.state()));

    while let Some(line) = input.read("supporter> ").await? {
        match parse_supporter_input(&line) {
            Ok(SupporterInput::Quit) => break,
            Ok(SupporterInput::Help) => {
                println!("{SUPPORTER_HELP}");
                continue;
            }
            Ok(SupporterInput::Redraw) => {}
            Ok(SupporterInput::Predict(number, team_id)) => {
                let _ = with_spinner(
                    &spinner,
                    "Sending prediction...",
                    supporter.submit_prediction(number, team_id),
                )
                .await;
            }
            Ok(SupporterInput::Rejoin) => {
                let _ = with_spinner(&spinner, "Rejoining...", supporter.rejoin()).await;
            }
            Err(message) => client.state().notices.set_error(message),
        }
        println!("{}", render_supporter_view(&client.state()));
    }

    poller.stop().await;
    set_terminal_title_and_flush("✅ quiz supporter");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predict_keeps_partial_choices() {
        assert_eq!(
            parse_supporter_input("predict 42 3"),
            Ok(SupporterInput::Predict(Some(42), Some(3)))
        );
        assert_eq!(
            parse_supporter_input("predict 42"),
            Ok(SupporterInput::Predict(Some(42), None))
        );
        assert_eq!(
            parse_supporter_input("p lots 3"),
            Ok(SupporterInput::Predict(None, Some(3)))
        );
    }

    #[test]
    fn test_other_commands() {
        assert_eq!(parse_supporter_input("REJOIN"), Ok(SupporterInput::Rejoin));
        assert_eq!(parse_supporter_input(""), Ok(SupporterInput::Redraw));
        assert!(parse_supporter_input("vote 3").is_err());
    }
}
