//! Read-only game overview, e.g. for a screen at the venue

use anyhow::Result;
use std::sync::Arc;
use tokio::time::MissedTickBehavior;

use super::input::{create_spinner_style, with_spinner};
use super::render::render_watch_view;
use crate::client::Transport;
use crate::core::ClientConfig;
use crate::session::{Poller, SyncClient};
use crate::utils::{clear_screen, set_terminal_title, set_terminal_title_and_flush};

/// Handles the watch command
///
/// With `once` the state is fetched a single time and printed; a failure is
/// returned as an error. Otherwise the screen is redrawn every poll interval
/// until Ctrl-C.
pub async fn handle_watch_command<T: Transport + 'static>(
    client: Arc<SyncClient<T>>,
    config: &ClientConfig,
    once: bool,
) -> Result<()> {
    if once {
        let spinner = create_spinner_style()?;
        with_spinner(&spinner, "Fetching game state...", client.refresh()).await?;
        println!("{}", render_watch_view(&client.state()));
        return Ok(());
    }

    set_terminal_title("💍 quiz watch");

    let poller = Poller::spawn(Arc::clone(&client), config.poll_interval());
    let mut redraw = tokio::time::interval(config.poll_interval());
    redraw.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            _ = redraw.tick() => {
                let view = render_watch_view(&client.state());
                clear_screen();
                println!("{view}");
            }
        }
    }

    poller.stop().await;
    set_terminal_title_and_flush("✅ quiz watch");

    Ok(())
}
