//! Line input and in-flight spinners shared by the interactive views

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::io::Write;
use std::ops::RangeInclusive;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

const SPINNER_TEMPLATE: &str = "{spinner} {msg}";
const SPINNER_TICK_MS: u64 = 100;

/// Lines typed on stdin, read without blocking the poll task
pub struct InputLines {
    lines: Lines<BufReader<Stdin>>,
}

impl InputLines {
    pub fn stdin() -> Self {
        Self { lines: BufReader::new(tokio::io::stdin()).lines() }
    }

    /// Prints `prompt` and waits for the next line; `None` once input ends
    pub async fn read(&mut self, prompt: &str) -> Result<Option<String>> {
        print!("{prompt}");
        let _ = std::io::stdout().flush();
        let line = self.lines.next_line().await?;
        Ok(line.map(|line| line.trim().to_string()))
    }

    /// Asks a yes/no question; anything but "y" or "yes" is a no
    pub async fn confirm(&mut self, question: &str) -> Result<bool> {
        let answer = self.read(&format!("{question} [y/N] ")).await?;
        Ok(matches!(
            answer.as_deref().map(str::to_lowercase).as_deref(),
            Some("y" | "yes")
        ))
    }
}

pub fn create_spinner_style() -> Result<ProgressStyle> {
    Ok(ProgressStyle::default_spinner().template(SPINNER_TEMPLATE)?)
}

/// Shows a spinner with `message` until `action` completes
pub async fn with_spinner<F: Future>(style: &ProgressStyle, message: &str, action: F) -> F::Output {
    let pb = ProgressBar::new_spinner();
    pb.set_style(style.clone());
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
    let output = action.await;
    pb.finish_and_clear();
    output
}

/// Splits a line into its lowercased command word and the rest
pub fn split_command(line: &str) -> (String, &str) {
    let line = line.trim();
    match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word.to_lowercase(), rest.trim()),
        None => (line.to_lowercase(), ""),
    }
}

/// Parses an optional id argument; missing or malformed ids are `None`
pub fn id_arg(arg: Option<&str>) -> Option<u64> {
    arg.and_then(|arg| arg.parse().ok())
}

/// Parses a number argument for `range`, with the range message on failure
pub fn number_arg(arg: Option<&str>, range: &RangeInclusive<i64>) -> Result<i64, String> {
    arg.and_then(|arg| arg.parse::<i64>().ok())
        .ok_or_else(|| format!("Enter a number between {} and {}!", range.start(), range.end()))
}
