//! # wedding-quiz
//!
//! `wedding-quiz` is the client for a live wedding party quiz. It powers the
//! `quiz` CLI tool used by players, supporters and the moderator.
//!
//! ## Core Features
//!
//! - **Sync Client**: typed calls for every game action, local validation
//!   before anything is sent, and one state refresh after each success.
//! - **Polling**: a cancellable background task per view keeps the local
//!   snapshot fresh and survives server or network failures.
//! - **Moderation**: secret-code access to round control, pauses, drink
//!   breaks, team changes, settings presets and resets.
//! - **Auto-dismissing messages**: errors clear after 5 seconds, successes
//!   after 3.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use wedding_quiz::client::HttpTransport;
//! use wedding_quiz::core::DEFAULT_BASE_URL;
//! use wedding_quiz::session::SyncClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let transport = HttpTransport::new(DEFAULT_BASE_URL, None)?;
//!     let client = Arc::new(SyncClient::new(transport));
//!     client.register("Anna").await?;
//!     println!("phase: {}", client.state().phase.label());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod commands;
pub mod core;
pub mod game;
pub mod session;
pub mod telemetry;
pub mod utils;
