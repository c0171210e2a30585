//! Common test utilities and helpers
#![allow(dead_code, unused_imports)]

pub mod fixtures;
pub mod transport;

pub use self::fixtures::{game_state, player, registered_client, team, token};
pub use self::transport::ScriptedTransport;

use std::sync::Arc;
use wedding_quiz::session::SyncClient;

/// A sync client over a fresh scripted transport
pub fn scripted_client() -> Arc<SyncClient<ScriptedTransport>> {
    Arc::new(SyncClient::new(ScriptedTransport::new()))
}
