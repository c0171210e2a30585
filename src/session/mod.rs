//! Sessions: local state, user actions and polling for each kind of view

pub mod client;
pub mod moderator;
pub mod poller;
pub mod state;
pub mod supporter;

pub use client::SyncClient;
pub use moderator::{ModeratorCredential, ModeratorSession, ModeratorState};
pub use poller::{Pollable, Poller};
pub use state::SessionState;
pub use supporter::SupporterSession;
