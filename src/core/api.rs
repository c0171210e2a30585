//! Public API for the core module.
//!
//! This module provides the stable public API for core functionality including:
//! - Client configuration and its resolution order
//! - The error taxonomy shared by every operation
//! - Auto-dismissing user messages
//!
//! Internal implementation details are not exposed through this API.

// Configuration
pub use super::config::{default_config_path, resolve_config, ClientConfig};
pub use super::config::{
    BASE_URL_ENV_VAR, DEFAULT_BASE_URL, DEFAULT_DRINK_BREAK_MESSAGE, ERROR_MESSAGE_TTL,
    POLL_INTERVAL_SECS, PREDICTION_RANGE, SUCCESS_MESSAGE_TTL, VOTE_RANGE,
};

// Errors
pub use super::error::{Action, SyncError};

// User-facing messages
pub use super::notice::{Notice, Notices};

// Internal helpers for session and command modules
pub(crate) use super::config::{NOT_REGISTERED_MESSAGE, TEAM_TREE_INDENT};
