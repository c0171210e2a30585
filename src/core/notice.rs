//! Auto-dismissing error and success messages

use std::time::Duration;
use tokio::time::Instant;

use super::config::{ERROR_MESSAGE_TTL, SUCCESS_MESSAGE_TTL};

/// A message that stays visible until its deadline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub set_at: Instant,
    pub expires_at: Instant,
}

impl Notice {
    fn new(text: String, now: Instant, ttl: Duration) -> Self {
        Self { text, set_at: now, expires_at: now + ttl }
    }

    pub fn is_visible(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// The two message slots a view shows: one error, one success
///
/// Setting a slot replaces whatever it held and restarts the lifetime, so an
/// older message never clears a newer one.
#[derive(Debug, Clone, Default)]
pub struct Notices {
    error: Option<Notice>,
    success: Option<Notice>,
}

impl Notices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        self.set_error_at(text, Instant::now());
    }

    pub fn set_success(&mut self, text: impl Into<String>) {
        self.set_success_at(text, Instant::now());
    }

    pub fn set_error_at(&mut self, text: impl Into<String>, now: Instant) {
        self.error = Some(Notice::new(text.into(), now, ERROR_MESSAGE_TTL));
    }

    pub fn set_success_at(&mut self, text: impl Into<String>, now: Instant) {
        self.success = Some(Notice::new(text.into(), now, SUCCESS_MESSAGE_TTL));
    }

    /// Visible error text at `now`
    pub fn error_at(&self, now: Instant) -> Option<&str> {
        visible(&self.error, now)
    }

    /// Visible success text at `now`
    pub fn success_at(&self, now: Instant) -> Option<&str> {
        visible(&self.success, now)
    }

    pub fn error(&self) -> Option<&str> {
        self.error_at(Instant::now())
    }

    pub fn success(&self) -> Option<&str> {
        self.success_at(Instant::now())
    }
}

fn visible(slot: &Option<Notice>, now: Instant) -> Option<&str> {
    slot.as_ref()
        .filter(|notice| notice.is_visible(now))
        .map(|notice| notice.text.as_str())
}
