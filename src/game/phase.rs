//! Client-local UI phase
//!
//! The phase only decides which screen a view shows. It is not authoritative:
//! the server's game state is observed through polling and can only move a
//! registered client forward.

use super::model::GamePhase;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Registration,
    Pairing,
    Playing,
    Quiz,
    Finished,
}

impl Phase {
    /// Phase after a successful registration; only Registration moves
    pub fn on_registered(self) -> Phase {
        match self {
            Phase::Registration => Phase::Pairing,
            other => other,
        }
    }

    /// Phase after a successful vote; voting keeps the player in Playing
    pub fn on_vote_accepted(self) -> Phase {
        self
    }

    /// Phase after observing the server's game state in a poll
    pub fn observe(self, server: GamePhase) -> Phase {
        match (self, server) {
            (Phase::Registration, _) | (Phase::Finished, _) => self,
            (_, GamePhase::Playing) => Phase::Playing,
            (_, GamePhase::Quiz) => Phase::Quiz,
            (_, GamePhase::Finished) => Phase::Finished,
            (_, GamePhase::Registration | GamePhase::Pairing | GamePhase::Unknown) => self,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Phase::Registration => "Registration",
            Phase::Pairing => "Pairing",
            Phase::Playing => "Playing",
            Phase::Quiz => "Quiz",
            Phase::Finished => "Finished",
        }
    }

    /// Quiz and Finished only display the game; no input is taken
    pub fn is_display_only(&self) -> bool {
        matches!(self, Phase::Quiz | Phase::Finished)
    }
}
