//! Session state and per-round outcomes.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::marble::Marble;

/// Where a session stands after its most recent round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// More rounds may be played.
    Ongoing,
    /// Remaining gold fell to half the starting gold or below.
    Bust,
    /// Every configured draw was played without busting.
    Finished,
}

impl SessionStatus {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Ongoing)
    }

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Ongoing => "ongoing",
            Self::Bust => "bust",
            Self::Finished => "finished",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Immutable record of a single resolved round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundOutcome {
    /// One-based index of the round just played.
    pub draw_index: u32,
    /// Configured number of draws for the session.
    pub draws_total: u32,
    pub drawn: Marble,
    pub bet: f64,
    /// Gold won (positive) or lost (negative) this round.
    pub delta: f64,
    pub gold_remaining_after: f64,
    pub status: SessionStatus,
}

impl RoundOutcome {
    #[must_use]
    pub fn is_win(&self) -> bool {
        self.delta > 0.0
    }
}

/// Mutable state of one play-through.
///
/// Created by [`crate::Engine::start`] and changed only by
/// [`crate::Engine::play_round`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    gold_start: f64,
    gold_remaining: f64,
    draws_total: u32,
    draw_index: u32,
    status: SessionStatus,
    history: Vec<RoundOutcome>,
}

impl Session {
    pub(crate) const fn new(gold_start: f64, draws_total: u32) -> Self {
        Self {
            gold_start,
            gold_remaining: gold_start,
            draws_total,
            draw_index: 1,
            status: SessionStatus::Ongoing,
            history: Vec::new(),
        }
    }

    #[must_use]
    pub const fn gold_start(&self) -> f64 {
        self.gold_start
    }

    #[must_use]
    pub const fn gold_remaining(&self) -> f64 {
        self.gold_remaining
    }

    #[must_use]
    pub const fn draws_total(&self) -> u32 {
        self.draws_total
    }

    /// Index of the next round to play, or of the final round once the
    /// session has ended.
    #[must_use]
    pub const fn draw_index(&self) -> u32 {
        self.draw_index
    }

    #[must_use]
    pub const fn status(&self) -> SessionStatus {
        self.status
    }

    #[must_use]
    pub const fn is_over(&self) -> bool {
        self.status.is_terminal()
    }

    /// Every round resolved so far, oldest first.
    #[must_use]
    pub fn history(&self) -> &[RoundOutcome] {
        &self.history
    }

    #[must_use]
    pub fn rounds_played(&self) -> usize {
        self.history.len()
    }

    /// `gold_remaining - gold_start`.
    #[must_use]
    pub fn net(&self) -> f64 {
        self.gold_remaining - self.gold_start
    }

    pub(crate) fn credit(&mut self, delta: f64) {
        self.gold_remaining += delta;
    }

    pub(crate) fn record(&mut self, outcome: RoundOutcome) {
        self.status = outcome.status;
        if outcome.status == SessionStatus::Ongoing {
            self.draw_index += 1;
        }
        self.history.push(outcome);
    }
}
