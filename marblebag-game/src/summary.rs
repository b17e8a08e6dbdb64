//! End-of-session result calculation
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::marble::Marble;
use crate::session::{Session, SessionStatus};

/// How a session came to an end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ending {
    /// Remaining gold fell to half the starting gold or below
    Bust,
    /// All configured draws were played
    Finished,
    /// The player left before the session ended
    Abandoned,
}

impl fmt::Display for Ending {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bust => write!(f, "bust"),
            Self::Finished => write!(f, "finished"),
            Self::Abandoned => write!(f, "abandoned"),
        }
    }
}

/// Sign of the net result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Standing {
    Up,
    Down,
    Even,
}

impl Standing {
    #[must_use]
    pub fn from_net(net: f64) -> Self {
        if net > 0.0 {
            Self::Up
        } else if net < 0.0 {
            Self::Down
        } else {
            Self::Even
        }
    }
}

/// Per-color draw counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorTally {
    pub red: u64,
    pub green: u64,
    pub black: u64,
    pub white: u64,
}

impl ColorTally {
    pub fn record(&mut self, marble: Marble) {
        let slot = match marble {
            Marble::Red => &mut self.red,
            Marble::Green => &mut self.green,
            Marble::Black => &mut self.black,
            Marble::White => &mut self.white,
        };
        *slot = slot.saturating_add(1);
    }

    #[must_use]
    pub const fn get(&self, marble: Marble) -> u64 {
        match marble {
            Marble::Red => self.red,
            Marble::Green => self.green,
            Marble::Black => self.black,
            Marble::White => self.white,
        }
    }

    #[must_use]
    pub const fn total(&self) -> u64 {
        self.red + self.green + self.black + self.white
    }

    /// Fold another tally into this one.
    pub fn merge(&mut self, other: &Self) {
        self.red = self.red.saturating_add(other.red);
        self.green = self.green.saturating_add(other.green);
        self.black = self.black.saturating_add(other.black);
        self.white = self.white.saturating_add(other.white);
    }
}

impl FromIterator<Marble> for ColorTally {
    fn from_iter<I: IntoIterator<Item = Marble>>(iter: I) -> Self {
        let mut tally = Self::default();
        for marble in iter {
            tally.record(marble);
        }
        tally
    }
}

/// Complete summary of a session for the end-of-session screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub ending: Ending,
    pub standing: Standing,
    pub gold_start: f64,
    pub gold_final: f64,
    pub net: f64,
    pub rounds_played: usize,
    pub draws_total: u32,
    /// Largest single-round gain, if any round was played.
    pub best_delta: Option<f64>,
    /// Largest single-round loss, if any round was played.
    pub worst_delta: Option<f64>,
    pub colors: ColorTally,
}

/// Summarize a session. Sessions that are still ongoing count as abandoned.
#[must_use]
pub fn summarize(session: &Session) -> SessionSummary {
    let ending = match session.status() {
        SessionStatus::Bust => Ending::Bust,
        SessionStatus::Finished => Ending::Finished,
        SessionStatus::Ongoing => Ending::Abandoned,
    };
    let history = session.history();
    let best_delta = history.iter().map(|r| r.delta).reduce(f64::max);
    let worst_delta = history.iter().map(|r| r.delta).reduce(f64::min);
    let net = session.net();

    SessionSummary {
        ending,
        standing: Standing::from_net(net),
        gold_start: session.gold_start(),
        gold_final: session.gold_remaining(),
        net,
        rounds_played: history.len(),
        draws_total: session.draws_total(),
        best_delta,
        worst_delta,
        colors: history.iter().map(|r| r.drawn).collect(),
    }
}
