use std::fmt;

use serde::{Deserialize, Serialize};

/// Built-in betting strategies for automated sessions.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum BettingStrategy {
    /// Same stake every round.
    Flat(f64),
    /// Share of the remaining gold, between 0 and 1.
    Fraction(f64),
    AllIn,
}

impl BettingStrategy {
    pub const DEFAULT_FLAT: Self = Self::Flat(10.0);
    pub const DEFAULT_FRACTION: Self = Self::Fraction(0.25);

    /// Strategies covered by the sweep.
    pub const SWEEP: [Self; 3] = [Self::DEFAULT_FLAT, Self::DEFAULT_FRACTION, Self::AllIn];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Flat(_) => "flat",
            Self::Fraction(_) => "fraction",
            Self::AllIn => "all-in",
        }
    }

    /// Stake for the next round, never more than `gold_remaining`.
    #[must_use]
    pub fn bet_for(self, gold_remaining: f64) -> f64 {
        let wanted = match self {
            Self::Flat(amount) => amount,
            Self::Fraction(share) => gold_remaining * share.clamp(0.0, 1.0),
            Self::AllIn => gold_remaining,
        };
        wanted.min(gold_remaining)
    }
}

impl fmt::Display for BettingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flat(amount) => write!(f, "Flat {amount}"),
            Self::Fraction(share) => write!(f, "Fraction {}%", share * 100.0),
            Self::AllIn => f.write_str("All In"),
        }
    }
}
