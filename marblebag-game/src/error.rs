//! Errors surfaced by the engine.
use thiserror::Error;

use crate::session::SessionStatus;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GameError {
    /// `start` was called with a starting gold or draw count that is not a
    /// finite positive number.
    #[error("{field} must be a finite number greater than zero (got {value})")]
    InvalidConfiguration { field: &'static str, value: f64 },
    /// The bet is not a finite positive amount, exceeds the remaining gold,
    /// or could overflow the balance.
    #[error("invalid bet of {bet}: {reason}")]
    InvalidBet { bet: f64, reason: BetRejection },
    /// The session already ended; start a new one to keep playing.
    #[error("session is over ({status})")]
    SessionOver { status: SessionStatus },
    /// A scripted marble source ran out of queued draws.
    #[error("scripted marble source has no draws left")]
    ScriptExhausted,
}

/// Why a bet was turned down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BetRejection {
    NotFinite,
    NotPositive,
    ExceedsBalance,
    /// Some draw would carry the balance past the largest representable amount.
    BalanceOverflow,
}

impl std::fmt::Display for BetRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFinite => write!(f, "bet must be a finite number"),
            Self::NotPositive => write!(f, "bet must be greater than zero"),
            Self::ExceedsBalance => write!(f, "bet exceeds remaining gold"),
            Self::BalanceOverflow => write!(f, "bet would overflow the gold balance"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_problem() {
        let err = GameError::InvalidConfiguration {
            field: "gold_start",
            value: -3.0,
        };
        assert_eq!(
            err.to_string(),
            "gold_start must be a finite number greater than zero (got -3)"
        );

        let err = GameError::InvalidBet {
            bet: 500.0,
            reason: BetRejection::ExceedsBalance,
        };
        assert_eq!(
            err.to_string(),
            "invalid bet of 500: bet exceeds remaining gold"
        );

        let err = GameError::SessionOver {
            status: SessionStatus::Bust,
        };
        assert_eq!(err.to_string(), "session is over (bust)");
    }
}
