//! Marble Bag Game Engine
//!
//! Platform-agnostic rules for the marble bag wagering game: a fixed bag of
//! colored marbles, a payout multiplier per color, and sessions that end on a
//! bust or after a configured number of draws. This crate has no UI or I/O;
//! front ends own a [`Session`] value and drive it through an [`Engine`].

pub mod bag;
pub mod constants;
pub mod engine;
pub mod error;
pub mod marble;
pub mod multipliers;
pub mod numbers;
pub mod rng;
pub mod session;
pub mod summary;

// Re-export commonly used types
pub use bag::Bag;
pub use engine::{Engine, termination_status};
pub use error::{BetRejection, GameError};
pub use marble::{Marble, UnknownMarble};
pub use multipliers::MultiplierTable;
pub use rng::{BagDraw, CountingRng, MarbleSource, ScriptedDraws, SessionRng, derive_stream_seed};
pub use session::{RoundOutcome, Session, SessionStatus};
pub use summary::{ColorTally, Ending, SessionSummary, Standing, summarize};
