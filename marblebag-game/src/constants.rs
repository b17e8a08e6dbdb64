//! Centralized balance constants for the marble bag.
//!
//! The bag and the payout table are fixed for the lifetime of the process.
//! Keeping them together means the odds can only change through a reviewed
//! code change, never through runtime input.

use crate::marble::Marble;

// Bag composition ----------------------------------------------------------
pub(crate) const RED_COUNT: u8 = 3;
pub(crate) const GREEN_COUNT: u8 = 5;
pub(crate) const BLACK_COUNT: u8 = 1;
pub(crate) const WHITE_COUNT: u8 = 1;

/// Marble counts in draw order.
pub(crate) const BAG_COMPOSITION: [(Marble, u8); 4] = [
    (Marble::Red, RED_COUNT),
    (Marble::Green, GREEN_COUNT),
    (Marble::Black, BLACK_COUNT),
    (Marble::White, WHITE_COUNT),
];

// Payout table -------------------------------------------------------------
pub(crate) const GREEN_MULTIPLIER: i32 = 2;
pub(crate) const RED_MULTIPLIER: i32 = -1;
pub(crate) const BLACK_MULTIPLIER: i32 = 10;
pub(crate) const WHITE_MULTIPLIER: i32 = -5;

// Termination --------------------------------------------------------------
/// A session busts once remaining gold is at or below `gold_start / BUST_DIVISOR`.
pub(crate) const BUST_DIVISOR: f64 = 2.0;

// Random streams -----------------------------------------------------------
pub(crate) const DRAW_STREAM_TAG: &[u8] = b"marblebag.draw";
