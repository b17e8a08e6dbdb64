#![forbid(unsafe_code)]
//! Terminal front end for the marble bag game.
//!
//! Reads configuration and bets line by line, hands them to the engine, and
//! renders the log, status banner, per-color treatment and end-of-session
//! overlay. No game rule lives here.

pub mod confetti;
pub mod input;
pub mod render;
pub mod shell;
pub mod style;

pub use shell::{Flow, Phase, Shell, ShellOptions};
