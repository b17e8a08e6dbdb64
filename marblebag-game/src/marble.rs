//! Marble colors.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Marble {
    Red,
    Green,
    Black,
    White,
}

impl Marble {
    pub const ALL: &'static [Self] = &[Self::Red, Self::Green, Self::Black, Self::White];

    /// Stable lowercase identifier used in logs and reports.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Green => "green",
            Self::Black => "black",
            Self::White => "white",
        }
    }

    /// Position of the color in [`Marble::ALL`], handy for fixed-size tallies.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Red => 0,
            Self::Green => 1,
            Self::Black => 2,
            Self::White => 3,
        }
    }
}

impl fmt::Display for Marble {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Error returned when a color name is not one of the four marbles.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown marble color: {0}")]
pub struct UnknownMarble(pub String);

impl FromStr for Marble {
    type Err = UnknownMarble;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|marble| marble.key().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownMarble(trimmed.to_string()))
    }
}
