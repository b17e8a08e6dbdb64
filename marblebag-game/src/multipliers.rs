//! Payout table mapping each marble color to a signed bet multiplier.
use serde::{Deserialize, Serialize};

use crate::bag::Bag;
use crate::constants::{BLACK_MULTIPLIER, GREEN_MULTIPLIER, RED_MULTIPLIER, WHITE_MULTIPLIER};
use crate::marble::Marble;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiplierTable {
    pub red: i32,
    pub green: i32,
    pub black: i32,
    pub white: i32,
}

impl MultiplierTable {
    /// green ×2, red ×−1, black ×10, white ×−5.
    pub const STANDARD: Self = Self {
        red: RED_MULTIPLIER,
        green: GREEN_MULTIPLIER,
        black: BLACK_MULTIPLIER,
        white: WHITE_MULTIPLIER,
    };

    #[must_use]
    pub const fn multiplier(&self, marble: Marble) -> i32 {
        match marble {
            Marble::Red => self.red,
            Marble::Green => self.green,
            Marble::Black => self.black,
            Marble::White => self.white,
        }
    }

    /// Gold won (positive) or lost (negative) by betting `bet` on a draw of `marble`.
    #[must_use]
    pub fn delta(&self, marble: Marble, bet: f64) -> f64 {
        bet * f64::from(self.multiplier(marble))
    }

    /// Bag-weighted mean multiplier, i.e. the expected gold returned per unit bet.
    #[must_use]
    pub fn expected_multiplier(&self, bag: &Bag) -> f64 {
        Marble::ALL
            .iter()
            .map(|marble| bag.probability(*marble) * f64::from(self.multiplier(*marble)))
            .sum()
    }
}

impl Default for MultiplierTable {
    fn default() -> Self {
        Self::STANDARD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_matches_payouts() {
        let table = MultiplierTable::STANDARD;
        assert_eq!(table.multiplier(Marble::Green), 2);
        assert_eq!(table.multiplier(Marble::Red), -1);
        assert_eq!(table.multiplier(Marble::Black), 10);
        assert_eq!(table.multiplier(Marble::White), -5);
    }

    #[test]
    fn delta_scales_the_bet() {
        let table = MultiplierTable::STANDARD;
        assert!((table.delta(Marble::Green, 10.0) - 20.0).abs() < f64::EPSILON);
        assert!((table.delta(Marble::White, 10.0) + 50.0).abs() < f64::EPSILON);
        assert!((table.delta(Marble::Red, 2.5) + 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn expected_multiplier_for_standard_bag() {
        let ev = MultiplierTable::STANDARD.expected_multiplier(&Bag::STANDARD);
        assert!((ev - 1.2).abs() < 1e-9, "expected 1.2, got {ev}");
    }
}
