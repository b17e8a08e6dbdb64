//! The marble bag: a fixed multiset drawn from uniformly.
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::BAG_COMPOSITION;
use crate::marble::Marble;
use crate::numbers::count_to_f64;

/// Fixed multiset of marbles. A draw picks one of the individual marbles,
/// so colors with more copies come up proportionally more often.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bag {
    contents: [(Marble, u8); 4],
}

impl Bag {
    /// The standard bag: 3 red, 5 green, 1 black, 1 white.
    pub const STANDARD: Self = Self {
        contents: BAG_COMPOSITION,
    };

    /// Total number of marbles in the bag.
    #[must_use]
    pub fn len(&self) -> usize {
        self.contents
            .iter()
            .map(|(_, count)| usize::from(*count))
            .sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of marbles of the given color.
    #[must_use]
    pub fn count(&self, marble: Marble) -> u8 {
        self.contents
            .iter()
            .find(|(m, _)| *m == marble)
            .map_or(0, |(_, count)| *count)
    }

    /// Chance of drawing the given color, `count / len`.
    #[must_use]
    pub fn probability(&self, marble: Marble) -> f64 {
        let total = self.len();
        if total == 0 {
            return 0.0;
        }
        f64::from(self.count(marble)) / count_to_f64(u64::try_from(total).unwrap_or(u64::MAX))
    }

    /// Marble sitting at position `slot` when the bag is laid out in order.
    #[must_use]
    pub fn marble_at(&self, slot: usize) -> Option<Marble> {
        let mut remaining = slot;
        for (marble, count) in &self.contents {
            let count = usize::from(*count);
            if remaining < count {
                return Some(*marble);
            }
            remaining -= count;
        }
        None
    }

    /// Draw one marble uniformly over every item in the bag.
    ///
    /// # Panics
    ///
    /// Never for [`Bag::STANDARD`]; the slot is always within `0..len`.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Marble {
        let slot = rng.gen_range(0..self.len());
        self.marble_at(slot)
            .expect("slot drawn from 0..len is always occupied")
    }
}

impl Default for Bag {
    fn default() -> Self {
        Self::STANDARD
    }
}
