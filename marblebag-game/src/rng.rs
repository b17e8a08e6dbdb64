//! Random sources feeding marble draws.
//!
//! The engine never reaches for a global RNG. Callers hand it a
//! [`MarbleSource`]: a real bag draw over any `rand` generator, a
//! deterministic seeded stream, or a scripted sequence for tests.
use hmac::{Hmac, Mac};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use sha2::Sha256;
use std::collections::VecDeque;

use crate::bag::Bag;
use crate::constants::DRAW_STREAM_TAG;
use crate::error::GameError;
use crate::marble::Marble;

/// Capability to pull the next marble out of a bag.
pub trait MarbleSource {
    /// Draw the next marble from `bag`.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::ScriptExhausted`] when a finite source has no
    /// draws left. Random sources never fail.
    fn next_marble(&mut self, bag: &Bag) -> Result<Marble, GameError>;
}

impl<S: MarbleSource + ?Sized> MarbleSource for &mut S {
    fn next_marble(&mut self, bag: &Bag) -> Result<Marble, GameError> {
        (**self).next_marble(bag)
    }
}

/// Uniform bag draws backed by any `rand` generator.
#[derive(Debug, Clone)]
pub struct BagDraw<R> {
    rng: R,
}

impl<R: RngCore> BagDraw<R> {
    #[must_use]
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl BagDraw<SessionRng> {
    /// Deterministic draws derived from a user-visible seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(SessionRng::from_user_seed(seed))
    }

    /// Number of generator calls consumed so far.
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.rng.draws()
    }
}

impl<R: RngCore> MarbleSource for BagDraw<R> {
    fn next_marble(&mut self, bag: &Bag) -> Result<Marble, GameError> {
        let marble = bag.draw(&mut self.rng);
        log::trace!("drew {marble}");
        Ok(marble)
    }
}

/// Replays a fixed sequence of colors, one per draw.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptedDraws {
    queue: VecDeque<Marble>,
}

impl ScriptedDraws {
    #[must_use]
    pub fn new(draws: impl IntoIterator<Item = Marble>) -> Self {
        Self {
            queue: draws.into_iter().collect(),
        }
    }

    /// Queue another draw at the end of the script.
    pub fn push(&mut self, marble: Marble) {
        self.queue.push_back(marble);
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl MarbleSource for ScriptedDraws {
    fn next_marble(&mut self, _bag: &Bag) -> Result<Marble, GameError> {
        self.queue.pop_front().ok_or(GameError::ScriptExhausted)
    }
}

/// Seeded, platform-stable generator used for reproducible sessions.
pub type SessionRng = CountingRng<ChaCha20Rng>;

/// Counting wrapper for RNG streams providing instrumentation.
#[derive(Debug, Clone)]
pub struct CountingRng<R> {
    rng: R,
    draws: u64,
}

impl CountingRng<ChaCha20Rng> {
    /// Construct the draw stream from a user-visible seed.
    #[must_use]
    pub fn from_user_seed(seed: u64) -> Self {
        Self::new(ChaCha20Rng::seed_from_u64(derive_stream_seed(
            seed,
            DRAW_STREAM_TAG,
        )))
    }
}

impl<R: RngCore> CountingRng<R> {
    #[must_use]
    pub const fn new(rng: R) -> Self {
        Self { rng, draws: 0 }
    }

    /// Number of draw calls performed against this stream.
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.draws
    }
}

impl<R: RngCore> RngCore for CountingRng<R> {
    fn next_u32(&mut self) -> u32 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.draws = self.draws.saturating_add(1);
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.draws = self.draws.saturating_add(1);
        self.rng.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.draws = self.draws.saturating_add(1);
        self.rng.try_fill_bytes(dest)
    }
}

/// Derive a per-domain stream seed so distinct uses of one user seed never
/// share a random sequence.
#[must_use]
pub fn derive_stream_seed(user_seed: u64, domain_tag: &[u8]) -> u64 {
    let mut mac =
        Hmac::<Sha256>::new_from_slice(&user_seed.to_le_bytes()).expect("64-bit seed is valid key");
    mac.update(domain_tag);
    let digest = mac.finalize().into_bytes();
    let seed_bytes: [u8; 8] = digest[..8].try_into().expect("digest slice length");
    u64::from_le_bytes(seed_bytes)
}
