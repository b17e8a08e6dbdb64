//! Confetti strip printed after a winning draw.
use colored::Colorize;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::style::hex_rgb;

const CONFETTI_COLORS: [&str; 8] = [
    "#ff4757", "#fffa65", "#1e90ff", "#2ed573", "#ffa502", "#ff6b81", "#70a1ff", "#7bed9f",
];

/// Particles per printed glyph; keeps a 90-particle burst on one line.
const PARTICLES_PER_GLYPH: u32 = 3;

/// Number of glyphs printed for a burst of `count` particles.
#[must_use]
pub const fn glyph_count(count: u32) -> u32 {
    count.div_ceil(PARTICLES_PER_GLYPH)
}

/// Build a strip of confetti for `count` particles. Each glyph gets a random
/// palette color and is a dot or a square at random.
#[must_use]
pub fn burst<R: Rng + ?Sized>(count: u32, rng: &mut R, color: bool) -> String {
    let mut strip = String::new();
    for _ in 0..glyph_count(count) {
        let glyph = if rng.gen_bool(0.5) { "●" } else { "■" };
        let hex = CONFETTI_COLORS.choose(rng).copied().unwrap_or("#ffffff");
        match hex_rgb(hex) {
            Some((r, g, b)) if color => strip.push_str(&glyph.truecolor(r, g, b).to_string()),
            _ => strip.push_str(glyph),
        }
    }
    strip
}
