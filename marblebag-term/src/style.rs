//! Visual treatment per drawn color.
//!
//! Kept apart from the payout table: a color's look never decides its payout.
use colored::{ColoredString, Colorize};
use marblebag_game::Marble;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarbleStyle {
    /// Class name for the log entry.
    pub class: &'static str,
    /// Background flash color as `#rrggbb`.
    pub flash: &'static str,
    /// Confetti particles to spawn; zero for losing colors.
    pub confetti: u32,
}

#[must_use]
pub const fn style_for(marble: Marble) -> MarbleStyle {
    match marble {
        Marble::Green => MarbleStyle {
            class: "win-green",
            flash: "#1b5e20",
            confetti: 40,
        },
        Marble::Black => MarbleStyle {
            class: "win-black",
            flash: "#0d2919",
            confetti: 90,
        },
        Marble::Red => MarbleStyle {
            class: "lose-red",
            flash: "#7a1f1f",
            confetti: 0,
        },
        Marble::White => MarbleStyle {
            class: "lose-white",
            flash: "#3b1515",
            confetti: 0,
        },
    }
}

/// Split a `#rrggbb` color into its channels.
#[must_use]
pub fn hex_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

impl MarbleStyle {
    /// Paint `text` as a log entry: bold white over the flash color.
    #[must_use]
    pub fn paint(&self, text: &str) -> ColoredString {
        let styled = text.bold();
        match hex_rgb(self.flash) {
            Some((r, g, b)) => styled.bright_white().on_truecolor(r, g, b),
            None => styled,
        }
    }

    #[must_use]
    pub const fn is_celebration(&self) -> bool {
        self.confetti > 0
    }
}
