//! Text for the log, status banner and end-of-session overlay.
use marblebag_game::{Ending, RoundOutcome, Session, SessionSummary, Standing};

/// Full-screen message shown when a session ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlay {
    pub text: &'static str,
    /// Text color as `#rrggbb`.
    pub color: &'static str,
}

pub const GAME_OVER: Overlay = Overlay {
    text: "GAME OVER",
    color: "#ff3b3b",
};

pub const FINISH: Overlay = Overlay {
    text: "FINISH!",
    color: "#ffd700",
};

#[must_use]
pub fn start_message(session: &Session) -> String {
    format!("You start with {} gold.", session.gold_remaining())
}

#[must_use]
pub fn log_line(outcome: &RoundOutcome) -> String {
    let result = if outcome.delta > 0.0 {
        format!("won {}", outcome.delta)
    } else {
        format!("lost {}", -outcome.delta)
    };
    format!(
        "Draw {}/{}: Marble is {}. You {}. Gold left: {}.",
        outcome.draw_index, outcome.draws_total, outcome.drawn, result, outcome.gold_remaining_after
    )
}

/// Status banner for a session that has ended, `None` while it is still
/// running or when the player walked away.
#[must_use]
pub fn end_status(summary: &SessionSummary) -> Option<String> {
    match summary.ending {
        Ending::Bust => Some("💀 Less than half your gold remains. You lose!".to_string()),
        Ending::Finished => Some(match summary.standing {
            Standing::Up => format!("🎉 You finished up {} gold!", summary.net),
            Standing::Down => format!("😬 You finished down {} gold", -summary.net),
            Standing::Even => "😶 You broke even.".to_string(),
        }),
        Ending::Abandoned => None,
    }
}

#[must_use]
pub const fn overlay_for(ending: Ending) -> Option<Overlay> {
    match ending {
        Ending::Bust => Some(GAME_OVER),
        Ending::Finished => Some(FINISH),
        Ending::Abandoned => None,
    }
}
