//! Line-oriented game loop: setup prompts, betting rounds, end-of-session
//! screens. All rules are delegated to the engine.
use anyhow::{Context, Result};
use colored::Colorize;
use marblebag_game::{Engine, GameError, MarbleSource, Session, summarize};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::io::{BufRead, Write};

use crate::confetti;
use crate::input::{Command, parse_command, parse_number};
use crate::render::{Overlay, end_status, log_line, overlay_for, start_message};
use crate::style::{hex_rgb, style_for};

const INVALID_SETUP: &str = "Enter valid numbers!";
const INVALID_BET: &str = "Invalid bet amount.";

/// Which screen the shell is on.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    /// Waiting for the starting gold.
    SetupGold,
    /// Waiting for the number of draws; holds the starting gold text.
    SetupDraws { gold_text: String },
    /// A session is running.
    Betting(Session),
}

/// Whether the caller should keep feeding input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShellOptions {
    /// Emit ANSI colors.
    pub color: bool,
    /// Seed for visual effects only; never touches the draws.
    pub effects_seed: u64,
}

pub struct Shell<S, W> {
    engine: Engine<S>,
    out: W,
    phase: Phase,
    color: bool,
    effects_rng: SmallRng,
}

impl<S: MarbleSource, W: Write> Shell<S, W> {
    pub fn new(engine: Engine<S>, out: W, options: ShellOptions) -> Self {
        Self {
            engine,
            out,
            phase: Phase::SetupGold,
            color: options.color,
            effects_rng: SmallRng::seed_from_u64(options.effects_seed),
        }
    }

    #[must_use]
    pub const fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Consume the shell, returning its output sink.
    pub fn into_output(self) -> W {
        self.out
    }

    /// Read lines until `quit` or end of input.
    ///
    /// # Errors
    ///
    /// Returns an error when reading input or writing output fails.
    pub fn run<R: BufRead>(&mut self, mut input: R) -> Result<()> {
        self.banner()?;
        let mut line = String::new();
        loop {
            self.prompt()?;
            line.clear();
            let read = input.read_line(&mut line).context("reading input")?;
            if read == 0 {
                if let Phase::Betting(session) = &self.phase {
                    log::info!(
                        "input closed mid-session at round {}",
                        session.draw_index()
                    );
                }
                writeln!(self.out).context("writing output")?;
                return Ok(());
            }
            if self.handle_line(&line)? == Flow::Quit {
                return Ok(());
            }
        }
    }

    /// Feed one line of user input to the current screen.
    ///
    /// # Errors
    ///
    /// Returns an error when writing output fails or the marble source can
    /// no longer draw.
    pub fn handle_line(&mut self, line: &str) -> Result<Flow> {
        if parse_command(line) == Some(Command::Quit) {
            writeln!(self.out, "Goodbye!")?;
            return Ok(Flow::Quit);
        }

        match std::mem::replace(&mut self.phase, Phase::SetupGold) {
            Phase::SetupGold => {
                self.phase = Phase::SetupDraws {
                    gold_text: line.trim().to_string(),
                };
            }
            Phase::SetupDraws { gold_text } => self.start_session(&gold_text, line)?,
            Phase::Betting(session) => self.betting(session, line)?,
        }
        Ok(Flow::Continue)
    }

    fn start_session(&mut self, gold_text: &str, draws_text: &str) -> Result<()> {
        let started = match (parse_number(gold_text), parse_number(draws_text)) {
            (Some(gold), Some(draws)) => self.engine.start(gold, draws).map_err(|err| {
                log::debug!("setup rejected: {err}");
            }),
            _ => Err(()),
        };
        match started {
            Ok(session) => {
                writeln!(self.out, "{}", start_message(&session))?;
                self.phase = Phase::Betting(session);
            }
            Err(()) => {
                let warning = self.paint_warning(INVALID_SETUP);
                writeln!(self.out, "{warning}")?;
                self.phase = Phase::SetupGold;
            }
        }
        Ok(())
    }

    fn betting(&mut self, mut session: Session, line: &str) -> Result<()> {
        if parse_command(line) == Some(Command::Exit) {
            writeln!(
                self.out,
                "You leave the table with {} gold.",
                session.gold_remaining()
            )?;
            log::info!("session abandoned: {:?}", summarize(&session).ending);
            self.phase = Phase::SetupGold;
            return Ok(());
        }

        let Some(bet) = parse_number(line) else {
            self.reject_bet()?;
            self.phase = Phase::Betting(session);
            return Ok(());
        };

        match self.engine.play_round(&mut session, bet) {
            Ok(outcome) => {
                let style = style_for(outcome.drawn);
                let text = log_line(&outcome);
                if self.color {
                    writeln!(self.out, "{}", style.paint(&text))?;
                } else {
                    writeln!(self.out, "[{}] {text}", style.class)?;
                }
                if style.is_celebration() {
                    let strip = confetti::burst(style.confetti, &mut self.effects_rng, self.color);
                    writeln!(self.out, "{strip}")?;
                }
                if outcome.status.is_terminal() {
                    self.finish(&session)?;
                } else {
                    self.phase = Phase::Betting(session);
                }
            }
            Err(GameError::InvalidBet { .. }) => {
                self.reject_bet()?;
                self.phase = Phase::Betting(session);
            }
            Err(err) => {
                self.phase = Phase::Betting(session);
                return Err(err).context("resolving round");
            }
        }
        Ok(())
    }

    fn finish(&mut self, session: &Session) -> Result<()> {
        let summary = summarize(session);
        if let Some(status) = end_status(&summary) {
            writeln!(self.out, "{status}")?;
        }
        if let Some(overlay) = overlay_for(summary.ending) {
            self.overlay(overlay)?;
        }
        writeln!(self.out, "Play again? Enter a new starting gold, or 'quit'.")?;
        self.phase = Phase::SetupGold;
        Ok(())
    }

    fn overlay(&mut self, overlay: Overlay) -> Result<()> {
        let width = overlay.text.chars().count() + 2;
        let bar = "═".repeat(width);
        let text = match hex_rgb(overlay.color) {
            Some((r, g, b)) if self.color => overlay.text.truecolor(r, g, b).bold().to_string(),
            _ => overlay.text.to_string(),
        };
        writeln!(self.out, "╔{bar}╗")?;
        writeln!(self.out, "║ {text} ║")?;
        writeln!(self.out, "╚{bar}╝")?;
        Ok(())
    }

    fn reject_bet(&mut self) -> Result<()> {
        let warning = self.paint_warning(INVALID_BET);
        writeln!(self.out, "{warning}")?;
        Ok(())
    }

    fn paint_warning(&self, text: &str) -> String {
        if self.color {
            text.yellow().bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn banner(&mut self) -> Result<()> {
        let title = "🎲 Marble Bag";
        if self.color {
            writeln!(self.out, "{}", title.bright_cyan().bold())?;
        } else {
            writeln!(self.out, "{title}")?;
        }
        writeln!(
            self.out,
            "Bag: 3 red (x-1), 5 green (x2), 1 black (x10), 1 white (x-5)."
        )?;
        Ok(())
    }

    fn prompt(&mut self) -> Result<()> {
        match &self.phase {
            Phase::SetupGold => write!(self.out, "Starting gold: ")?,
            Phase::SetupDraws { .. } => write!(self.out, "Number of draws: ")?,
            Phase::Betting(session) => write!(
                self.out,
                "Bet (gold {}, draw {}/{}) or 'exit': ",
                session.gold_remaining(),
                session.draw_index(),
                session.draws_total()
            )?,
        }
        self.out.flush().context("flushing output")?;
        Ok(())
    }
}
