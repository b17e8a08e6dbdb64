//! Numeric text input parsing for the setup and betting prompts.
use regex::Regex;
use std::sync::OnceLock;

fn numeric_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?$|^[+-]?Infinity$")
            .expect("numeric pattern compiles")
    })
}

// Lenient like a browser number field: whitespace is trimmed, blank text reads
// as zero, and anything else that is not a decimal literal is rejected.
#[must_use]
pub fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    if !numeric_pattern().is_match(trimmed) {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// Commands recognised on the betting prompt besides a bet amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Leave the current session and return to setup.
    Exit,
    /// Leave the program.
    Quit,
}

#[must_use]
pub fn parse_command(text: &str) -> Option<Command> {
    match text.trim().to_ascii_lowercase().as_str() {
        "exit" => Some(Command::Exit),
        "quit" | "q" => Some(Command::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimals_and_exponents_parse() {
        assert_eq!(parse_number("100"), Some(100.0));
        assert_eq!(parse_number("  12.5 "), Some(12.5));
        assert_eq!(parse_number("+7"), Some(7.0));
        assert_eq!(parse_number("-3"), Some(-3.0));
        assert_eq!(parse_number(".5"), Some(0.5));
        assert_eq!(parse_number("5."), Some(5.0));
        assert_eq!(parse_number("1e3"), Some(1000.0));
    }

    #[test]
    fn blank_reads_as_zero() {
        assert_eq!(parse_number(""), Some(0.0));
        assert_eq!(parse_number("   "), Some(0.0));
    }

    #[test]
    fn infinity_parses_but_junk_does_not() {
        assert_eq!(parse_number("Infinity"), Some(f64::INFINITY));
        assert_eq!(parse_number("-Infinity"), Some(f64::NEG_INFINITY));
        assert_eq!(parse_number("ten"), None);
        assert_eq!(parse_number("12abc"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
    }

    #[test]
    fn commands_are_case_insensitive() {
        assert_eq!(parse_command(" EXIT "), Some(Command::Exit));
        assert_eq!(parse_command("quit"), Some(Command::Quit));
        assert_eq!(parse_command("q"), Some(Command::Quit));
        assert_eq!(parse_command("10"), None);
    }
}
