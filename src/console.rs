//! Operator console: run-time commands and startup configuration
//!
//! Two interaction surfaces share the serial line:
//!
//! - At startup, the modem settings are read with blocking prompts that
//!   re-ask until the operator supplies in-range values.
//! - While running, [`CommandLoop::poll`] checks for pause/resume commands
//!   without ever blocking, once per outer cycle. Unrecognized lines are
//!   silently ignored.
//!
//! Note that the poll runs between cycles only: once the node enters its
//! multi-second sleep interval, a command is not observed until the
//! interval completes. That responsiveness limit is inherent to the
//! cooperative single-threaded design.

use crate::device::Console;
use crate::modem::RadioConfig;
use crate::registers::{Bandwidth, SpreadingFactor};
use crate::Error;

/// Scratch buffer size for one console line. Commands and config values are
/// a handful of characters; longer lines are truncated and thereby ignored.
const LINE_BUF_LEN: usize = 32;

/// A recognized operator command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Pause transmissions (`STOP`).
    Stop,
    /// Resume transmissions (`GO`).
    Go,
}

impl Command {
    /// Parses one console line. Matching is case-insensitive and ignores
    /// surrounding whitespace; anything unrecognized yields `None`.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.eq_ignore_ascii_case("STOP") {
            Some(Self::Stop)
        } else if line.eq_ignore_ascii_case("GO") {
            Some(Self::Go)
        } else {
            None
        }
    }
}

/// Non-blocking pause/resume command handling.
///
/// Owns the pause flag; nothing else mutates it. The flag is read once per
/// outer cycle by the node.
#[derive(Debug, Default)]
pub struct CommandLoop {
    paused: bool,
}

impl CommandLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether transmissions are currently paused.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Consumes at most one pending console line and applies it.
    ///
    /// Never blocks; returns immediately when no complete line is waiting.
    pub fn poll<C>(&mut self, console: &mut C)
    where
        C: Console + ?Sized,
    {
        let mut buf = [0u8; LINE_BUF_LEN];
        let Some(len) = console.poll_line(&mut buf) else {
            return;
        };
        let Ok(line) = core::str::from_utf8(&buf[..len]) else {
            return;
        };
        match Command::parse(line) {
            Some(Command::Stop) => self.paused = true,
            Some(Command::Go) => self.paused = false,
            None => {}
        }
    }
}

/// Reads the startup modem configuration from the console, blocking.
///
/// Prompts for the bandwidth code and spreading factor in turn;
/// out-of-range or unparsable input is rejected with a re-prompt until a
/// valid value arrives.
pub fn read_config<C>(console: &mut C) -> RadioConfig
where
    C: Console + ?Sized,
{
    let bandwidth = read_validated(console, "bandwidth code [0-9]: ", Bandwidth::new);
    let spreading_factor =
        read_validated(console, "spreading factor [6-12]: ", SpreadingFactor::new);
    RadioConfig {
        bandwidth,
        spreading_factor,
    }
}

/// Prompts for an integer and re-reads until `validate` accepts it.
fn read_validated<C, T, F>(console: &mut C, prompt: &str, validate: F) -> T
where
    C: Console + ?Sized,
    F: Fn(u8) -> Result<T, Error>,
{
    loop {
        console.write_str(prompt);
        let mut buf = [0u8; LINE_BUF_LEN];
        let len = console.read_line(&mut buf);
        let parsed = core::str::from_utf8(&buf[..len])
            .ok()
            .and_then(|line| line.trim().parse::<u8>().ok());
        if let Some(value) = parsed {
            if let Ok(validated) = validate(value) {
                return validated;
            }
        }
        console.write_str("value out of range, try again\r\n");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::MockConsole;

    #[test]
    fn parse_is_case_insensitive_and_trims() {
        assert_eq!(Command::parse("STOP"), Some(Command::Stop));
        assert_eq!(Command::parse("  stop \r"), Some(Command::Stop));
        assert_eq!(Command::parse("Go"), Some(Command::Go));
        assert_eq!(Command::parse("halt"), None);
        assert_eq!(Command::parse(""), None);
    }

    #[test]
    fn poll_toggles_pause_flag() {
        let mut console = MockConsole::with_lines(&["STOP", "GO", "STOP"]);
        let mut commands = CommandLoop::new();
        assert!(!commands.is_paused());

        commands.poll(&mut console);
        assert!(commands.is_paused());
        commands.poll(&mut console);
        assert!(!commands.is_paused());
        commands.poll(&mut console);
        assert!(commands.is_paused());
    }

    #[test]
    fn poll_without_input_leaves_flag_untouched() {
        let mut console = MockConsole::with_lines(&[]);
        let mut commands = CommandLoop::new();

        commands.poll(&mut console);
        assert!(!commands.is_paused());
    }

    #[test]
    fn poll_ignores_unrecognized_lines() {
        let mut console = MockConsole::with_lines(&["STOP", "gibberish", "reboot"]);
        let mut commands = CommandLoop::new();

        commands.poll(&mut console);
        commands.poll(&mut console);
        commands.poll(&mut console);
        assert!(commands.is_paused());
    }

    #[test]
    fn poll_consumes_one_line_per_call() {
        let mut console = MockConsole::with_lines(&["GO", "STOP"]);
        let mut commands = CommandLoop::new();

        commands.poll(&mut console);
        assert!(!commands.is_paused());
        assert_eq!(console.lines.len(), 1);
    }

    #[test]
    fn read_config_reprompts_until_valid() {
        let mut console = MockConsole::with_lines(&["15", "junk", "5", "4", "12"]);

        let config = read_config(&mut console);

        assert_eq!(config.bandwidth.code(), 5);
        assert_eq!(config.spreading_factor.value(), 12);
        // Two invalid bandwidth attempts and one invalid spreading factor.
        assert_eq!(
            console.output.matches("value out of range").count(),
            3
        );
        assert_eq!(console.output.matches("bandwidth code").count(), 3);
        assert_eq!(console.output.matches("spreading factor").count(), 2);
    }
}
