//! User commands accepted by the driver, and their text form
//!
//! Track numbers in the text form are 1-based, as shown in the playlist.

use crate::error::{Error, Result};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq)]
pub enum PlayerCommand {
    Play,
    Pause,
    Toggle,
    Next,
    Previous,
    /// Playlist row clicked (0-based index)
    Select(usize),
    /// Row's own play/pause button (0-based index)
    ToggleRow(usize),
    /// Seek to a fraction of the duration
    Seek(f64),
    /// Single click on the progress bar at pointer X
    Click(f64),
    /// Pointer pressed on the progress bar at X
    PointerDown(f64),
    /// Pointer moved to X
    PointerMove(f64),
    /// Pointer released
    PointerUp,
    /// Volume on the 0-100 scale
    Volume(u8),
    /// Report the current snapshot
    Status,
    Quit,
}

/// Text help for the console host
pub const HELP: &str = "\
commands:
  play | pause | toggle | next | prev
  select <n>      play track n
  row <n>         track n's play/pause button
  seek <0..1>     seek to a fraction of the track
  click <x>       click the progress bar at x (0..100)
  down <x> | move <x> | up    drag the progress handle
  vol <0..100>
  status | help | quit";

impl FromStr for PlayerCommand {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut parts = line.split_whitespace();
        let Some(word) = parts.next() else {
            return Err(Error::InvalidCommand("empty command".to_string()));
        };
        let arg = parts.next();
        if parts.next().is_some() {
            return Err(Error::InvalidCommand(format!("too many arguments: {}", line.trim())));
        }

        let command = match word.to_ascii_lowercase().as_str() {
            "play" => PlayerCommand::Play,
            "pause" => PlayerCommand::Pause,
            "toggle" | "p" => PlayerCommand::Toggle,
            "next" | "n" => PlayerCommand::Next,
            "prev" | "previous" => PlayerCommand::Previous,
            "select" => PlayerCommand::Select(track_number(word, arg)?),
            "row" => PlayerCommand::ToggleRow(track_number(word, arg)?),
            "seek" => PlayerCommand::Seek(number(word, arg)?),
            "click" => PlayerCommand::Click(number(word, arg)?),
            "down" => PlayerCommand::PointerDown(number(word, arg)?),
            "move" => PlayerCommand::PointerMove(number(word, arg)?),
            "up" => PlayerCommand::PointerUp,
            "vol" | "volume" => {
                let level: u32 = required(word, arg)?
                    .parse()
                    .map_err(|_| Error::InvalidCommand(format!("{word}: expected 0-100")))?;
                PlayerCommand::Volume(level.min(100) as u8)
            }
            "status" => PlayerCommand::Status,
            "quit" | "exit" | "q" => PlayerCommand::Quit,
            other => return Err(Error::InvalidCommand(format!("unknown command '{other}'"))),
        };

        if arg.is_some() && !takes_argument(&command) {
            return Err(Error::InvalidCommand(format!("{word} takes no argument")));
        }
        Ok(command)
    }
}

fn takes_argument(command: &PlayerCommand) -> bool {
    matches!(
        command,
        PlayerCommand::Select(_)
            | PlayerCommand::ToggleRow(_)
            | PlayerCommand::Seek(_)
            | PlayerCommand::Click(_)
            | PlayerCommand::PointerDown(_)
            | PlayerCommand::PointerMove(_)
            | PlayerCommand::Volume(_)
    )
}

fn required<'a>(word: &str, arg: Option<&'a str>) -> Result<&'a str> {
    arg.ok_or_else(|| Error::InvalidCommand(format!("{word}: missing argument")))
}

fn number(word: &str, arg: Option<&str>) -> Result<f64> {
    let value: f64 = required(word, arg)?
        .parse()
        .map_err(|_| Error::InvalidCommand(format!("{word}: expected a number")))?;
    if !value.is_finite() {
        return Err(Error::InvalidCommand(format!("{word}: expected a finite number")));
    }
    Ok(value)
}

/// 1-based track number in, 0-based index out
fn track_number(word: &str, arg: Option<&str>) -> Result<usize> {
    let n: usize = required(word, arg)?
        .parse()
        .map_err(|_| Error::InvalidCommand(format!("{word}: expected a track number")))?;
    n.checked_sub(1)
        .ok_or_else(|| Error::InvalidCommand(format!("{word}: track numbers start at 1")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Result<PlayerCommand> {
        line.parse()
    }

    #[test]
    fn test_simple_commands() {
        assert_eq!(parse("play").unwrap(), PlayerCommand::Play);
        assert_eq!(parse("  PAUSE ").unwrap(), PlayerCommand::Pause);
        assert_eq!(parse("n").unwrap(), PlayerCommand::Next);
        assert_eq!(parse("prev").unwrap(), PlayerCommand::Previous);
        assert_eq!(parse("up").unwrap(), PlayerCommand::PointerUp);
        assert_eq!(parse("quit").unwrap(), PlayerCommand::Quit);
    }

    #[test]
    fn test_track_numbers_are_one_based() {
        assert_eq!(parse("select 1").unwrap(), PlayerCommand::Select(0));
        assert_eq!(parse("row 4").unwrap(), PlayerCommand::ToggleRow(3));
        assert!(parse("select 0").is_err());
        assert!(parse("select x").is_err());
    }

    #[test]
    fn test_numeric_arguments() {
        assert_eq!(parse("seek 0.25").unwrap(), PlayerCommand::Seek(0.25));
        assert_eq!(parse("down 40").unwrap(), PlayerCommand::PointerDown(40.0));
        assert_eq!(parse("move 41.5").unwrap(), PlayerCommand::PointerMove(41.5));
        assert!(parse("seek NaN").is_err());
        assert!(parse("click").is_err());
    }

    #[test]
    fn test_volume_clamped() {
        assert_eq!(parse("vol 55").unwrap(), PlayerCommand::Volume(55));
        assert_eq!(parse("vol 300").unwrap(), PlayerCommand::Volume(100));
        assert!(parse("vol -1").is_err());
    }

    #[test]
    fn test_malformed_lines() {
        assert!(matches!(parse(""), Err(Error::InvalidCommand(_))));
        assert!(parse("dance").is_err());
        assert!(parse("play now").is_err());
        assert!(parse("seek 0.1 0.2").is_err());
    }
}
