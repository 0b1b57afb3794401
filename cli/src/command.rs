use std::str::FromStr;

use minesweeper_core::{Coord, Coord2};
use thiserror::Error;

pub const HELP: &str = "\
Commands:
  c <row> <col>   clear a cell (also: clear)
  f <row> <col>   flag or unflag a cell (also: flag)
  r               start a new game (also: reset)
  h               show this help (also: help)
  q               quit (also: quit)";

/// One line of player input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Clear(Coord2),
    Flag(Coord2),
    Reset,
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Empty command, type `h` for help")]
    Empty,
    #[error("Unknown command `{0}`, type `h` for help")]
    Unknown(String),
    #[error("Expected a row and a column")]
    MissingCoords,
    #[error("`{0}` is not a valid row or column")]
    BadCoord(String),
    #[error("Unexpected `{0}` after the command")]
    Trailing(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let name = words.next().ok_or(CommandError::Empty)?;

        let command = match name.to_ascii_lowercase().as_str() {
            "c" | "clear" => Command::Clear(parse_coords(&mut words)?),
            "f" | "flag" => Command::Flag(parse_coords(&mut words)?),
            "r" | "reset" => Command::Reset,
            "h" | "help" | "?" => Command::Help,
            "q" | "quit" | "exit" => Command::Quit,
            _ => return Err(CommandError::Unknown(name.to_owned())),
        };

        match words.next() {
            Some(extra) => Err(CommandError::Trailing(extra.to_owned())),
            None => Ok(command),
        }
    }
}

fn parse_coords<'a>(words: &mut impl Iterator<Item = &'a str>) -> Result<Coord2, CommandError> {
    let mut next = || -> Result<Coord, CommandError> {
        let word = words.next().ok_or(CommandError::MissingCoords)?;
        word.parse()
            .map_err(|_| CommandError::BadCoord(word.to_owned()))
    };
    let row = next()?;
    let col = next()?;
    Ok((row, col))
}
