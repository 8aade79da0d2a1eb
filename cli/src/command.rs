use std::str::FromStr;

use mine_core::{Coord, Coord2};
use thiserror::Error;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    NewGame,
    Dump,
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command {0:?}, type `h` for help")]
    Unknown(String),
    #[error("Expected `{0} ROW COL`")]
    MissingCoords(&'static str),
    #[error("Invalid number {0:?}")]
    InvalidNumber(String),
}

pub const HELP: &str = "\
r ROW COL   reveal a cell
f ROW COL   toggle a flag
n           new game
j           print the board as JSON
h           this help
q           quit";

fn parse_coords<'a>(
    name: &'static str,
    mut args: impl Iterator<Item = &'a str>,
) -> Result<Coord2, CommandError> {
    let mut next = || -> Result<Coord, CommandError> {
        let arg = args.next().ok_or(CommandError::MissingCoords(name))?;
        arg.parse()
            .map_err(|_| CommandError::InvalidNumber(arg.to_string()))
    };
    let row = next()?;
    let col = next()?;
    Ok((row, col))
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let name = words.next().ok_or(CommandError::Empty)?;

        match name.to_ascii_lowercase().as_str() {
            "r" | "reveal" => Ok(Command::Reveal(parse_coords("r", words)?)),
            "f" | "flag" => Ok(Command::Flag(parse_coords("f", words)?)),
            "n" | "new" => Ok(Command::NewGame),
            "j" | "json" => Ok(Command::Dump),
            "h" | "help" | "?" => Ok(Command::Help),
            "q" | "quit" | "exit" => Ok(Command::Quit),
            _ => Err(CommandError::Unknown(name.to_string())),
        }
    }
}
