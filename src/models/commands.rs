//! Command model for the line-oriented driver
//!
//! Parses one input line into a [`Command`].

use std::str::FromStr;

use thiserror::Error;

// == Command Error ==
/// Reasons an input line cannot be turned into a command.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// The first word is not a known command
    #[error("Unknown command: {0}")]
    Unknown(String),

    /// A required argument is missing
    #[error("Missing {argument} for {command}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    /// The command takes fewer arguments than were given
    #[error("Unexpected argument for {command}: {extra}")]
    UnexpectedArgument { command: &'static str, extra: String },
}

// == Command ==
/// One driver command.
///
/// `Set` values run to the end of the line and may contain spaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `SET <key> <value>`
    Set { key: String, value: String },
    /// `SETNULL <key>`: key present with no value
    SetNull { key: String },
    /// `GET <key>`
    Get { key: String },
    /// `DEL <key>`
    Del { key: String },
    /// `LEN`
    Len,
    /// `KEYS`
    Keys,
    /// `STATS`
    Stats,
    /// `CLEAR`
    Clear,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim_start()),
            None => (line, ""),
        };

        match word.to_ascii_uppercase().as_str() {
            "SET" => {
                let (key, value) = match rest.split_once(char::is_whitespace) {
                    Some((key, value)) => (key, value.trim_start()),
                    None => (rest, ""),
                };
                let key = required(key, "SET", "key")?;
                let value = required(value, "SET", "value")?;
                Ok(Command::Set { key, value })
            }
            "SETNULL" => single_key(rest, "SETNULL").map(|key| Command::SetNull { key }),
            "GET" => single_key(rest, "GET").map(|key| Command::Get { key }),
            "DEL" => single_key(rest, "DEL").map(|key| Command::Del { key }),
            "LEN" => no_arguments(rest, "LEN").map(|_| Command::Len),
            "KEYS" => no_arguments(rest, "KEYS").map(|_| Command::Keys),
            "STATS" => no_arguments(rest, "STATS").map(|_| Command::Stats),
            "CLEAR" => no_arguments(rest, "CLEAR").map(|_| Command::Clear),
            _ => Err(CommandError::Unknown(word.to_string())),
        }
    }
}

// == Argument Helpers ==
fn required(
    value: &str,
    command: &'static str,
    argument: &'static str,
) -> Result<String, CommandError> {
    if value.is_empty() {
        Err(CommandError::MissingArgument { command, argument })
    } else {
        Ok(value.to_string())
    }
}

fn single_key(rest: &str, command: &'static str) -> Result<String, CommandError> {
    match rest.split_once(char::is_whitespace) {
        Some((_, extra)) => Err(CommandError::UnexpectedArgument {
            command,
            extra: extra.trim().to_string(),
        }),
        None => required(rest, command, "key"),
    }
}

fn no_arguments(rest: &str, command: &'static str) -> Result<(), CommandError> {
    if rest.is_empty() {
        Ok(())
    } else {
        Err(CommandError::UnexpectedArgument {
            command,
            extra: rest.to_string(),
        })
    }
}
