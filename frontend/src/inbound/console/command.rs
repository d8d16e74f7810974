//! Operator commands read from the console.

use std::str::FromStr;

use pagination::{PageNumber, PageNumberError};
use thiserror::Error;

use crate::domain::{EditField, EditFieldParseError, UserId, UserIdParseError};

/// One line of operator input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Load the next page.
    Next,
    /// Load the previous page.
    Previous,
    /// Jump to a page.
    Page(PageNumber),
    /// Re-fetch the current page.
    Reload,
    /// Open an edit for a displayed user.
    Edit(UserId),
    /// Change one field of the open edit.
    Set {
        /// Field to change.
        field: EditField,
        /// New value; may be empty.
        value: String,
    },
    /// Send the open edit to the service.
    Save,
    /// Discard the open edit.
    Cancel,
    /// Delete a user.
    Delete(UserId),
    /// Print command help.
    Help,
    /// Leave the console.
    Quit,
}

/// Errors surfaced while parsing a command line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandParseError {
    /// The line held only whitespace.
    #[error("empty command")]
    Empty,
    /// The first word is not a command.
    #[error("unknown command '{verb}'")]
    Unknown {
        /// Word that was not recognised.
        verb: String,
    },
    /// A command needs an argument that was not supplied.
    #[error("{command} needs {argument}")]
    MissingArgument {
        /// Command being parsed.
        command: &'static str,
        /// Description of the missing argument.
        argument: &'static str,
    },
    /// A command that takes no arguments received some.
    #[error("{command} takes no arguments, got '{extra}'")]
    UnexpectedArgument {
        /// Command being parsed.
        command: &'static str,
        /// Trailing input.
        extra: String,
    },
    /// The page argument is not a page number.
    #[error(transparent)]
    Page(#[from] PageNumberError),
    /// The id argument is not a user id.
    #[error(transparent)]
    UserId(#[from] UserIdParseError),
    /// The field argument is not an editable field.
    #[error(transparent)]
    Field(#[from] EditFieldParseError),
}

/// Command summary printed by `help`.
pub const HELP_TEXT: &str = concat!(
    "Commands:\n",
    "  next, n                  Load the next page\n",
    "  prev, p                  Load the previous page\n",
    "  page <n>                 Jump to page n\n",
    "  reload, r                Re-fetch the current page\n",
    "  edit <id>                Edit a user on this page\n",
    "  set <field> <value...>   Change first_name, last_name, or email\n",
    "  save                     Save the open edit\n",
    "  cancel                   Discard the open edit\n",
    "  delete <id>, rm <id>     Delete a user\n",
    "  help, ?                  Print this help\n",
    "  quit, q                  Leave the console\n",
);

impl FromStr for Command {
    type Err = CommandParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let (verb, rest) = split_word(line.trim());
        match verb.to_ascii_lowercase().as_str() {
            "" => Err(CommandParseError::Empty),
            "next" | "n" => bare(Self::Next, "next", rest),
            "prev" | "p" => bare(Self::Previous, "prev", rest),
            "reload" | "r" => bare(Self::Reload, "reload", rest),
            "save" => bare(Self::Save, "save", rest),
            "cancel" => bare(Self::Cancel, "cancel", rest),
            "help" | "?" => bare(Self::Help, "help", rest),
            "quit" | "q" => bare(Self::Quit, "quit", rest),
            "page" => {
                let raw = single_argument("page", "a page number", rest)?;
                Ok(Self::Page(raw.parse()?))
            }
            "edit" => {
                let raw = single_argument("edit", "a user id", rest)?;
                Ok(Self::Edit(raw.parse()?))
            }
            "delete" | "rm" => {
                let raw = single_argument("delete", "a user id", rest)?;
                Ok(Self::Delete(raw.parse()?))
            }
            "set" => {
                let (field, value) = split_word(rest);
                if field.is_empty() {
                    return Err(CommandParseError::MissingArgument {
                        command: "set",
                        argument: "a field name",
                    });
                }
                Ok(Self::Set {
                    field: field.parse()?,
                    value: value.to_owned(),
                })
            }
            _ => Err(CommandParseError::Unknown {
                verb: verb.to_owned(),
            }),
        }
    }
}

/// Split off the first whitespace-delimited word; the remainder keeps its
/// inner spacing.
fn split_word(input: &str) -> (&str, &str) {
    match input.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (input, ""),
    }
}

fn bare(command: Command, name: &'static str, rest: &str) -> Result<Command, CommandParseError> {
    if rest.is_empty() {
        Ok(command)
    } else {
        Err(CommandParseError::UnexpectedArgument {
            command: name,
            extra: rest.to_owned(),
        })
    }
}

fn single_argument<'a>(
    command: &'static str,
    argument: &'static str,
    rest: &'a str,
) -> Result<&'a str, CommandParseError> {
    let (value, extra) = split_word(rest);
    if value.is_empty() {
        return Err(CommandParseError::MissingArgument { command, argument });
    }
    if !extra.is_empty() {
        return Err(CommandParseError::UnexpectedArgument {
            command,
            extra: extra.to_owned(),
        });
    }
    Ok(value)
}
