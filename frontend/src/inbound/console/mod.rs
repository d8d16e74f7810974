//! Terminal console: command parsing, list rendering, and the read loop.

mod command;
mod driver;
mod render;

pub use command::{Command, CommandParseError, HELP_TEXT};
pub use driver::{Reply, SessionEnd, dispatch, run_console};
pub use render::ListScreen;
