//! Command validation and option parsing for the rabbit CLI.
//!
//! Commands declare ordered positional [`Argument`]s and `--name`
//! [`CommandOption`]s. A [`Parser`] routes a raw token list to the command
//! named by its first token, which validates the remaining tokens, coerces
//! option values into typed [`ParamValue`]s and calls its handler.

mod command;
mod error;
mod manifest;
mod param;
mod parser;

pub use command::{Command, Handler, OptionMap, ParsedArgs};
pub use error::{CliError, ConversionError, Result};
pub use manifest::{ArgumentEntry, CommandEntry, CommandManifest, HandlerRegistry, OptionEntry};
pub use param::{Argument, CommandOption, OPTION_PREFIX, ParamValue, ParameterType, is_positional};
pub use parser::Parser;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
