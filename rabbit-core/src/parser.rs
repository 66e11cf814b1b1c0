//! Command dispatch.
//!
//! The [`Parser`] owns every registered [`Command`] and routes a raw token
//! list to the one named by its first token.

use std::collections::BTreeMap;

use tracing::debug;

use crate::command::Command;
use crate::error::{CliError, Result};

/// A set of commands keyed by unique name.
#[derive(Debug, Default)]
pub struct Parser {
    commands: BTreeMap<String, Command>,
}

impl Parser {
    /// Create a parser with no commands
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command. Names must be non-empty and unique.
    pub fn add_command(&mut self, command: Command) -> Result<()> {
        if command.name().is_empty() {
            return Err(CliError::Name("command name must not be empty".to_string()));
        }
        if self.commands.contains_key(command.name()) {
            return Err(CliError::duplicate("command", command.name()));
        }
        debug!(command = command.name(), "registered command");
        self.commands.insert(command.name().to_string(), command);
        Ok(())
    }

    /// Builder form of [`Parser::add_command`]
    pub fn with_command(mut self, command: Command) -> Result<Self> {
        self.add_command(command)?;
        Ok(self)
    }

    /// Look up a command by exact name
    pub fn command(&self, name: &str) -> Option<&Command> {
        self.commands.get(name)
    }

    /// Registered commands, ordered by name
    pub fn commands(&self) -> impl Iterator<Item = &Command> {
        self.commands.values()
    }

    /// Usage line for every command, one per line, with descriptions when
    /// a command has one.
    pub fn usage(&self) -> String {
        self.commands
            .values()
            .map(|command| match command.description() {
                Some(description) => format!("{}\n    {}", command.usage(), description),
                None => command.usage(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Run the command named by `tokens[0]` with the remaining tokens.
    pub fn execute<S: AsRef<str>>(&self, tokens: &[S]) -> Result<String> {
        let (name, rest) = tokens.split_first().ok_or(CliError::NoCommand)?;
        let name = name.as_ref();

        let command = self
            .commands
            .get(name)
            .ok_or_else(|| CliError::UnknownCommand(name.to_string()))?;

        debug!(command = name, tokens = rest.len(), "dispatching");
        command.execute(rest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::OptionMap;
    use crate::param::{Argument, CommandOption, ParameterType};
    use pretty_assertions::assert_eq;

    fn echo(args: &[String], _: &OptionMap) -> anyhow::Result<String> {
        Ok(args.join(" "))
    }

    fn parser() -> Parser {
        let say = Command::new("say", echo)
            .with_description("Print the words back")
            .with_argument(Argument::new("word", ParameterType::String).unwrap())
            .unwrap()
            .with_option(CommandOption::flag("--loud").unwrap())
            .unwrap();
        let ping = Command::new("ping", |_: &[String], _: &OptionMap| Ok("pong".to_string()));

        Parser::new()
            .with_command(say)
            .unwrap()
            .with_command(ping)
            .unwrap()
    }

    #[test]
    fn dispatches_by_first_token() {
        let parser = parser();
        assert_eq!(parser.execute(&["say", "hi"]).unwrap(), "hi");
        assert_eq!(parser.execute(&["ping"]).unwrap(), "pong");
    }

    #[test]
    fn empty_tokens_is_no_command() {
        let err = parser().execute::<String>(&[]).unwrap_err();
        assert!(matches!(err, CliError::NoCommand));
        assert_eq!(err.to_string(), "no command provided");
    }

    #[test]
    fn unknown_name() {
        let err = parser().execute(&["x"]).unwrap_err();
        assert_eq!(err.to_string(), "unknown command x");
    }

    #[test]
    fn lookup_is_exact() {
        let err = parser().execute(&["Ping"]).unwrap_err();
        assert!(matches!(err, CliError::UnknownCommand(_)));
    }

    #[test]
    fn command_errors_are_not_wrapped() {
        let err = parser().execute(&["say"]).unwrap_err();
        assert_eq!(err.to_string(), "not enough arguments: actual 0, expected 1");
    }

    #[test]
    fn duplicate_command_is_rejected() {
        let mut parser = parser();
        let err = parser.add_command(Command::new("ping", echo)).unwrap_err();
        assert_eq!(err.to_string(), "duplicate command name ping");
    }

    #[test]
    fn empty_command_name_is_rejected() {
        let err = Parser::new().add_command(Command::new("", echo)).unwrap_err();
        assert!(matches!(err, CliError::Name(_)));
    }

    #[test]
    fn usage_lists_commands_in_name_order() {
        let parser = parser();
        assert_eq!(
            parser.usage(),
            "Usage: ping\nUsage: say [arguments] [options]\n    Print the words back"
        );
        let names: Vec<_> = parser.commands().map(Command::name).collect();
        assert_eq!(names, vec!["ping", "say"]);
    }
}
