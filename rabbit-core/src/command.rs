//! Command declarations and token validation.
//!
//! A [`Command`] walks a raw token stream left to right. Tokens are collected
//! as positional arguments until the first `--` token is seen; from then on
//! every token must be an option or the value consumed by one. Option values
//! are coerced to their declared type, flags that never appeared default to
//! `false`, and the positional count must match the declared arguments
//! exactly.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::{CliError, Result};
use crate::param::{Argument, CommandOption, ParamValue, is_positional};

/// Option values keyed by option name without the `--` prefix.
pub type OptionMap = HashMap<String, ParamValue>;

/// Function invoked with the validated positional values and option map.
pub type Handler = Arc<dyn Fn(&[String], &OptionMap) -> anyhow::Result<String> + Send + Sync>;

/// Result of a successful validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedArgs {
    /// Positional values in declaration order
    pub arguments: Vec<String>,

    /// Every option seen plus every declared flag
    pub options: OptionMap,
}

impl ParsedArgs {
    /// Value of a flag. Declared flags are always present after validation.
    pub fn flag(&self, key: &str) -> bool {
        self.options.get(key).and_then(ParamValue::as_bool).unwrap_or(false)
    }

    /// Value of a string option, if given
    pub fn string(&self, key: &str) -> Option<&str> {
        self.options.get(key).and_then(ParamValue::as_str)
    }

    /// Value of an integer option, if given
    pub fn int(&self, key: &str) -> Option<i64> {
        self.options.get(key).and_then(ParamValue::as_int)
    }
}

/// A named command with its parameter declarations and handler.
pub struct Command {
    name: String,
    description: Option<String>,
    arguments: Vec<Argument>,
    options: Vec<CommandOption>,
    handler: Handler,
}

impl Command {
    /// Create a command with no parameters.
    pub fn new<F>(name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&[String], &OptionMap) -> anyhow::Result<String> + Send + Sync + 'static,
    {
        Self::with_handler(name, Arc::new(handler))
    }

    /// Create a command around an already shared handler.
    pub fn with_handler(name: impl Into<String>, handler: Handler) -> Self {
        Self {
            name: name.into(),
            description: None,
            arguments: Vec::new(),
            options: Vec::new(),
            handler,
        }
    }

    /// Attach a one-line description shown in usage listings
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Append a positional argument. Order of calls is matching order.
    pub fn add_argument(&mut self, argument: Argument) -> Result<()> {
        if self.arguments.iter().any(|a| a.name() == argument.name()) {
            return Err(CliError::duplicate("argument", argument.name()));
        }
        self.arguments.push(argument);
        Ok(())
    }

    /// Add an option. Option names must be unique within the command.
    pub fn add_option(&mut self, option: CommandOption) -> Result<()> {
        if self.find_option(option.name()).is_some() {
            return Err(CliError::duplicate("option", option.name()));
        }
        self.options.push(option);
        Ok(())
    }

    /// Builder form of [`Command::add_argument`]
    pub fn with_argument(mut self, argument: Argument) -> Result<Self> {
        self.add_argument(argument)?;
        Ok(self)
    }

    /// Builder form of [`Command::add_option`]
    pub fn with_option(mut self, option: CommandOption) -> Result<Self> {
        self.add_option(option)?;
        Ok(self)
    }

    /// Name the parser dispatches on
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Description, if one was attached
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Positional arguments in matching order
    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    /// Declared options, flags included
    pub fn options(&self) -> &[CommandOption] {
        &self.options
    }

    /// One-line usage, e.g. `Usage: greet [arguments] [options]`.
    pub fn usage(&self) -> String {
        let mut usage = format!("Usage: {}", self.name);
        if !self.arguments.is_empty() {
            usage.push_str(" [arguments]");
        }
        if !self.options.is_empty() {
            usage.push_str(" [options]");
        }
        usage
    }

    /// Validate the tokens and run the handler on success.
    ///
    /// Validation and handler errors are returned as they are.
    pub fn execute<S: AsRef<str>>(&self, tokens: &[S]) -> Result<String> {
        let parsed = self.validate(tokens)?;
        debug!(command = %self.name, "invoking handler");
        let output = (self.handler)(&parsed.arguments, &parsed.options)?;
        Ok(output)
    }

    /// Split the tokens into positional values and typed options.
    pub fn validate<S: AsRef<str>>(&self, tokens: &[S]) -> Result<ParsedArgs> {
        let mut arguments = Vec::with_capacity(self.arguments.len());
        let mut options = OptionMap::new();
        let mut pending_flags: HashSet<&str> = self
            .options
            .iter()
            .filter(|o| o.is_flag())
            .map(CommandOption::key)
            .collect();
        let mut options_started = false;

        let mut cursor = 0;
        while cursor < tokens.len() {
            let token = tokens[cursor].as_ref();
            if !options_started && is_positional(token) {
                debug!(command = %self.name, token, "positional argument");
                arguments.push(token.to_string());
            } else {
                options_started = true;
                let (option, value) =
                    self.parse_option(token, tokens, &mut cursor, &mut pending_flags)?;
                debug!(command = %self.name, option = option.name(), %value, "option");
                if let Some(previous) = options.insert(option.key().to_string(), value) {
                    if !option.is_flag() {
                        warn!(option = option.name(), %previous, "option given more than once, keeping the last value");
                    }
                }
            }
            cursor += 1;
        }

        self.check_arity(arguments.len())?;

        for key in pending_flags {
            options.insert(key.to_string(), ParamValue::Bool(false));
        }

        Ok(ParsedArgs { arguments, options })
    }

    /// Parse the option at `cursor`, advancing the cursor past a consumed value.
    fn parse_option<'a, S: AsRef<str>>(
        &'a self,
        token: &str,
        tokens: &[S],
        cursor: &mut usize,
        pending_flags: &mut HashSet<&'a str>,
    ) -> Result<(&'a CommandOption, ParamValue)> {
        let option = self
            .find_option(token)
            .ok_or_else(|| CliError::UnknownOption(token.to_string()))?;
        let next: Option<&str> = tokens.get(*cursor + 1).map(|t| t.as_ref());

        if option.is_flag() {
            if next.is_some_and(is_positional) {
                return Err(CliError::FlagValue(token.to_string()));
            }
            pending_flags.remove(option.key());
            return Ok((option, ParamValue::Bool(true)));
        }

        let raw = match next {
            Some(raw) if is_positional(raw) => raw,
            _ => {
                return Err(CliError::MissingValue {
                    option: token.to_string(),
                    expected: option.param_type().to_string(),
                });
            }
        };
        *cursor += 1;

        let value = ParamValue::coerce(raw, option.param_type()).map_err(|source| {
            CliError::InvalidOptionValue {
                option: token.to_string(),
                source,
            }
        })?;
        Ok((option, value))
    }

    fn check_arity(&self, actual: usize) -> Result<()> {
        let expected = self.arguments.len();
        if actual != expected {
            return Err(CliError::Arity { actual, expected });
        }
        Ok(())
    }

    fn find_option(&self, name: &str) -> Option<&CommandOption> {
        self.options.iter().find(|o| o.name() == name)
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("arguments", &self.arguments)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
