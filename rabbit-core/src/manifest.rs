//! TOML command manifests.
//!
//! A manifest declares commands and their parameters without code; handlers
//! are looked up by name in a [`HandlerRegistry`] when the manifest is built
//! into a [`Parser`].
//!
//! ```toml
//! [[command]]
//! name = "greet"
//! description = "Say hello"
//! arguments = [{ name = "msg", type = "string" }]
//! options = [{ name = "--to", type = "string" }, { name = "--shout", flag = true }]
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::command::{Command, Handler, OptionMap};
use crate::error::{CliError, Result};
use crate::param::{Argument, CommandOption, ParameterType};
use crate::parser::Parser;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommandManifest {
    #[serde(default, rename = "command")]
    pub commands: Vec<CommandEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandEntry {
    pub name: String,

    /// Registry key of the handler; the command name when omitted
    #[serde(default)]
    pub handler: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub arguments: Vec<ArgumentEntry>,

    #[serde(default)]
    pub options: Vec<OptionEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArgumentEntry {
    pub name: String,

    #[serde(rename = "type", default)]
    pub param_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionEntry {
    pub name: String,

    #[serde(rename = "type", default)]
    pub param_type: Option<String>,

    #[serde(default)]
    pub flag: bool,
}

impl CommandManifest {
    /// Parse a manifest from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Read and parse a manifest file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading command manifest");
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Build a parser from the declared commands.
    pub fn build(&self, registry: &HandlerRegistry) -> Result<Parser> {
        let mut parser = Parser::new();
        for entry in &self.commands {
            parser.add_command(entry.build(registry)?)?;
        }
        Ok(parser)
    }
}

impl CommandEntry {
    fn build(&self, registry: &HandlerRegistry) -> Result<Command> {
        let handler_name = self.handler.as_deref().unwrap_or(&self.name);
        let handler = registry.get(handler_name).ok_or_else(|| {
            CliError::Manifest(format!(
                "command {}: no handler registered as {}",
                self.name, handler_name
            ))
        })?;

        let mut command = Command::with_handler(&self.name, handler);
        if let Some(description) = &self.description {
            command = command.with_description(description);
        }

        for argument in &self.arguments {
            let param_type = self.resolve_type(argument.param_type.as_deref())?;
            command.add_argument(Argument::new(&argument.name, param_type)?)?;
        }

        for option in &self.options {
            let param_type = self.resolve_type(option.param_type.as_deref())?;
            let declared = if option.flag {
                if param_type != ParameterType::Bool && option.param_type.is_some() {
                    return Err(CliError::Manifest(format!(
                        "command {}: flag-option {} must be bool, not {}",
                        self.name, option.name, param_type
                    )));
                }
                CommandOption::flag(&option.name)?
            } else {
                CommandOption::new(&option.name, param_type)?
            };
            command.add_option(declared)?;
        }

        Ok(command)
    }

    fn resolve_type(&self, name: Option<&str>) -> Result<ParameterType> {
        match name {
            None => Ok(ParameterType::String),
            Some(name) => name
                .parse()
                .map_err(|e| CliError::Manifest(format!("command {}: {}", self.name, e))),
        }
    }
}

/// Named handlers that manifests can refer to.
#[derive(Default, Clone)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Handler>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler, replacing any previous one with the same name.
    pub fn register<F>(&mut self, name: impl Into<String>, handler: F)
    where
        F: Fn(&[String], &OptionMap) -> anyhow::Result<String> + Send + Sync + 'static,
    {
        self.handlers.insert(name.into(), Arc::new(handler));
    }

    /// Shared handle to a registered handler
    pub fn get(&self, name: &str) -> Option<Handler> {
        self.handlers.get(name).cloned()
    }

    /// Names of all registered handlers, in no particular order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }
}
