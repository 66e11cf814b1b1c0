//! Error types for the rabbit command engine.

use thiserror::Error;

/// Errors raised while turning a raw token into a typed value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// The token is not valid text for the target type
    #[error("cannot convert {raw} to {target}")]
    Conversion { raw: String, target: &'static str },

    /// A type name outside the supported set
    #[error("unknown parameter type {0}")]
    UnknownType(String),
}

/// Main error type for registration, validation and dispatch.
#[derive(Debug, Error)]
pub enum CliError {
    /// Empty or malformed argument/option/command name
    #[error("{0}")]
    Name(String),

    /// A name registered twice on the same command or parser
    #[error("duplicate {kind} name {name}")]
    DuplicateName { kind: &'static str, name: String },

    /// Wrong number of positional arguments
    #[error("{} arguments: actual {actual}, expected {expected}", arity_word(.actual, .expected))]
    Arity { actual: usize, expected: usize },

    /// Option token not declared on the command
    #[error("invalid option {0}")]
    UnknownOption(String),

    /// A flag followed by a bare value
    #[error("flag-option {0} cannot have value")]
    FlagValue(String),

    /// A value option with nothing to consume
    #[error("\"{option}\" option requires a \"{expected}\" type argument")]
    MissingValue { option: String, expected: String },

    /// The value after an option failed coercion
    #[error("invalid option \"{option}\": {source}")]
    InvalidOptionValue {
        option: String,
        #[source]
        source: ConversionError,
    },

    #[error("no command provided")]
    NoCommand,

    #[error("unknown command {0}")]
    UnknownCommand(String),

    /// Errors returned by command handlers, passed through untouched
    #[error(transparent)]
    Handler(#[from] anyhow::Error),

    /// Invalid command manifest
    #[error("Invalid manifest: {0}")]
    Manifest(String),
}

impl CliError {
    pub(crate) fn duplicate(kind: &'static str, name: &str) -> Self {
        CliError::DuplicateName {
            kind,
            name: name.to_string(),
        }
    }
}

fn arity_word(actual: &usize, expected: &usize) -> &'static str {
    if actual < expected { "not enough" } else { "too many" }
}

/// Result type alias for rabbit operations
pub type Result<T> = std::result::Result<T, CliError>;

impl From<toml::de::Error> for CliError {
    fn from(err: toml::de::Error) -> Self {
        CliError::Manifest(err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Manifest(format!("IO error: {}", err))
    }
}
