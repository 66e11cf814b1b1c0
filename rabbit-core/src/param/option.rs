use super::{OPTION_PREFIX, ParameterType};
use crate::error::{CliError, Result};

/// A `--name` parameter, either carrying one value or acting as a flag.
///
/// Flags are always [`ParameterType::Bool`], never take a value token and
/// default to `false` when absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOption {
    name: String,
    param_type: ParameterType,
    is_flag: bool,
}

impl CommandOption {
    /// Declare an option that consumes the following token as its value.
    pub fn new(name: impl Into<String>, param_type: ParameterType) -> Result<Self> {
        let name = validate_name(name.into())?;
        Ok(Self {
            name,
            param_type,
            is_flag: false,
        })
    }

    /// Declare a value-less boolean flag.
    pub fn flag(name: impl Into<String>) -> Result<Self> {
        let name = validate_name(name.into())?;
        Ok(Self {
            name,
            param_type: ParameterType::Bool,
            is_flag: true,
        })
    }

    /// Full name including the `--` prefix, as typed on the command line
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name without the `--` prefix; handlers look options up by this key
    pub fn key(&self) -> &str {
        strip_prefix(&self.name)
    }

    pub fn param_type(&self) -> ParameterType {
        self.param_type
    }

    pub fn is_flag(&self) -> bool {
        self.is_flag
    }
}

fn validate_name(name: String) -> Result<String> {
    if name.is_empty() {
        return Err(CliError::Name("name must not be empty".to_string()));
    }
    if !name.starts_with(OPTION_PREFIX) {
        return Err(CliError::Name("name must start with '--'".to_string()));
    }
    Ok(name)
}

fn strip_prefix(token: &str) -> &str {
    token.strip_prefix(OPTION_PREFIX).unwrap_or(token)
}
