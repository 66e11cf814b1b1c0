use super::{OPTION_PREFIX, ParameterType};
use crate::error::{CliError, Result};

/// A named, typed positional parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    name: String,
    param_type: ParameterType,
}

impl Argument {
    /// Declare a positional argument. The name must be non-empty and must not
    /// look like an option.
    pub fn new(name: impl Into<String>, param_type: ParameterType) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(CliError::Name("name must not be empty".to_string()));
        }
        if name.starts_with(OPTION_PREFIX) {
            return Err(CliError::Name("name must not start with '--'".to_string()));
        }
        Ok(Self { name, param_type })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn param_type(&self) -> ParameterType {
        self.param_type
    }
}
