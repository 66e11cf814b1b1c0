//! Parameter declarations and typed values.
//!
//! Positional [`Argument`]s and `--name` [`CommandOption`]s are declared once
//! when a command is registered. Raw tokens are turned into [`ParamValue`]s
//! according to the declared [`ParameterType`].

mod argument;
mod option;
mod parameter_type;
mod value;

pub use argument::Argument;
pub use option::CommandOption;
pub use parameter_type::ParameterType;
pub use value::ParamValue;

/// Prefix that marks a token as an option
pub const OPTION_PREFIX: &str = "--";

/// Whether a token is positional, i.e. not prefixed with `--`
pub fn is_positional(token: &str) -> bool {
    !token.starts_with(OPTION_PREFIX)
}
