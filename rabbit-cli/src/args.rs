use std::path::PathBuf;
use clap::Parser;

/// Command line arguments for the rabbit CLI
#[derive(Parser, Debug)]
#[command(author, version, about = "Rabbit command runner")]
pub struct Cli {
    /// Load command declarations from a TOML manifest instead of the built-in set
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// List available commands and exit
    #[arg(long, default_value_t = false)]
    pub list: bool,

    /// Output raw JSON
    #[arg(long, default_value_t = false)]
    pub raw: bool,

    /// Disable colored output
    #[arg(long, default_value_t = false)]
    pub no_color: bool,

    /// Enable verbose debug output
    #[arg(long, default_value_t = false)]
    pub debug: bool,

    /// Suppress all output except errors
    #[arg(long, default_value_t = false)]
    pub quiet: bool,

    /// Command name followed by its arguments and options
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub tokens: Vec<String>,
}

impl Cli {
    pub fn log_level(&self) -> LogLevel {
        if self.debug {
            LogLevel::Debug
        } else if self.quiet {
            LogLevel::Quiet
        } else {
            LogLevel::Normal
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Normal,
    Quiet,
}

impl LogLevel {
    pub fn filter(&self) -> &'static str {
        match self {
            LogLevel::Debug => "rabbit=debug,rabbit_core=debug",
            LogLevel::Normal => "warn",
            LogLevel::Quiet => "error",
        }
    }
}
