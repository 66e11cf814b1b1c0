use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser as _;
use colored::Colorize;
use serde_json::json;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use rabbit_core::{CliError, CommandManifest, Parser};

mod args;
mod handlers;

use args::Cli;

/// What an invocation produced: text for stdout, or a report for stderr.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Outcome {
    Success(String),
    Failure(String),
}

impl Outcome {
    fn exit_status(&self) -> u8 {
        match self {
            Outcome::Success(_) => 0,
            Outcome::Failure(_) => 1,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level().filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let outcome = match load_parser(&cli).and_then(|parser| run(&parser, &cli)) {
        Ok(outcome) => outcome,
        Err(e) => Outcome::Failure(format!("{} {:#}", "error:".red().bold(), e)),
    };

    match &outcome {
        Outcome::Success(text) if !text.is_empty() => println!("{}", text),
        Outcome::Success(_) => {}
        Outcome::Failure(report) => eprintln!("{}", report),
    }
    ExitCode::from(outcome.exit_status())
}

fn run(parser: &Parser, cli: &Cli) -> Result<Outcome> {
    if cli.list {
        return Ok(Outcome::Success(parser.usage()));
    }

    match parser.execute(cli.tokens.as_slice()) {
        Ok(output) => Ok(Outcome::Success(render_output(cli, &output)?)),
        Err(err) => Ok(Outcome::Failure(render_error(parser, cli, &err))),
    }
}

fn load_parser(cli: &Cli) -> Result<Parser> {
    match &cli.manifest {
        Some(path) => {
            debug!(path = %path.display(), "using command manifest");
            let manifest = CommandManifest::load(path)
                .with_context(|| format!("Failed to load manifest {}", path.display()))?;
            Ok(manifest.build(&handlers::registry())?)
        }
        None => Ok(handlers::builtin_parser()?),
    }
}

fn render_output(cli: &Cli, output: &str) -> Result<String> {
    if cli.raw {
        let response = json!({
            "command": cli.tokens.first(),
            "output": output,
        });
        return Ok(serde_json::to_string(&response)?);
    }
    Ok(output.to_string())
}

/// A failed invocation together with the most useful usage text.
fn render_error(parser: &Parser, cli: &Cli, err: &CliError) -> String {
    if cli.raw {
        let response = json!({
            "command": cli.tokens.first(),
            "error": err.to_string(),
        });
        return response.to_string();
    }

    let mut report = format!("{} {}", "error:".red().bold(), err);
    let usage = match err {
        CliError::NoCommand | CliError::UnknownCommand(_) => Some(parser.usage()),
        CliError::Handler(_) => None,
        _ => cli
            .tokens
            .first()
            .and_then(|name| parser.command(name))
            .map(|command| command.usage()),
    };
    if let Some(usage) = usage {
        report.push('\n');
        report.push_str(&usage.dimmed().to_string());
    }
    report
}
