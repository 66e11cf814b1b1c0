//! Built-in demonstration commands.
//!
//! These keep the binary usable without a manifest. The same handlers are
//! registered by name so a manifest can bind its own declarations to them.

use anyhow::bail;
use rabbit_core::{
    Argument, Command, CommandOption, HandlerRegistry, OptionMap, ParamValue, ParameterType,
    Parser,
};

/// `echo <text>`: print the argument back, optionally upper-cased.
pub fn echo(args: &[String], opts: &OptionMap) -> anyhow::Result<String> {
    let text = args.join(" ");
    if flag(opts, "upper") {
        return Ok(text.to_uppercase());
    }
    Ok(text)
}

/// `greet <message> [--to NAME] [--from NAME] [--shout]`
pub fn greet(args: &[String], opts: &OptionMap) -> anyhow::Result<String> {
    let mut line = args.join(" ");
    if let Some(to) = opts.get("to").and_then(ParamValue::as_str) {
        line = format!("{}, {}", line, to);
    }
    if let Some(from) = opts.get("from").and_then(ParamValue::as_str) {
        line = format!("{} (from {})", line, from);
    }
    if flag(opts, "shout") {
        line = line.to_uppercase();
    }
    Ok(line)
}

/// `sum --a N --b N`
pub fn sum(_args: &[String], opts: &OptionMap) -> anyhow::Result<String> {
    let a = opts.get("a").and_then(ParamValue::as_int).unwrap_or_default();
    let b = opts.get("b").and_then(ParamValue::as_int).unwrap_or_default();
    match a.checked_add(b) {
        Some(total) => Ok(total.to_string()),
        None => bail!("sum of {} and {} overflows", a, b),
    }
}

fn flag(opts: &OptionMap, key: &str) -> bool {
    opts.get(key).and_then(ParamValue::as_bool).unwrap_or(false)
}

pub fn registry() -> HandlerRegistry {
    let mut registry = HandlerRegistry::new();
    registry.register("echo", echo);
    registry.register("greet", greet);
    registry.register("sum", sum);
    registry
}

pub fn builtin_parser() -> rabbit_core::Result<Parser> {
    let echo = Command::new("echo", echo)
        .with_description("Print the text back")
        .with_argument(Argument::new("text", ParameterType::String)?)?
        .with_option(CommandOption::flag("--upper")?)?;

    let greet = Command::new("greet", greet)
        .with_description("Greet someone")
        .with_argument(Argument::new("message", ParameterType::String)?)?
        .with_option(CommandOption::new("--to", ParameterType::String)?)?
        .with_option(CommandOption::new("--from", ParameterType::String)?)?
        .with_option(CommandOption::flag("--shout")?)?;

    let sum = Command::new("sum", sum)
        .with_description("Add two integers")
        .with_option(CommandOption::new("--a", ParameterType::Int)?)?
        .with_option(CommandOption::new("--b", ParameterType::Int)?)?;

    Parser::new()
        .with_command(echo)?
        .with_command(greet)?
        .with_command(sum)
}
