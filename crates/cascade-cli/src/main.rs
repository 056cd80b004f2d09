//! Cascade CLI - invoke and check formula functions

mod cases;

use anyhow::{bail, Context, Result};
use cascade::prelude::*;
use cascade::builtin_registry;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "cascade")]
#[command(author, version, about = "Invoke and check validated formula functions")]
struct Cli {
    /// Log pipeline activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Invoke a function and print its output
    Call {
        /// Function name (case-insensitive)
        function: String,

        /// Positional arguments as literals; an empty argument is omitted
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,

        /// Named argument as name=value (repeatable)
        #[arg(short = 'a', long = "arg", value_name = "NAME=VALUE")]
        named: Vec<String>,

        /// Print the whole invocation result as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the available functions
    List,

    /// Run a CSV file of test cases
    Check {
        /// Case file with header `function,expected,arg1,...`
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;
    install_panic_hook();

    match cli.command {
        Commands::Call {
            function,
            args,
            named,
            json,
        } => call(&function, &args, &named, json),
        Commands::List => list(),
        Commands::Check { input } => check(&input),
    }
}

fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
    Ok(())
}

/// Send panic reports to the debug log instead of stderr
///
/// The pipeline catches panics in validators and compute logic and reports
/// them (and logs a warning); the default hook would also print each one
/// with a backtrace.
fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        debug!(%info, "panic");
    }));
}

/// Build raw arguments from command-line tokens
fn raw_arguments(args: &[String], named: &[String]) -> Result<RawArguments> {
    if !named.is_empty() {
        if !args.is_empty() {
            bail!("positional and named arguments cannot be combined");
        }
        let pairs = named
            .iter()
            .map(|pair| {
                let (name, value) = pair
                    .split_once('=')
                    .with_context(|| format!("Expected NAME=VALUE, got '{}'", pair))?;
                Ok((name.trim().to_string(), ArgValue::parse(value)))
            })
            .collect::<Result<Vec<_>>>()?;
        return Ok(RawArguments::Named(pairs));
    }
    Ok(RawArguments::Positional(
        args.iter().map(|token| ArgValue::parse(token)).collect(),
    ))
}

fn call(function: &str, args: &[String], named: &[String], json: bool) -> Result<()> {
    let registry = builtin_registry()?;
    let raw = raw_arguments(args, named)?;
    let result = registry
        .call(function, raw)
        .with_context(|| format!("Failed to invoke '{}'", function))?;

    if json {
        let text = serde_json::to_string_pretty(&result).context("Failed to serialize result")?;
        println!("{}", text);
    } else {
        println!("{}", result.output);
    }
    Ok(())
}

fn list() -> Result<()> {
    let registry = builtin_registry()?;
    for def in registry.functions() {
        match def.description() {
            Some(description) => println!("{}\t{}", def.signature(), description),
            None => println!("{}", def.signature()),
        }
    }
    Ok(())
}

fn check(input: &PathBuf) -> Result<()> {
    let registry = builtin_registry()?;
    let cases = cases::read_cases(input)?;
    let failures = cases::run_cases(registry, &cases);

    for failure in &failures {
        println!("{}", failure);
    }
    eprintln!(
        "{} cases, {} passed, {} failed",
        cases.len(),
        cases.len() - failures.len(),
        failures.len()
    );

    if !failures.is_empty() {
        bail!("{} of {} cases failed", failures.len(), cases.len());
    }
    Ok(())
}
