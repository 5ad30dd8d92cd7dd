//! Validate JSON documents against scenario-aware TOML rule declarations.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use scenarios::check::{check_document, schema_options};
use scenarios::{exit_codes, logging};

#[derive(Parser)]
#[command(
    name = "scenarios",
    version,
    about = "Scenario-gated validation of JSON documents"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate a document and print its errors keyed by path.
    Check {
        /// TOML rule declarations.
        #[arg(long)]
        schema: PathBuf,
        /// JSON document to validate.
        #[arg(long)]
        data: PathBuf,
        /// Active scenario; rules scoped to other scenarios are skipped.
        #[arg(long)]
        scenario: Option<String>,
    },
    /// Print the option dump of every declared rule.
    Options {
        #[arg(long)]
        schema: PathBuf,
    },
}

fn main() {
    logging::init();
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{err:#}");
            std::process::exit(exit_codes::ERROR);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    match cli.command {
        Command::Check {
            schema,
            data,
            scenario,
        } => {
            let result = check_document(&schema, &data, scenario.as_deref())?;
            print_json(&result.error_messages_indexed_by_path())?;
            Ok(if result.is_valid() {
                exit_codes::OK
            } else {
                exit_codes::INVALID
            })
        }
        Command::Options { schema } => {
            print_json(&schema_options(&schema)?)?;
            Ok(exit_codes::OK)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let payload = serde_json::to_string_pretty(value).context("serialize json")?;
    println!("{payload}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_check_without_scenario() {
        let cli = Cli::parse_from(["scenarios", "check", "--schema", "s.toml", "--data", "d.json"]);
        assert!(matches!(
            cli.command,
            Command::Check { scenario: None, .. }
        ));
    }

    #[test]
    fn parse_check_with_scenario() {
        let cli = Cli::parse_from([
            "scenarios",
            "check",
            "--schema",
            "s.toml",
            "--data",
            "d.json",
            "--scenario",
            "login",
        ]);
        let Command::Check { scenario, .. } = cli.command else {
            panic!("expected check");
        };
        assert_eq!(scenario.as_deref(), Some("login"));
    }

    #[test]
    fn parse_options() {
        let cli = Cli::parse_from(["scenarios", "options", "--schema", "s.toml"]);
        assert!(matches!(cli.command, Command::Options { .. }));
    }
}
