//! CLI argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::OutputFormat;

/// NiN auto-link CLI - dry-run tooling for the identity-number auto-link authenticator.
#[derive(Debug, Parser)]
#[command(name = "kc-nin")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Auto-link settings file (TOML).
    #[arg(short, long, env = "KC_NIN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format.
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Enable debug logging (identity numbers stay masked).
    #[arg(short, long)]
    pub verbose: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Evaluate a session snapshot against a directory fixture.
    Evaluate(EvaluateArgs),

    /// Show the authenticator factory metadata.
    Describe,

    /// Print the masked form of an identity number.
    Mask(MaskArgs),
}

/// Evaluate arguments.
#[derive(Debug, Args)]
pub struct EvaluateArgs {
    /// Session snapshot (JSON).
    #[arg(short, long)]
    pub session: PathBuf,

    /// Directory fixture (JSON).
    #[arg(short, long)]
    pub directory: PathBuf,
}

/// Mask arguments.
#[derive(Debug, Args)]
pub struct MaskArgs {
    /// Identity number to mask.
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_evaluate() {
        let cli = Cli::try_parse_from([
            "kc-nin",
            "-o",
            "json",
            "evaluate",
            "--session",
            "session.json",
            "--directory",
            "directory.json",
        ])
        .unwrap();

        assert_eq!(cli.output, OutputFormat::Json);
        match cli.command {
            Command::Evaluate(args) => {
                assert_eq!(args.session, PathBuf::from("session.json"));
                assert_eq!(args.directory, PathBuf::from("directory.json"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn evaluate_requires_fixtures() {
        assert!(Cli::try_parse_from(["kc-nin", "evaluate"]).is_err());
    }

    #[test]
    fn parses_mask() {
        let cli = Cli::try_parse_from(["kc-nin", "mask", "12345678901"]).unwrap();
        assert_eq!(cli.output, OutputFormat::Text);
        assert!(matches!(cli.command, Command::Mask(MaskArgs { value }) if value == "12345678901"));
    }
}
