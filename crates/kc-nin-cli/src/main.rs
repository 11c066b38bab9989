//! # NiN auto-link CLI
//!
//! Dry-run evaluation of the identity-number auto-link authenticator.

#![forbid(unsafe_code)]

use clap::Parser;
use kc_nin_cli::{
    cli::{Cli, Command},
    commands::{run_describe, run_evaluate, run_mask},
    config::load_config,
    output::error,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        )
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match load_config(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            error(&format!("Failed to load configuration: {}", e));
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Command::Evaluate(args) => run_evaluate(args, config, cli.output).await,
        Command::Describe => run_describe(config, cli.output),
        Command::Mask(args) => run_mask(&args, cli.output),
    };

    if let Err(e) = result {
        error(&e.to_string());
        std::process::exit(1);
    }
}
