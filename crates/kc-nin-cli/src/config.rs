//! CLI configuration.

use std::path::Path;

use kc_nin_autolink::AutoLinkConfig;
use serde::{Deserialize, Serialize};

use crate::error::{CliError, CliResult};

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output.
    #[default]
    Text,
    /// JSON output.
    Json,
}

/// Loads auto-link settings, falling back to the defaults without a file.
pub fn load_config(path: Option<&Path>) -> CliResult<AutoLinkConfig> {
    let Some(path) = path else {
        return Ok(AutoLinkConfig::default());
    };

    let content = std::fs::read_to_string(path).map_err(|e| {
        CliError::Config(format!("failed to read {}: {e}", path.display()))
    })?;
    Ok(AutoLinkConfig::from_toml(&content)?)
}
