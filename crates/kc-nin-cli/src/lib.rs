//! # kc-nin-cli
//!
//! Dry-run tooling for the identity-number auto-link authenticator.
//!
//! This crate provides command-line utilities for:
//! - Evaluating a session snapshot against a directory fixture
//! - Showing the authenticator factory metadata
//! - Masking identity numbers the way the authenticator logs them

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(clippy::uninlined_format_args)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod output;

pub use cli::Cli;
pub use error::{CliError, CliResult};
