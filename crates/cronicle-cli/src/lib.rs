//! Cronicle CLI library.
//!
//! This library provides the command-line front end for Cronicle:
//! argument parsing, configuration loading and policy matching, logging
//! setup and output formatting around the rotation engine.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;

pub use cli::Cli;
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
