//! Rotate command implementation.

use crate::cli::Cli;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use cronicle_rotator::{RunReport, Rotator};
use std::path::Path;

/// Execute the rotation of `cli.file` with the first matching policy.
///
/// Fails with [`CliError::NoMatchingPolicy`] when no configured pattern
/// matches the file. A policy whose tiers are all disabled is a successful
/// run that does nothing.
pub fn execute_rotate(
    cli: &Cli,
    config: &Config,
    config_path: &Path,
    formatter: &Formatter,
) -> Result<RunReport> {
    if !cli.file.exists() {
        return Err(CliError::InvalidInput(format!(
            "File '{}' does not exist",
            cli.file.display()
        )));
    }
    let file = std::path::absolute(&cli.file)?;

    let mut policy = config
        .find_policy(&file)?
        .ok_or_else(|| CliError::NoMatchingPolicy {
            file: file.clone(),
            config_path: config_path.to_path_buf(),
        })?;
    policy.remove |= cli.remove;
    policy.dry_run = cli.is_dry_run();
    tracing::debug!("Policy is {:?}", policy);

    let report = Rotator::new(policy)?.run(&file)?;

    println!("{}", formatter.format_report(&report)?);
    if report.total_conflicts() > 0 {
        eprintln!(
            "{}",
            formatter.error(&format!(
                "{} tier(s) skipped: archive path already taken",
                report.total_conflicts()
            ))
        );
    }

    Ok(report)
}
