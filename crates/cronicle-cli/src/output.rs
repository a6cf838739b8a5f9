//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use cronicle_rotator::{RunReport, TierReport};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a run report.
    pub fn format_report(&self, report: &RunReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_report_json(report),
            OutputFormat::Table => self.format_report_table(report),
            OutputFormat::Quiet => self.format_report_quiet(report),
        }
    }

    /// Format a report as JSON.
    fn format_report_json(&self, report: &RunReport) -> Result<String> {
        let tiers: serde_json::Map<String, serde_json::Value> = report
            .tiers
            .iter()
            .map(|(tier, t)| {
                let value = serde_json::json!({
                    "created": t.created,
                    "elapsed_days": t.elapsed_days,
                    "gated": t.gated,
                    "conflict": t.conflict,
                    "kept": t.kept,
                    "unlinked": t.unlinked,
                    "removed": t.removed,
                    "still_referenced": t.still_referenced,
                });
                (tier.as_str().to_string(), value)
            })
            .collect();

        let json = serde_json::json!({
            "file": report.file,
            "dry_run": report.dry_run,
            "tiers": tiers,
        });

        Ok(serde_json::to_string_pretty(&json)?)
    }

    /// Format a report as a table.
    fn format_report_table(&self, report: &RunReport) -> Result<String> {
        if report.is_noop() {
            return Ok(self.info("No tier enabled for this file"));
        }

        let mut builder = Builder::default();
        builder.push_record(["Tier", "Archive", "Kept", "Unlinked", "Removed", "Spared"]);

        for (tier, t) in &report.tiers {
            builder.push_record([
                tier.as_str().to_string(),
                archive_status(t),
                t.kept.to_string(),
                t.unlinked.len().to_string(),
                t.removed.len().to_string(),
                t.still_referenced.len().to_string(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        let mut output = table.to_string();
        output.push('\n');
        output.push_str(&self.success(&format!(
            "{} link(s) created, {} unlinked, {} removed",
            report.created().len(),
            report.total_unlinked(),
            report.total_removed()
        )));
        if report.dry_run {
            output.push('\n');
            output.push_str(&self.warning("Dry run: nothing was written"));
        }
        Ok(output)
    }

    /// Format a report in quiet mode (created links only).
    fn format_report_quiet(&self, report: &RunReport) -> Result<String> {
        let links: Vec<String> = report
            .created()
            .iter()
            .map(|link| link.display().to_string())
            .collect();
        Ok(links.join("\n"))
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

/// Short description of what happened to a tier's new archive.
fn archive_status(t: &TierReport) -> String {
    if t.created.is_some() {
        "created".to_string()
    } else if t.conflict.is_some() {
        "conflict".to_string()
    } else if t.gated {
        format!("too soon ({}d)", t.elapsed_days.unwrap_or(0))
    } else {
        "-".to_string()
    }
}
