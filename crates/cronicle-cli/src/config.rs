//! Configuration management for the CLI.
//!
//! The config file lists policies in order; the first whose pattern matches
//! the archived file wins.
//!
//! ```toml
//! [settings]
//! color = true
//! format = "table"
//!
//! [[policy]]
//! pattern = "/srv/backups/*.tar"
//! daily = 7
//! weekly = 4
//! monthly = 12
//! remove = true
//! ```

use crate::error::{CliError, Result};
use cronicle_domain::Policy;
use globset::GlobBuilder;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Policies, tried in order
    #[serde(default, rename = "policy")]
    pub policies: Vec<PolicyEntry>,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

/// One configured policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyEntry {
    /// Glob of the files this entry applies to; relative patterns are taken
    /// from the archived file's directory
    pub pattern: String,

    /// Archives kept in `daily/`
    #[serde(default)]
    pub daily: usize,

    /// Archives kept in `weekly/`
    #[serde(default)]
    pub weekly: usize,

    /// Archives kept in `monthly/`
    #[serde(default)]
    pub monthly: usize,

    /// Archives kept in `yearly/`
    #[serde(default)]
    pub yearly: usize,

    /// Delete evicted targets no other tier links to
    #[serde(default)]
    pub remove: bool,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let dir = dirs::config_dir()
            .ok_or_else(|| CliError::Config("Could not find configuration directory".into()))?;
        Ok(dir.join("cronicle").join("config.toml"))
    }

    /// Load configuration from `path`; a missing file is an empty configuration.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No configuration at {}", path.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Policy of the first entry matching `file` (an absolute path).
    pub fn find_policy(&self, file: &Path) -> Result<Option<Policy>> {
        for entry in &self.policies {
            if entry.matches(file)? {
                return Ok(Some(entry.to_policy()));
            }
        }
        Ok(None)
    }
}

impl PolicyEntry {
    /// Pattern as an absolute glob for files in `file`'s directory.
    fn absolute_pattern(&self, file: &Path) -> PathBuf {
        let pattern = Path::new(&self.pattern);
        match file.parent() {
            Some(dir) if pattern.is_relative() => dir.join(pattern),
            _ => pattern.to_path_buf(),
        }
    }

    /// Whether this entry applies to `file`.
    pub fn matches(&self, file: &Path) -> Result<bool> {
        let pattern = self.absolute_pattern(file);
        let glob = GlobBuilder::new(&pattern.to_string_lossy())
            .literal_separator(true)
            .build()
            .map_err(|e| CliError::Config(format!("Invalid pattern '{}': {}", self.pattern, e)))?;
        Ok(glob.compile_matcher().is_match(file))
    }

    /// Resolve into a policy; links are grouped by the pattern's last component.
    pub fn to_policy(&self) -> Policy {
        let group = Path::new(&self.pattern)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "*".to_string());

        Policy {
            pattern: group,
            daily: self.daily,
            weekly: self.weekly,
            monthly: self.monthly,
            yearly: self.yearly,
            remove: self.remove,
            dry_run: false,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}
