//! Configuration management.

use anyhow::{Context as _, Result};
use directories::ProjectDirs;
use dnsbl::LookupOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::output::OutputFormat;

/// CLI configuration.
///
/// ```toml
/// output_format = "json"
///
/// [lookup]
/// timeout_ms = 2000
/// servers = ["1.1.1.1", "9.9.9.9"]
/// concurrency = 32
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Lookup defaults; missing keys fall back to the library defaults.
    #[serde(default)]
    pub lookup: LookupOptions,

    /// Default output format.
    pub output_format: Option<OutputFormat>,
}

impl Config {
    /// Get the config file path.
    pub fn path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("org", "dnsbl", "dnsbl-check")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Load configuration from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load configuration from `path`; a missing file gives the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Self =
            toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;

        Ok(config)
    }
}
