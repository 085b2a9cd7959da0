//! Lookup options and their defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::types::OneOrMany;
use crate::{DnsblError, Result};

/// Default per-query timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Default nameserver (OpenDNS)
pub const DEFAULT_SERVER: &str = "208.67.220.220";

/// Default number of simultaneous queries in batch mode
pub const DEFAULT_CONCURRENCY: usize = 64;

/// Options for a single lookup or a batch.
///
/// Missing keys in a serialized document take their defaults, so a partial
/// TOML table is merged over [`LookupOptions::default`]:
///
/// ```rust
/// use dnsbl_core::LookupOptions;
///
/// let opts: LookupOptions = toml::from_str("include_txt = true\nservers = \"1.1.1.1\"").unwrap();
/// assert!(opts.include_txt);
/// assert_eq!(opts.servers, vec!["1.1.1.1".to_string()]);
/// assert_eq!(opts.timeout_ms, 5000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupOptions {
    /// Maximum wait per query before it is forced negative
    pub timeout_ms: u64,

    /// Nameservers used for resolution (`ip` or `ip:port`)
    #[serde(deserialize_with = "OneOrMany::deserialize_vec")]
    pub servers: Vec<String>,

    /// Maximum in-flight queries in batch mode
    pub concurrency: usize,

    /// Also fetch TXT records alongside the listed flag
    pub include_txt: bool,
}

impl Default for LookupOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            servers: vec![DEFAULT_SERVER.to_string()],
            concurrency: DEFAULT_CONCURRENCY,
            include_txt: false,
        }
    }
}

impl LookupOptions {
    /// Create options with the default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-query timeout in milliseconds
    #[must_use]
    pub fn timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set the nameservers; a single server is accepted as well as a list
    #[must_use]
    pub fn servers(mut self, servers: impl Into<OneOrMany>) -> Self {
        self.servers = servers.into().into_vec();
        self
    }

    /// Set the batch concurrency limit
    #[must_use]
    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Request TXT records alongside the listed flag
    #[must_use]
    pub fn include_txt(mut self, include_txt: bool) -> Self {
        self.include_txt = include_txt;
        self
    }

    /// Per-query timeout as a [`Duration`]
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Check that the options can drive a lookup.
    pub fn validate(&self) -> Result<()> {
        if self.timeout_ms == 0 {
            return Err(DnsblError::Config("timeout_ms must be greater than 0".into()));
        }
        if self.concurrency == 0 {
            return Err(DnsblError::Config("concurrency must be greater than 0".into()));
        }
        if self.servers.iter().all(|s| s.trim().is_empty()) {
            return Err(DnsblError::Config("at least one nameserver is required".into()));
        }
        Ok(())
    }

    /// Load options from a TOML file, falling back to defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }
}
