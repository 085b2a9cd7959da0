//! Command implementations.

pub mod batch;
pub mod check;

use dnsbl::{DnsblClient, LookupOptions};

use crate::output::OutputFormat;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Merged lookup options
    pub options: LookupOptions,

    /// Output format
    pub output_format: OutputFormat,

    /// Print per-query status instead of the plain result
    pub detailed: bool,
}

impl Context {
    /// Create a client with the merged options.
    pub fn client(&self) -> DnsblClient {
        DnsblClient::with_options(self.options.clone())
    }
}
