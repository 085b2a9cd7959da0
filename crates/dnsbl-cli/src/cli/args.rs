//! Command-line argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use dnsbl::LookupOptions;
use std::path::PathBuf;

use crate::output::OutputFormat;

/// Check IP addresses against DNS-based blacklists
///
/// Every query is sent straight to the configured nameservers. Timeouts,
/// NXDOMAIN and unreachable servers all read as "not listed"; pass
/// --detailed to see which one it was.
#[derive(Parser, Debug)]
#[command(name = "dnsbl-check")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Config file (default: platform config dir)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Per-query timeout in milliseconds
    #[arg(short = 't', long, global = true, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Nameserver to query (repeatable, ip or ip:port)
    #[arg(short = 's', long = "server", global = true, value_delimiter = ',')]
    pub servers: Vec<String>,

    /// Maximum simultaneous queries in batch mode
    #[arg(short = 'c', long, global = true)]
    pub concurrency: Option<usize>,

    /// Also fetch TXT records
    #[arg(long, global = true)]
    pub txt: bool,

    /// Show why each result is negative (timeout, NXDOMAIN, failure)
    #[arg(long, global = true)]
    pub detailed: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Increase verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Apply command-line overrides on top of `base`.
    #[must_use]
    pub fn lookup_options(&self, base: LookupOptions) -> LookupOptions {
        let mut options = base;

        if let Some(timeout_ms) = self.timeout_ms {
            options = options.timeout_ms(timeout_ms);
        }
        if !self.servers.is_empty() {
            options = options.servers(self.servers.clone());
        }
        if let Some(concurrency) = self.concurrency {
            options = options.concurrency(concurrency);
        }
        if self.txt {
            options = options.include_txt(true);
        }

        options
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check one address against one blacklist
    Check(CheckArgs),

    /// Check every address against every blacklist
    Batch(BatchArgs),
}

// ============================================================================
// Check command
// ============================================================================

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// IP address to check
    pub address: String,

    /// Blacklist zone (e.g., zen.spamhaus.org)
    pub blacklist: String,
}

// ============================================================================
// Batch command
// ============================================================================

#[derive(Args, Debug)]
pub struct BatchArgs {
    /// IP addresses to check (repeatable or comma separated)
    #[arg(short = 'a', long = "address", required = true, value_delimiter = ',')]
    pub addresses: Vec<String>,

    /// Blacklist zones (repeatable or comma separated)
    #[arg(short = 'l', long = "list", required = true, value_delimiter = ',')]
    pub blacklists: Vec<String>,
}
