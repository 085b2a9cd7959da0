//! # dnsbl-cli
//!
//! Command-line front end for DNSBL lookups.
//!
//! ## Features
//!
//! - **Single checks**: `dnsbl-check check 127.0.0.2 zen.spamhaus.org`
//! - **Batches**: every address against every list with bounded concurrency
//! - **Config file**: lookup defaults in `config.toml`, overridden by flags
//! - **Multiple output formats**: pretty, JSON, CSV

pub mod cli;
pub mod config;
pub mod output;

pub use cli::run;
