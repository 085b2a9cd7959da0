//! Core types and options for DNSBL lookups.
//!
//! This crate provides the foundational pieces shared by the lookup client
//! and the command-line front end:
//!
//! - **Types**: query targets, lookup results, batch items and query reports
//! - **Options**: [`LookupOptions`] with the documented defaults
//! - **Reverse names**: the [`ptr`] formatter that turns an address into the
//!   octet-reversed label prefix queried under a blacklist zone
//! - **Errors**: [`DnsblError`] and the [`Result`] alias
//!
//! # Example
//!
//! ```rust
//! use dnsbl_core::{ptr, QueryTarget};
//!
//! let target = QueryTarget::new("127.0.0.2", "zen.spamhaus.org");
//! assert_eq!(target.query_name().unwrap(), "2.0.0.127.zen.spamhaus.org");
//! assert_eq!(ptr::reverse_fragment("1.2.3.4").unwrap(), "4.3.2.1");
//! ```

#![doc(html_root_url = "https://docs.rs/dnsbl-core/2.0.0")]

mod error;
mod options;
pub mod ptr;
pub mod types;

pub use error::{DnsblError, Result};
pub use options::{LookupOptions, DEFAULT_CONCURRENCY, DEFAULT_SERVER, DEFAULT_TIMEOUT_MS};
pub use types::*;
