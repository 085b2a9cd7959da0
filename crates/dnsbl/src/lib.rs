//! Check IP addresses against DNS-based blacklists (DNSBLs).
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use dnsbl::LookupOptions;
//!
//! #[tokio::main]
//! async fn main() -> dnsbl::Result<()> {
//!     // Single lookup with the defaults (OpenDNS, 5s timeout)
//!     let listed = dnsbl::lookup("127.0.0.2", "zen.spamhaus.org", None).await?;
//!     println!("listed: {}", listed.is_listed());
//!
//!     // Every address against every list, 16 queries at a time
//!     let options = LookupOptions::new().concurrency(16).include_txt(true);
//!     let items = dnsbl::batch(
//!         ["127.0.0.2", "192.0.2.1"],
//!         ["zen.spamhaus.org", "bl.spamcop.net"],
//!         Some(options),
//!     )
//!     .await?;
//!
//!     for item in items {
//!         println!("{} {} {} {:?}", item.address, item.blacklist, item.listed, item.txt);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! Timeouts, unreachable nameservers and NXDOMAIN all read as "not listed".
//! Use [`DnsblClient::inspect`] or [`DnsblClient::batch_reports`] to see which
//! of those it was.

#![doc(html_root_url = "https://docs.rs/dnsbl/2.0.0")]

// Re-export core types
pub use dnsbl_core::*;

// Re-export client
pub use dnsbl_client::{
    batch, lookup, parse_server, DnsblClient, DnsblClientBuilder, HickoryFactory, HickoryHandle,
    ResolveFailure, ResolverFactory, ResolverHandle,
};

// Re-export runtime for convenience
pub use serde;
pub use serde_json;
pub use tokio;
