//! Concurrent DNSBL lookups.
//!
//! This crate provides [`DnsblClient`] and the two free functions [`lookup`]
//! and [`batch`]. Every query owns a fresh resolver handle bound to the
//! configured nameservers and races its resolution against a timer; a query
//! that loses the race cancels its own handle and reports "not listed".
//!
//! ```rust,ignore
//! use dnsbl_client::{batch, lookup, LookupOptions};
//!
//! let listed = lookup("127.0.0.2", "zen.spamhaus.org", None).await?;
//! assert!(listed.is_listed());
//!
//! let items = batch(["1.2.3.4", "5.6.7.8"], "zen.spamhaus.org", Some(LookupOptions::new().concurrency(8))).await?;
//! ```

#![doc(html_root_url = "https://docs.rs/dnsbl-client/2.0.0")]

mod client;
mod executor;
mod hickory;
mod resolver;

#[cfg(test)]
mod stub;

pub use client::{DnsblClient, DnsblClientBuilder};
pub use hickory::{parse_server, HickoryFactory, HickoryHandle};
pub use resolver::{ResolveFailure, ResolverFactory, ResolverHandle};

pub use dnsbl_core::{
    BatchItem, DnsblError, LookupOptions, LookupResult, OneOrMany, QueryReport, QueryStatus,
    QueryTarget, Result,
};

/// Check one address against one blacklist.
///
/// `None` options means the defaults: 5s timeout, OpenDNS, no TXT records.
pub async fn lookup(
    address: &str,
    blacklist: &str,
    options: Option<LookupOptions>,
) -> Result<LookupResult> {
    DnsblClient::with_options(options.unwrap_or_default())
        .lookup(address, blacklist)
        .await
}

/// Check every address against every blacklist, at most
/// `options.concurrency` queries at a time.
///
/// Items come back address-major, blacklist-minor, regardless of which
/// query finished first.
pub async fn batch(
    addresses: impl Into<OneOrMany>,
    blacklists: impl Into<OneOrMany>,
    options: Option<LookupOptions>,
) -> Result<Vec<BatchItem>> {
    DnsblClient::with_options(options.unwrap_or_default())
        .batch(addresses, blacklists)
        .await
}
