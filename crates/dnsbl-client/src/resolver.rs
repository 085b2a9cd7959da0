//! Resolver handle abstraction.
//!
//! A handle is bound to a fixed set of nameservers and is owned by exactly
//! one query, so cancelling it never touches another query's requests.

use async_trait::async_trait;
use dnsbl_core::Result;
use std::net::Ipv4Addr;
use thiserror::Error;

/// Why a single A or TXT resolution produced no answer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveFailure {
    /// NXDOMAIN, or the name exists without records of this type
    #[error("no records found")]
    NotFound,

    /// The handle was cancelled while the request was in flight
    #[error("request cancelled")]
    Cancelled,

    /// SERVFAIL, refused, unreachable server and everything else
    #[error("{0}")]
    Failed(String),
}

/// A resolver bound to specific nameservers.
#[async_trait]
pub trait ResolverHandle: Send + Sync {
    /// Resolve the IPv4 addresses of `name`
    async fn resolve_a(&self, name: &str) -> std::result::Result<Vec<Ipv4Addr>, ResolveFailure>;

    /// Resolve the TXT records of `name`, one string per record
    async fn resolve_txt(&self, name: &str) -> std::result::Result<Vec<String>, ResolveFailure>;

    /// Abort every request in flight on this handle
    fn cancel(&self);
}

/// Builds one fresh [`ResolverHandle`] per query.
pub trait ResolverFactory: Send + Sync {
    /// Handle type produced by this factory
    type Handle: ResolverHandle + 'static;

    /// Create a handle bound to `servers`
    fn create(&self, servers: &[String]) -> Result<Self::Handle>;
}
