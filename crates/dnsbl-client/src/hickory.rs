//! Resolver handles backed by `hickory-resolver`.

use async_trait::async_trait;
use dnsbl_core::{DnsblError, LookupOptions, Result};
use hickory_resolver::config::{NameServerConfigGroup, ResolverConfig, ResolverOpts};
use hickory_resolver::name_server::TokioConnectionProvider;
use hickory_resolver::{ResolveError, TokioResolver};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::resolver::{ResolveFailure, ResolverFactory, ResolverHandle};

/// Standard DNS port, used when a server is given without one
const DNS_PORT: u16 = 53;

/// Parse a nameserver given as `ip`, `ip:port` or `[v6]:port`.
pub fn parse_server(server: &str) -> Result<SocketAddr> {
    let server = server.trim();

    if let Ok(addr) = server.parse::<SocketAddr>() {
        return Ok(addr);
    }

    server
        .parse::<IpAddr>()
        .map(|ip| SocketAddr::new(ip, DNS_PORT))
        .map_err(|_| DnsblError::Config(format!("invalid nameserver address: {server:?}")))
}

/// Creates [`HickoryHandle`]s that talk only to the configured nameservers.
#[derive(Debug, Clone, Default)]
pub struct HickoryFactory {
    opts: ResolverOpts,
}

impl HickoryFactory {
    /// Create a factory with default resolver options
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a factory whose per-request timeout matches the query timeout
    #[must_use]
    pub fn from_options(options: &LookupOptions) -> Self {
        let mut opts = ResolverOpts::default();
        opts.timeout = options.timeout();
        Self { opts }
    }
}

impl ResolverFactory for HickoryFactory {
    type Handle = HickoryHandle;

    fn create(&self, servers: &[String]) -> Result<HickoryHandle> {
        let addrs = servers
            .iter()
            .filter(|s| !s.trim().is_empty())
            .map(|s| parse_server(s))
            .collect::<Result<Vec<_>>>()?;

        if addrs.is_empty() {
            return Err(DnsblError::Resolver("no nameservers configured".into()));
        }

        let name_servers: Vec<_> = addrs
            .iter()
            .flat_map(|addr| {
                NameServerConfigGroup::from_ips_clear(&[addr.ip()], addr.port(), true).into_inner()
            })
            .collect();

        let config = ResolverConfig::from_parts(
            None,
            vec![],
            NameServerConfigGroup::from(name_servers),
        );

        let resolver =
            TokioResolver::builder_with_config(config, TokioConnectionProvider::default())
                .with_options(self.opts.clone())
                .build();

        Ok(HickoryHandle {
            resolver,
            cancel: CancellationToken::new(),
        })
    }
}

/// A hickory resolver plus the token that aborts its requests.
pub struct HickoryHandle {
    resolver: TokioResolver,
    cancel: CancellationToken,
}

impl HickoryHandle {
    /// True once [`ResolverHandle::cancel`] has been called
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

fn classify(name: &str, err: &ResolveError) -> ResolveFailure {
    if err.is_nx_domain() || err.is_no_records_found() {
        ResolveFailure::NotFound
    } else {
        warn!(name, error = %err, "DNSBL resolution failed");
        ResolveFailure::Failed(err.to_string())
    }
}

#[async_trait]
impl ResolverHandle for HickoryHandle {
    async fn resolve_a(&self, name: &str) -> std::result::Result<Vec<Ipv4Addr>, ResolveFailure> {
        tokio::select! {
            biased;
            () = self.cancel.cancelled() => Err(ResolveFailure::Cancelled),
            res = self.resolver.ipv4_lookup(name) => match res {
                Ok(lookup) => Ok(lookup.iter().map(|a| a.0).collect()),
                Err(e) => Err(classify(name, &e)),
            },
        }
    }

    async fn resolve_txt(&self, name: &str) -> std::result::Result<Vec<String>, ResolveFailure> {
        tokio::select! {
            biased;
            () = self.cancel.cancelled() => Err(ResolveFailure::Cancelled),
            res = self.resolver.txt_lookup(name) => match res {
                Ok(records) => Ok(records
                    .iter()
                    .map(|txt| {
                        txt.iter()
                            .map(|data| String::from_utf8_lossy(data).to_string())
                            .collect::<Vec<_>>()
                            .join("")
                    })
                    .collect()),
                Err(e) => Err(classify(name, &e)),
            },
        }
    }

    fn cancel(&self) {
        self.cancel.cancel();
    }
}
