//! Main DNSBL client implementation.

use dnsbl_core::{
    BatchItem, DnsblError, LookupOptions, LookupResult, OneOrMany, QueryReport, QueryTarget,
    Result,
};
use futures_util::stream::{self, StreamExt, TryStreamExt};
use std::sync::Arc;
use tracing::{debug, info};

use crate::executor;
use crate::hickory::HickoryFactory;
use crate::resolver::ResolverFactory;

/// DNSBL lookup client.
///
/// Cheap to clone; clones share the options and the resolver factory. Each
/// query still gets its own resolver handle.
pub struct DnsblClient<F = HickoryFactory> {
    inner: Arc<ClientInner<F>>,
}

struct ClientInner<F> {
    factory: F,
    options: LookupOptions,
}

impl<F> Clone for DnsblClient<F> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl Default for DnsblClient {
    fn default() -> Self {
        Self::new()
    }
}

impl DnsblClient {
    /// Create a client with the default options
    #[must_use]
    pub fn new() -> Self {
        DnsblClientBuilder::new().build()
    }

    /// Create a client with the given options
    #[must_use]
    pub fn with_options(options: LookupOptions) -> Self {
        DnsblClientBuilder::new().options(options).build()
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder() -> DnsblClientBuilder {
        DnsblClientBuilder::new()
    }
}

impl<F: ResolverFactory> DnsblClient<F> {
    /// Create a client that takes its resolver handles from `factory`
    #[must_use]
    pub fn with_factory(factory: F, options: LookupOptions) -> Self {
        Self {
            inner: Arc::new(ClientInner { factory, options }),
        }
    }

    /// Options this client was built with
    #[must_use]
    pub fn options(&self) -> &LookupOptions {
        &self.inner.options
    }

    /// Check one address against one blacklist.
    ///
    /// Returns `Listed(bool)`, or `WithTxt { .. }` when TXT records were
    /// requested. Timeouts and resolver failures are reported as not listed;
    /// only malformed input or options produce an error.
    pub async fn lookup(&self, address: &str, blacklist: &str) -> Result<LookupResult> {
        Ok(self.inspect(address, blacklist).await?.to_lookup_result())
    }

    /// Like [`lookup`](Self::lookup), but also says why a result is negative.
    pub async fn inspect(&self, address: &str, blacklist: &str) -> Result<QueryReport> {
        let options = &self.inner.options;
        options.validate()?;

        let target = QueryTarget::new(address, blacklist);
        let query_name = target.query_name()?;
        let handle = self.inner.factory.create(&options.servers)?;

        Ok(executor::execute(target, query_name, &handle, options).await)
    }

    /// Check every address against every blacklist.
    ///
    /// Items are ordered address-major, blacklist-minor. Every query name is
    /// built before the first query is sent, so a malformed address or
    /// blacklist fails the whole call without touching the network.
    pub async fn batch(
        &self,
        addresses: impl Into<OneOrMany>,
        blacklists: impl Into<OneOrMany>,
    ) -> Result<Vec<BatchItem>> {
        Ok(self
            .batch_reports(addresses, blacklists)
            .await?
            .into_iter()
            .map(QueryReport::into_batch_item)
            .collect())
    }

    /// Like [`batch`](Self::batch), returning a [`QueryReport`] per item.
    pub async fn batch_reports(
        &self,
        addresses: impl Into<OneOrMany>,
        blacklists: impl Into<OneOrMany>,
    ) -> Result<Vec<QueryReport>> {
        let options = &self.inner.options;
        options.validate()?;

        let addresses = addresses.into();
        let blacklists = blacklists.into();

        let work = QueryTarget::product(addresses.as_slice(), blacklists.as_slice())
            .into_iter()
            .map(|target| target.query_name().map(|query_name| (target, query_name)))
            .collect::<Result<Vec<_>>>()?;

        info!(
            addresses = addresses.len(),
            blacklists = blacklists.len(),
            queries = work.len(),
            concurrency = options.concurrency,
            "starting DNSBL batch"
        );

        let factory = &self.inner.factory;
        // A slot frees as soon as any query finishes; results are put back in input order after
        let mut indexed: Vec<(usize, QueryReport)> = stream::iter(work.into_iter().enumerate())
            .map(|(index, (target, query_name))| async move {
                // Handle lives exactly as long as its query
                let handle = factory.create(&options.servers)?;
                debug!(name = %query_name, "dispatching DNSBL query");
                let report = executor::execute(target, query_name, &handle, options).await;
                Ok::<_, DnsblError>((index, report))
            })
            .buffer_unordered(options.concurrency)
            .try_collect()
            .await?;
        indexed.sort_unstable_by_key(|(index, _)| *index);
        let reports: Vec<QueryReport> = indexed.into_iter().map(|(_, report)| report).collect();

        info!(
            queries = reports.len(),
            listed = reports.iter().filter(|r| r.listed).count(),
            "DNSBL batch finished"
        );

        Ok(reports)
    }
}

/// Builder for configuring a [`DnsblClient`]
#[derive(Debug, Clone, Default)]
pub struct DnsblClientBuilder {
    options: LookupOptions,
}

impl DnsblClientBuilder {
    /// Create a new builder with the default options
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all options at once
    #[must_use]
    pub fn options(mut self, options: LookupOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the per-query timeout in milliseconds
    #[must_use]
    pub fn timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.options = self.options.timeout_ms(timeout_ms);
        self
    }

    /// Set the nameserver(s)
    #[must_use]
    pub fn servers(mut self, servers: impl Into<OneOrMany>) -> Self {
        self.options = self.options.servers(servers);
        self
    }

    /// Set the batch concurrency limit
    #[must_use]
    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.options = self.options.concurrency(concurrency);
        self
    }

    /// Also fetch TXT records
    #[must_use]
    pub fn include_txt(mut self, include_txt: bool) -> Self {
        self.options = self.options.include_txt(include_txt);
        self
    }

    /// Build a client backed by hickory resolver handles
    #[must_use]
    pub fn build(self) -> DnsblClient {
        let factory = HickoryFactory::from_options(&self.options);
        DnsblClient::with_factory(factory, self.options)
    }

    /// Build a client backed by a custom resolver factory
    #[must_use]
    pub fn build_with<F: ResolverFactory>(self, factory: F) -> DnsblClient<F> {
        DnsblClient::with_factory(factory, self.options)
    }
}
