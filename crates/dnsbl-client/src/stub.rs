//! Deterministic in-memory resolver for tests.

use async_trait::async_trait;
use dnsbl_core::Result;
use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::resolver::{ResolveFailure, ResolverFactory, ResolverHandle};

/// Canned answers shared by every handle of a [`StubFactory`].
#[derive(Debug, Clone, Default)]
pub(crate) struct Zone {
    a: HashMap<String, Vec<Ipv4Addr>>,
    txt: HashMap<String, Vec<String>>,
    delays: HashMap<String, Duration>,
    default_delay: Option<Duration>,
    hang: bool,
    failure: Option<ResolveFailure>,
}

impl Zone {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_a<I>(mut self, name: &str, addrs: I) -> Self
    where
        I: IntoIterator<Item = Ipv4Addr>,
    {
        self.a.insert(name.to_string(), addrs.into_iter().collect());
        self
    }

    pub(crate) fn with_txt<I, S>(mut self, name: &str, records: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.txt
            .insert(name.to_string(), records.into_iter().map(Into::into).collect());
        self
    }

    pub(crate) fn with_delay(mut self, name: &str, delay: Duration) -> Self {
        self.delays.insert(name.to_string(), delay);
        self
    }

    pub(crate) fn with_default_delay(mut self, delay: Duration) -> Self {
        self.default_delay = Some(delay);
        self
    }

    /// Never answer; only cancellation ends a request
    pub(crate) fn hanging(mut self) -> Self {
        self.hang = true;
        self
    }

    pub(crate) fn failing(mut self, failure: ResolveFailure) -> Self {
        self.failure = Some(failure);
        self
    }
}

/// Counters shared between a factory and all its handles.
#[derive(Debug, Default)]
pub(crate) struct Stats {
    created: AtomicUsize,
    active: AtomicUsize,
    peak: AtomicUsize,
    cancelled: AtomicUsize,
    servers: Mutex<Vec<Vec<String>>>,
}

impl Stats {
    pub(crate) fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }

    pub(crate) fn active(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }

    pub(crate) fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub(crate) fn cancelled(&self) -> usize {
        self.cancelled.load(Ordering::SeqCst)
    }

    pub(crate) fn servers(&self) -> Vec<Vec<String>> {
        self.servers.lock().unwrap().clone()
    }
}

struct ActiveGuard<'a>(&'a Stats);

impl<'a> ActiveGuard<'a> {
    fn enter(stats: &'a Stats) -> Self {
        let now = stats.active.fetch_add(1, Ordering::SeqCst) + 1;
        stats.peak.fetch_max(now, Ordering::SeqCst);
        Self(stats)
    }
}

impl Drop for ActiveGuard<'_> {
    fn drop(&mut self) {
        self.0.active.fetch_sub(1, Ordering::SeqCst);
    }
}

pub(crate) struct StubFactory {
    zone: Arc<Zone>,
    stats: Arc<Stats>,
}

impl StubFactory {
    pub(crate) fn new(zone: Zone) -> Self {
        Self {
            zone: Arc::new(zone),
            stats: Arc::new(Stats::default()),
        }
    }

    pub(crate) fn stats(&self) -> Arc<Stats> {
        Arc::clone(&self.stats)
    }
}

impl ResolverFactory for StubFactory {
    type Handle = StubHandle;

    fn create(&self, servers: &[String]) -> Result<StubHandle> {
        self.stats.created.fetch_add(1, Ordering::SeqCst);
        self.stats.servers.lock().unwrap().push(servers.to_vec());
        Ok(StubHandle {
            zone: Arc::clone(&self.zone),
            stats: Arc::clone(&self.stats),
            cancel: CancellationToken::new(),
        })
    }
}

pub(crate) struct StubHandle {
    zone: Arc<Zone>,
    stats: Arc<Stats>,
    cancel: CancellationToken,
}

impl StubHandle {
    async fn answer<T: Clone + Send + Sync>(
        &self,
        name: &str,
        records: &HashMap<String, T>,
    ) -> std::result::Result<T, ResolveFailure> {
        let _active = ActiveGuard::enter(&self.stats);

        let delay = self.zone.delays.get(name).copied().or(self.zone.default_delay);
        if let Some(delay) = delay {
            tokio::select! {
                () = self.cancel.cancelled() => return Err(ResolveFailure::Cancelled),
                () = tokio::time::sleep(delay) => {}
            }
        }

        if self.zone.hang {
            self.cancel.cancelled().await;
            return Err(ResolveFailure::Cancelled);
        }

        if let Some(failure) = &self.zone.failure {
            return Err(failure.clone());
        }

        records.get(name).cloned().ok_or(ResolveFailure::NotFound)
    }
}

#[async_trait]
impl ResolverHandle for StubHandle {
    async fn resolve_a(&self, name: &str) -> std::result::Result<Vec<Ipv4Addr>, ResolveFailure> {
        self.answer(name, &self.zone.a).await
    }

    async fn resolve_txt(&self, name: &str) -> std::result::Result<Vec<String>, ResolveFailure> {
        self.answer(name, &self.zone.txt).await
    }

    fn cancel(&self) {
        self.stats.cancelled.fetch_add(1, Ordering::SeqCst);
        self.cancel.cancel();
    }
}
