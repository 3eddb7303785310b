//! Per-computation country cache.
//!
//! Every route computation owns one `CountryCache`. It memoizes resolved
//! records by code and by name, collapses concurrent lookups of the same key
//! into a single in-flight request, and counts the remote calls that
//! actually reached the resolver. Nothing in here outlives the computation:
//! the next `plan()` starts with a fresh cache and a counter at zero.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures::future::{BoxFuture, Shared};
use futures::FutureExt;
use tokio::sync::Mutex;
use tracing::debug;

use crate::country::{Country, CountryCode};
use crate::resolver::{CountryResolver, ResolveError};

/// A lookup that has been started but not yet committed. Cloning the shared
/// future lets any number of callers wait on the same remote call.
type PendingFetch = Shared<BoxFuture<'static, Result<Arc<Country>, ResolveError>>>;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum LookupKey {
    Code(CountryCode),
    Name(String),
}

#[derive(Default)]
struct CacheState {
    by_code: HashMap<CountryCode, Arc<Country>>,
    /// Name index into `by_code`: holds both queried and canonical names.
    by_name: HashMap<String, CountryCode>,
    pending: HashMap<LookupKey, PendingFetch>,
}

/// Memoizing front of a [`CountryResolver`], scoped to one route computation.
pub struct CountryCache {
    resolver: Arc<dyn CountryResolver>,
    state: Mutex<CacheState>,
    /// Remote calls that reached the resolver and returned a record.
    fetches: Arc<AtomicU64>,
}

impl CountryCache {
    pub fn new(resolver: Arc<dyn CountryResolver>) -> Self {
        Self {
            resolver,
            state: Mutex::new(CacheState::default()),
            fetches: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Resolve by canonical code, fetching at most once per distinct code.
    pub async fn resolve_code(&self, code: &CountryCode) -> Result<Arc<Country>, ResolveError> {
        let key = LookupKey::Code(code.clone());
        let fetch = {
            let mut state = self.state.lock().await;
            if let Some(country) = state.by_code.get(code) {
                debug!(code = %code, "cache hit");
                return Ok(Arc::clone(country));
            }
            match state.pending.get(&key) {
                Some(pending) => pending.clone(),
                None => {
                    let resolver = Arc::clone(&self.resolver);
                    let fetches = Arc::clone(&self.fetches);
                    let lookup = code.clone();
                    let fetch: PendingFetch = async move {
                        let country = resolver.by_code(&lookup).await?;
                        fetches.fetch_add(1, Ordering::SeqCst);
                        Ok(Arc::new(country))
                    }
                    .boxed()
                    .shared();
                    state.pending.insert(key.clone(), fetch.clone());
                    fetch
                }
            }
        };
        let result = fetch.await;
        self.commit(&key, &result).await;
        result
    }

    /// Resolve by display name, fetching at most once per distinct name.
    ///
    /// A record fetched by name becomes retrievable by its code (and its
    /// canonical name) without another remote call, and vice versa.
    pub async fn resolve_name(&self, name: &str) -> Result<Arc<Country>, ResolveError> {
        let key = LookupKey::Name(name.to_string());
        let fetch = {
            let mut state = self.state.lock().await;
            if let Some(code) = state.by_name.get(name) {
                if let Some(country) = state.by_code.get(code) {
                    debug!(name = %name, "cache hit");
                    return Ok(Arc::clone(country));
                }
            }
            match state.pending.get(&key) {
                Some(pending) => pending.clone(),
                None => {
                    let resolver = Arc::clone(&self.resolver);
                    let fetches = Arc::clone(&self.fetches);
                    let query = name.to_string();
                    let fetch: PendingFetch = async move {
                        let country = resolver.by_name(&query).await?;
                        fetches.fetch_add(1, Ordering::SeqCst);
                        Ok(Arc::new(country))
                    }
                    .boxed()
                    .shared();
                    state.pending.insert(key.clone(), fetch.clone());
                    fetch
                }
            }
        };
        let result = fetch.await;
        self.commit(&key, &result).await;
        result
    }

    /// Remote calls made so far in this computation.
    pub fn fetch_count(&self) -> u64 {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn reset_fetch_count(&self) {
        self.fetches.store(0, Ordering::SeqCst);
    }

    /// Record the outcome of a finished fetch. Idempotent: every waiter of a
    /// shared fetch calls this once. Failures are not memoized, so a later
    /// retry of the same key reaches the resolver again.
    async fn commit(&self, key: &LookupKey, result: &Result<Arc<Country>, ResolveError>) {
        let mut state = self.state.lock().await;
        state.pending.remove(key);
        if let Ok(country) = result {
            let code = country.code.clone();
            state.by_name.insert(country.name.clone(), code.clone());
            if let LookupKey::Name(queried) = key {
                state.by_name.insert(queried.clone(), code.clone());
            }
            state
                .by_code
                .entry(code)
                .or_insert_with(|| Arc::clone(country));
        }
    }
}
