//! Scripted in-memory resolver for unit tests.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::country::{Country, CountryCode, CountrySummary};
use crate::resolver::{CountryResolver, ResolveError};

pub(crate) struct ScriptedResolver {
    countries: HashMap<CountryCode, Country>,
    calls: AtomicU64,
    failures_left: AtomicU64,
    delay: Option<Duration>,
}

impl ScriptedResolver {
    /// Build a resolver from `(code, name, neighbors)` triples.
    pub fn new(entries: Vec<(&str, &str, Vec<&str>)>) -> Self {
        let mut countries = HashMap::new();
        for (code, name, neighbors) in entries {
            let code = CountryCode::from_str(code).unwrap();
            let neighbors = neighbors
                .into_iter()
                .map(|n| CountryCode::from_str(n).unwrap())
                .collect();
            countries.insert(
                code.clone(),
                Country {
                    name: name.to_string(),
                    code,
                    neighbors,
                },
            );
        }
        Self {
            countries,
            calls: AtomicU64::new(0),
            failures_left: AtomicU64::new(0),
            delay: None,
        }
    }

    /// Sleep before answering, to force lookups to overlap in tests.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Fail the first `n` calls with a transport error, then recover.
    pub fn failing_first(self, n: u64) -> Self {
        self.failures_left.store(n, Ordering::SeqCst);
        self
    }

    /// Calls that reached this resolver, cache hits excluded.
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }

    async fn answer(&self) -> Result<(), ResolveError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.calls.fetch_add(1, Ordering::SeqCst);
        let remaining = self.failures_left.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failures_left.store(remaining - 1, Ordering::SeqCst);
            return Err(ResolveError::Transport("scripted failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl CountryResolver for ScriptedResolver {
    async fn by_code(&self, code: &CountryCode) -> Result<Country, ResolveError> {
        self.answer().await?;
        self.countries
            .get(code)
            .cloned()
            .ok_or_else(|| ResolveError::NotFound {
                query: code.to_string(),
            })
    }

    async fn by_name(&self, name: &str) -> Result<Country, ResolveError> {
        self.answer().await?;
        self.countries
            .values()
            .find(|country| country.name == name)
            .cloned()
            .ok_or_else(|| ResolveError::NotFound {
                query: name.to_string(),
            })
    }

    async fn all_countries(&self) -> Result<Vec<CountrySummary>, ResolveError> {
        Ok(self
            .countries
            .values()
            .map(|country| CountrySummary {
                name: country.name.clone(),
                code: country.code.clone(),
                area: 0.0,
            })
            .collect())
    }
}
