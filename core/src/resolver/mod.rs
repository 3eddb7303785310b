//! Remote country lookup.
//!
//! The resolver is the single external collaborator of the engine: a service
//! that turns a country code or a free-text name into a [`Country`] record.
//! Every call is assumed to cross the network, so callers go through the
//! [`crate::cache::CountryCache`] rather than hitting a resolver directly.

use async_trait::async_trait;
use thiserror::Error;

use crate::country::{Country, CountryCode, CountrySummary};

pub mod rest;

pub use rest::{ConfigError, RestResolver, RestResolverConfig};

/// Failure of a remote lookup.
///
/// `Clone` is part of the contract: an in-flight lookup may be awaited by
/// several callers at once, and each of them receives the same failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The service has no record matching the query.
    #[error("no country matches {query:?}")]
    NotFound { query: String },
    /// The service answered with an unexpected HTTP status.
    #[error("country service returned status {status}")]
    Status { status: u16 },
    /// The request never produced an answer (connect, TLS, timeout, ...).
    #[error("country lookup failed: {0}")]
    Transport(String),
    /// The service answered, but the body did not parse as a country record.
    #[error("malformed country record: {0}")]
    Malformed(String),
}

/// Source of country records.
///
/// Implementations must be stateless with respect to route computations:
/// all memoization and fetch accounting lives in the cache, never here.
#[async_trait]
pub trait CountryResolver: Send + Sync {
    /// Resolve a country by its canonical 3-letter code.
    async fn by_code(&self, code: &CountryCode) -> Result<Country, ResolveError>;

    /// Resolve a country by free-text name. When the service returns several
    /// matches, the first one is canonical.
    async fn by_name(&self, name: &str) -> Result<Country, ResolveError>;

    /// All known countries, for input suggestions. Bulk endpoint; not part
    /// of the per-country fetch accounting.
    async fn all_countries(&self) -> Result<Vec<CountrySummary>, ResolveError>;
}
