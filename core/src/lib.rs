//! overland-core — every shortest land route between two countries.
//!
//! The border graph is not known up front: each country's neighbor list is
//! discovered through a remote lookup service, one call per previously
//! unseen country. The engine keeps those calls to a minimum — a
//! per-computation cache with in-flight deduplication, early exits for the
//! trivial cases, and a breadth-first exploration whose radius tightens the
//! moment the destination is sighted — and then reports *all* routes tied
//! at the minimum number of border crossings, never just one.
//!
//! Pipeline, per [`engine::RouteEngine::plan`] invocation:
//!
//! ```text
//! validate → resolve endpoints → short-circuits → discover (bounded BFS)
//!          → sweep (distances + predecessors) → enumerate ties → names
//! ```
//!
//! [`resolver::RestResolver`] speaks the RESTCountries v3.1 protocol; any
//! other source can be plugged in through [`resolver::CountryResolver`].

pub mod cache;
pub mod country;
pub mod engine;
pub mod resolver;
pub mod search;

#[cfg(test)]
pub(crate) mod test_support;

pub use cache::CountryCache;
pub use country::{Country, CountryCode, CountrySummary, InvalidCode};
pub use engine::{
    EngineConfig, EngineError, NoRouteReason, Route, RouteEngine, RouteOutcome, ValidationError,
};
pub use resolver::{ConfigError, CountryResolver, ResolveError, RestResolver, RestResolverConfig};
