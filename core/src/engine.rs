//! Route engine — one `plan()` call per submission.
//!
//! Sequences the whole computation: validation, parallel endpoint
//! resolution, the island and direct-adjacency short-circuits, bounded
//! discovery, the shortest-path sweep, route enumeration, and name
//! materialization. Every invocation owns a fresh cache and fetch counter,
//! so concurrent or abandoned invocations cannot contaminate each other.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::cache::CountryCache;
use crate::country::{CountryCode, CountrySummary};
use crate::resolver::{CountryResolver, ResolveError};
use crate::search::{enumerate_routes, sweep, GraphExplorer};

/// Search limits.
///
/// The hop bound and the tie cap are deliberately separate knobs, even
/// though both default to the same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Longest route considered, in border crossings.
    pub max_hops: u32,
    /// Most tied shortest routes worth reporting.
    pub max_routes: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_hops: 10,
            max_routes: 10,
        }
    }
}

/// One route, source to destination inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub codes: Vec<CountryCode>,
    pub names: Vec<String>,
}

impl Route {
    /// Border crossings along this route.
    pub fn hops(&self) -> usize {
        self.codes.len().saturating_sub(1)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.names.join(" → "))
    }
}

/// Why a computation finished without routes. Normal outcomes, not failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoRouteReason {
    /// Origin and destination are the same country.
    SameCountry,
    /// At least one endpoint has no land border.
    Island,
    /// The destination was not reached within the hop bound.
    Unreachable,
    /// More tied shortest routes than the configured cap.
    TooManyRoutes,
}

/// Result of one completed engine invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteOutcome {
    /// Every route tied at the minimum hop count.
    Routes { routes: Vec<Route>, fetch_count: u64 },
    /// Nothing to report; `reason` says why.
    NoRoute {
        reason: NoRouteReason,
        fetch_count: u64,
    },
}

impl RouteOutcome {
    /// Remote calls the computation made.
    pub fn fetch_count(&self) -> u64 {
        match self {
            RouteOutcome::Routes { fetch_count, .. }
            | RouteOutcome::NoRoute { fetch_count, .. } => *fetch_count,
        }
    }
}

/// Input rejected before any network activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} country must not be empty")]
    EmptyInput { field: &'static str },
}

/// Failure of one engine invocation.
#[derive(Debug, Clone, Error)]
pub enum EngineError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    /// A lookup failed; the computation was aborted, no partial result.
    #[error("country lookup failed after {fetch_count} requests: {source}")]
    Resolution {
        source: ResolveError,
        fetch_count: u64,
    },
}

/// Shortest-land-route engine over a shared, stateless resolver.
pub struct RouteEngine {
    resolver: Arc<dyn CountryResolver>,
    config: EngineConfig,
}

impl RouteEngine {
    pub fn new(resolver: Arc<dyn CountryResolver>) -> Self {
        Self::with_config(resolver, EngineConfig::default())
    }

    pub fn with_config(resolver: Arc<dyn CountryResolver>, config: EngineConfig) -> Self {
        Self { resolver, config }
    }

    pub fn config(&self) -> EngineConfig {
        self.config
    }

    /// Compute every shortest land route between two countries given by name.
    pub async fn plan(&self, from: &str, to: &str) -> Result<RouteOutcome, EngineError> {
        let from = from.trim();
        let to = to.trim();
        if from.is_empty() {
            return Err(ValidationError::EmptyInput { field: "origin" }.into());
        }
        if to.is_empty() {
            return Err(ValidationError::EmptyInput {
                field: "destination",
            }
            .into());
        }
        if from == to {
            return Ok(RouteOutcome::NoRoute {
                reason: NoRouteReason::SameCountry,
                fetch_count: 0,
            });
        }

        // Fresh cache per invocation; nothing survives into the next plan().
        let cache = CountryCache::new(Arc::clone(&self.resolver));

        let (origin, target) =
            tokio::try_join!(cache.resolve_name(from), cache.resolve_name(to))
                .map_err(|source| EngineError::Resolution {
                    source,
                    fetch_count: cache.fetch_count(),
                })?;

        info!(from = %origin.code, to = %target.code, "planning route");

        if origin.code == target.code {
            // Two spellings of one country.
            return Ok(RouteOutcome::NoRoute {
                reason: NoRouteReason::SameCountry,
                fetch_count: cache.fetch_count(),
            });
        }
        if origin.is_island() || target.is_island() {
            return Ok(RouteOutcome::NoRoute {
                reason: NoRouteReason::Island,
                fetch_count: cache.fetch_count(),
            });
        }

        if origin.borders(&target.code) {
            // One crossing; discovery, sweep, and enumeration are skipped.
            let route = Route {
                codes: vec![origin.code.clone(), target.code.clone()],
                names: vec![origin.name.clone(), target.name.clone()],
            };
            return Ok(RouteOutcome::Routes {
                routes: vec![route],
                fetch_count: cache.fetch_count(),
            });
        }

        let explorer = GraphExplorer::new(&cache);
        let graph = explorer
            .discover(&origin.code, &target.code, self.config.max_hops)
            .await
            .map_err(|source| EngineError::Resolution {
                source,
                fetch_count: cache.fetch_count(),
            })?;

        let Some(graph) = graph else {
            info!(bound = self.config.max_hops, "destination out of range");
            return Ok(RouteOutcome::NoRoute {
                reason: NoRouteReason::Unreachable,
                fetch_count: cache.fetch_count(),
            });
        };

        let frontier = sweep(&graph, &origin.code);
        let paths = enumerate_routes(&frontier, &target.code);
        debug!(count = paths.len(), "enumerated tied shortest routes");

        if paths.is_empty() {
            return Ok(RouteOutcome::NoRoute {
                reason: NoRouteReason::Unreachable,
                fetch_count: cache.fetch_count(),
            });
        }
        if paths.len() > self.config.max_routes {
            warn!(
                count = paths.len(),
                cap = self.config.max_routes,
                "tie cap exceeded"
            );
            return Ok(RouteOutcome::NoRoute {
                reason: NoRouteReason::TooManyRoutes,
                fetch_count: cache.fetch_count(),
            });
        }

        let routes = self.materialize(&cache, paths).await?;
        info!(
            routes = routes.len(),
            fetches = cache.fetch_count(),
            "route computation solved"
        );
        Ok(RouteOutcome::Routes {
            routes,
            fetch_count: cache.fetch_count(),
        })
    }

    /// Country list for input suggestions, largest area first.
    pub async fn country_catalog(&self) -> Result<Vec<CountrySummary>, ResolveError> {
        let mut summaries = self.resolver.all_countries().await?;
        summaries.sort_by(|a, b| b.area.total_cmp(&a.area));
        Ok(summaries)
    }

    /// Map every code in every path to its display name. Each code was
    /// resolved during discovery, so these are cache hits, never new
    /// requests.
    async fn materialize(
        &self,
        cache: &CountryCache,
        paths: Vec<Vec<CountryCode>>,
    ) -> Result<Vec<Route>, EngineError> {
        let mut routes = Vec::with_capacity(paths.len());
        for codes in paths {
            let mut names = Vec::with_capacity(codes.len());
            for code in &codes {
                let country = cache.resolve_code(code).await.map_err(|source| {
                    EngineError::Resolution {
                        source,
                        fetch_count: cache.fetch_count(),
                    }
                })?;
                names.push(country.name.clone());
            }
            routes.push(Route { codes, names });
        }
        Ok(routes)
    }
}
