//! Adaptive bounded breadth-first discovery of the border graph.
//!
//! The graph is unknown up front: each country's neighbor list arrives only
//! when that country is resolved. The explorer walks outward from the source
//! in levels — level *k* holds exactly the codes at *k* hops — resolving one
//! whole level concurrently through the cache before expanding the next.
//! The search radius starts at the caller's hop bound and is tightened to
//! the destination's depth the moment the destination appears, so no level
//! past the first sighting is ever fetched.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use futures::future::try_join_all;
use tracing::debug;

use crate::cache::CountryCache;
use crate::country::{Country, CountryCode};
use crate::resolver::ResolveError;

/// Subgraph touched during one discovery run: every resolved country, by code.
pub type DiscoveredGraph = HashMap<CountryCode, Arc<Country>>;

/// Bounded BFS over a lazily discovered graph.
pub struct GraphExplorer<'c> {
    cache: &'c CountryCache,
}

impl<'c> GraphExplorer<'c> {
    pub fn new(cache: &'c CountryCache) -> Self {
        Self { cache }
    }

    /// Explore outward from `source` until `destination` is reached or the
    /// hop bound is exhausted.
    ///
    /// Returns the full induced subgraph touched within the (tightened)
    /// bound — everything the shortest-path sweep needs — or `None` when the
    /// destination is not reachable within `max_hops` crossings. Resolution
    /// failures abort the whole discovery.
    pub async fn discover(
        &self,
        source: &CountryCode,
        destination: &CountryCode,
        max_hops: u32,
    ) -> Result<Option<DiscoveredGraph>, ResolveError> {
        let mut discovered = DiscoveredGraph::new();
        // Codes ever placed on a level; keeps parallel sibling branches from
        // queueing (and fetching) the same country twice.
        let mut queued: HashSet<CountryCode> = HashSet::new();
        queued.insert(source.clone());

        let mut level = vec![source.clone()];
        let mut depth: u32 = 0;
        let mut bound = max_hops;
        let mut destination_found = false;

        while !level.is_empty() {
            debug!(depth, width = level.len(), "expanding discovery level");
            let countries = try_join_all(
                level.iter().map(|code| self.cache.resolve_code(code)),
            )
            .await?;

            for country in &countries {
                discovered.insert(country.code.clone(), Arc::clone(country));
            }

            if !destination_found && countries.iter().any(|c| c.code == *destination) {
                // First sighting fixes the search radius: nothing past this
                // depth can lie on a minimum-length route.
                destination_found = true;
                bound = depth;
                debug!(depth, "destination reached, bound tightened");
            }

            if depth == bound {
                break;
            }

            let mut next = Vec::new();
            for country in &countries {
                for neighbor in &country.neighbors {
                    if queued.insert(neighbor.clone()) {
                        next.push(neighbor.clone());
                    }
                }
            }
            level = next;
            depth += 1;
        }

        Ok(if destination_found {
            Some(discovered)
        } else {
            None
        })
    }
}
