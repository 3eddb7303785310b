//! All-shortest-paths sweep over a discovered subgraph.

use std::collections::{HashMap, VecDeque};

use crate::country::CountryCode;

use super::explorer::DiscoveredGraph;

/// Per-code BFS state: hop distance from the source, and every neighbor
/// lying one hop earlier on some shortest path.
///
/// Invariants after a sweep:
/// - the source has distance 0 and an empty predecessor list (the "none"
///   sentinel);
/// - every predecessor of a code sits at exactly `distance - 1`.
#[derive(Debug, Clone, Default)]
pub struct Frontier {
    distances: HashMap<CountryCode, u32>,
    predecessors: HashMap<CountryCode, Vec<CountryCode>>,
}

impl Frontier {
    /// Hop distance from the source, if the code was reached.
    pub fn distance(&self, code: &CountryCode) -> Option<u32> {
        self.distances.get(code).copied()
    }

    /// All codes one hop earlier on some shortest path to `code`.
    pub fn predecessors(&self, code: &CountryCode) -> &[CountryCode] {
        self.predecessors
            .get(code)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn contains(&self, code: &CountryCode) -> bool {
        self.distances.contains_key(code)
    }
}

/// Unweighted BFS from `source` over the discovered subgraph.
///
/// The queue is strictly FIFO; this is what makes the predecessor sets
/// complete. The first dequeue of a code finalizes its distance, a later
/// discovery at the same distance adds an alternate predecessor, and a
/// later discovery at a greater distance is ignored. Neighbors outside the
/// discovered subgraph are skipped: they sit beyond the search radius.
pub fn sweep(graph: &DiscoveredGraph, source: &CountryCode) -> Frontier {
    let mut frontier = Frontier::default();
    if !graph.contains_key(source) {
        return frontier;
    }
    frontier.distances.insert(source.clone(), 0);
    frontier.predecessors.insert(source.clone(), Vec::new());

    let mut queue = VecDeque::from([source.clone()]);
    while let Some(current) = queue.pop_front() {
        let here = frontier.distances[&current];
        let Some(country) = graph.get(&current) else {
            continue;
        };
        for neighbor in &country.neighbors {
            if !graph.contains_key(neighbor) {
                continue;
            }
            match frontier.distances.get(neighbor).copied() {
                None => {
                    frontier.distances.insert(neighbor.clone(), here + 1);
                    frontier
                        .predecessors
                        .insert(neighbor.clone(), vec![current.clone()]);
                    queue.push_back(neighbor.clone());
                }
                Some(there) if there == here + 1 => {
                    if let Some(predecessors) = frontier.predecessors.get_mut(neighbor) {
                        predecessors.push(current.clone());
                    }
                }
                Some(_) => {}
            }
        }
    }
    frontier
}
