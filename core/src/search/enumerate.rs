//! Enumeration of every minimum-length route.

use crate::country::CountryCode;

use super::sweep::Frontier;

/// All shortest routes from the sweep's source to `destination`, each in
/// source→destination order.
///
/// One route is emitted per distinct predecessor choice at every branch
/// point, so the result size is the product of the predecessor-set sizes
/// along the way — safe only because discovery bounds the search radius and
/// the engine caps the number of reported ties. Returns an empty list when
/// `destination` was never reached.
pub fn enumerate_routes(frontier: &Frontier, destination: &CountryCode) -> Vec<Vec<CountryCode>> {
    let mut routes = Vec::new();
    if !frontier.contains(destination) {
        return routes;
    }
    let mut tail = Vec::new();
    walk(frontier, destination, &mut tail, &mut routes);
    routes
}

/// Depth-first over predecessor sets; `tail` holds the route suffix built so
/// far, destination first.
fn walk(
    frontier: &Frontier,
    code: &CountryCode,
    tail: &mut Vec<CountryCode>,
    routes: &mut Vec<Vec<CountryCode>>,
) {
    tail.push(code.clone());
    let predecessors = frontier.predecessors(code);
    if predecessors.is_empty() {
        // Reached the source: its empty predecessor list is the sentinel.
        let mut route = tail.clone();
        route.reverse();
        routes.push(route);
    } else {
        for predecessor in predecessors {
            walk(frontier, predecessor, tail, routes);
        }
    }
    tail.pop();
}
