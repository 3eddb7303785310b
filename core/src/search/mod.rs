//! Graph discovery and all-shortest-paths machinery.
//!
//! Three stages, each feeding the next:
//! - [`explorer`]: adaptive bounded BFS that pulls the border graph out of
//!   the remote service, level by level, through the cache.
//! - [`sweep`]: FIFO shortest-path sweep over the discovered subgraph,
//!   producing per-code distances and predecessor sets.
//! - [`enumerate`]: backward walk over predecessor sets emitting every route
//!   tied at the minimum hop count.

pub mod enumerate;
pub mod explorer;
pub mod sweep;

pub use enumerate::enumerate_routes;
pub use explorer::{DiscoveredGraph, GraphExplorer};
pub use sweep::{sweep, Frontier};
