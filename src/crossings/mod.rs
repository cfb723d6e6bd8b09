//! Crossing engine.
//!
//! Counts, for every edge of a graph under a position map, how many other
//! non-adjacent edges its straight-line segment properly intersects, and
//! identifies the worst-offending edge. The pairwise check is quadratic in
//! the edge count by design: graphs here are small, and the exact, simple
//! predicate is worth more than a spatial index.
//!
//! With the `parallel` feature the outer pair loop is split across rayon
//! workers; each worker produces a partial count vector and the partials
//! are summed afterwards, so no counter is ever mutated concurrently.

mod count;
mod report;

pub use count::compute_crossings;
pub use report::CrossingReport;
