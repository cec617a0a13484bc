// Vehicle storage search.
// Pipeline: demand profile → capacity tables → assignment search per orientation
// → per-location plan → ranked results. CPU-bound; callers in async context must
// go through tokio::task::spawn_blocking.

pub mod aggregator;
pub mod assignment;
pub mod capacity;
pub mod handlers;
pub mod index;
pub mod profile;
pub mod resolver;

pub use aggregator::{find_locations, find_locations_with_limits};
pub use assignment::{SearchLimits, DEFAULT_NODE_LIMIT};
