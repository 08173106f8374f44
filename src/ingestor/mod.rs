//! The synchronization pipeline
//!
//! Two entry points, feed discovery and the active-set refresher, converge on
//! the same per-video resolve -> map -> upsert chain. Items are processed
//! strictly sequentially; the only resilience mechanism is per-item and
//! per-office catch-log-continue, which deliberately does not apply to a
//! quota-exceeded error.

pub mod active_set;
pub mod feed_discovery;
pub mod mapper;
pub mod upsert;

#[cfg(test)]
pub mod testing;

pub use active_set::ActiveSetRefresher;
pub use feed_discovery::FeedDiscovery;
pub use mapper::StreamMapper;
pub use upsert::{SkipReason, UpsertEngine, UpsertOutcome};
