//! Dune Request Filtering
//!
//! Network-request classification with integrated blocklist management.
//!
//! Flow:
//! 1. Request comes in with (url, host)
//! 2. Blocklist host lookup, then fixed indicator automaton, then the
//!    compiled pattern list, then aggressive-mode pixel heuristics
//! 3. First match wins; a block bumps the session counters and emits a
//!    notification for the host UI
//!
//! The blocklist bulk load runs on a background thread and publishes
//! atomically, so classification is always safe to call concurrently.

mod blocklist;
mod classifier;
mod config;
mod events;
mod patterns;
mod stats;

pub use blocklist::{BlocklistStore, BlocklistError, DEFAULT_HOST_LIST};
pub use classifier::{Decision, RequestFilter};
pub use config::FilterConfig;
pub use events::{EventSink, FilterEvent};
pub use patterns::{builtin_patterns, has_ad_indicator, PatternError, UrlPattern};
pub use stats::{BlockStats, StatsSnapshot};
