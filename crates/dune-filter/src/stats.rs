//! Session blocking statistics.

use std::sync::atomic::{AtomicU64, Ordering};

/// Cumulative counters for the current browsing session.
///
/// Monotonically increasing except via [`BlockStats::reset`]. Each counter
/// has a single writer: the request filter bumps `requests_blocked`, the
/// facade's script-result callback bumps `elements_hidden`.
#[derive(Debug, Default)]
pub struct BlockStats {
    requests_blocked: AtomicU64,
    elements_hidden: AtomicU64,
}

/// Point-in-time copy of the counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub requests_blocked: u64,
    pub elements_hidden: u64,
}

impl BlockStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one blocked network request.
    pub fn record_blocked_request(&self) {
        self.requests_blocked.fetch_add(1, Ordering::Relaxed);
    }

    /// Record elements newly hidden by a page-context scan.
    pub fn record_hidden_elements(&self, count: u64) {
        self.elements_hidden.fetch_add(count, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            requests_blocked: self.requests_blocked.load(Ordering::Relaxed),
            elements_hidden: self.elements_hidden.load(Ordering::Relaxed),
        }
    }

    /// Zero both counters. The host calls this from its settings surface.
    pub fn reset(&self) {
        self.requests_blocked.store(0, Ordering::Relaxed);
        self.elements_hidden.store(0, Ordering::Relaxed);
    }
}
