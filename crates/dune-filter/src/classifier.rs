//! Request classification.
//!
//! This is the hot path: called for every outgoing resource request on
//! the host's event thread. It must not block or perform I/O, and it is
//! total — every input yields Allow or Block, because a missed ad is
//! preferred over a broken page load.

use crate::blocklist::BlocklistStore;
use crate::config::FilterConfig;
use crate::events::EventSink;
use crate::patterns::has_ad_indicator;
use crate::stats::BlockStats;
use std::sync::Arc;
use tracing::debug;

/// Result of classifying one request.
///
/// Reason strings feed the host's notification sink; they are
/// observability data, not control flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Block { reason: &'static str },
}

impl Decision {
    pub fn is_blocked(&self) -> bool {
        matches!(self, Decision::Block { .. })
    }
}

const REASON_BLOCKLIST: &str = "domain in blocklist";
const REASON_AD_PATTERN: &str = "matches ad pattern";
const REASON_TRACKING_PIXEL: &str = "tracking pixel detected";

/// Classifies outgoing network requests against the blocklist and
/// aggressive-mode heuristics.
pub struct RequestFilter {
    config: Arc<FilterConfig>,
    blocklist: Arc<BlocklistStore>,
    stats: Arc<BlockStats>,
    events: EventSink,
}

impl RequestFilter {
    pub fn new(
        config: Arc<FilterConfig>,
        blocklist: Arc<BlocklistStore>,
        stats: Arc<BlockStats>,
        events: EventSink,
    ) -> Self {
        Self {
            config,
            blocklist,
            stats,
            events,
        }
    }

    /// Classify one request, short-circuiting on the first match:
    ///
    /// 1. exact host membership in the blocklist
    /// 2. fixed ad/tracker indicator in the URL
    /// 3. full-string match against the compiled pattern list
    /// 4. aggressive mode only: tracking-pixel shape
    ///
    /// A block bumps `requests_blocked` and emits `Blocked` + `Stats`
    /// notifications. With ad blocking disabled this returns Allow with no
    /// side effects at all.
    pub fn classify(&self, url: &str, host: &str) -> Decision {
        if !self.config.ad_block_enabled() {
            return Decision::Allow;
        }

        let url = url.to_lowercase();

        if !host.is_empty() && self.blocklist.contains_host(host) {
            return self.block(&url, REASON_BLOCKLIST);
        }

        if has_ad_indicator(&url) {
            return self.block(&url, REASON_AD_PATTERN);
        }

        if self.blocklist.matches_pattern(&url) {
            return self.block(&url, REASON_AD_PATTERN);
        }

        if self.config.aggressive_mode() && is_tracking_pixel(&url) {
            return self.block(&url, REASON_TRACKING_PIXEL);
        }

        Decision::Allow
    }

    fn block(&self, url: &str, reason: &'static str) -> Decision {
        self.stats.record_blocked_request();
        debug!("Blocked request ({}): {}", reason, url);
        self.events.blocked(url, reason);
        self.events.stats(self.stats.snapshot());
        Decision::Block { reason }
    }
}

/// Aggressive-mode heuristic: small beacon/pixel resources.
#[inline]
fn is_tracking_pixel(url: &str) -> bool {
    let pixel_shape = url.ends_with(".gif") || url.contains("beacon") || url.contains("pixel");
    pixel_shape && (url.contains("1x1") || url.contains("pixel.gif"))
}
