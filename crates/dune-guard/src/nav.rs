//! Navigation guard: rapid-redirect detection and lexical URL blocking.

use crate::history::NavigationHistory;
use aho_corasick::AhoCorasick;
use dune_filter::{EventSink, FilterConfig};
use once_cell::sync::Lazy;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};

/// Navigations faster than this are suspicious (ms).
const SUSPICIOUS_REDIRECT_MS: u64 = 500;

/// Rapid transitions tolerated before intervening.
const MAX_REDIRECT_STRIKES: u32 = 3;

/// URL fragments typical of popup/popunder launchers.
const POPUP_MARKERS: &[&str] = &[
    "popup", "click.php", "window=", "/pop/", "popads", "popcash", "popunder", "pophit", "exit-ad",
];

/// URL fragments typical of redirect/clickthrough hops.
const REDIRECT_MARKERS: &[&str] = &[
    "redirect",
    "track.php",
    "tracking.php",
    "goto=",
    "clickthrough",
    "go.php",
    "exit=",
    "counter.php",
    "out.php",
];

static POPUP_AUTOMATON: Lazy<AhoCorasick> =
    Lazy::new(|| AhoCorasick::new(POPUP_MARKERS).expect("static popup marker set must compile"));

static REDIRECT_AUTOMATON: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::new(REDIRECT_MARKERS).expect("static redirect marker set must compile")
});

/// Outcome of recording a page start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageStartOutcome {
    /// Proceed with the navigation normally.
    Continue,
    /// A rapid redirect chain fired: the caller must abandon the offending
    /// URL and navigate to `safe_url` instead.
    Rollback { safe_url: String },
}

/// Maintains per-session navigation history and decides when a chain of
/// navigations stops looking human.
pub struct NavigationGuard {
    config: Arc<FilterConfig>,
    events: EventSink,
    history: NavigationHistory,
    redirect_strikes: u32,
}

impl NavigationGuard {
    pub fn new(config: Arc<FilterConfig>, events: EventSink) -> Self {
        Self {
            config,
            events,
            history: NavigationHistory::new(),
            redirect_strikes: 0,
        }
    }

    /// Record a page start using the wall clock.
    pub fn on_page_started(&mut self, url: &str) -> PageStartOutcome {
        self.on_page_started_at(url, unix_ms())
    }

    /// Record a page start at an explicit time.
    ///
    /// A navigation arriving within 500 ms of the previous distinct page
    /// earns a strike; a slower one clears the strikes, since the
    /// heuristic targets uninterrupted automated chains. On the third
    /// strike (with enough history to have somewhere safe to go) the
    /// guard asks for a rollback to the page two entries back and resets
    /// its counter.
    pub fn on_page_started_at(&mut self, url: &str, now_ms: u64) -> PageStartOutcome {
        if !self.config.redirect_block_enabled() {
            return PageStartOutcome::Continue;
        }

        if !self.history.push(url, now_ms) {
            // Same URL as the current front entry: already processed.
            return PageStartOutcome::Continue;
        }

        let Some(previous) = self.history.get(1) else {
            return PageStartOutcome::Continue;
        };

        let elapsed = now_ms.saturating_sub(previous.at_ms);
        if elapsed >= SUSPICIOUS_REDIRECT_MS {
            self.redirect_strikes = 0;
            return PageStartOutcome::Continue;
        }

        self.redirect_strikes += 1;
        debug!(
            "Rapid navigation to {} ({} ms, strike {})",
            url, elapsed, self.redirect_strikes
        );

        if self.redirect_strikes >= MAX_REDIRECT_STRIKES && self.history.len() >= 3 {
            // Two entries back is the last page the user plausibly chose.
            let safe_url = self.history.get(2).map(|e| e.url.clone());
            if let Some(safe_url) = safe_url {
                warn!("Redirect chain detected, rolling back to {}", safe_url);
                self.events.blocked(url, "excessive redirects detected");
                self.redirect_strikes = 0;
                return PageStartOutcome::Rollback { safe_url };
            }
        }

        PageStartOutcome::Continue
    }

    /// Lexical popup/redirect classification, independent of history.
    /// True means the caller must cancel the navigation.
    pub fn should_block_navigation(&self, url: &str) -> bool {
        let url = url.to_lowercase();

        if self.config.popup_block_enabled() && POPUP_AUTOMATON.is_match(&url) {
            self.events.blocked(&url, "popup blocked");
            return true;
        }

        if self.config.redirect_block_enabled() && REDIRECT_AUTOMATON.is_match(&url) {
            self.events.blocked(&url, "suspicious redirect blocked");
            return true;
        }

        false
    }

    pub fn history(&self) -> &NavigationHistory {
        &self.history
    }
}

fn unix_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
