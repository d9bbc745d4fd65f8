//! The filtering facade.

use crate::bridge::{PageDirective, PageEvent, ScriptHost};
use crate::dispatch::{InjectionRegistry, ResultPolicy};
use dune_filter::{
    BlocklistStore, BlockStats, Decision, EventSink, FilterConfig, FilterEvent, PatternError,
    RequestFilter, StatsSnapshot,
};
use dune_guard::{DialogDecision, DialogGuard, DialogKind, NavigationGuard, PageStartOutcome};
use dune_page::ShieldPayload;
use crossbeam_channel::{unbounded, Receiver};
use std::io::Read;
use std::sync::Arc;
use std::thread::JoinHandle;
use tracing::{info, warn};

/// Aggregates every filtering engine behind per-feature toggles and a
/// single notification stream.
///
/// The host drives it from a single event thread; the only background
/// work it ever starts is the blocklist bulk load.
pub struct Shield {
    config: Arc<FilterConfig>,
    stats: Arc<BlockStats>,
    blocklist: Arc<BlocklistStore>,
    filter: RequestFilter,
    nav_guard: NavigationGuard,
    dialog_guard: DialogGuard,
    injections: InjectionRegistry,
    payload: ShieldPayload,
    events: EventSink,
    events_rx: Receiver<FilterEvent>,
}

impl Shield {
    pub fn new() -> Self {
        let config = Arc::new(FilterConfig::new());
        let stats = Arc::new(BlockStats::new());
        let blocklist = Arc::new(BlocklistStore::new());
        let (tx, events_rx) = unbounded();
        let events = EventSink::new(tx);

        let filter = RequestFilter::new(
            config.clone(),
            blocklist.clone(),
            stats.clone(),
            events.clone(),
        );
        let nav_guard = NavigationGuard::new(config.clone(), events.clone());
        let dialog_guard = DialogGuard::new(events.clone());

        info!("Content shield initialized");

        Self {
            config,
            stats,
            blocklist,
            filter,
            nav_guard,
            dialog_guard,
            injections: InjectionRegistry::standard(),
            payload: ShieldPayload::new(),
            events,
            events_rx,
        }
    }

    // ---- event dispatch ----------------------------------------------

    /// Route one host page event to its engine.
    ///
    /// `PageFinished` needs script access and is handled separately via
    /// [`Shield::on_page_finished`]; through this entry point it is a
    /// no-op directive.
    pub fn handle(&mut self, event: PageEvent) -> PageDirective {
        match event {
            PageEvent::RequestStarted { url } => match self.on_request(&url) {
                Decision::Block { .. } => PageDirective::ServeEmptyResponse,
                Decision::Allow => PageDirective::Continue,
            },
            PageEvent::PageStarted { url } => self.on_page_started(&url),
            PageEvent::PageFinished { .. } => PageDirective::Continue,
            PageEvent::NavigationRequested { url } => {
                if self.on_navigation_requested(&url) {
                    PageDirective::CancelNavigation
                } else {
                    PageDirective::Continue
                }
            }
            PageEvent::DialogRequested { kind, url, message } => {
                match self.on_dialog(kind, &url, &message) {
                    DialogDecision::Suppress => PageDirective::SuppressDialog,
                    DialogDecision::Show => PageDirective::Continue,
                }
            }
        }
    }

    /// Classify an outgoing resource request. On Block the host must
    /// serve an empty response body.
    pub fn on_request(&self, url: &str) -> Decision {
        let host = extract_host(url);
        self.filter.classify(url, &host)
    }

    /// Record a top-level navigation start. `LoadInstead` means a rapid
    /// redirect chain fired and the host must abandon the offending URL.
    pub fn on_page_started(&mut self, url: &str) -> PageDirective {
        match self.nav_guard.on_page_started(url) {
            PageStartOutcome::Rollback { safe_url } => PageDirective::LoadInstead { url: safe_url },
            PageStartOutcome::Continue => PageDirective::Continue,
        }
    }

    /// Apply the enabled page-context protections after a page load.
    pub fn on_page_finished(&self, host: &dyn ScriptHost) {
        self.apply_protections(host);
    }

    /// Decide whether a pending navigation must be cancelled.
    pub fn on_navigation_requested(&self, url: &str) -> bool {
        self.nav_guard.should_block_navigation(url)
    }

    /// Decide a page-originated dialog before the host shows it.
    pub fn on_dialog(&self, kind: DialogKind, url: &str, message: &str) -> DialogDecision {
        self.dialog_guard.on_dialog(kind, url, message)
    }

    /// Run every enabled injection, in registry order. Also the re-apply
    /// path after a settings change; no page reload required because the
    /// scripts are idempotent.
    pub fn apply_protections(&self, host: &dyn ScriptHost) {
        for injection in self.injections.active(&self.config) {
            let script = (injection.render)(&self.payload);
            match injection.result {
                ResultPolicy::HiddenCount => {
                    let stats = self.stats.clone();
                    let events = self.events.clone();
                    let name = injection.name;
                    host.eval(
                        script,
                        Box::new(move |result| {
                            let count = parse_hidden_count(name, result);
                            if count > 0 {
                                stats.record_hidden_elements(count);
                                events.stats(stats.snapshot());
                            }
                        }),
                    );
                }
                ResultPolicy::Ignore => {
                    host.eval(script, Box::new(|_| {}));
                }
            }
        }
    }

    // ---- notifications ------------------------------------------------

    /// Drain pending notifications for the host UI (non-blocking).
    pub fn poll_events(&self) -> Vec<FilterEvent> {
        self.events_rx.try_iter().collect()
    }

    // ---- settings surface ---------------------------------------------

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    pub fn set_ad_block_enabled(&self, enabled: bool) {
        self.config.set_ad_block_enabled(enabled);
    }

    pub fn set_aggressive_mode(&self, enabled: bool) {
        self.config.set_aggressive_mode(enabled);
    }

    pub fn set_popup_block_enabled(&self, enabled: bool) {
        self.config.set_popup_block_enabled(enabled);
    }

    pub fn set_redirect_block_enabled(&self, enabled: bool) {
        self.config.set_redirect_block_enabled(enabled);
    }

    pub fn set_cookie_blocking_enabled(&self, enabled: bool) {
        self.config.set_cookie_blocking_enabled(enabled);
    }

    pub fn set_tracking_prevention_enabled(&self, enabled: bool) {
        self.config.set_tracking_prevention_enabled(enabled);
    }

    // ---- blocklist surface --------------------------------------------

    pub fn add_blocked_domain(&self, domain: &str) {
        self.blocklist.add_host(domain);
    }

    pub fn remove_blocked_domain(&self, domain: &str) {
        self.blocklist.remove_host(domain);
    }

    pub fn is_blocked_domain(&self, domain: &str) -> bool {
        self.blocklist.contains_host(domain)
    }

    pub fn clear_blocklist(&self) {
        self.blocklist.clear_hosts();
    }

    pub fn blocklist_size(&self) -> usize {
        self.blocklist.host_count()
    }

    /// Compile and append a user URL pattern; malformed input is rejected
    /// without disturbing the existing list.
    pub fn add_pattern(&self, pattern: &str) -> Result<(), PatternError> {
        self.blocklist.add_pattern(pattern)
    }

    /// Load a newline-delimited host resource on a background thread.
    pub fn load_blocklist<R: Read + Send + 'static>(&self, reader: R) -> JoinHandle<()> {
        self.blocklist.load_in_background(reader)
    }

    /// Load the bundled default host list on a background thread.
    pub fn load_default_blocklist(&self) -> JoinHandle<()> {
        self.blocklist.load_defaults_in_background()
    }

    // ---- statistics ---------------------------------------------------

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    pub fn reset_stats(&self) {
        self.stats.reset();
    }
}

impl Default for Shield {
    fn default() -> Self {
        Self::new()
    }
}

/// Best-effort host extraction for classification. An unparseable URL
/// yields an empty host; pattern tiers still see the raw string.
fn extract_host(url: &str) -> String {
    match url::Url::parse(url) {
        Ok(parsed) => parsed.host_str().unwrap_or("").to_lowercase(),
        Err(_) => String::new(),
    }
}

/// Parse a script result as a hidden-element count. Anything unparseable
/// counts as zero hides for that round; logged, never escalated.
fn parse_hidden_count(name: &str, result: Option<String>) -> u64 {
    let Some(raw) = result else {
        return 0;
    };
    match raw.trim().parse::<u64>() {
        Ok(count) => count,
        Err(_) => {
            warn!("Injection '{}' returned unparseable count: {}", name, raw);
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_host() {
        assert_eq!(extract_host("https://Ads.Example.com/x.js"), "ads.example.com");
        assert_eq!(extract_host("not a url"), "");
    }

    #[test]
    fn test_parse_hidden_count() {
        assert_eq!(parse_hidden_count("overlay-hide", Some("3".into())), 3);
        assert_eq!(parse_hidden_count("overlay-hide", Some(" 7 ".into())), 7);
        assert_eq!(parse_hidden_count("overlay-hide", Some("null".into())), 0);
        assert_eq!(parse_hidden_count("overlay-hide", None), 0);
    }

    #[test]
    fn test_request_dispatch() {
        let mut shield = Shield::new();
        shield.add_blocked_domain("tracker.com");

        let directive = shield.handle(PageEvent::RequestStarted {
            url: "https://tracker.com/collect".into(),
        });
        assert_eq!(directive, PageDirective::ServeEmptyResponse);

        let directive = shield.handle(PageEvent::RequestStarted {
            url: "https://example.com/page.html".into(),
        });
        assert_eq!(directive, PageDirective::Continue);
    }

    #[test]
    fn test_dialog_dispatch() {
        let mut shield = Shield::new();

        let directive = shield.handle(PageEvent::DialogRequested {
            kind: DialogKind::Alert,
            url: "https://scam.example.com".into(),
            message: "Your PC is infected".into(),
        });
        assert_eq!(directive, PageDirective::SuppressDialog);
    }
}
