//! End-to-end properties of the filtering facade.

use dune_shield::{
    Decision, DialogDecision, DialogKind, FilterEvent, PageDirective, PageEvent, ScriptCallback,
    ScriptHost, Shield,
};
use std::sync::Mutex;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Script host double: records evaluated scripts and answers each one
/// synchronously with a queued result.
#[derive(Default)]
struct FakeScriptHost {
    scripts: Mutex<Vec<String>>,
    results: Mutex<Vec<Option<String>>>,
}

impl FakeScriptHost {
    fn with_results(results: Vec<Option<String>>) -> Self {
        Self {
            scripts: Mutex::new(Vec::new()),
            results: Mutex::new(results),
        }
    }

    fn script_count(&self) -> usize {
        self.scripts.lock().unwrap().len()
    }
}

impl ScriptHost for FakeScriptHost {
    fn eval(&self, script: String, callback: ScriptCallback) {
        self.scripts.lock().unwrap().push(script);
        let mut results = self.results.lock().unwrap();
        let result = if results.is_empty() {
            None
        } else {
            results.remove(0)
        };
        callback(result);
    }
}

#[test]
fn blocked_domain_round_trip() {
    init_tracing();
    let shield = Shield::new();
    shield.add_blocked_domain("Ads.Example.COM");

    assert!(shield.is_blocked_domain("ads.example.com"));
    assert_eq!(
        shield.on_request("https://ADS.example.com/unit.js"),
        Decision::Block {
            reason: "domain in blocklist"
        }
    );

    shield.remove_blocked_domain("ads.example.com");
    assert!(!shield.is_blocked_domain("ads.example.com"));
    assert_eq!(
        shield.on_request("https://ads.example.com/unit.js"),
        Decision::Allow
    );
}

#[test]
fn builtin_patterns_block_regardless_of_aggressive_mode() {
    let shield = Shield::new();

    let url = "https://cdn.site.com/ads/foo.js";
    assert!(shield.on_request(url).is_blocked());

    shield.set_aggressive_mode(true);
    assert!(shield.on_request(url).is_blocked());

    // Disabling ad blocking entirely allows every input.
    shield.set_ad_block_enabled(false);
    assert_eq!(shield.on_request(url), Decision::Allow);
    assert_eq!(
        shield.on_request("https://doubleclick.net/pixel.gif?1x1"),
        Decision::Allow
    );
}

#[test]
fn redirect_chain_rolls_back_two_pages() {
    init_tracing();
    let mut shield = Shield::new();

    // The facade uses the wall clock, so the four navigations land well
    // inside the 500 ms suspicious window.
    assert_eq!(
        shield.on_page_started("https://a.com/"),
        PageDirective::Continue
    );
    assert_eq!(
        shield.on_page_started("https://b.com/"),
        PageDirective::Continue
    );
    assert_eq!(
        shield.on_page_started("https://c.com/"),
        PageDirective::Continue
    );
    assert_eq!(
        shield.on_page_started("https://d.com/"),
        PageDirective::LoadInstead {
            url: "https://b.com/".into()
        }
    );

    let events = shield.poll_events();
    assert!(events.contains(&FilterEvent::Blocked {
        url: "https://d.com/".into(),
        reason: "excessive redirects detected".into(),
    }));
}

#[test]
fn popup_heuristic_honors_toggle() {
    let shield = Shield::new();

    assert!(shield.on_navigation_requested("https://x.com/click.php?id=1"));

    shield.set_popup_block_enabled(false);
    assert!(!shield.on_navigation_requested("https://x.com/click.php?id=1"));
}

#[test]
fn navigation_dispatch_cancels() {
    let mut shield = Shield::new();

    assert_eq!(
        shield.handle(PageEvent::NavigationRequested {
            url: "https://x.com/popunder/launch".into()
        }),
        PageDirective::CancelNavigation
    );
    assert_eq!(
        shield.handle(PageEvent::NavigationRequested {
            url: "https://news.example.com/story".into()
        }),
        PageDirective::Continue
    );
}

#[test]
fn scam_alert_suppressed_benign_alert_shown() {
    let shield = Shield::new();

    assert_eq!(
        shield.on_dialog(
            DialogKind::Alert,
            "https://scam.example.com",
            "Your device is infected, call support now"
        ),
        DialogDecision::Suppress
    );
    assert_eq!(
        shield.on_dialog(
            DialogKind::Alert,
            "https://forms.example.com",
            "Confirm form submission?"
        ),
        DialogDecision::Show
    );
}

#[test]
fn page_finished_injects_and_counts_hides() {
    init_tracing();
    let shield = Shield::new();
    shield.set_cookie_blocking_enabled(true);

    // overlay-hide answers 3; nav-guard and cookie-dismiss results are
    // ignored by policy.
    let host = FakeScriptHost::with_results(vec![
        Some("3".into()),
        Some("0".into()),
        Some("2".into()),
    ]);
    shield.on_page_finished(&host);

    assert_eq!(host.script_count(), 3);
    assert_eq!(shield.stats().elements_hidden, 3);

    let events = shield.poll_events();
    assert!(events.iter().any(|e| matches!(
        e,
        FilterEvent::Stats {
            elements_hidden: 3,
            ..
        }
    )));
}

#[test]
fn repeat_injection_with_zero_hides_emits_nothing() {
    let shield = Shield::new();

    // A re-scan of an unchanged page returns 0: no counter change, no
    // stats notification.
    let host = FakeScriptHost::with_results(vec![Some("0".into()), None]);
    shield.apply_protections(&host);

    assert_eq!(shield.stats().elements_hidden, 0);
    assert!(shield.poll_events().is_empty());
}

#[test]
fn unparseable_script_result_counts_as_zero() {
    let shield = Shield::new();

    let host = FakeScriptHost::with_results(vec![Some("not-a-number".into()), None]);
    shield.apply_protections(&host);

    assert_eq!(shield.stats().elements_hidden, 0);
}

#[test]
fn disabled_features_inject_nothing() {
    let shield = Shield::new();
    shield.set_ad_block_enabled(false);
    shield.set_redirect_block_enabled(false);

    let host = FakeScriptHost::default();
    shield.apply_protections(&host);

    assert_eq!(host.script_count(), 0);
}

#[test]
fn stats_monotonic_until_reset() {
    let shield = Shield::new();
    shield.add_blocked_domain("tracker.com");

    let mut last = 0;
    for i in 0..5 {
        shield.on_request(&format!("https://tracker.com/hit/{i}"));
        let now = shield.stats().requests_blocked;
        assert!(now > last);
        last = now;
    }

    // Allowed requests never decrease the counters.
    shield.on_request("https://example.com/");
    assert_eq!(shield.stats().requests_blocked, last);

    shield.reset_stats();
    let snap = shield.stats();
    assert_eq!(snap.requests_blocked, 0);
    assert_eq!(snap.elements_hidden, 0);
}

#[test]
fn user_pattern_addition_and_rejection() {
    let shield = Shield::new();

    assert!(shield.add_pattern("([broken").is_err());

    shield.add_pattern(r".*/sponsored-frame/.*").unwrap();
    assert!(shield
        .on_request("https://cdn.site.com/sponsored-frame/unit.html")
        .is_blocked());
}

#[test]
fn background_blocklist_load_publishes_atomically() {
    let shield = Shield::new();
    shield.add_blocked_domain("manual.example.com");

    let resource = std::io::Cursor::new("bulk-one.com\nbulk-two.com\n");
    shield.load_blocklist(resource).join().unwrap();

    // Manual additions survive the bulk merge.
    assert!(shield.is_blocked_domain("manual.example.com"));
    assert!(shield.is_blocked_domain("bulk-one.com"));
    assert!(shield.is_blocked_domain("bulk-two.com"));
    assert_eq!(shield.blocklist_size(), 3);
}

#[test]
fn default_blocklist_loads() {
    let shield = Shield::new();
    shield.load_default_blocklist().join().unwrap();

    assert!(shield.is_blocked_domain("doubleclick.net"));
    assert!(shield.on_request("https://doubleclick.net/ad").is_blocked());
}
