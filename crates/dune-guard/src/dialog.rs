//! Scam-dialog guard.
//!
//! Intercepts page-originated alert/confirm dialogs before they are
//! shown and auto-dismisses the ones whose wording matches scareware and
//! exit-intent patterns. The word lists trade false positives for
//! blocking scam content without a reputation database.

use aho_corasick::{AhoCorasick, AhoCorasickBuilder};
use dune_filter::EventSink;
use once_cell::sync::Lazy;
use tracing::debug;

/// Kind of page-originated modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Alert,
    Confirm,
}

/// What the host should do with the dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogDecision {
    /// Display normally.
    Show,
    /// Auto-dismiss as if cancelled.
    Suppress,
}

/// Scareware vocabulary for alerts.
const ALERT_LEXICON: &[&str] = &[
    "virus", "infected", "hacked", "call", "support", "error", "update", "prize", "winner",
];

/// Exit-intent vocabulary for confirms.
const CONFIRM_LEXICON: &[&str] = &["leave", "exit", "virus", "infected"];

static ALERT_AUTOMATON: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasickBuilder::new()
        .ascii_case_insensitive(true)
        .build(ALERT_LEXICON)
        .expect("static alert lexicon must compile")
});

static CONFIRM_AUTOMATON: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasickBuilder::new()
        .ascii_case_insensitive(true)
        .build(CONFIRM_LEXICON)
        .expect("static confirm lexicon must compile")
});

/// Suppresses scam dialogs and reports them to the notification sink.
pub struct DialogGuard {
    events: EventSink,
}

impl DialogGuard {
    pub fn new(events: EventSink) -> Self {
        Self { events }
    }

    /// Decide a dialog before the host shows it.
    pub fn on_dialog(&self, kind: DialogKind, url: &str, message: &str) -> DialogDecision {
        let automaton = match kind {
            DialogKind::Alert => &*ALERT_AUTOMATON,
            DialogKind::Confirm => &*CONFIRM_AUTOMATON,
        };

        if automaton.is_match(message) {
            let reason = match kind {
                DialogKind::Alert => "blocked scam alert",
                DialogKind::Confirm => "blocked scam confirm",
            };
            debug!("Suppressed {:?} dialog on {}: {}", kind, url, message);
            self.events.blocked(url, reason);
            return DialogDecision::Suppress;
        }

        DialogDecision::Show
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;
    use dune_filter::FilterEvent;

    fn make_guard() -> (DialogGuard, crossbeam_channel::Receiver<FilterEvent>) {
        let (tx, rx) = unbounded();
        (DialogGuard::new(EventSink::new(tx)), rx)
    }

    #[test]
    fn test_scareware_alert_suppressed() {
        let (guard, rx) = make_guard();

        let decision = guard.on_dialog(
            DialogKind::Alert,
            "https://scam.example.com",
            "Your device is infected, call support now",
        );

        assert_eq!(decision, DialogDecision::Suppress);
        assert_eq!(
            rx.try_recv().unwrap(),
            FilterEvent::Blocked {
                url: "https://scam.example.com".into(),
                reason: "blocked scam alert".into(),
            }
        );
    }

    #[test]
    fn test_benign_alert_shown() {
        let (guard, rx) = make_guard();

        let decision = guard.on_dialog(
            DialogKind::Alert,
            "https://forms.example.com",
            "Confirm form submission?",
        );

        assert_eq!(decision, DialogDecision::Show);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_lexicon_case_insensitive() {
        let (guard, _rx) = make_guard();

        assert_eq!(
            guard.on_dialog(DialogKind::Alert, "https://x.com", "VIRUS DETECTED!!!"),
            DialogDecision::Suppress
        );
    }

    #[test]
    fn test_exit_intent_confirm_suppressed() {
        let (guard, _rx) = make_guard();

        assert_eq!(
            guard.on_dialog(
                DialogKind::Confirm,
                "https://x.com",
                "Are you sure you want to leave? You will lose your prize!"
            ),
            DialogDecision::Suppress
        );
    }

    #[test]
    fn test_confirm_uses_narrower_lexicon() {
        let (guard, _rx) = make_guard();

        // "prize" is alert vocabulary only.
        assert_eq!(
            guard.on_dialog(DialogKind::Confirm, "https://x.com", "Claim your prize"),
            DialogDecision::Show
        );
    }
}
