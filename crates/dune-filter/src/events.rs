//! Notification messages sent from the filtering engines to the host UI.

use crate::stats::StatsSnapshot;
use crossbeam_channel::Sender;

/// Messages delivered to the host's stats/notification sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterEvent {
    /// A request, navigation, or dialog was blocked.
    Blocked { url: String, reason: String },
    /// Aggregate counters changed.
    Stats {
        requests_blocked: u64,
        elements_hidden: u64,
    },
}

/// Sending half of the notification stream.
///
/// Cloned into every engine. A disconnected receiver is not an error: the
/// host may simply not be listening, so send failures are dropped.
#[derive(Debug, Clone)]
pub struct EventSink {
    tx: Sender<FilterEvent>,
}

impl EventSink {
    pub fn new(tx: Sender<FilterEvent>) -> Self {
        Self { tx }
    }

    pub fn blocked(&self, url: &str, reason: &str) {
        let _ = self.tx.send(FilterEvent::Blocked {
            url: url.to_string(),
            reason: reason.to_string(),
        });
    }

    pub fn stats(&self, snapshot: StatsSnapshot) {
        let _ = self.tx.send(FilterEvent::Stats {
            requests_blocked: snapshot.requests_blocked,
            elements_hidden: snapshot.elements_hidden,
        });
    }
}
