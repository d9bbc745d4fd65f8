//! Cookie-banner suppressor.
//!
//! Two passes over a snapshot: hide elements matching known consent
//! banner markup, and click first-party accept controls once so banners
//! that cannot simply be hidden are dismissed at the source. Both passes
//! are idempotent via the cookie marker.

use crate::snapshot::{DomNode, DomSnapshot, NodeId};

/// Class names and ids used by common cookie/consent/GDPR banners.
pub(crate) const BANNER_CLASSES: &[&str] = &[
    "cookie-banner",
    "cookie-notice",
    "cookie-policy",
    "cookies-popup",
    "cookie-consent",
    "cookie-alert",
    "consent-banner",
    "consent-popup",
    "gdpr-banner",
    "gdpr-consent",
    "gdpr-popup",
];

pub(crate) const BANNER_IDS: &[&str] = &[
    "cookie-banner",
    "cookie-notice",
    "cookie-policy",
    "cookies",
];

pub(crate) const BANNER_ATTRS: &[&str] = &["data-cookie-notice", "data-gdpr"];

/// Phrases on controls that accept/dismiss a consent prompt.
pub(crate) const ACCEPT_PHRASES: &[&str] = &[
    "accept all",
    "i agree",
    "accept",
    "agree",
    "continue",
    "got it",
    "ok",
    "consent",
];

/// Vocabulary that ties a control to consent UI rather than page content.
pub(crate) const CONSENT_WORDS: &[&str] = &["cookie", "consent", "gdpr"];

/// Result of one cookie scan.
#[derive(Debug, Default)]
pub struct CookieScan {
    /// Banner containers to hide.
    pub hide: Vec<NodeId>,
    /// Accept controls to activate, at most once each.
    pub click: Vec<NodeId>,
}

impl CookieScan {
    pub fn handled(&self) -> usize {
        self.hide.len() + self.click.len()
    }
}

/// Scan a snapshot for consent banners and their accept controls.
pub fn scan_cookie_banners(snapshot: &DomSnapshot) -> CookieScan {
    let mut scan = CookieScan::default();

    for (index, node) in snapshot.nodes.iter().enumerate() {
        if node.cookie_marker {
            continue;
        }
        if matches_banner(node) {
            scan.hide.push(NodeId(index));
        } else if is_accept_control(node) {
            scan.click.push(NodeId(index));
        }
    }

    scan
}

fn matches_banner(node: &DomNode) -> bool {
    if BANNER_CLASSES.iter().any(|c| node.has_class(c)) {
        return true;
    }
    if let Some(id) = &node.id {
        if BANNER_IDS.contains(&id.as_str()) {
            return true;
        }
    }
    if BANNER_ATTRS.iter().any(|a| node.has_attr(a)) {
        return true;
    }
    if let Some(label) = node.attr("aria-label") {
        let label = label.to_lowercase();
        if label.contains("cookie") || label.contains("consent") {
            return true;
        }
    }

    // Class-fragment combinations: cookie/gdpr plus banner/notice/consent
    // in separate class names.
    let fragment = |needle: &str| node.classes.iter().any(|c| c.contains(needle));
    if fragment("cookie") && (fragment("banner") || fragment("notice")) {
        return true;
    }
    if fragment("gdpr") && (fragment("banner") || fragment("consent")) {
        return true;
    }

    false
}

fn is_accept_control(node: &DomNode) -> bool {
    let clickable = node.tag == "button" || node.tag == "a" || node.has_class("button");
    if !clickable {
        return false;
    }

    let text = &node.inner_text;
    ACCEPT_PHRASES.iter().any(|p| text.contains(p))
        && CONSENT_WORDS.iter().any(|w| text.contains(w))
}
