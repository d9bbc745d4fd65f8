//! Overlay heuristic engine.
//!
//! Identifies unwanted overlay/popup elements with geometric and lexical
//! signals. The hide decision, per candidate:
//!
//!   (keyword OR corner-ad OR (floating-box AND keyword) OR full-screen)
//!   AND NOT social-widget
//!
//! Already-marked elements are skipped, so a repeat scan over an
//! unchanged page reports zero new hides.

use crate::snapshot::{DomNode, DomSnapshot, NodeId};
use once_cell::sync::Lazy;
use regex::Regex;

/// Container tags worth examining at all.
pub(crate) const OVERLAY_CONTAINERS: &[&str] = &["div", "iframe", "span", "aside", "ins", "section"];

/// Lexical ad indicators in element content.
pub(crate) const AD_KEYWORDS: &str = "adsby|sponsored|advertisement|click here|you won|congratulation|lucky winner|pop-under|pop-up|banner|promo|offer|discount";

/// Social/sharing vocabulary; small widgets mentioning these are legitimate.
pub(crate) const SOCIAL_KEYWORDS: &str = "share|facebook|twitter|instagram|pinterest|linkedin";

static AD_KEYWORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("(?i)({AD_KEYWORDS})")).expect("static keyword regex"));

static SOCIAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("(?i)({SOCIAL_KEYWORDS})")).expect("static social regex"));

/// Result of one overlay scan: the elements to hide, in document order.
#[derive(Debug, Default)]
pub struct OverlayScan {
    pub hide: Vec<NodeId>,
}

impl OverlayScan {
    /// Net-new hides found by this scan.
    pub fn newly_hidden(&self) -> usize {
        self.hide.len()
    }
}

/// Scan a snapshot for unwanted overlays.
pub fn scan_overlays(snapshot: &DomSnapshot) -> OverlayScan {
    let mut scan = OverlayScan::default();

    for (index, node) in snapshot.nodes.iter().enumerate() {
        if node.overlay_marker {
            continue;
        }
        if !OVERLAY_CONTAINERS.contains(&node.tag.as_str()) {
            continue;
        }
        if !node.position.is_overlay_capable() || node.opacity <= 0.0 {
            continue;
        }

        if should_hide(node, snapshot) {
            scan.hide.push(NodeId(index));
        }
    }

    scan
}

fn should_hide(node: &DomNode, snapshot: &DomSnapshot) -> bool {
    let rect = node.rect;
    let vw = snapshot.viewport.width;
    let vh = snapshot.viewport.height;

    let has_ad_keywords = AD_KEYWORD_RE.is_match(&node.inner_text);

    let is_social_widget = SOCIAL_RE.is_match(&node.inner_text)
        && rect.width < 100.0
        && rect.height < 300.0;

    let is_full_screen_overlay =
        rect.width > vw * 0.8 && rect.height > vh * 0.8 && node.z_index > 100;

    let is_corner_ad = rect.width < 400.0
        && rect.height < 400.0
        && ((rect.top < 10.0 && rect.left < 10.0)
            || (rect.top < 10.0 && rect.right() > vw - 10.0)
            || (rect.bottom() > vh - 10.0 && rect.left < 10.0)
            || (rect.bottom() > vh - 10.0 && rect.right() > vw - 10.0));

    let is_floating_box = rect.width < 600.0
        && rect.height < 600.0
        && rect.left > 50.0
        && rect.right() < vw - 50.0
        && rect.top > 100.0
        && rect.bottom() < vh - 50.0
        && node.z_index > 10;

    (has_ad_keywords || is_corner_ad || (is_floating_box && has_ad_keywords) || is_full_screen_overlay)
        && !is_social_widget
}
