//! Content-script payloads.
//!
//! The injected scripts are rendered from data: a serialized
//! [`ShieldPayload`] carrying the same keyword lists, selector data, and
//! timing constants that drive the pure scans in this crate. The JS
//! templates only walk the DOM, apply the payload, and hand back a single
//! numeric result, so all tunable heuristic knowledge stays on the Rust
//! side of the boundary.

use crate::cookie::{ACCEPT_PHRASES, BANNER_ATTRS, BANNER_CLASSES, BANNER_IDS, CONSENT_WORDS};
use crate::overlay::{AD_KEYWORDS, OVERLAY_CONTAINERS, SOCIAL_KEYWORDS};
use serde::Serialize;

/// Idempotency marker set on elements hidden by the overlay script.
pub const OVERLAY_MARKER_ATTR: &str = "data-dune-blocked";

/// Idempotency marker set on elements handled by the cookie script.
pub const COOKIE_MARKER_ATTR: &str = "data-dune-blocked-cookie";

/// Suspicious keywords for script-initiated navigation targets.
const NAV_SUSPICIOUS: &[&str] = &["redirect", "track.php", "click.php"];

/// Grace period after a pointer-down during which `window.open` and
/// location changes count as user-initiated (ms).
const NAV_GRACE_MS: u64 = 1000;

/// Longer grace period for `history.pushState`, which SPAs call
/// legitimately well after a click (ms).
const PUSH_STATE_GRACE_MS: u64 = 2000;

/// Data shipped into the page context.
#[derive(Debug, Serialize)]
pub struct ShieldPayload {
    pub containers: Vec<&'static str>,
    pub ad_keywords: &'static str,
    pub social_keywords: &'static str,
    pub overlay_marker: &'static str,
    pub banner_classes: Vec<&'static str>,
    pub banner_ids: Vec<&'static str>,
    pub banner_attrs: Vec<&'static str>,
    pub accept_phrases: Vec<&'static str>,
    pub consent_words: Vec<&'static str>,
    pub cookie_marker: &'static str,
    pub nav_suspicious: Vec<&'static str>,
    pub nav_grace_ms: u64,
    pub push_state_grace_ms: u64,
}

impl ShieldPayload {
    pub fn new() -> Self {
        Self {
            containers: OVERLAY_CONTAINERS.to_vec(),
            ad_keywords: AD_KEYWORDS,
            social_keywords: SOCIAL_KEYWORDS,
            overlay_marker: OVERLAY_MARKER_ATTR,
            banner_classes: BANNER_CLASSES.to_vec(),
            banner_ids: BANNER_IDS.to_vec(),
            banner_attrs: BANNER_ATTRS.to_vec(),
            accept_phrases: ACCEPT_PHRASES.to_vec(),
            consent_words: CONSENT_WORDS.to_vec(),
            cookie_marker: COOKIE_MARKER_ATTR,
            nav_suspicious: NAV_SUSPICIOUS.to_vec(),
            nav_grace_ms: NAV_GRACE_MS,
            push_state_grace_ms: PUSH_STATE_GRACE_MS,
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("payload serialization is infallible")
    }
}

impl Default for ShieldPayload {
    fn default() -> Self {
        Self::new()
    }
}

/// Overlay scan-and-hide script. Returns the count of newly hidden
/// elements and installs a persistent mutation observer that re-scans
/// whenever nodes are added.
pub fn overlay_script(payload: &ShieldPayload) -> String {
    format!(
        r#"(function() {{
  const p = {payload};
  const adRe = new RegExp('(' + p.ad_keywords + ')', 'i');
  const socialRe = new RegExp('(' + p.social_keywords + ')', 'i');
  function scanOverlays() {{
    let hidden = 0;
    document.querySelectorAll(p.containers.join(',')).forEach(el => {{
      try {{
        if (el.hasAttribute(p.overlay_marker)) return;
        const style = window.getComputedStyle(el);
        const rect = el.getBoundingClientRect();
        const zIndex = parseInt(style.zIndex) || 0;
        const opacity = parseFloat(style.opacity) || 1;
        const positioned = style.position === 'fixed' || style.position === 'absolute' || style.position === 'sticky';
        if (!positioned || opacity <= 0) return;
        const html = el.innerHTML;
        const hasAdKeywords = adRe.test(html);
        const isSocialWidget = socialRe.test(html) && rect.width < 100 && rect.height < 300;
        const isFullScreenOverlay = rect.width > window.innerWidth * 0.8 && rect.height > window.innerHeight * 0.8 && zIndex > 100;
        const isCornerAd = rect.width < 400 && rect.height < 400 &&
          ((rect.top < 10 && rect.left < 10) ||
           (rect.top < 10 && rect.right > window.innerWidth - 10) ||
           (rect.bottom > window.innerHeight - 10 && rect.left < 10) ||
           (rect.bottom > window.innerHeight - 10 && rect.right > window.innerWidth - 10));
        const isFloatingBox = rect.width < 600 && rect.height < 600 &&
          rect.left > 50 && rect.right < window.innerWidth - 50 &&
          rect.top > 100 && rect.bottom < window.innerHeight - 50 && zIndex > 10;
        if ((hasAdKeywords || isCornerAd || (isFloatingBox && hasAdKeywords) || isFullScreenOverlay) && !isSocialWidget) {{
          el.style.setProperty('display', 'none', 'important');
          el.setAttribute(p.overlay_marker, 'true');
          hidden++;
        }}
      }} catch (e) {{}}
    }});
    return hidden;
  }}
  if (!window.__duneOverlayObserver) {{
    window.__duneOverlayObserver = new MutationObserver(function(mutations) {{
      if (mutations.some(m => m.addedNodes.length > 0)) scanOverlays();
    }});
    window.__duneOverlayObserver.observe(document.body, {{ childList: true, subtree: true }});
  }}
  return scanOverlays();
}})()"#,
        payload = payload.to_json()
    )
}

/// Cookie-banner dismissal script. Hides known banner markup, clicks
/// first-party accept controls once, re-applies on mutation. Per-element
/// failures are swallowed so the scan always completes.
pub fn cookie_script(payload: &ShieldPayload) -> String {
    format!(
        r#"(function() {{
  const p = {payload};
  function dismissBanners() {{
    let handled = 0;
    const selectors = []
      .concat(p.banner_classes.map(c => '.' + c))
      .concat(p.banner_ids.map(i => '#' + i))
      .concat(p.banner_attrs.map(a => '[' + a + ']'))
      .concat(['[aria-label*="cookie"]', '[aria-label*="consent"]',
               'div[class*="cookie"][class*="banner"]', 'div[class*="cookie"][class*="notice"]',
               'div[class*="gdpr"][class*="banner"]', 'div[class*="gdpr"][class*="consent"]']);
    selectors.forEach(selector => {{
      try {{
        document.querySelectorAll(selector).forEach(el => {{
          if (el && el.style && !el.hasAttribute(p.cookie_marker)) {{
            el.style.setProperty('display', 'none', 'important');
            el.setAttribute(p.cookie_marker, 'true');
            handled++;
          }}
        }});
      }} catch (e) {{}}
    }});
    document.querySelectorAll('button, a, .button').forEach(el => {{
      try {{
        if (el.hasAttribute(p.cookie_marker)) return;
        const text = el.textContent.toLowerCase();
        const accepts = p.accept_phrases.some(phrase => text.includes(phrase));
        const consent = p.consent_words.some(word => text.includes(word));
        if (accepts && consent) {{
          el.setAttribute(p.cookie_marker, 'true');
          el.click();
          handled++;
        }}
      }} catch (e) {{}}
    }});
    return handled;
  }}
  if (!window.__duneCookieObserver) {{
    window.__duneCookieObserver = new MutationObserver(() => dismissBanners());
    window.__duneCookieObserver.observe(document.body, {{ childList: true, subtree: true }});
  }}
  return dismissBanners();
}})()"#,
        payload = payload.to_json()
    )
}

/// Navigation-guard script. Tracks the last pointer-down on a link and
/// wraps `window.open`, `history.pushState`, `location.assign`, and the
/// `location.href` setter: script-initiated calls past the grace period
/// whose target carries a suspicious keyword are suppressed.
pub fn nav_guard_script(payload: &ShieldPayload) -> String {
    format!(
        r#"(function() {{
  if (window.__duneNavGuard) return 0;
  window.__duneNavGuard = {{ lastClickTime: 0, suppressed: 0 }};
  const p = {payload};
  const guard = window.__duneNavGuard;
  function isSuspicious(url) {{
    if (typeof url !== 'string') return false;
    const lower = url.toLowerCase();
    return p.nav_suspicious.some(k => lower.includes(k));
  }}
  function hijacked(url, graceMs) {{
    return (Date.now() - guard.lastClickTime) > graceMs && isSuspicious(url);
  }}
  document.addEventListener('mousedown', function(e) {{
    if (e.target.closest && e.target.closest('a')) guard.lastClickTime = Date.now();
  }}, true);
  const originalOpen = window.open;
  window.open = function(url, name, features) {{
    if (hijacked(url, p.nav_grace_ms)) {{ guard.suppressed++; return null; }}
    return originalOpen.call(this, url, name, features);
  }};
  const originalPushState = history.pushState;
  history.pushState = function(state, title, url) {{
    if (hijacked(url, p.push_state_grace_ms)) {{ guard.suppressed++; return; }}
    return originalPushState.call(this, state, title, url);
  }};
  const originalAssign = location.assign.bind(location);
  location.assign = function(url) {{
    if (hijacked(url, p.nav_grace_ms)) {{ guard.suppressed++; return; }}
    return originalAssign(url);
  }};
  const hrefDescriptor = Object.getOwnPropertyDescriptor(window.Location.prototype, 'href');
  if (hrefDescriptor && hrefDescriptor.configurable) {{
    Object.defineProperty(window.Location.prototype, 'href', {{
      set: function(url) {{
        if (hijacked(url, p.nav_grace_ms)) {{ guard.suppressed++; return; }}
        hrefDescriptor.set.call(this, url);
      }},
      get: hrefDescriptor.get
    }});
  }}
  return 0;
}})()"#,
        payload = payload.to_json()
    )
}
