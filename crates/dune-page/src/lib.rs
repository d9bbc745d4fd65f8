//! Dune Page-Context Heuristics
//!
//! The overlay and cookie-banner logic runs inside the page, but the
//! decisions themselves are pure functions over a [`DomSnapshot`] so they
//! can be unit-tested without any browser engine. The injected scripts
//! are rendered from the same data ([`payload`]) that drives the pure
//! scans, keeping the two sides in agreement.

mod cookie;
mod overlay;
mod payload;
mod snapshot;

pub use cookie::{scan_cookie_banners, CookieScan};
pub use overlay::{scan_overlays, OverlayScan};
pub use payload::{
    cookie_script, nav_guard_script, overlay_script, ShieldPayload, COOKIE_MARKER_ATTR,
    OVERLAY_MARKER_ATTR,
};
pub use snapshot::{CssPosition, DomNode, DomSnapshot, NodeId, Rect, Viewport};
