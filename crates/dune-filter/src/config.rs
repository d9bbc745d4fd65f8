//! Feature toggles shared by every filtering engine.

use std::sync::atomic::{AtomicBool, Ordering};

/// Per-feature enable/disable switches.
///
/// The host settings surface mutates these; every engine reads the latest
/// value on each decision, so a change takes effect without restarting
/// anything. Shared as `Arc<FilterConfig>`.
#[derive(Debug)]
pub struct FilterConfig {
    ad_block: AtomicBool,
    aggressive: AtomicBool,
    popup_block: AtomicBool,
    redirect_block: AtomicBool,
    cookie_blocking: AtomicBool,
    tracking_prevention: AtomicBool,
}

impl FilterConfig {
    pub fn new() -> Self {
        Self {
            ad_block: AtomicBool::new(true),
            aggressive: AtomicBool::new(false),
            popup_block: AtomicBool::new(true),
            redirect_block: AtomicBool::new(true),
            cookie_blocking: AtomicBool::new(false),
            tracking_prevention: AtomicBool::new(true),
        }
    }

    pub fn ad_block_enabled(&self) -> bool {
        self.ad_block.load(Ordering::Relaxed)
    }

    pub fn set_ad_block_enabled(&self, enabled: bool) {
        self.ad_block.store(enabled, Ordering::Relaxed);
    }

    /// Stricter classification tier with a higher false-positive tolerance.
    pub fn aggressive_mode(&self) -> bool {
        self.aggressive.load(Ordering::Relaxed)
    }

    pub fn set_aggressive_mode(&self, enabled: bool) {
        self.aggressive.store(enabled, Ordering::Relaxed);
    }

    pub fn popup_block_enabled(&self) -> bool {
        self.popup_block.load(Ordering::Relaxed)
    }

    pub fn set_popup_block_enabled(&self, enabled: bool) {
        self.popup_block.store(enabled, Ordering::Relaxed);
    }

    pub fn redirect_block_enabled(&self) -> bool {
        self.redirect_block.load(Ordering::Relaxed)
    }

    pub fn set_redirect_block_enabled(&self, enabled: bool) {
        self.redirect_block.store(enabled, Ordering::Relaxed);
    }

    pub fn cookie_blocking_enabled(&self) -> bool {
        self.cookie_blocking.load(Ordering::Relaxed)
    }

    pub fn set_cookie_blocking_enabled(&self, enabled: bool) {
        self.cookie_blocking.store(enabled, Ordering::Relaxed);
    }

    pub fn tracking_prevention_enabled(&self) -> bool {
        self.tracking_prevention.load(Ordering::Relaxed)
    }

    pub fn set_tracking_prevention_enabled(&self, enabled: bool) {
        self.tracking_prevention.store(enabled, Ordering::Relaxed);
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FilterConfig::new();
        assert!(config.ad_block_enabled());
        assert!(!config.aggressive_mode());
        assert!(config.popup_block_enabled());
        assert!(config.redirect_block_enabled());
        assert!(!config.cookie_blocking_enabled());
        assert!(config.tracking_prevention_enabled());
    }

    #[test]
    fn test_toggle_round_trip() {
        let config = FilterConfig::new();
        config.set_ad_block_enabled(false);
        assert!(!config.ad_block_enabled());
        config.set_cookie_blocking_enabled(true);
        assert!(config.cookie_blocking_enabled());
    }
}
