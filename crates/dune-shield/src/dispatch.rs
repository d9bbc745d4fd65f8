//! Injection dispatch table.
//!
//! The page-context protections are applied as an explicit ordered list
//! rather than ad hoc wiring, so the order and side effects of every
//! injection are auditable in one place. Each entry names the injection,
//! gates it on a config toggle, renders its script, and states what to do
//! with the result.

use dune_filter::FilterConfig;
use dune_page::{cookie_script, nav_guard_script, overlay_script, ShieldPayload};

/// How the facade treats an injection's asynchronous result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultPolicy {
    /// Parse the result as a count of newly hidden elements.
    HiddenCount,
    /// Discard the result.
    Ignore,
}

/// One page-context injection.
pub struct Injection {
    pub name: &'static str,
    pub enabled: fn(&FilterConfig) -> bool,
    pub render: fn(&ShieldPayload) -> String,
    pub result: ResultPolicy,
}

/// Ordered list of injections, applied front to back.
pub struct InjectionRegistry {
    entries: Vec<Injection>,
}

impl InjectionRegistry {
    /// The default protection set. Order matches the page-finished
    /// sequence: overlay hiding first, then the navigation guard, then
    /// cookie dismissal.
    pub fn standard() -> Self {
        Self {
            entries: vec![
                Injection {
                    name: "overlay-hide",
                    enabled: FilterConfig::ad_block_enabled,
                    render: overlay_script,
                    result: ResultPolicy::HiddenCount,
                },
                Injection {
                    name: "nav-guard",
                    enabled: FilterConfig::redirect_block_enabled,
                    render: nav_guard_script,
                    result: ResultPolicy::Ignore,
                },
                Injection {
                    name: "cookie-dismiss",
                    enabled: FilterConfig::cookie_blocking_enabled,
                    render: cookie_script,
                    result: ResultPolicy::Ignore,
                },
            ],
        }
    }

    /// Injections currently enabled under `config`, in order.
    pub fn active<'a>(&'a self, config: &FilterConfig) -> impl Iterator<Item = &'a Injection> + 'a {
        let flags: Vec<bool> = self.entries.iter().map(|i| (i.enabled)(config)).collect();
        self.entries
            .iter()
            .zip(flags)
            .filter_map(|(entry, on)| on.then_some(entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_order() {
        let registry = InjectionRegistry::standard();
        let names: Vec<_> = registry.entries.iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["overlay-hide", "nav-guard", "cookie-dismiss"]);
    }

    #[test]
    fn test_active_respects_toggles() {
        let registry = InjectionRegistry::standard();
        let config = FilterConfig::new();

        // Cookie blocking is off by default.
        let names: Vec<_> = registry.active(&config).map(|i| i.name).collect();
        assert_eq!(names, vec!["overlay-hide", "nav-guard"]);

        config.set_cookie_blocking_enabled(true);
        config.set_ad_block_enabled(false);
        let names: Vec<_> = registry.active(&config).map(|i| i.name).collect();
        assert_eq!(names, vec!["nav-guard", "cookie-dismiss"]);
    }

    #[test]
    fn test_scripts_render() {
        let registry = InjectionRegistry::standard();
        let payload = ShieldPayload::new();
        for entry in &registry.entries {
            assert!(!(entry.render)(&payload).is_empty());
        }
    }
}
