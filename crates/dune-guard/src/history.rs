//! Bounded navigation history.

use std::collections::VecDeque;

/// One recorded navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationEvent {
    pub url: String,
    /// Wall-clock visit time in milliseconds.
    pub at_ms: u64,
}

/// Most-recent-first navigation sequence with a fixed capacity.
///
/// Owned exclusively by the navigation guard. Inserting a URL equal to
/// the current front entry is a no-op, so the sequence never holds
/// duplicate-adjacent entries; insertion past capacity evicts the oldest.
#[derive(Debug)]
pub struct NavigationHistory {
    entries: VecDeque<NavigationEvent>,
    capacity: usize,
}

/// Default history depth, enough to roll back past a redirect chain.
pub const DEFAULT_CAPACITY: usize = 20;

impl NavigationHistory {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "history capacity must be positive");
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record a navigation. Returns false (and records nothing) when the
    /// URL equals the most recent entry.
    pub fn push(&mut self, url: &str, at_ms: u64) -> bool {
        if self.entries.front().is_some_and(|e| e.url == url) {
            return false;
        }

        self.entries.push_front(NavigationEvent {
            url: url.to_string(),
            at_ms,
        });
        if self.entries.len() > self.capacity {
            self.entries.pop_back();
        }
        true
    }

    /// Entry at `index`, 0 being the most recent.
    pub fn get(&self, index: usize) -> Option<&NavigationEvent> {
        self.entries.get(index)
    }

    pub fn front(&self) -> Option<&NavigationEvent> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Most-recent-first iteration.
    pub fn iter(&self) -> impl Iterator<Item = &NavigationEvent> {
        self.entries.iter()
    }
}

impl Default for NavigationHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_most_recent_first() {
        let mut history = NavigationHistory::new();
        history.push("https://a.com", 100);
        history.push("https://b.com", 200);

        assert_eq!(history.front().unwrap().url, "https://b.com");
        assert_eq!(history.get(1).unwrap().url, "https://a.com");
    }

    #[test]
    fn test_duplicate_front_rejected() {
        let mut history = NavigationHistory::new();
        assert!(history.push("https://a.com", 100));
        assert!(!history.push("https://a.com", 150));
        assert_eq!(history.len(), 1);
        // The original visit time is preserved.
        assert_eq!(history.front().unwrap().at_ms, 100);
    }

    #[test]
    fn test_revisit_after_other_page_allowed() {
        let mut history = NavigationHistory::new();
        history.push("https://a.com", 100);
        history.push("https://b.com", 200);
        assert!(history.push("https://a.com", 300));

        // The revisit records its own timestamp, not the first visit's.
        assert_eq!(history.front().unwrap().at_ms, 300);
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn test_capacity_eviction_oldest_first() {
        let mut history = NavigationHistory::with_capacity(20);
        for i in 0..25 {
            history.push(&format!("https://site{i}.com"), i);
        }

        assert_eq!(history.len(), 20);
        // The 20 most recent survive: site5 .. site24.
        assert_eq!(history.front().unwrap().url, "https://site24.com");
        assert_eq!(history.get(19).unwrap().url, "https://site5.com");
        assert!(history.iter().all(|e| e.at_ms >= 5));
    }
}
