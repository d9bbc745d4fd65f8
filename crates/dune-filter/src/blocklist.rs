//! Blocklist storage: literal hosts plus compiled URL patterns.
//!
//! Lookups run on the host's event thread and must never observe a
//! partially merged set, so bulk loads are staged: the whole resource is
//! parsed into a temporary set first and merged under the write lock in a
//! single step. Readers see either the pre-load or the post-load state.

use crate::patterns::{builtin_patterns, PatternError, UrlPattern};
use std::collections::HashSet;
use std::io::{BufRead, BufReader, Read};
use std::sync::RwLock;
use std::thread::{self, JoinHandle};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Bundled default host list, one lowercase host per line.
/// Embedded at compile time for zero startup cost.
pub const DEFAULT_HOST_LIST: &str = include_str!("../data/default_hosts.txt");

/// Errors during blocklist bulk loading.
#[derive(Debug, Error)]
pub enum BlocklistError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("empty blocklist resource")]
    EmptyList,
}

/// Shared store of blocked hosts and URL patterns.
///
/// The host set and pattern list are append/remove-only during normal
/// operation; [`BlocklistStore::merge_hosts`] is the one bulk entry point.
#[derive(Debug)]
pub struct BlocklistStore {
    hosts: RwLock<HashSet<String>>,
    patterns: RwLock<Vec<UrlPattern>>,
}

impl BlocklistStore {
    /// Create a store with an empty host set and the built-in pattern list.
    pub fn new() -> Self {
        Self {
            hosts: RwLock::new(HashSet::new()),
            patterns: RwLock::new(builtin_patterns()),
        }
    }

    /// Add a single host (case-insensitive).
    pub fn add_host(&self, host: &str) {
        let mut hosts = self.hosts.write().unwrap();
        hosts.insert(host.trim().to_lowercase());
    }

    /// Remove a single host (case-insensitive).
    pub fn remove_host(&self, host: &str) {
        let mut hosts = self.hosts.write().unwrap();
        hosts.remove(&host.trim().to_lowercase());
    }

    /// Exact membership test, case-insensitive.
    pub fn contains_host(&self, host: &str) -> bool {
        let hosts = self.hosts.read().unwrap();
        hosts.contains(&host.to_lowercase())
    }

    /// Drop every host. The pattern list is unaffected.
    pub fn clear_hosts(&self) {
        let mut hosts = self.hosts.write().unwrap();
        hosts.clear();
    }

    pub fn host_count(&self) -> usize {
        self.hosts.read().unwrap().len()
    }

    /// Compile and append a user-supplied URL pattern.
    ///
    /// A malformed pattern is rejected here and leaves the existing list
    /// untouched.
    pub fn add_pattern(&self, pattern: &str) -> Result<(), PatternError> {
        let compiled = UrlPattern::compile(pattern)?;
        let mut patterns = self.patterns.write().unwrap();
        patterns.push(compiled);
        Ok(())
    }

    /// Full-string match of `url` against the pattern list.
    pub fn matches_pattern(&self, url: &str) -> bool {
        let patterns = self.patterns.read().unwrap();
        patterns.iter().any(|p| p.matches(url))
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns.read().unwrap().len()
    }

    /// Merge a staged host set in one step.
    fn merge_hosts(&self, staged: HashSet<String>) {
        let mut hosts = self.hosts.write().unwrap();
        hosts.extend(staged);
    }

    /// Parse a newline-delimited host resource and merge it.
    ///
    /// The entire resource is read before anything becomes visible; an I/O
    /// failure mid-read abandons the attempt and previously loaded rules
    /// stay in effect. Returns the number of staged hosts.
    pub fn load_from_reader<R: Read>(&self, reader: R) -> Result<usize, BlocklistError> {
        let buf = BufReader::new(reader);
        let mut staged = HashSet::new();

        for line in buf.lines() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            staged.insert(trimmed.to_lowercase());
        }

        if staged.is_empty() {
            return Err(BlocklistError::EmptyList);
        }

        let count = staged.len();
        self.merge_hosts(staged);
        debug!("Merged {} hosts into blocklist", count);
        Ok(count)
    }

    /// Run [`load_from_reader`](Self::load_from_reader) on a background
    /// thread. A failed load is abandoned with a warning; nothing
    /// propagates to the host lifecycle.
    pub fn load_in_background<R>(self: &std::sync::Arc<Self>, reader: R) -> JoinHandle<()>
    where
        R: Read + Send + 'static,
    {
        let store = std::sync::Arc::clone(self);
        thread::Builder::new()
            .name("blocklist-load".to_string())
            .spawn(move || match store.load_from_reader(reader) {
                Ok(count) => info!("Blocklist loaded: {} hosts", count),
                Err(e) => warn!("Blocklist load abandoned: {}", e),
            })
            .expect("Failed to spawn blocklist loader thread")
    }

    /// Load the bundled default host list in the background.
    pub fn load_defaults_in_background(self: &std::sync::Arc<Self>) -> JoinHandle<()> {
        self.load_in_background(std::io::Cursor::new(DEFAULT_HOST_LIST))
    }
}

impl Default for BlocklistStore {
    fn default() -> Self {
        Self::new()
    }
}
