// cache.rs
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// One hour.
pub const DEFAULT_CACHE_TTL_SECS: i64 = 60 * 60;

#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    /// City as the user typed it, for display.
    pub city: String,
    pub report: String,
    pub stored_at: i64,
}

/// A still-fresh entry, as shown in the "cached cities" panel.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedCity {
    pub city: String,
    pub age_secs: i64,
}

/// Short-lived memo of raw reports, keyed by a digest of the normalized city.
///
/// Stale entries stay in the map; they read as misses and get overwritten
/// by the next successful fetch.
#[derive(Debug)]
pub struct ReportCache {
    ttl_secs: i64,
    entries: HashMap<String, CacheEntry>,
}

impl Default for ReportCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL_SECS)
    }
}

impl ReportCache {
    pub fn new(ttl_secs: i64) -> Self {
        Self {
            ttl_secs,
            entries: HashMap::new(),
        }
    }

    pub fn get(&self, city: &str, now: i64) -> Option<&str> {
        self.entries
            .get(&cache_key(city))
            .filter(|entry| self.is_fresh(entry, now))
            .map(|entry| entry.report.as_str())
    }

    pub fn put(&mut self, city: &str, report: String, now: i64) {
        self.entries.insert(
            cache_key(city),
            CacheEntry {
                city: city.trim().to_string(),
                report,
                stored_at: now,
            },
        );
    }

    /// Fresh entries, newest first.
    pub fn fresh_entries(&self, now: i64) -> Vec<CachedCity> {
        let mut fresh: Vec<CachedCity> = self
            .entries
            .values()
            .filter(|entry| self.is_fresh(entry, now))
            .map(|entry| CachedCity {
                city: entry.city.clone(),
                age_secs: now - entry.stored_at,
            })
            .collect();
        fresh.sort_by_key(|c| c.age_secs);
        fresh
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn is_fresh(&self, entry: &CacheEntry, now: i64) -> bool {
        now - entry.stored_at < self.ttl_secs
    }
}

/// Hex SHA-256 of the trimmed, lower-cased city name.
pub fn cache_key(city: &str) -> String {
    let normalized = city.trim().to_lowercase();
    let digest = Sha256::digest(normalized.as_bytes());
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

/// Lock a shared cache, recovering the data if another holder panicked.
pub fn lock_cache(cache: &Mutex<ReportCache>) -> MutexGuard<'_, ReportCache> {
    cache.lock().unwrap_or_else(PoisonError::into_inner)
}

pub fn now_unix() -> i64 {
    chrono::Utc::now().timestamp()
}
