//! In-memory cache of product detail payloads, keyed by slug.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use crate::source::ProductDetailsPayload;

#[derive(Debug, Clone)]
struct CachedDetails {
    payload: ProductDetailsPayload,
    cached_at: DateTime<Utc>,
}

/// Detail payloads already fetched this session.
///
/// Entries older than `max_age` are treated as missing (and dropped on the
/// next lookup), so a revisit after that refetches from the catalog.
#[derive(Debug, Clone, Default)]
pub struct DetailCache {
    entries: HashMap<String, CachedDetails>,
    max_age: Option<Duration>,
}

impl DetailCache {
    pub fn new(max_age: Option<Duration>) -> Self {
        Self {
            entries: HashMap::new(),
            max_age,
        }
    }

    pub fn max_age(&self) -> Option<Duration> {
        self.max_age
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn insert(&mut self, slug: impl Into<String>, payload: ProductDetailsPayload) {
        self.insert_at(slug, payload, Utc::now());
    }

    pub fn insert_at(
        &mut self,
        slug: impl Into<String>,
        payload: ProductDetailsPayload,
        now: DateTime<Utc>,
    ) {
        self.entries.insert(
            slug.into(),
            CachedDetails {
                payload,
                cached_at: now,
            },
        );
    }

    pub fn get(&mut self, slug: &str) -> Option<&ProductDetailsPayload> {
        self.get_at(slug, Utc::now())
    }

    /// Fresh payload for `slug` as of `now`.
    pub fn get_at(&mut self, slug: &str, now: DateTime<Utc>) -> Option<&ProductDetailsPayload> {
        let stale = match (self.entries.get(slug), self.max_age) {
            (None, _) => return None,
            (Some(entry), Some(max)) => now.signed_duration_since(entry.cached_at) > max,
            (Some(_), None) => false,
        };

        if stale {
            tracing::debug!(slug, "detail cache entry expired");
            self.entries.remove(slug);
            return None;
        }

        self.entries.get(slug).map(|entry| &entry.payload)
    }

    pub fn invalidate(&mut self, slug: &str) -> bool {
        self.entries.remove(slug).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
