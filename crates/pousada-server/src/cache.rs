// SPDX-License-Identifier: Apache-2.0

use pousada_api::RoomsResponse;
use std::collections::HashMap;
use std::time::{Duration, Instant};

#[derive(Clone)]
struct CacheEntry {
    response: RoomsResponse,
    created_at: Instant,
}

/// Response cache keyed by the canonical filter signature. Entries expire
/// independently after the TTL; when full, the oldest entry is evicted.
pub struct SearchCache {
    ttl: Duration,
    max_entries: usize,
    entries: HashMap<String, CacheEntry>,
}

impl SearchCache {
    #[must_use]
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self {
            ttl,
            max_entries,
            entries: HashMap::new(),
        }
    }

    pub fn get(&mut self, key: &str) -> Option<RoomsResponse> {
        self.entries
            .retain(|_, v| v.created_at.elapsed() <= self.ttl);
        self.entries.get(key).map(|e| e.response.clone())
    }

    pub fn insert(&mut self, key: String, response: RoomsResponse) {
        self.entries
            .retain(|_, v| v.created_at.elapsed() <= self.ttl);
        if self.entries.len() >= self.max_entries {
            if let Some(victim) = self
                .entries
                .iter()
                .min_by_key(|(_, v)| v.created_at)
                .map(|(k, _)| k.clone())
            {
                self.entries.remove(&victim);
            }
        }
        self.entries.insert(
            key,
            CacheEntry {
                response,
                created_at: Instant::now(),
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pousada_model::Pagination;

    fn response(total: u64) -> RoomsResponse {
        RoomsResponse {
            rooms: Vec::new(),
            pagination: Pagination::for_total(total, 1, 10),
        }
    }

    #[test]
    fn hit_within_ttl_returns_the_stored_response() {
        let mut cache = SearchCache::new(Duration::from_secs(60), 8);
        cache.insert("name=mar".to_string(), response(3));
        let hit = cache.get("name=mar").expect("cache hit");
        assert_eq!(hit.pagination.total_rooms, 3);
        assert!(cache.get("name=sol").is_none());
    }

    #[test]
    fn zero_ttl_entries_expire_immediately() {
        let mut cache = SearchCache::new(Duration::ZERO, 8);
        cache.insert("k".to_string(), response(1));
        std::thread::sleep(Duration::from_millis(5));
        assert!(cache.get("k").is_none());
    }

    #[test]
    fn oldest_entry_is_evicted_at_capacity() {
        let mut cache = SearchCache::new(Duration::from_secs(60), 2);
        cache.insert("a".to_string(), response(1));
        std::thread::sleep(Duration::from_millis(5));
        cache.insert("b".to_string(), response(2));
        std::thread::sleep(Duration::from_millis(5));
        cache.insert("c".to_string(), response(3));
        assert!(cache.get("a").is_none());
        assert!(cache.get("b").is_some());
        assert!(cache.get("c").is_some());
    }

    #[test]
    fn insert_overwrites_unconditionally() {
        let mut cache = SearchCache::new(Duration::from_secs(60), 8);
        cache.insert("k".to_string(), response(1));
        cache.insert("k".to_string(), response(9));
        let hit = cache.get("k").expect("cache hit");
        assert_eq!(hit.pagination.total_rooms, 9);
    }
}
