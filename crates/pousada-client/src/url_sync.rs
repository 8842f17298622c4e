// SPDX-License-Identifier: Apache-2.0

use crate::store::{ChangeOrigin, FilterPatch, FilterStore, StoreEvent};
use pousada_api::{canonical_query, parse_query_pairs, parse_room_query};
use std::sync::{Arc, Weak};

/// Boundary to the host's location bar. `replace_query` must not create a
/// history entry.
pub trait UrlPort: Send + Sync {
    fn current_query(&self) -> String;
    fn replace_query(&self, query: &str);
}

/// Keeps URL and store convergent in both directions.
pub struct UrlSync {
    store: Weak<FilterStore>,
}

impl UrlSync {
    /// Subscribes the store→URL writer and returns the navigation handle.
    /// The writer reacts only to user-action changes; navigation-tagged
    /// events are its own writes coming back and are skipped.
    pub fn attach(store: &Arc<FilterStore>, port: Arc<dyn UrlPort>) -> Self {
        let weak = Arc::downgrade(store);
        let writer_store = Weak::clone(&weak);
        store.subscribe(move |event| {
            if *event != StoreEvent::FilterChanged(ChangeOrigin::UserAction) {
                return;
            }
            let Some(store) = writer_store.upgrade() else {
                return;
            };
            let query = canonical_query(&store.snapshot().filter);
            if query != port.current_query() {
                port.replace_query(&query);
            }
        });
        Self { store: weak }
    }

    /// URL→store. Parses the full query, stages only the fields that differ
    /// from the store and applies them in one navigation-tagged write. The
    /// feature set is re-derived wholesale, so a key absent from the URL
    /// turns that feature off.
    pub fn on_navigation(&self, raw_query: &str) {
        let Some(store) = self.store.upgrade() else {
            return;
        };
        let parsed = parse_room_query(&parse_query_pairs(raw_query));
        let current = store.snapshot().filter;

        let mut patch = FilterPatch::default();
        if parsed.name != current.name {
            patch.name = Some(parsed.name);
        }
        if parsed.price_min != current.price_min {
            patch.price_min = Some(parsed.price_min);
        }
        if parsed.price_max != current.price_max {
            patch.price_max = Some(parsed.price_max);
        }
        if parsed.capacity != current.capacity {
            patch.capacity = Some(parsed.capacity);
        }
        if parsed.features != current.features {
            patch.features = Some(parsed.features);
        }
        if parsed.favorite_only != current.favorite_only {
            patch.favorite_only = Some(parsed.favorite_only);
        }
        if parsed.order_by != current.order_by || parsed.direction != current.direction {
            patch.order_by = Some(parsed.order_by);
            patch.direction = Some(parsed.direction);
        }
        if parsed.page != current.page {
            patch.page = Some(parsed.page);
        }
        if parsed.limit != current.limit {
            patch.limit = Some(parsed.limit);
        }

        if !patch.is_empty() {
            store.set_filters(patch, ChangeOrigin::Navigation);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pousada_model::{FeatureKey, OrderBy, OrderDirection};
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakePort {
        query: Mutex<String>,
        writes: Mutex<Vec<String>>,
    }

    impl UrlPort for FakePort {
        fn current_query(&self) -> String {
            self.query.lock().expect("query lock").clone()
        }

        fn replace_query(&self, query: &str) {
            *self.query.lock().expect("query lock") = query.to_string();
            self.writes
                .lock()
                .expect("writes lock")
                .push(query.to_string());
        }
    }

    fn wired() -> (Arc<FilterStore>, Arc<FakePort>, UrlSync) {
        let store = Arc::new(FilterStore::new());
        let port = Arc::new(FakePort::default());
        let sync = UrlSync::attach(&store, Arc::clone(&port) as Arc<dyn UrlPort>);
        (store, port, sync)
    }

    #[test]
    fn navigation_parses_every_recognized_key_into_the_store() {
        let (store, _port, sync) = wired();
        sync.on_navigation("capacity=2&wifi=true&orderBy=price&orderDirection=desc&page=3");
        let filter = store.snapshot().filter;
        assert_eq!(filter.capacity, Some(2));
        assert!(filter.features.contains(&FeatureKey::Wifi));
        assert_eq!(filter.order_by, OrderBy::Price);
        assert_eq!(filter.direction, OrderDirection::Desc);
        assert_eq!(filter.page, 3);
    }

    #[test]
    fn url_store_url_round_trip_converges() {
        let (store, _port, sync) = wired();
        let query = "name=mar&capacity=2&wifi=true&page=3";
        sync.on_navigation(query);
        assert_eq!(canonical_query(&store.snapshot().filter), query);
    }

    #[test]
    fn a_feature_key_removed_from_the_url_is_cleared_in_the_store() {
        let (store, _port, sync) = wired();
        sync.on_navigation("wifi=true&ac=true");
        sync.on_navigation("ac=true");
        let filter = store.snapshot().filter;
        assert!(!filter.features.contains(&FeatureKey::Wifi));
        assert!(filter.features.contains(&FeatureKey::Ac));
    }

    #[test]
    fn user_actions_write_the_url_but_navigation_does_not_echo() {
        let (store, port, sync) = wired();

        store.set_filters(
            FilterPatch {
                name: Some(Some("mar".to_string())),
                ..FilterPatch::default()
            },
            ChangeOrigin::UserAction,
        );
        assert_eq!(port.writes.lock().expect("writes lock").as_slice(), ["name=mar"]);

        // Navigation-applied changes must not be written back to the URL.
        sync.on_navigation("name=mar&capacity=2");
        assert_eq!(port.writes.lock().expect("writes lock").len(), 1);
        assert_eq!(store.snapshot().filter.capacity, Some(2));
    }

    #[test]
    fn writer_skips_when_the_url_is_already_current() {
        let (store, port, _sync) = wired();
        *port.query.lock().expect("query lock") = "name=mar".to_string();
        store.set_filters(
            FilterPatch {
                name: Some(Some("mar".to_string())),
                ..FilterPatch::default()
            },
            ChangeOrigin::UserAction,
        );
        assert!(port.writes.lock().expect("writes lock").is_empty());
    }

    #[test]
    fn identical_navigation_stages_nothing() {
        let (store, _port, sync) = wired();
        sync.on_navigation("capacity=2");
        let before = store.snapshot();
        sync.on_navigation("capacity=2");
        assert_eq!(store.snapshot(), before);
    }
}
