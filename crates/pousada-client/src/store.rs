// SPDX-License-Identifier: Apache-2.0

use pousada_model::{FeatureKey, OrderBy, OrderDirection, Pagination, Room, RoomFilter};
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, PoisonError};

/// Who caused a filter change. The URL writer ignores `Navigation` events,
/// which is what breaks the URL→store→URL feedback loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOrigin {
    UserAction,
    Navigation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    /// Filter, sort, page or favorite-view changed; results were cleared.
    FilterChanged(ChangeOrigin),
    /// A fetch settled and wrote rooms/loading/error.
    ResultsApplied,
}

/// Full store state as observed at one instant.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterSnapshot {
    pub filter: RoomFilter,
    pub rooms: Vec<Room>,
    pub pagination: Option<Pagination>,
    pub is_loading: bool,
    pub error: Option<String>,
}

/// Partial filter update. `Some(None)` on an optional field clears it;
/// absent fields are left untouched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterPatch {
    pub name: Option<Option<String>>,
    pub price_min: Option<Option<f64>>,
    pub price_max: Option<Option<f64>>,
    pub capacity: Option<Option<u32>>,
    pub features: Option<BTreeSet<FeatureKey>>,
    pub favorite_only: Option<bool>,
    pub order_by: Option<OrderBy>,
    pub direction: Option<OrderDirection>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl FilterPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

type Subscriber = Arc<dyn Fn(&StoreEvent) + Send + Sync>;

/// Observable filter/result state. Every mutation notifies subscribers
/// exactly once, after the state lock is released.
pub struct FilterStore {
    state: Mutex<FilterSnapshot>,
    subscribers: Mutex<Vec<Subscriber>>,
}

impl Default for FilterStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Mutex::new(FilterSnapshot::default()),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    pub fn subscribe(&self, subscriber: impl Fn(&StoreEvent) + Send + Sync + 'static) {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::new(subscriber));
    }

    #[must_use]
    pub fn snapshot(&self) -> FilterSnapshot {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Merges the patch. An explicit page in the patch wins; any other patch
    /// resets the page to 1. Results and error are always cleared;
    /// `is_loading` is deliberately left alone, so the cleared-but-not-loading
    /// interval stays observable.
    pub fn set_filters(&self, patch: FilterPatch, origin: ChangeOrigin) {
        {
            let mut state = self.lock_state();
            if let Some(name) = patch.name {
                state.filter.name = name;
            }
            if let Some(price_min) = patch.price_min {
                state.filter.price_min = price_min;
            }
            if let Some(price_max) = patch.price_max {
                state.filter.price_max = price_max;
            }
            if let Some(capacity) = patch.capacity {
                state.filter.capacity = capacity;
            }
            if let Some(features) = patch.features {
                state.filter.features = features;
            }
            if let Some(favorite_only) = patch.favorite_only {
                state.filter.favorite_only = favorite_only;
            }
            if let Some(order_by) = patch.order_by {
                state.filter.order_by = order_by;
            }
            if let Some(direction) = patch.direction {
                state.filter.direction = direction;
            }
            if let Some(limit) = patch.limit {
                state.filter.limit = limit;
            }
            state.filter.page = patch.page.unwrap_or(1);
            clear_results(&mut state);
        }
        self.notify(&StoreEvent::FilterChanged(origin));
    }

    /// Back to initial values, keeping the sort and the favorite view, and
    /// flips straight into loading.
    pub fn clear_filters(&self) {
        {
            let mut state = self.lock_state();
            let kept = (
                state.filter.order_by,
                state.filter.direction,
                state.filter.favorite_only,
            );
            state.filter = RoomFilter::default();
            (
                state.filter.order_by,
                state.filter.direction,
                state.filter.favorite_only,
            ) = kept;
            clear_results(&mut state);
            state.is_loading = true;
        }
        self.notify(&StoreEvent::FilterChanged(ChangeOrigin::UserAction));
    }

    pub fn set_page(&self, page: u32) {
        {
            let mut state = self.lock_state();
            state.filter.page = page;
            clear_results(&mut state);
        }
        self.notify(&StoreEvent::FilterChanged(ChangeOrigin::UserAction));
    }

    /// Changing the sort keeps the current page.
    pub fn set_order(&self, order_by: OrderBy, direction: OrderDirection) {
        {
            let mut state = self.lock_state();
            state.filter.order_by = order_by;
            state.filter.direction = direction;
            clear_results(&mut state);
        }
        self.notify(&StoreEvent::FilterChanged(ChangeOrigin::UserAction));
    }

    pub fn set_favorite_only(&self, favorite_only: bool) {
        {
            let mut state = self.lock_state();
            state.filter.favorite_only = favorite_only;
            state.filter.page = 1;
            clear_results(&mut state);
        }
        self.notify(&StoreEvent::FilterChanged(ChangeOrigin::UserAction));
    }

    /// The single post-fetch write path: all four result fields move
    /// together.
    pub fn set_rooms_loading_error(
        &self,
        rooms: Vec<Room>,
        pagination: Option<Pagination>,
        is_loading: bool,
        error: Option<String>,
    ) {
        {
            let mut state = self.lock_state();
            state.rooms = rooms;
            state.pagination = pagination;
            state.is_loading = is_loading;
            state.error = error;
        }
        self.notify(&StoreEvent::ResultsApplied);
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, FilterSnapshot> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn notify(&self, event: &StoreEvent) {
        let subscribers: Vec<Subscriber> = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for subscriber in subscribers {
            subscriber(event);
        }
    }
}

fn clear_results(state: &mut FilterSnapshot) {
    state.rooms.clear();
    state.pagination = None;
    state.error = None;
}
