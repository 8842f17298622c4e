// SPDX-License-Identifier: Apache-2.0

use crate::store::{FilterStore, StoreEvent};
use async_trait::async_trait;
use pousada_api::RoomsResponse;
use pousada_model::RoomFilter;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

/// Minimum visible settle time. Fast responses are held back to here so the
/// loading state never flashes; slow responses get no extra delay.
pub const LOADING_FLOOR: Duration = Duration::from_millis(1000);

/// Boundary to the search endpoint.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn search(&self, filter: &RoomFilter) -> Result<RoomsResponse, String>;
}

/// Turns filter changes into at-most-one applied response. Every refresh
/// claims a generation number; a response is applied only while its
/// generation is still the latest, so a slow stale fetch can never overwrite
/// a newer one.
pub struct FetchCoordinator {
    store: Arc<FilterStore>,
    api: Arc<dyn CatalogApi>,
    generation: AtomicU64,
    apply_gate: tokio::sync::Mutex<()>,
}

impl FetchCoordinator {
    #[must_use]
    pub fn new(store: Arc<FilterStore>, api: Arc<dyn CatalogApi>) -> Self {
        Self {
            store,
            api,
            generation: AtomicU64::new(0),
            apply_gate: tokio::sync::Mutex::new(()),
        }
    }

    /// Subscribes so every settled filter change, whatever its origin,
    /// schedules one refresh. Result writes emit `ResultsApplied`, which is
    /// ignored here; that asymmetry is what keeps the cycle open.
    pub fn attach(self: &Arc<Self>) {
        let weak: Weak<Self> = Arc::downgrade(self);
        self.store.subscribe(move |event| {
            if !matches!(event, StoreEvent::FilterChanged(_)) {
                return;
            }
            if let Some(coordinator) = weak.upgrade() {
                tokio::spawn(async move {
                    coordinator.refresh().await;
                });
            }
        });
    }

    pub async fn refresh(&self) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let filter = self.store.snapshot().filter;
        self.store
            .set_rooms_loading_error(Vec::new(), None, true, None);

        let started = tokio::time::Instant::now();
        let result = self.api.search(&filter).await;
        let elapsed = started.elapsed();
        if elapsed < LOADING_FLOOR {
            tokio::time::sleep(LOADING_FLOOR - elapsed).await;
        }

        // The staleness check and the result write must happen in one
        // critical section, or a stale response could pass the check and
        // land after a newer refresh has already applied.
        let _gate = self.apply_gate.lock().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(generation, "discarding stale search response");
            return;
        }

        match result {
            Ok(body) => self.store.set_rooms_loading_error(
                body.rooms,
                Some(body.pagination),
                false,
                None,
            ),
            Err(message) => {
                self.store
                    .set_rooms_loading_error(Vec::new(), None, false, Some(message));
            }
        }
    }
}
