#![forbid(unsafe_code)]

//! Client-side search state.
//!
//! [`FilterStore`] is the single source of truth for filter values and
//! results. [`UrlSync`] keeps the browser URL and the store convergent in
//! both directions, [`Debouncer`] settles keystrokes, and
//! [`FetchCoordinator`] turns settled changes into at-most-one applied
//! response. The pieces are wired through subscriptions, never through
//! globals, so each one can be driven and observed in isolation.

mod debounce;
mod fetch;
mod store;
mod url_sync;

pub use debounce::{Debouncer, SEARCH_DEBOUNCE};
pub use fetch::{CatalogApi, FetchCoordinator, LOADING_FLOOR};
pub use store::{ChangeOrigin, FilterPatch, FilterSnapshot, FilterStore, StoreEvent};
pub use url_sync::{UrlPort, UrlSync};

pub const CRATE_NAME: &str = "pousada-client";
