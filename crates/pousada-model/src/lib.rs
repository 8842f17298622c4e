#![forbid(unsafe_code)]
//! Pousada model SSOT.
//!
//! Every crate in the workspace speaks these types: the room catalog rows,
//! the fixed amenity enumeration, the typed filter-parameter record and the
//! pagination envelope. No I/O lives here.

mod feature;
mod filter;
mod room;
mod user;

pub use feature::{FeatureKey, FEATURE_KEYS};
pub use filter::{OrderBy, OrderDirection, RoomFilter, DEFAULT_LIMIT, DEFAULT_PAGE};
pub use room::{Pagination, Room};
pub use user::User;

pub const CRATE_NAME: &str = "pousada-model";
