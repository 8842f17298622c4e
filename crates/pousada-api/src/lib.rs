#![forbid(unsafe_code)]
//! Wire layer shared by server and client.
//!
//! This crate owns the two halves of the filter-signature invariant: parsing
//! raw query parameters into a [`pousada_model::RoomFilter`], and the single
//! canonical serialization of that filter which doubles as the response cache
//! key and the URL query string. If the two ever disagree, stale cache hits
//! and URL/store divergence follow, so both directions live side by side here
//! and are round-trip tested together.

mod canonical;
mod dto;
mod errors;
mod params;

pub use canonical::{canonical_query, parse_query_pairs};
pub use dto::{
    AuthResponse, ErrorBody, FavoriteRequest, FavoritesResponse, LoginRequest, MeResponse,
    RegisterRequest, RoomsResponse,
};
pub use errors::{ApiError, ApiErrorKind};
pub use params::parse_room_query;

pub const CRATE_NAME: &str = "pousada-api";
