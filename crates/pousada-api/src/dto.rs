// SPDX-License-Identifier: Apache-2.0

use pousada_model::{Pagination, Room, User};
use serde::{Deserialize, Serialize};

/// Body of `GET /rooms`. This is the unit the response cache stores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomsResponse {
    pub rooms: Vec<Room>,
    pub pagination: Pagination,
}

/// Body of `{"error": "..."}` failure responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// `POST /api/auth/register` request. Fields are options so that missing
/// ones surface as validation errors rather than deserialization failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// `POST /api/auth/login` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Successful register/login response: the identity, a bearer token and the
/// user's current favorite room ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
    pub favorites: Vec<i64>,
}

/// `GET /api/auth/me` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeResponse {
    pub user: User,
    pub favorites: Vec<i64>,
}

/// Body of the favorite add/remove endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteRequest {
    #[serde(rename = "roomId")]
    pub room_id: Option<i64>,
}

/// Response of the favorite add/remove endpoints: the full list after the
/// mutation, so the client never has to reconcile deltas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoritesResponse {
    pub favorites: Vec<i64>,
}
