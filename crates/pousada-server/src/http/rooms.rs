// SPDX-License-Identifier: Apache-2.0

use super::internal_error;
use crate::auth::{bearer_token, verify_token};
use crate::AppState;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::Json;
use pousada_api::{canonical_query, parse_room_query, RoomsResponse};
use pousada_model::{Pagination, RoomFilter};
use pousada_query::{search_rooms, QueryError};
use std::collections::BTreeMap;

pub(crate) async fn rooms_handler(
    State(state): State<AppState>,
    Query(params): Query<BTreeMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    let filter = parse_room_query(&params);

    if filter.favorite_only {
        // User-specific results never go through the shared cache.
        let Some(user_id) = token_user_id(&state, &headers) else {
            return Json(empty_page(&filter)).into_response();
        };
        return match load_page(&state, &filter, Some(user_id)).await {
            Ok(body) => Json(body).into_response(),
            Err(err) => internal_error("favorite search failed", &err),
        };
    }

    let key = canonical_query(&filter);
    if let Some(hit) = state.search_cache.lock().await.get(&key) {
        return Json(hit).into_response();
    }

    match load_page(&state, &filter, None).await {
        Ok(body) => {
            state.search_cache.lock().await.insert(key, body.clone());
            Json(body).into_response()
        }
        Err(err) => internal_error("room search failed", &err),
    }
}

fn token_user_id(state: &AppState, headers: &HeaderMap) -> Option<i64> {
    let token = bearer_token(headers)?;
    verify_token(token, &state.config.auth_secret)
        .ok()
        .map(|claims| claims.sub)
}

async fn load_page(
    state: &AppState,
    filter: &RoomFilter,
    favorites_of: Option<i64>,
) -> Result<RoomsResponse, QueryError> {
    let query_filter = filter.clone();
    let rooms = state
        .db
        .run(move |conn| search_rooms(conn, &query_filter, favorites_of))
        .await?;

    let total_rooms = rooms.len() as u64;
    let start = filter.page.saturating_sub(1) as usize * filter.limit as usize;
    let page_rooms = rooms
        .into_iter()
        .skip(start)
        .take(filter.limit as usize)
        .collect();

    Ok(RoomsResponse {
        rooms: page_rooms,
        pagination: Pagination::for_total(total_rooms, filter.page, filter.limit),
    })
}

fn empty_page(filter: &RoomFilter) -> RoomsResponse {
    RoomsResponse {
        rooms: Vec::new(),
        pagination: Pagination::for_total(0, filter.page, filter.limit),
    }
}
