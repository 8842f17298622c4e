// SPDX-License-Identifier: Apache-2.0

use super::{authenticate, error_response, internal_error};
use crate::AppState;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::Json;
use pousada_api::{ApiError, ApiErrorKind, FavoriteRequest, FavoritesResponse};
use pousada_query::{add_favorite, list_favorites, remove_favorite, room_exists};

pub(crate) async fn add_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<FavoriteRequest>,
) -> Response {
    let user = match authenticate(&state, &headers).await {
        Ok(user) => user,
        Err(err) => return error_response(err),
    };
    let Some(room_id) = req.room_id else {
        return error_response(ApiError::validation("roomId é obrigatório"));
    };

    let user_id = user.id;
    let result = state
        .db
        .run(move |conn| {
            if !room_exists(conn, room_id)? {
                return Ok(None);
            }
            add_favorite(conn, user_id, room_id)?;
            list_favorites(conn, user_id).map(Some)
        })
        .await;

    match result {
        Ok(Some(favorites)) => Json(FavoritesResponse { favorites }).into_response(),
        Ok(None) => error_response(ApiError::new(
            ApiErrorKind::NotFound,
            "Quarto não encontrado",
        )),
        Err(err) => internal_error("favorite add failed", &err),
    }
}

pub(crate) async fn remove_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<FavoriteRequest>,
) -> Response {
    let user = match authenticate(&state, &headers).await {
        Ok(user) => user,
        Err(err) => return error_response(err),
    };
    let Some(room_id) = req.room_id else {
        return error_response(ApiError::validation("roomId é obrigatório"));
    };

    let user_id = user.id;
    let result = state
        .db
        .run(move |conn| {
            remove_favorite(conn, user_id, room_id)?;
            list_favorites(conn, user_id)
        })
        .await;

    match result {
        Ok(favorites) => Json(FavoritesResponse { favorites }).into_response(),
        Err(err) => internal_error("favorite remove failed", &err),
    }
}
