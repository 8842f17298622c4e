// SPDX-License-Identifier: Apache-2.0

use super::{authenticate, error_response, internal_error};
use crate::auth::{hash_password, issue_token, verify_password};
use crate::AppState;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use pousada_api::{ApiError, AuthResponse, LoginRequest, MeResponse, RegisterRequest};
use pousada_model::User;
use pousada_query::{create_user, find_user_by_email, list_favorites, QueryError};

pub(crate) async fn register_handler(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Response {
    let (name, email, password) = match (req.name, req.email, req.password) {
        (Some(n), Some(e), Some(p)) if !n.is_empty() && !e.is_empty() && !p.is_empty() => {
            (n, e, p)
        }
        _ => {
            return error_response(ApiError::validation(
                "Nome, email e senha são obrigatórios",
            ))
        }
    };

    // Hashing is CPU-bound, so it runs on the blocking pool with the insert.
    let created = state
        .db
        .run(move |conn| {
            let hash =
                hash_password(&password).map_err(|e| QueryError::Storage(e.to_string()))?;
            create_user(conn, &name, &email, &hash)
        })
        .await;

    match created {
        Ok(user) => match issue_auth_response(&state, user, Vec::new()) {
            Ok(body) => (StatusCode::CREATED, Json(body)).into_response(),
            Err(err) => internal_error("token issuance failed", &err),
        },
        Err(QueryError::DuplicateEmail) => error_response(ApiError::email_taken()),
        Err(err) => internal_error("user registration failed", &err),
    }
}

pub(crate) async fn login_handler(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Response {
    let (email, password) = match (req.email, req.password) {
        (Some(e), Some(p)) if !e.is_empty() && !p.is_empty() => (e, p),
        _ => return error_response(ApiError::validation("Email e senha são obrigatórios")),
    };

    let verified = state
        .db
        .run(move |conn| {
            let Some((user, stored_hash)) = find_user_by_email(conn, &email)? else {
                return Ok(None);
            };
            if !verify_password(&password, &stored_hash) {
                return Ok(None);
            }
            let favorites = list_favorites(conn, user.id)?;
            Ok(Some((user, favorites)))
        })
        .await;

    match verified {
        // A missing user and a wrong password are indistinguishable on the
        // wire.
        Ok(None) => error_response(ApiError::invalid_credentials()),
        Ok(Some((user, favorites))) => match issue_auth_response(&state, user, favorites) {
            Ok(body) => Json(body).into_response(),
            Err(err) => internal_error("token issuance failed", &err),
        },
        Err(err) => internal_error("login failed", &err),
    }
}

pub(crate) async fn me_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let user = match authenticate(&state, &headers).await {
        Ok(user) => user,
        Err(err) => return error_response(err),
    };
    let user_id = user.id;
    match state
        .db
        .run(move |conn| list_favorites(conn, user_id))
        .await
    {
        Ok(favorites) => Json(MeResponse { user, favorites }).into_response(),
        Err(err) => internal_error("favorites lookup failed", &err),
    }
}

fn issue_auth_response(
    state: &AppState,
    user: User,
    favorites: Vec<i64>,
) -> Result<AuthResponse, crate::auth::AuthError> {
    let token = issue_token(&user, &state.config.auth_secret, state.config.token_ttl)?;
    Ok(AuthResponse {
        user,
        token,
        favorites,
    })
}
