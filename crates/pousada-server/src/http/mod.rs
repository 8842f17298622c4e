// SPDX-License-Identifier: Apache-2.0

pub(crate) mod auth;
pub(crate) mod favorites;
pub(crate) mod rooms;

use crate::auth::{bearer_token, verify_token};
use crate::AppState;
use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use pousada_api::{ApiError, ErrorBody};
use pousada_model::User;
use pousada_query::find_user_by_id;

pub(crate) fn error_response(err: ApiError) -> Response {
    let status =
        StatusCode::from_u16(err.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ErrorBody::new(err.message))).into_response()
}

/// Logs the underlying cause and answers with the generic message; the
/// detail never reaches the client.
pub(crate) fn internal_error(context: &str, err: &dyn std::fmt::Display) -> Response {
    tracing::error!("{context}: {err}");
    error_response(ApiError::internal())
}

/// Resolves the bearer token to a live user row. Missing token is 401,
/// bad or expired token 403, a verified token whose user row is gone 404.
pub(crate) async fn authenticate(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<User, ApiError> {
    let token = bearer_token(headers).ok_or_else(ApiError::missing_token)?;
    let claims =
        verify_token(token, &state.config.auth_secret).map_err(|_| ApiError::invalid_token())?;
    let user = state
        .db
        .run(move |conn| find_user_by_id(conn, claims.sub))
        .await
        .map_err(|err| {
            tracing::error!("user lookup failed: {err}");
            ApiError::internal()
        })?;
    user.ok_or_else(ApiError::user_not_found)
}

pub(crate) async fn healthz_handler() -> Response {
    Json(serde_json::json!({"status": "ok"})).into_response()
}

pub(crate) async fn cors_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let origin = req
        .headers()
        .get("origin")
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);
    if req.method() == axum::http::Method::OPTIONS {
        let mut resp = StatusCode::NO_CONTENT.into_response();
        apply_cors(&state, origin.as_deref(), resp.headers_mut());
        return resp;
    }
    let mut resp = next.run(req).await;
    apply_cors(&state, origin.as_deref(), resp.headers_mut());
    resp
}

fn apply_cors(state: &AppState, origin: Option<&str>, headers: &mut HeaderMap) {
    let Some(origin) = origin else { return };
    if !state
        .config
        .cors_allowed_origins
        .iter()
        .any(|allowed| allowed == origin)
    {
        return;
    }
    if let Ok(value) = HeaderValue::from_str(origin) {
        headers.insert("access-control-allow-origin", value);
    }
    headers.insert(
        "access-control-allow-methods",
        HeaderValue::from_static("GET,POST,OPTIONS"),
    );
    headers.insert(
        "access-control-allow-headers",
        HeaderValue::from_static("content-type,authorization"),
    );
}
