// SPDX-License-Identifier: Apache-2.0

//! Bearer tokens and password hashing.
//!
//! Tokens are `base64(json claims).base64(hmac-sha256 signature)`, URL-safe
//! without padding. Passwords are stored as salted Argon2id hashes and never
//! compared in plaintext.

use argon2::password_hash::{
    rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};
use argon2::Argon2;
use axum::http::HeaderMap;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use pousada_model::User;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug)]
pub struct AuthError(pub String);

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::error::Error for AuthError {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: i64,
    pub email: String,
    pub iat: u64,
    pub exp: u64,
}

pub fn issue_token(user: &User, secret: &[u8], ttl: Duration) -> Result<String, AuthError> {
    let iat = unix_now()?;
    let claims = TokenClaims {
        sub: user.id,
        email: user.email.clone(),
        iat,
        exp: iat + ttl.as_secs(),
    };
    let payload_bytes = serde_json::to_vec(&claims).map_err(|e| AuthError(e.to_string()))?;
    let payload_part = URL_SAFE_NO_PAD.encode(payload_bytes);
    let mut mac =
        HmacSha256::new_from_slice(secret).map_err(|e| AuthError(e.to_string()))?;
    mac.update(payload_part.as_bytes());
    let sig_part = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());
    Ok(format!("{payload_part}.{sig_part}"))
}

pub fn verify_token(token: &str, secret: &[u8]) -> Result<TokenClaims, AuthError> {
    let (payload_part, sig_part) = token
        .split_once('.')
        .ok_or_else(|| AuthError("invalid token format".to_string()))?;

    let mut mac =
        HmacSha256::new_from_slice(secret).map_err(|e| AuthError(e.to_string()))?;
    mac.update(payload_part.as_bytes());
    let expected = URL_SAFE_NO_PAD
        .decode(sig_part)
        .map_err(|e| AuthError(e.to_string()))?;
    mac.verify_slice(&expected)
        .map_err(|_| AuthError("token signature mismatch".to_string()))?;

    let payload_bytes = URL_SAFE_NO_PAD
        .decode(payload_part)
        .map_err(|e| AuthError(e.to_string()))?;
    let claims: TokenClaims =
        serde_json::from_slice(&payload_bytes).map_err(|e| AuthError(e.to_string()))?;

    if claims.exp <= unix_now()? {
        return Err(AuthError("token expired".to_string()));
    }
    Ok(claims)
}

pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError(e.to_string()))?;
    Ok(hash.to_string())
}

#[must_use]
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    PasswordHash::new(stored_hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

#[must_use]
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .filter(|t| !t.is_empty())
}

fn unix_now() -> Result<u64, AuthError> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .map_err(|e| AuthError(e.to_string()))
}
