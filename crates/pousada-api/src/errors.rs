// SPDX-License-Identifier: Apache-2.0

use std::fmt;

/// Classifies an API failure; the HTTP status derives from the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    Validation,
    InvalidCredentials,
    MissingToken,
    InvalidToken,
    NotFound,
    Conflict,
    Internal,
}

/// A user-facing API failure. The message is what goes on the wire, inside
/// `{"error": "..."}`; messages are in Portuguese because that is the
/// application's audience.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl ApiError {
    #[must_use]
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Validation, message)
    }

    #[must_use]
    pub fn invalid_credentials() -> Self {
        Self::new(ApiErrorKind::InvalidCredentials, "Credenciais inválidas")
    }

    #[must_use]
    pub fn missing_token() -> Self {
        Self::new(ApiErrorKind::MissingToken, "Token ausente")
    }

    #[must_use]
    pub fn invalid_token() -> Self {
        Self::new(ApiErrorKind::InvalidToken, "Token inválido ou expirado")
    }

    #[must_use]
    pub fn user_not_found() -> Self {
        Self::new(ApiErrorKind::NotFound, "Usuário não encontrado")
    }

    #[must_use]
    pub fn email_taken() -> Self {
        Self::new(ApiErrorKind::Conflict, "Email já cadastrado")
    }

    #[must_use]
    pub fn internal() -> Self {
        Self::new(ApiErrorKind::Internal, "Erro interno do servidor")
    }

    /// HTTP status code for this failure.
    #[must_use]
    pub fn status(&self) -> u16 {
        match self.kind {
            ApiErrorKind::Validation => 400,
            ApiErrorKind::InvalidCredentials | ApiErrorKind::MissingToken => 401,
            ApiErrorKind::InvalidToken => 403,
            ApiErrorKind::NotFound => 404,
            ApiErrorKind::Conflict => 409,
            ApiErrorKind::Internal => 500,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}
