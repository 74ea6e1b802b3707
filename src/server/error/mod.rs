//! Error types for the Lotus server application.
//!
//! Each domain (configuration, caller authentication, backend proxying) has its own error enum
//! and they are all aggregated by [`Error`]. Every error implements `IntoResponse` so controllers
//! can return `Result<impl IntoResponse, Error>` and rely on `?` for the status mapping.

pub mod auth;
pub mod config;
pub mod proxy;
pub mod retry;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dioxus_logger::tracing;
use thiserror::Error;

use crate::{
    model::{api::ErrorDto, reconciler::ReconcileError, schema::ValidationError},
    server::error::{auth::AuthError, config::ConfigError, proxy::ProxyError},
};

/// Main error type for the Lotus server application.
///
/// Aggregates the domain-specific error types and external library errors into a single type.
/// `#[from]` conversions let the `?` operator lift any of them into an `Error`.
///
/// # Error Categories
/// - Configuration errors (missing/invalid environment variables)
/// - Authentication errors (missing or rejected identity token)
/// - Proxy errors (bad input, unknown records, backend failures)
/// - Validation errors (records failing their collection schema)
/// - External library errors (HTTP client, JSON, sessions)
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Authentication error (identity token missing or invalid).
    #[error(transparent)]
    AuthError(#[from] AuthError),
    /// Backend proxy error (invalid input, not found, unexpected backend status).
    #[error(transparent)]
    ProxyError(#[from] ProxyError),
    /// A record failed its collection schema before being sent to the backend.
    #[error(transparent)]
    ValidationError(#[from] ValidationError),
    /// A server-side reconciliation could not start.
    #[error(transparent)]
    ReconcileError(#[from] ReconcileError),
    /// Internal error indicating a bug in Lotus's code.
    #[error("Internal error with Lotus's code, this indicates a bug: {0:?}")]
    InternalError(String),
    /// HTTP client error (connection, timeout, body decoding).
    #[error(transparent)]
    ReqwestError(#[from] reqwest::Error),
    /// JSON (de)serialization error.
    #[error(transparent)]
    SerdeJsonError(#[from] serde_json::Error),
    /// Session error (session retrieval, storage, serialization).
    #[error(transparent)]
    SessionError(#[from] tower_sessions::session::Error),
    /// Redis session store error (connection, command execution).
    #[error(transparent)]
    SessionRedisError(#[from] tower_sessions_redis_store::fred::prelude::Error),
}

/// Converts application errors into HTTP responses.
///
/// # Returns
/// - 400 Bad Request - Invalid input, malformed queries, schema validation failures
/// - 401 Unauthorized - Missing or invalid identity token
/// - 404 Not Found - Unknown collection or record
/// - 500 Internal Server Error - Everything else (with error logging)
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::ConfigError(err) => err.into_response(),
            Self::AuthError(err) => err.into_response(),
            Self::ProxyError(err) => err.into_response(),
            Self::ValidationError(err) => bad_request(err),
            Self::ReconcileError(ReconcileError::Validation(err)) => bad_request(err),
            err => InternalServerError(err).into_response(),
        }
    }
}

/// 400 response carrying the error's message.
pub(crate) fn bad_request(err: impl std::fmt::Display) -> Response {
    tracing::debug!("Rejected request: {}", err);

    (
        StatusCode::BAD_REQUEST,
        Json(ErrorDto {
            error: err.to_string(),
        }),
    )
        .into_response()
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// Logs the error message and returns a generic "Internal server error" message to the client
/// to avoid leaking backend details.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}
