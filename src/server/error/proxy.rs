use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dioxus_logger::tracing;
use thiserror::Error;

use crate::{
    model::{api::ErrorDto, query::QueryError},
    server::error::{bad_request, InternalServerError},
};

/// Errors raised while forwarding a request to the backend collection API.
#[derive(Error, Debug)]
pub enum ProxyError {
    /// Path parameter or request body could not be interpreted.
    #[error("{0}")]
    InvalidInput(String),
    /// List query parameters could not be parsed.
    #[error(transparent)]
    InvalidQuery(#[from] QueryError),
    /// Collection slug is not part of the registry.
    #[error("Unknown collection `{0}`")]
    UnknownCollection(String),
    /// The backend answered 404 for the given path.
    #[error("Backend has no record at `{0}`")]
    NotFound(String),
    /// The backend answered with a non-success status other than 404.
    #[error("Backend responded {status} to {method} {path}")]
    RemoteStatus {
        method: String,
        path: String,
        status: u16,
    },
    /// The backend answered 2xx with a body of an unexpected shape.
    #[error("Unexpected backend response for `{path}`: {reason}")]
    UnexpectedResponse { path: String, reason: String },
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        match self {
            Self::InvalidInput(_) | Self::InvalidQuery(_) => bad_request(self),
            Self::UnknownCollection(_) | Self::NotFound(_) => {
                tracing::debug!("{}", self);

                (
                    StatusCode::NOT_FOUND,
                    Json(ErrorDto {
                        error: "Not found".to_string(),
                    }),
                )
                    .into_response()
            }
            Self::RemoteStatus { .. } | Self::UnexpectedResponse { .. } => {
                InternalServerError(self).into_response()
            }
        }
    }
}
