use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dioxus_logger::tracing;
use thiserror::Error;

use crate::model::api::ErrorDto;

/// Failures to establish who is calling.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Request carries no identity token")]
    MissingToken,
    #[error("Identity token was rejected: {0}")]
    InvalidToken(#[source] jsonwebtoken::errors::Error),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorDto {
                error: "Unauthorized".to_string(),
            }),
        )
            .into_response()
    }
}
