use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        entity::Entity,
        user::{SyncUserDto, SyncUserResponse},
    },
    server::{
        controller::util::principal::get_principal,
        error::{proxy::ProxyError, Error},
        model::app::AppState,
        service::user::UserService,
    },
};

pub static USER_TAG: &str = "user";

/// Synchronize the signed-in user into the backend
///
/// Creates the backend `Users` record on first sign in and keeps its email in step with the
/// identity provider afterwards.
#[utoipa::path(
    post,
    path = "/api/users/sync",
    tag = USER_TAG,
    request_body = SyncUserDto,
    responses(
        (status = 200, description = "User record already existed", body = SyncUserResponse),
        (status = 201, description = "User record was created", body = SyncUserResponse),
        (status = 400, description = "Invalid body or failed validation", body = ErrorDto),
        (status = 401, description = "Missing or invalid identity token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn sync_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    session: Session,
    body: Bytes,
) -> Result<impl IntoResponse, Error> {
    let principal = get_principal(&state, &headers)?;
    let dto: SyncUserDto = serde_json::from_slice(&body)
        .map_err(|e| ProxyError::InvalidInput(format!("Invalid sync request: {}", e)))?;

    let response = UserService::new(&state.backend)
        .sync_user(&principal, &session, dto)
        .await?;

    let status = if response.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((status, Json(response)))
}

/// Get the backend user record of the signed-in user
#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = USER_TAG,
    responses(
        (status = 200, description = "Success when retrieving the user record", body = Entity),
        (status = 401, description = "Missing or invalid identity token", body = ErrorDto),
        (status = 404, description = "User has not been synchronized yet", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_current_user(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, Error> {
    let principal = get_principal(&state, &headers)?;

    let user = UserService::new(&state.backend)
        .get_current_user(&principal)
        .await?;

    Ok((StatusCode::OK, Json(user)))
}
