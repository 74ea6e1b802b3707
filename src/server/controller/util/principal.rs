use axum::http::{header, HeaderMap};

use crate::server::{
    error::{auth::AuthError, Error},
    model::app::AppState,
    service::auth::Principal,
};

/// Cookie the identity provider's frontend SDK stores the session token in
pub const SESSION_TOKEN_COOKIE: &str = "__session";

/// Identifies the caller from an `Authorization: Bearer` header, falling back to the
/// identity provider's session cookie.
pub fn get_principal(state: &AppState, headers: &HeaderMap) -> Result<Principal, Error> {
    let token = bearer_token(headers)
        .or_else(|| session_cookie(headers))
        .ok_or(AuthError::MissingToken)?;

    Ok(state.identity.verify(token)?)
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

fn session_cookie(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_TOKEN_COOKIE)
        .map(|(_, token)| token)
        .filter(|token| !token.is_empty())
}
