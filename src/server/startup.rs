use tower_sessions::SessionManagerLayer;
use tower_sessions_redis_store::RedisStore;

use crate::server::{
    config::{Config, IdentityKey},
    data::backend::BackendClient,
    error::{config::ConfigError, Error},
    model::app::AppState,
    service::auth::IdentityVerifier,
};

/// Build the HTTP client for the backend collection API
pub fn build_backend_client(config: &Config) -> Result<BackendClient, Error> {
    BackendClient::new(
        &config.backend_url,
        config.backend_timeout,
        config.backend_max_attempts,
    )
}

/// Build the identity token verifier from the configured key
pub fn build_identity_verifier(config: &Config) -> Result<IdentityVerifier, Error> {
    match &config.identity_key {
        IdentityKey::RsaPem(pem) => IdentityVerifier::from_rsa_pem(pem.as_bytes()).map_err(|e| {
            ConfigError::InvalidEnvValue {
                var: "IDENTITY_JWT_PUBLIC_KEY".to_string(),
                reason: e.to_string(),
            }
            .into()
        }),
        IdentityKey::Secret(secret) => Ok(IdentityVerifier::from_secret(secret.as_bytes())),
    }
}

/// Build the state shared by every request handler
pub fn build_app_state(config: &Config) -> Result<AppState, Error> {
    Ok(AppState {
        backend: build_backend_client(config)?,
        identity: build_identity_verifier(config)?,
    })
}

/// Connect to Valkey/Redis and configure session management
pub async fn connect_to_session(
    config: &Config,
) -> Result<SessionManagerLayer<RedisStore<tower_sessions_redis_store::fred::prelude::Pool>>, Error>
{
    use time::Duration;
    use tower_sessions::{cookie::SameSite, Expiry, SessionManagerLayer};
    use tower_sessions_redis_store::fred::prelude::*;

    let config = Config::from_url(&config.valkey_url)?;
    let pool = tower_sessions_redis_store::fred::prelude::Pool::new(config, None, None, None, 6)?;

    pool.connect();
    pool.wait_for_connect().await?;

    let session_store = RedisStore::new(pool);

    // Secure cookies everywhere except debug builds served over plain HTTP
    let secure_cookies = !cfg!(debug_assertions);

    let session = SessionManagerLayer::new(session_store)
        .with_name("lotus.sid")
        .with_secure(secure_cookies)
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_expiry(Expiry::OnInactivity(Duration::days(7)));

    Ok(session)
}
