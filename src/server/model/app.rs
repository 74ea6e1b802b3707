use crate::server::{data::backend::BackendClient, service::auth::IdentityVerifier};

#[derive(Clone)]
pub struct AppState {
    pub backend: BackendClient,
    pub identity: IdentityVerifier,
}
