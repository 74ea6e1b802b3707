use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::server::error::Error;

pub const SESSION_SYNCED_USER_KEY: &str = "lotus:user:synced";

/// Backend user record already synchronized for an identity provider user during this session.
///
/// Lets repeated sync calls skip the `externalId` lookup against the backend.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct SessionSyncedUser {
    /// Identity provider user id the record belongs to
    pub external_id: String,
    /// Backend `Users` record id
    pub user_id: i64,
}

impl SessionSyncedUser {
    /// Insert the synchronized user into session
    pub async fn insert(session: &Session, external_id: &str, user_id: i64) -> Result<(), Error> {
        session
            .insert(
                SESSION_SYNCED_USER_KEY,
                SessionSyncedUser {
                    external_id: external_id.to_string(),
                    user_id,
                },
            )
            .await?;

        Ok(())
    }

    /// Get the synchronized user from session
    pub async fn get(session: &Session) -> Result<Option<Self>, Error> {
        Ok(session.get::<Self>(SESSION_SYNCED_USER_KEY).await?)
    }

    /// Remove the synchronized user from session
    pub async fn remove(session: &Session) -> Result<Option<Self>, Error> {
        Ok(session.remove::<Self>(SESSION_SYNCED_USER_KEY).await?)
    }
}
