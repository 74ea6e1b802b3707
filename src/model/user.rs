use serde::{Deserialize, Serialize};

use crate::model::entity::Entity;

/// Profile details supplied by the identity provider when syncing a signed-in user
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SyncUserDto {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

/// The backend user record for the signed-in principal
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SyncUserResponse {
    pub user: Entity,
    /// Whether the record was created by this sync
    pub created: bool,
}
