use serde::{Deserialize, Serialize};

use crate::model::entity::Entity;

/// The response when an error occurs with an API request
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct ErrorDto {
    /// The error message
    pub error: String,
}

/// One page of records from a collection, in frontend field naming
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ListResponse {
    pub data: Vec<Entity>,
    pub count: u64,
    pub total: u64,
    pub page: u64,
    pub page_count: u64,
}

impl ListResponse {
    /// Wraps a bare record array as a single page
    pub fn single_page(data: Vec<Entity>) -> Self {
        let len = data.len() as u64;

        Self {
            data,
            count: len,
            total: len,
            page: 1,
            page_count: 1,
        }
    }
}
