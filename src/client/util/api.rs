//! Browser calls to the Lotus API.

use std::future::Future;

use reqwasm::http::{Request, RequestCredentials, Response};

use crate::model::{
    api::ErrorDto, entity::Entity, reconciler::EntityTransport, schema::Collection,
};

/// Retrieve the signed-in user's backend record
///
/// # Returns
/// - `Ok(Some(Entity))` - The user record in frontend naming
/// - `Ok(None)` - Not signed in, or not synced yet
/// - `Err(String)` - Request failed
pub async fn get_current_user() -> Result<Option<Entity>, String> {
    let response = Request::get("/api/users/me")
        .credentials(RequestCredentials::Include)
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    match response.status() {
        200 => {
            let user = response
                .json::<Entity>()
                .await
                .map_err(|e| format!("Failed to parse user data: {}", e))?;
            Ok(Some(user))
        }
        401 | 404 => Ok(None),
        _ => Err(request_failed(&response).await),
    }
}

/// Sends reconciler saves to the collection proxy as `PATCH /api/collections/{slug}/{id}`.
pub struct ProxyTransport {
    collection: Collection,
}

impl ProxyTransport {
    pub fn new(collection: Collection) -> Self {
        Self { collection }
    }
}

impl EntityTransport for ProxyTransport {
    fn update(&self, id: i64, payload: Entity) -> impl Future<Output = Result<Entity, String>> {
        let url = format!("/api/collections/{}/{}", self.collection.slug(), id);

        async move {
            let body = serde_json::to_string(&payload)
                .map_err(|e| format!("Failed to serialize update: {}", e))?;

            let response = Request::patch(&url)
                .header("content-type", "application/json")
                .credentials(RequestCredentials::Include)
                .body(body)
                .send()
                .await
                .map_err(|e| format!("Failed to send request: {}", e))?;

            match response.status() {
                200 => response
                    .json::<Entity>()
                    .await
                    .map_err(|e| format!("Failed to parse saved record: {}", e)),
                _ => Err(request_failed(&response).await),
            }
        }
    }
}

async fn request_failed(response: &Response) -> String {
    if let Ok(error_dto) = response.json::<ErrorDto>().await {
        format!(
            "Request failed with status {}: {}",
            response.status(),
            error_dto.error
        )
    } else {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        format!(
            "Request failed with status {}: {}",
            response.status(),
            error_text
        )
    }
}
