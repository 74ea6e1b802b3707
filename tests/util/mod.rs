//! Test utilities for building handler inputs from a `TestContext`

use std::time::Duration;

use axum::{
    body::Bytes,
    http::{header, HeaderMap, HeaderValue},
    response::Response,
};
use lotus::server::{
    data::backend::BackendClient, model::app::AppState, service::auth::IdentityVerifier,
    service::retry::RetryContext,
};
use lotus_test_utils::{constant::TEST_JWT_SECRET, TestContext};
use serde_json::Value;

/// Extension trait for TestContext to create handler inputs
pub trait TestContextExt {
    /// AppState pointed at the mock backend, verifying tokens signed with the test secret
    fn into_app_state(&self) -> AppState;

    /// Headers carrying a bearer token for `user_id`
    fn auth_headers(&self, user_id: &str) -> HeaderMap;
}

impl TestContextExt for TestContext {
    fn into_app_state(&self) -> AppState {
        let backend = BackendClient::new(self.backend_url(), Duration::from_secs(5), 3)
            .expect("Failed to build backend client")
            .with_retry(
                RetryContext::new()
                    .with_max_attempts(3)
                    .with_initial_backoff(Duration::from_millis(1)),
            );

        AppState {
            backend,
            identity: IdentityVerifier::from_secret(TEST_JWT_SECRET.as_bytes()),
        }
    }

    fn auth_headers(&self, user_id: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&self.bearer(user_id)).expect("Invalid header value"),
        );
        headers
    }
}

/// JSON request body
pub fn json_body(value: Value) -> Bytes {
    Bytes::from(value.to_string())
}

/// Reads a response body as JSON
pub async fn response_json(resp: Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");

    serde_json::from_slice(&bytes).expect("Response body is not JSON")
}
