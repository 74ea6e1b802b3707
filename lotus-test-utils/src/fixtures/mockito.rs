//! Mock backend endpoint creation utilities.
//!
//! Each helper registers a mock with the test's mockito server which is verified by
//! [`TestContext::assert_mocks`](crate::TestContext::assert_mocks) to have been called exactly
//! `expected_requests` times.

use mockito::{Mock, ServerGuard};
use serde_json::Value;

/// Create a mock `GET` list endpoint returning `body` regardless of query parameters.
pub fn create_list_endpoint(
    server: &mut ServerGuard,
    path: &str,
    body: Value,
    expected_requests: usize,
) -> Mock {
    create_get_endpoint(server, path, body, expected_requests)
}

/// Create a mock `GET` endpoint returning `body` as JSON.
pub fn create_get_endpoint(
    server: &mut ServerGuard,
    path: &str,
    body: Value,
    expected_requests: usize,
) -> Mock {
    server
        .mock("GET", path)
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .expect(expected_requests)
        .create()
}

/// Create a mock endpoint that answers `method path` with `status` and an empty body.
pub fn create_status_endpoint(
    server: &mut ServerGuard,
    method: &str,
    path: &str,
    status: usize,
    expected_requests: usize,
) -> Mock {
    server
        .mock(method, path)
        .match_query(mockito::Matcher::Any)
        .with_status(status)
        .expect(expected_requests)
        .create()
}
