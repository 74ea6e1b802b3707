//! Tests for the get_entity endpoint.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use lotus::server::controller::collection::get_entity;
use serde_json::json;

use super::*;

/// Tests retrieving a record in frontend naming.
///
/// Expected: Ok with 200 OK response
#[tokio::test]
async fn returns_translated_record() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_get_endpoint("/Clients/1", factory::backend_client(1), 1)
        .build()
        .await?;

    let result = get_entity(
        State(test.into_app_state()),
        test.auth_headers("user_1"),
        Path(("clients".to_string(), "1".to_string())),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = response_json(resp).await;
    assert_eq!(body["id"], json!(1));
    assert_eq!(body["homePhone"], json!("555-0142"));
    assert_eq!(body["socialSecurityNumber"], json!("000-00-0000"));
    test.assert_mocks();

    Ok(())
}

/// Tests that a missing record is distinguished from a backend failure.
///
/// Expected: Err with 404 Not Found response, requested once
#[tokio::test]
async fn fails_for_missing_record() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_status_endpoint("GET", "/Clients/404", 404, 1)
        .build()
        .await?;

    let result = get_entity(
        State(test.into_app_state()),
        test.auth_headers("user_1"),
        Path(("clients".to_string(), "404".to_string())),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    test.assert_mocks();

    Ok(())
}

/// Tests a non-numeric record id.
///
/// Expected: Err with 400 Bad Request response and no backend request
#[tokio::test]
async fn fails_for_invalid_id() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_status_endpoint("GET", "/Clients/abc", 200, 0)
        .build()
        .await?;

    let result = get_entity(
        State(test.into_app_state()),
        test.auth_headers("user_1"),
        Path(("clients".to_string(), "abc".to_string())),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    test.assert_mocks();

    Ok(())
}

/// Tests a backend that answers with something other than a record.
///
/// Expected: Err with 500 Internal Server Error response
#[tokio::test]
async fn fails_for_non_object_response() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_get_endpoint("/Clients/1", json!(["not", "a", "record"]), 1)
        .build()
        .await?;

    let result = get_entity(
        State(test.into_app_state()),
        test.auth_headers("user_1"),
        Path(("clients".to_string(), "1".to_string())),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    test.assert_mocks();

    Ok(())
}
