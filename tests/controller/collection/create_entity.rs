//! Tests for the create_entity endpoint.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use lotus::server::controller::collection::create_entity;
use serde_json::json;

use super::*;

/// Tests creating a record from a frontend-shaped body.
///
/// Verifies that aliased fields reach the backend in backend naming and come back renamed.
///
/// Expected: Ok with 201 Created response
#[tokio::test]
async fn creates_record() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_mock_endpoint(|server| {
            server
                .mock("POST", "/EmergencyContacts")
                .match_body(mockito::Matcher::Json(json!({
                    "name": "Jo Rivera",
                    "clientId": 10,
                    "primary_phone": "555-0199",
                })))
                .with_status(201)
                .with_header("content-type", "application/json")
                .with_body(factory::backend_emergency_contact(5, 10).to_string())
                .expect(1)
                .create()
        })
        .build()
        .await?;

    let result = create_entity(
        State(test.into_app_state()),
        test.auth_headers("user_1"),
        Path("emergency-contacts".to_string()),
        json_body(json!({
            "name": "Jo Rivera",
            "clientId": 10,
            "primaryPhone": "555-0199",
        })),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = response_json(resp).await;
    assert_eq!(body["id"], json!(5));
    assert_eq!(body["primaryPhone"], json!("555-0199"));
    test.assert_mocks();

    Ok(())
}

/// Tests that a body missing a required field is rejected locally.
///
/// Expected: Err with 400 Bad Request response and no backend request
#[tokio::test]
async fn fails_validation_without_backend_call() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_status_endpoint("POST", "/EmergencyContacts", 201, 0)
        .build()
        .await?;

    let result = create_entity(
        State(test.into_app_state()),
        test.auth_headers("user_1"),
        Path("emergency-contacts".to_string()),
        json_body(json!({ "name": "Jo Rivera", "clientId": 10 })),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = response_json(resp).await;
    assert_eq!(body["error"], json!("Missing required field `primaryPhone`"));
    test.assert_mocks();

    Ok(())
}

/// Tests a body that is not a JSON object.
///
/// Expected: Err with 400 Bad Request response
#[tokio::test]
async fn fails_for_non_object_body() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;

    let result = create_entity(
        State(test.into_app_state()),
        test.auth_headers("user_1"),
        Path("clients".to_string()),
        Bytes::from_static(b"[1, 2, 3]"),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

/// Tests that authentication is checked before the body is parsed.
///
/// Expected: Err with 401 Unauthorized response for an unparseable body
#[tokio::test]
async fn checks_token_before_body() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;

    let result = create_entity(
        State(test.into_app_state()),
        HeaderMap::new(),
        Path("clients".to_string()),
        Bytes::from_static(b"{not json"),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

/// Tests that backend rejections of a create are not retried.
///
/// Expected: Err with 500 Internal Server Error response after a single request
#[tokio::test]
async fn does_not_retry_create() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_status_endpoint("POST", "/Clients", 503, 1)
        .build()
        .await?;

    let result = create_entity(
        State(test.into_app_state()),
        test.auth_headers("user_1"),
        Path("clients".to_string()),
        json_body(json!({ "firstName": "Sam", "lastName": "Rivera" })),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    test.assert_mocks();

    Ok(())
}
