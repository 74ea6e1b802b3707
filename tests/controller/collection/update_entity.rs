//! Tests for the update_entity and replace_entity endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use lotus::server::controller::collection::{replace_entity, update_entity};
use serde_json::json;

use super::*;

/// Tests a partial update forwarded as PATCH with backend naming.
///
/// Expected: Ok with 200 OK response
#[tokio::test]
async fn patches_record() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_mock_endpoint(|server| {
            server
                .mock("PATCH", "/Clients/1")
                .match_body(mockito::Matcher::Json(json!({ "zip_code": "97035" })))
                .with_status(200)
                .with_header("content-type", "application/json")
                .with_body(
                    json!({ "id": 1, "firstName": "Sam", "zip_code": "97035" }).to_string(),
                )
                .expect(1)
                .create()
        })
        .build()
        .await?;

    let result = update_entity(
        State(test.into_app_state()),
        test.auth_headers("user_1"),
        Path(("clients".to_string(), "1".to_string())),
        json_body(json!({ "zipCode": "97035" })),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = response_json(resp).await;
    assert_eq!(body["zipCode"], json!("97035"));
    test.assert_mocks();

    Ok(())
}

/// Tests that a users update without the identity field never reaches the backend.
///
/// Expected: Err with 400 Bad Request response and no backend request
#[tokio::test]
async fn requires_email_for_users() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_status_endpoint("PATCH", "/Users/4", 200, 0)
        .build()
        .await?;

    let result = update_entity(
        State(test.into_app_state()),
        test.auth_headers("user_1"),
        Path(("users".to_string(), "4".to_string())),
        json_body(json!({ "firstName": "Annie" })),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    test.assert_mocks();

    Ok(())
}

/// Tests a full replacement forwarded as PUT.
///
/// Expected: Ok with 200 OK response
#[tokio::test]
async fn replaces_record() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_mock_endpoint(|server| {
            server
                .mock("PUT", "/notes/8")
                .match_body(mockito::Matcher::Json(json!({ "content": "Rescheduled" })))
                .with_status(200)
                .with_header("content-type", "application/json")
                .with_body(json!({ "id": 8, "content": "Rescheduled" }).to_string())
                .expect(1)
                .create()
        })
        .build()
        .await?;

    let result = replace_entity(
        State(test.into_app_state()),
        test.auth_headers("user_1"),
        Path(("notes".to_string(), "8".to_string())),
        json_body(json!({ "content": "Rescheduled" })),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    test.assert_mocks();

    Ok(())
}

/// Tests that a field of the wrong type is rejected locally.
///
/// Expected: Err with 400 Bad Request response
#[tokio::test]
async fn fails_for_invalid_field_type() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_status_endpoint("PATCH", "/staffHours/2", 200, 0)
        .build()
        .await?;

    let result = update_entity(
        State(test.into_app_state()),
        test.auth_headers("user_1"),
        Path(("staff-hours".to_string(), "2".to_string())),
        json_body(json!({ "hours": "eight" })),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    test.assert_mocks();

    Ok(())
}
