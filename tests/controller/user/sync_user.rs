//! Tests for the sync_user endpoint.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use lotus::server::controller::user::sync_user;
use serde_json::json;

use super::*;

/// Tests the first sync of a signed-in user.
///
/// Expected: Ok with 201 Created response and the user in frontend naming
#[tokio::test]
async fn creates_user_on_first_sync() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_list_endpoint("/Users", json!([]), 1)
        .with_mock_endpoint(|server| {
            server
                .mock("POST", "/Users")
                .with_status(201)
                .with_header("content-type", "application/json")
                .with_body(factory::backend_user(4, "user_1", "ann@example.com").to_string())
                .expect(1)
                .create()
        })
        .build()
        .await?;

    let result = sync_user(
        State(test.into_app_state()),
        test.auth_headers("user_1"),
        test.session.clone(),
        json_body(json!({ "email": "ann@example.com", "firstName": "Ann" })),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = response_json(resp).await;
    assert_eq!(body["created"], json!(true));
    assert_eq!(body["user"]["id"], json!(4));
    assert_eq!(body["user"]["primaryPhone"], json!("555-0100"));
    test.assert_mocks();

    Ok(())
}

/// Tests syncing a user whose record already exists with the same email.
///
/// Expected: Ok with 200 OK response and no write to the backend
#[tokio::test]
async fn returns_existing_user() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_list_endpoint(
            "/Users",
            json!([factory::backend_user(4, "user_1", "ann@example.com")]),
            1,
        )
        .with_status_endpoint("POST", "/Users", 201, 0)
        .with_status_endpoint("PATCH", "/Users/4", 200, 0)
        .build()
        .await?;

    let result = sync_user(
        State(test.into_app_state()),
        test.auth_headers("user_1"),
        test.session.clone(),
        json_body(json!({ "email": "ann@example.com" })),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = response_json(resp).await;
    assert_eq!(body["created"], json!(false));
    test.assert_mocks();

    Ok(())
}

/// Tests that a sync body without an email is rejected.
///
/// Expected: Err with 400 Bad Request response and no backend request
#[tokio::test]
async fn fails_for_missing_email() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_list_endpoint("/Users", json!([]), 0)
        .build()
        .await?;

    let result = sync_user(
        State(test.into_app_state()),
        test.auth_headers("user_1"),
        test.session.clone(),
        json_body(json!({ "firstName": "Ann" })),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    test.assert_mocks();

    Ok(())
}

/// Tests that an expired identity token is rejected.
///
/// Expected: Err with 401 Unauthorized response
#[tokio::test]
async fn fails_for_expired_token() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_list_endpoint("/Users", json!([]), 0)
        .build()
        .await?;

    let mut headers = HeaderMap::new();
    headers.insert(
        axum::http::header::AUTHORIZATION,
        format!("Bearer {}", factory::expired_identity_token("user_1"))
            .parse()
            .unwrap(),
    );

    let result = sync_user(
        State(test.into_app_state()),
        headers,
        test.session.clone(),
        Bytes::from_static(b"{}"),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    test.assert_mocks();

    Ok(())
}

/// Tests a sync whose body email contradicts the identity token's email claim.
///
/// Expected: Err with 400 Bad Request response and no backend request
#[tokio::test]
async fn fails_for_email_differing_from_token() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_list_endpoint("/Users", json!([]), 0)
        .with_status_endpoint("PATCH", "/Users/4", 200, 0)
        .build()
        .await?;

    let mut headers = HeaderMap::new();
    headers.insert(
        axum::http::header::AUTHORIZATION,
        format!(
            "Bearer {}",
            factory::identity_token("user_1", Some("ann@example.com"))
        )
        .parse()
        .unwrap(),
    );

    let result = sync_user(
        State(test.into_app_state()),
        headers,
        test.session.clone(),
        json_body(json!({ "email": "ceo@clinic.com" })),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    test.assert_mocks();

    Ok(())
}
