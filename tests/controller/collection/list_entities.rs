//! Tests for the list_entities endpoint.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use lotus::server::controller::collection::list_entities;
use serde_json::json;

use super::*;

fn params(pairs: &[(&str, &str)]) -> Query<Vec<(String, String)>> {
    Query(
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    )
}

/// Tests that records are returned in frontend naming.
///
/// Verifies that a bare backend array is wrapped as a single page and that aliased fields
/// such as `date_of_birth` are renamed.
///
/// Expected: Ok with 200 OK response
#[tokio::test]
async fn returns_translated_records() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_list_endpoint(
            "/Clients",
            json!([factory::backend_client(1), factory::backend_client(2)]),
            1,
        )
        .build()
        .await?;

    let result = list_entities(
        State(test.into_app_state()),
        test.auth_headers("user_1"),
        Path("clients".to_string()),
        params(&[]),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = response_json(resp).await;
    assert_eq!(body["total"], json!(2));
    assert_eq!(body["data"][0]["dateOfBirth"], json!("1985-11-23"));
    assert!(body["data"][0].get("date_of_birth").is_none());
    test.assert_mocks();

    Ok(())
}

/// Tests that filter and sort field names are translated before reaching the backend.
///
/// Expected: Ok with 200 OK response, backend receives `zip_code`
#[tokio::test]
async fn translates_query_fields() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_mock_endpoint(|server| {
            server
                .mock("GET", "/Clients")
                .match_query(mockito::Matcher::AllOf(vec![
                    mockito::Matcher::UrlEncoded("filter".into(), "zip_code||eq||97201".into()),
                    mockito::Matcher::UrlEncoded("sort".into(), "date_of_birth,DESC".into()),
                    mockito::Matcher::UrlEncoded("page".into(), "2".into()),
                ]))
                .with_status(200)
                .with_header("content-type", "application/json")
                .with_body(
                    json!({
                        "data": [factory::backend_client(11)],
                        "count": 1,
                        "total": 11,
                        "page": 2,
                        "pageCount": 2,
                    })
                    .to_string(),
                )
                .expect(1)
                .create()
        })
        .build()
        .await?;

    let result = list_entities(
        State(test.into_app_state()),
        test.auth_headers("user_1"),
        Path("clients".to_string()),
        params(&[
            ("filter", "zipCode||eq||97201"),
            ("sort", "dateOfBirth,DESC"),
            ("page", "2"),
        ]),
    )
    .await;

    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = response_json(resp).await;
    assert_eq!(body["pageCount"], json!(2));
    assert_eq!(body["data"][0]["zipCode"], json!("97201"));
    test.assert_mocks();

    Ok(())
}

/// Tests that a request without an identity token never reaches the backend.
///
/// Expected: Err with 401 Unauthorized response and no backend request
#[tokio::test]
async fn fails_without_token() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_list_endpoint("/Clients", json!([]), 0)
        .build()
        .await?;

    let result = list_entities(
        State(test.into_app_state()),
        HeaderMap::new(),
        Path("clients".to_string()),
        params(&[]),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    test.assert_mocks();

    Ok(())
}

/// Tests authentication is checked before the collection is resolved.
///
/// Expected: Err with 401 Unauthorized response for an unknown collection
#[tokio::test]
async fn checks_token_before_collection() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;

    let result = list_entities(
        State(test.into_app_state()),
        HeaderMap::new(),
        Path("invoices".to_string()),
        params(&[]),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

/// Tests an unknown collection slug.
///
/// Expected: Err with 404 Not Found response
#[tokio::test]
async fn fails_for_unknown_collection() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;

    let result = list_entities(
        State(test.into_app_state()),
        test.auth_headers("user_1"),
        Path("invoices".to_string()),
        params(&[]),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}

/// Tests a malformed filter clause.
///
/// Expected: Err with 400 Bad Request response and no backend request
#[tokio::test]
async fn fails_for_malformed_filter() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_list_endpoint("/Clients", json!([]), 0)
        .build()
        .await?;

    let result = list_entities(
        State(test.into_app_state()),
        test.auth_headers("user_1"),
        Path("clients".to_string()),
        params(&[("filter", "zipCode||like||9")]),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    test.assert_mocks();

    Ok(())
}

/// Tests that a persistent backend outage surfaces as a generic error after retries.
///
/// Expected: Err with 500 Internal Server Error response after 3 attempts
#[tokio::test]
async fn fails_after_retrying_backend_errors() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_status_endpoint("GET", "/Clients", 503, 3)
        .build()
        .await?;

    let result = list_entities(
        State(test.into_app_state()),
        test.auth_headers("user_1"),
        Path("clients".to_string()),
        params(&[]),
    )
    .await;

    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response_json(resp).await;
    assert_eq!(body["error"], json!("Internal server error"));
    test.assert_mocks();

    Ok(())
}
