use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ErrorDto, ListResponse},
        entity::Entity,
        query::ListQuery,
        schema::Collection,
    },
    server::{
        controller::util::principal::get_principal,
        error::{proxy::ProxyError, Error},
        model::app::AppState,
        service::collection::{CollectionService, UpdateMode},
    },
};

pub static COLLECTION_TAG: &str = "collection";

/// Resolves a collection slug from the request path
fn resolve_collection(slug: &str) -> Result<Collection, Error> {
    Collection::from_slug(slug).ok_or_else(|| ProxyError::UnknownCollection(slug.to_string()).into())
}

fn parse_id(raw: &str) -> Result<i64, Error> {
    raw.parse::<i64>().map_err(|_| {
        ProxyError::InvalidInput(format!("Invalid record id `{}`, expected an integer", raw)).into()
    })
}

fn parse_body(body: &Bytes) -> Result<Entity, Error> {
    serde_json::from_slice::<Entity>(body).map_err(|e| {
        ProxyError::InvalidInput(format!("Request body must be a JSON object: {}", e)).into()
    })
}

/// List records of a collection
///
/// Supports `page`, `limit`, `filter`, `or`, `s`, `join` and `sort` query parameters. Field
/// names in filters, search and sort clauses may use frontend naming.
#[utoipa::path(
    get,
    path = "/api/collections/{collection}",
    tag = COLLECTION_TAG,
    params(
        ("collection" = String, Path, description = "Collection slug, e.g. `clients`"),
        ("page" = Option<u32>, Query, description = "1-based page number"),
        ("limit" = Option<u32>, Query, description = "Page size"),
        ("filter" = Option<Vec<String>>, Query, description = "`field||operator||value` clauses, all must match"),
        ("or" = Option<Vec<String>>, Query, description = "`field||operator||value` clauses, any may match"),
        ("s" = Option<String>, Query, description = "JSON search object"),
        ("join" = Option<Vec<String>>, Query, description = "Relations to embed"),
        ("sort" = Option<Vec<String>>, Query, description = "`field,ASC` or `field,DESC`"),
    ),
    responses(
        (status = 200, description = "Success when listing records", body = ListResponse),
        (status = 400, description = "Malformed query parameters", body = ErrorDto),
        (status = 401, description = "Missing or invalid identity token", body = ErrorDto),
        (status = 404, description = "Unknown collection", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_entities(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(collection): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<impl IntoResponse, Error> {
    get_principal(&state, &headers)?;
    let collection = resolve_collection(&collection)?;
    let query = ListQuery::from_pairs(params).map_err(ProxyError::from)?;

    let page = CollectionService::new(&state.backend)
        .list(collection, query)
        .await?;

    Ok((StatusCode::OK, Json(page)))
}

/// Get a single record by id
#[utoipa::path(
    get,
    path = "/api/collections/{collection}/{id}",
    tag = COLLECTION_TAG,
    params(
        ("collection" = String, Path, description = "Collection slug, e.g. `clients`"),
        ("id" = i64, Path, description = "Record id"),
    ),
    responses(
        (status = 200, description = "Success when retrieving a record", body = Entity),
        (status = 400, description = "Invalid record id", body = ErrorDto),
        (status = 401, description = "Missing or invalid identity token", body = ErrorDto),
        (status = 404, description = "Unknown collection or record", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_entity(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((collection, id)): Path<(String, String)>,
) -> Result<impl IntoResponse, Error> {
    get_principal(&state, &headers)?;
    let collection = resolve_collection(&collection)?;
    let id = parse_id(&id)?;

    let record = CollectionService::new(&state.backend)
        .get(collection, id)
        .await?;

    Ok((StatusCode::OK, Json(record)))
}

/// Create a record
///
/// The body may use frontend or backend field naming and must contain the collection's
/// required fields.
#[utoipa::path(
    post,
    path = "/api/collections/{collection}",
    tag = COLLECTION_TAG,
    params(
        ("collection" = String, Path, description = "Collection slug, e.g. `clients`"),
    ),
    request_body = Entity,
    responses(
        (status = 201, description = "Success when creating a record", body = Entity),
        (status = 400, description = "Invalid body or failed validation", body = ErrorDto),
        (status = 401, description = "Missing or invalid identity token", body = ErrorDto),
        (status = 404, description = "Unknown collection", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_entity(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(collection): Path<String>,
    body: Bytes,
) -> Result<impl IntoResponse, Error> {
    get_principal(&state, &headers)?;
    let collection = resolve_collection(&collection)?;
    let body = parse_body(&body)?;

    let record = CollectionService::new(&state.backend)
        .create(collection, body)
        .await?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// Replace a record
#[utoipa::path(
    put,
    path = "/api/collections/{collection}/{id}",
    tag = COLLECTION_TAG,
    params(
        ("collection" = String, Path, description = "Collection slug, e.g. `clients`"),
        ("id" = i64, Path, description = "Record id"),
    ),
    request_body = Entity,
    responses(
        (status = 200, description = "Success when replacing a record", body = Entity),
        (status = 400, description = "Invalid body or failed validation", body = ErrorDto),
        (status = 401, description = "Missing or invalid identity token", body = ErrorDto),
        (status = 404, description = "Unknown collection or record", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn replace_entity(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((collection, id)): Path<(String, String)>,
    body: Bytes,
) -> Result<impl IntoResponse, Error> {
    update(state, headers, collection, id, body, UpdateMode::Replace).await
}

/// Partially update a record
///
/// Only the fields present in the body are changed. Collections with an identity field (such
/// as `users` and its `email`) require it on every update.
#[utoipa::path(
    patch,
    path = "/api/collections/{collection}/{id}",
    tag = COLLECTION_TAG,
    params(
        ("collection" = String, Path, description = "Collection slug, e.g. `clients`"),
        ("id" = i64, Path, description = "Record id"),
    ),
    request_body = Entity,
    responses(
        (status = 200, description = "Success when updating a record", body = Entity),
        (status = 400, description = "Invalid body or failed validation", body = ErrorDto),
        (status = 401, description = "Missing or invalid identity token", body = ErrorDto),
        (status = 404, description = "Unknown collection or record", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_entity(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((collection, id)): Path<(String, String)>,
    body: Bytes,
) -> Result<impl IntoResponse, Error> {
    update(state, headers, collection, id, body, UpdateMode::Partial).await
}

async fn update(
    state: AppState,
    headers: HeaderMap,
    collection: String,
    id: String,
    body: Bytes,
    mode: UpdateMode,
) -> Result<impl IntoResponse, Error> {
    get_principal(&state, &headers)?;
    let collection = resolve_collection(&collection)?;
    let id = parse_id(&id)?;
    let body = parse_body(&body)?;

    let record = CollectionService::new(&state.backend)
        .update(collection, id, body, mode)
        .await?;

    Ok((StatusCode::OK, Json(record)))
}

/// Delete a record
#[utoipa::path(
    delete,
    path = "/api/collections/{collection}/{id}",
    tag = COLLECTION_TAG,
    params(
        ("collection" = String, Path, description = "Collection slug, e.g. `clients`"),
        ("id" = i64, Path, description = "Record id"),
    ),
    responses(
        (status = 204, description = "Success when deleting a record"),
        (status = 400, description = "Invalid record id", body = ErrorDto),
        (status = 401, description = "Missing or invalid identity token", body = ErrorDto),
        (status = 404, description = "Unknown collection or record", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_entity(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((collection, id)): Path<(String, String)>,
) -> Result<impl IntoResponse, Error> {
    get_principal(&state, &headers)?;
    let collection = resolve_collection(&collection)?;
    let id = parse_id(&id)?;

    CollectionService::new(&state.backend)
        .delete(collection, id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
