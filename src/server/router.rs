//! HTTP routing and OpenAPI documentation configuration.
//!
//! Registers every API endpoint with its utoipa specification and serves Swagger UI at
//! `/api/docs`.

use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{controller, model::app::AppState};

/// Builds the application's HTTP router with all API endpoints and Swagger UI documentation.
///
/// # Registered Endpoints
/// - `GET /api/collections/{collection}` - List records
/// - `POST /api/collections/{collection}` - Create a record
/// - `GET /api/collections/{collection}/{id}` - Get a record
/// - `PUT /api/collections/{collection}/{id}` - Replace a record
/// - `PATCH /api/collections/{collection}/{id}` - Partially update a record
/// - `DELETE /api/collections/{collection}/{id}` - Delete a record
/// - `POST /api/users/sync` - Synchronize the signed-in user
/// - `GET /api/users/me` - Get the signed-in user's record
///
/// The OpenAPI specification is available at `/api/docs/openapi.json`.
///
/// # Example
/// ```ignore
/// let app_state = AppState { backend, identity };
/// let router = routes().with_state(app_state);
/// ```
pub fn routes() -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(info(title = "Lotus", description = "Lotus API"), tags(
        (name = controller::collection::COLLECTION_TAG, description = "Backend collection proxy routes"),
        (name = controller::user::USER_TAG, description = "Signed-in user routes"),
    ))]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(
            controller::collection::list_entities,
            controller::collection::create_entity
        ))
        .routes(routes!(
            controller::collection::get_entity,
            controller::collection::replace_entity,
            controller::collection::update_entity,
            controller::collection::delete_entity
        ))
        .routes(routes!(controller::user::sync_user))
        .routes(routes!(controller::user::get_current_user))
        .split_for_parts();

    routes.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
}
