use axum::{
    routing::{get, post},
    Json, Router,
};
use common::{types::Health, ApiResponse};
use service::services::{Advertisements, Categories, Orders, Partners, Products, SiteConfigs, Users};
use service::Resource;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use axum::http::StatusCode;

use crate::handlers;
use crate::openapi::{self, HealthResponse};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(openapi::document())
}

async fn not_found() -> (StatusCode, Json<ApiResponse<()>>) {
    (StatusCode::NOT_FOUND, Json(ApiResponse::error(404, "route not found")))
}

/// list/create, get/update/delete and restore under `/api/{path}`.
fn resource<R: Resource>(router: Router<AppState>, path: &str) -> Router<AppState> {
    let base = format!("/api/{path}");
    router
        .route(&base, get(handlers::list::<R>).post(handlers::create::<R>))
        .route(
            &format!("{base}/:id"),
            get(handlers::get_one::<R>)
                .put(handlers::update::<R>)
                .delete(handlers::soft_delete::<R>),
        )
        .route(&format!("{base}/:id/restore"), post(handlers::restore::<R>))
}

/// Build the full application router: health, OpenAPI document and every resource.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let mut api = Router::new();
    api = resource::<Categories>(api, "categories");
    api = resource::<Products>(api, "products");
    api = resource::<Users>(api, "users");
    api = resource::<Orders>(api, "orders");
    api = resource::<Advertisements>(api, "advertisements");
    api = resource::<Partners>(api, "partners");
    api = resource::<SiteConfigs>(api, "site-configs");
    let api = api.route("/api/site-configs/key/:key", get(handlers::site_config_by_key));

    Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .merge(api)
        .fallback(not_found)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                        .on_request(DefaultOnRequest::new().level(Level::INFO))
                        .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                        .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
                )
                .layer(cors),
        )
}
