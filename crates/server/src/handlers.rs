//! Generic JSON handlers, instantiated once per storefront resource.

use std::collections::HashMap;

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use common::ApiResponse;
use service::services::site_config;
use service::{PageResult, Resource, ServiceError};
use tracing::debug;

use crate::errors::ApiError;
use crate::params::ListParams;
use crate::state::AppState;

type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

pub async fn list<R: Resource>(
    State(state): State<AppState>,
    Query(raw): Query<HashMap<String, String>>,
) -> ApiResult<PageResult<R::Model>> {
    let params = ListParams::parse(&raw)?;
    debug!(resource = R::NAME, page = params.page.page, filters = params.filters.len(), "list");
    let page = state
        .crud::<R>()
        .find_paginated(params.page, &params.filters, params.sort.as_ref())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

pub async fn create<R: Resource>(
    State(state): State<AppState>,
    payload: Result<Json<R::CreateInput>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<R::Model>>), ApiError> {
    let Json(input) = payload?;
    let created = state.crud::<R>().create(input).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::created(created))))
}

pub async fn get_one<R: Resource>(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> ApiResult<R::Model> {
    let Path(id) = id?;
    Ok(Json(ApiResponse::ok(state.crud::<R>().get(id).await?)))
}

pub async fn update<R: Resource>(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<R::UpdateInput>, JsonRejection>,
) -> ApiResult<R::Model> {
    let Path(id) = id?;
    let Json(input) = payload?;
    Ok(Json(ApiResponse::ok(state.crud::<R>().update(id, input).await?)))
}

pub async fn soft_delete<R: Resource>(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> ApiResult<R::Model> {
    let Path(id) = id?;
    Ok(Json(ApiResponse::ok(state.crud::<R>().soft_delete(id).await?)))
}

pub async fn restore<R: Resource>(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> ApiResult<R::Model> {
    let Path(id) = id?;
    Ok(Json(ApiResponse::ok(state.crud::<R>().restore(id).await?)))
}

/// Active site configuration entry by its key.
#[utoipa::path(
    get,
    path = "/api/site-configs/key/{key}",
    tag = "site-configs",
    params(("key" = String, Path, description = "Dotted config key, e.g. `site.title`")),
    responses(
        (status = 200, description = "Entry found"),
        (status = 404, description = "No active entry with this key")
    )
)]
pub async fn site_config_by_key(
    State(state): State<AppState>,
    key: Result<Path<String>, PathRejection>,
) -> ApiResult<models::site_config::Model> {
    let Path(key) = key?;
    let found = site_config::find_by_key(&state.db, &key)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("site config '{key}' not found")))?;
    Ok(Json(ApiResponse::ok(found)))
}
