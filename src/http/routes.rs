//! Inventory route handlers.
//!
//! Paths are registered exactly as the published API names them, mixed
//! camelCase and kebab-case included. Record ids travel as path strings
//! and are checked here, not by the extractor, so a malformed id gets the
//! API's own 400 instead of a framework rejection.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use crate::model::Comic;
use crate::query::InventoryParams;
use crate::store::ComicStore;
use crate::validator::{validate_new_comic, validate_patch, validate_record};

use super::envelope::ApiResponse;
use super::error::{ApiError, ApiResult};

/// State shared across inventory handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ComicStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn ComicStore>) -> Self {
        Self { store }
    }
}

/// Inventory listing payload. `book` is the wire name for the page of
/// records.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryPage {
    pub pages: i64,
    pub total: u64,
    pub limit: i64,
    pub total_pages: i64,
    #[serde(rename = "book")]
    pub records: Vec<Comic>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Create inventory routes
pub fn comic_routes(state: AppState) -> Router {
    Router::new()
        .route("/addComicBook", post(add_comic_book_handler))
        .route("/comic-book/{id}", get(get_comic_book_handler))
        .route("/comic-book/{id}", delete(delete_comic_book_handler))
        .route("/update-book/{id}", put(update_comic_book_handler))
        .route("/inventory", get(get_inventory_handler))
        .with_state(state)
}

/// Health check route at root level
pub fn health_routes() -> Router {
    Router::new().route("/health", get(health_handler))
}

fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ApiError::MissingId);
    }
    Uuid::parse_str(raw).map_err(|_| ApiError::InvalidId(raw.to_string()))
}

async fn add_comic_book_handler(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> ApiResult<ApiResponse<Comic>> {
    let new = validate_new_comic(&payload).map_err(ApiError::Validation)?;
    let comic = state.store.insert(new).await?;

    info!(id = %comic.id, book = %comic.book_name, "comic added");

    Ok(ApiResponse::ok(comic, "Successfully added comic book"))
}

async fn get_comic_book_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<Comic>> {
    let id = parse_id(&id)?;
    let comic = state.store.get(id).await?.ok_or(ApiError::NotFound)?;

    Ok(ApiResponse::ok(comic, "Fetched details of comic book"))
}

async fn update_comic_book_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<Value>,
) -> ApiResult<ApiResponse<Comic>> {
    let id = parse_id(&id)?;
    let patch = validate_patch(&payload).map_err(ApiError::Validation)?;

    let mut merged = state.store.get(id).await?.ok_or(ApiError::NotFound)?;
    patch.apply(&mut merged);

    // A partial update must never persist a record creation would reject
    let violations = validate_record(&merged);
    if !violations.is_empty() {
        return Err(ApiError::Validation(violations));
    }

    let updated = state
        .store
        .replace(id, merged)
        .await?
        .ok_or(ApiError::NotFound)?;

    info!(id = %updated.id, "comic updated");

    Ok(ApiResponse::ok(
        updated,
        "Comic book has been successfully updated",
    ))
}

async fn delete_comic_book_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<Value>> {
    let id = parse_id(&id)?;

    if !state.store.delete(id).await? {
        return Err(ApiError::NotFound);
    }

    info!(%id, "comic deleted");

    Ok(ApiResponse::ok(
        json!({}),
        "Comic book has been successfully deleted",
    ))
}

async fn get_inventory_handler(
    State(state): State<AppState>,
    Query(params): Query<InventoryParams>,
) -> ApiResult<ApiResponse<InventoryPage>> {
    let query = params.into_query()?;

    let records = state
        .store
        .find(&query.filter, query.sort, query.page)
        .await?;
    let total = state.store.count(&query.filter).await?;

    let page = InventoryPage {
        pages: query.page.page,
        total,
        limit: query.page.limit,
        total_pages: query.page.total_pages(total as usize),
        records,
    };

    Ok(ApiResponse::ok(page, "Successfully fetched inventory"))
}

async fn health_handler() -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(response))
}
