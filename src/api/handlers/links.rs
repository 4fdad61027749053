//! Handlers for link management endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::link::{
    CreateLinkRequest, LinkListResponse, LinkResponse, PaginationMeta, UpdateLinkRequest,
};
use crate::api::dto::pagination::PaginationParams;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link with a generated code.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com/page",
///   "caption": "Docs"   // optional, "title" also accepted
/// }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "id": 1,
///   "caption": "Docs",
///   "target_url": "https://example.com/page",
///   "code": "k3x9qa",
///   "short_url": "http://localhost:3000/k3x9qa",
///   "clicks": 0,
///   "created_at": "2026-01-01T00:00:00Z"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the URL is invalid.
/// Returns 500 if no unique code could be allocated.
pub async fn create_link_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateLinkRequest>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    payload.validate()?;

    let link = state
        .link_service
        .create_link(payload.url, payload.caption)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(LinkResponse::from_link(link, &state)),
    ))
}

/// Lists links, newest first.
///
/// # Endpoint
///
/// `GET /api/links?page=1&page_size=50`
pub async fn list_links_handler(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<LinkListResponse>, AppError> {
    let (page, page_size) = params
        .validate_and_get_page()
        .map_err(|e| AppError::bad_request(e, json!({})))?;

    let (links, total) = state.link_service.list_links(page, page_size).await?;

    let items = links
        .into_iter()
        .map(|link| LinkResponse::from_link(link, &state))
        .collect();

    Ok(Json(LinkListResponse {
        pagination: PaginationMeta {
            page,
            page_size,
            total,
        },
        items,
    }))
}

/// Returns a single link by numeric id.
///
/// # Endpoint
///
/// `GET /api/links/{id}`
pub async fn get_link_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<LinkResponse>, AppError> {
    let id = parse_link_id(&id)?;
    let link = state.link_service.get_link(id).await?;

    Ok(Json(LinkResponse::from_link(link, &state)))
}

/// Replaces caption and/or destination of a link.
///
/// # Endpoint
///
/// `PUT /api/links/{id}`
///
/// # Request Body
///
/// ```json
/// {
///   "caption": "New caption",            // optional
///   "url": "https://new-destination.com" // optional
/// }
/// ```
///
/// # Errors
///
/// Returns 404 Not Found if the link doesn't exist.
/// Returns 400 Bad Request if validation fails.
pub async fn update_link_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateLinkRequest>,
) -> Result<Json<LinkResponse>, AppError> {
    payload.validate()?;
    let id = parse_link_id(&id)?;

    let link = state.link_service.update_link(id, payload.into()).await?;

    Ok(Json(LinkResponse::from_link(link, &state)))
}

/// Deletes a link by numeric id.
///
/// # Endpoint
///
/// `DELETE /api/links/{id}`
///
/// The record is removed permanently. Use
/// `DELETE /api/links/code/{code}` to delete by short code.
///
/// # Errors
///
/// Returns 400 Bad Request if `id` is not a positive integer.
/// Returns 404 Not Found if the link doesn't exist.
pub async fn delete_link_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    let id = parse_link_id(&id)?;
    state.link_service.delete_link(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Deletes a link by short code.
///
/// # Endpoint
///
/// `DELETE /api/links/code/{code}`
///
/// # Errors
///
/// Returns 400 Bad Request if `code` is malformed.
/// Returns 404 Not Found if the link doesn't exist.
pub async fn delete_link_by_code_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.link_service.delete_link_by_code(&code).await?;

    Ok(StatusCode::NO_CONTENT)
}

fn parse_link_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::bad_request("Invalid link id", json!({ "id": raw })))
}
