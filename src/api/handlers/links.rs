//! Handlers for link registry endpoints (create, read, list, update, delete).

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{HeaderMap, HeaderValue, StatusCode, header},
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::link::{
    CreateLinkRequest, LinkListResponse, LinkResponse, MessageResponse, UpdateLinkRequest,
};
use crate::api::dto::pagination::RangeQuery;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// # Request Body
///
/// ```json
/// { "original_url": "https://example.com/long-url", "short_name": "exmpl" }
/// ```
///
/// # Response
///
/// `201 Created` with the full record, including the derived `short_url`.
///
/// # Errors
///
/// Returns 400 Bad Request if a field is missing, empty or invalid.
/// Returns 409 Conflict if the short name is already taken.
pub async fn create_link_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateLinkRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let link = state
        .link_service
        .create_link(payload.original_url, payload.short_name)
        .await?;

    let root = state.public_urls.short_url_root();
    Ok((StatusCode::CREATED, Json(LinkResponse::from_link(link, &root))))
}

/// Lists links ordered by id.
///
/// # Endpoint
///
/// `GET /api/links?range=[start,end]`
///
/// # Pagination
///
/// `range` is an inclusive, zero-indexed window. It defaults to `[0,9]`, and
/// any malformed value silently falls back to that default.
///
/// The `Content-Range` header reports the rows actually returned, e.g.
/// `links 10-14/15`. When the window lies past the data both bounds collapse
/// to `start - 1`.
pub async fn list_links_handler(
    State(state): State<AppState>,
    query: Result<Query<RangeQuery>, QueryRejection>,
) -> Result<(HeaderMap, Json<LinkListResponse>), AppError> {
    let window = match query {
        Ok(Query(query)) => query.window(),
        Err(rejection) => {
            tracing::debug!(
                reason = %rejection.body_text(),
                "Unreadable list query, using default range"
            );
            RangeQuery::default().window()
        }
    };

    let page = state.link_service.list_links(window).await?;

    let content_range = page
        .window
        .content_range(page.links.len(), page.total)
        .to_string();

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_RANGE,
        HeaderValue::from_str(&content_range).map_err(|e| {
            AppError::internal("Internal server error", json!({ "reason": e.to_string() }))
        })?,
    );

    let root = state.public_urls.short_url_root();
    let links = page
        .links
        .into_iter()
        .map(|link| LinkResponse::from_link(link, &root))
        .collect();

    Ok((headers, Json(LinkListResponse { links })))
}

/// Returns a single link.
///
/// # Endpoint
///
/// `GET /api/links/{id}`
///
/// # Errors
///
/// Returns 404 Not Found if no link has this id.
pub async fn get_link_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<LinkResponse>, AppError> {
    let Path(id) = id?;
    let link = state.link_service.get_link(id).await?;

    let root = state.public_urls.short_url_root();
    Ok(Json(LinkResponse::from_link(link, &root)))
}

/// Partially updates a link.
///
/// # Endpoint
///
/// `PUT /api/links/{id}`
///
/// # Request Body
///
/// Both fields are optional; only provided fields change.
///
/// ```json
/// { "original_url": "https://example.com/updated", "short_name": "updated" }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if no data is provided or a value is invalid.
/// Returns 404 Not Found if no link has this id.
/// Returns 409 Conflict if the new short name belongs to another link.
pub async fn update_link_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateLinkRequest>, JsonRejection>,
) -> Result<Json<LinkResponse>, AppError> {
    let Path(id) = id?;

    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(JsonRejection::MissingJsonContentType(_)) => UpdateLinkRequest::default(),
        Err(rejection) => return Err(rejection.into()),
    };

    let link = state
        .link_service
        .update_link(id, payload.into_patch()?)
        .await?;

    let root = state.public_urls.short_url_root();
    Ok(Json(LinkResponse::from_link(link, &root)))
}

/// Permanently deletes a link.
///
/// # Endpoint
///
/// `DELETE /api/links/{id}`
///
/// # Errors
///
/// Returns 404 Not Found if no link has this id.
pub async fn delete_link_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Path(id) = id?;
    state.link_service.delete_link(id).await?;

    Ok(Json(MessageResponse {
        message: "Link deleted successfully".to_string(),
    }))
}
