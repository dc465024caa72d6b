//! Handler for short URL redirect.

use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::debug;

use crate::api::dto::link::RedirectResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short name to its original URL.
///
/// # Endpoint
///
/// `GET /{short_name}` (or `GET /{prefix}/{short_name}` when `REDIRECT_PREFIX` is set)
///
/// # Response
///
/// `302 Found` with a `Location` header and the destination in the body:
///
/// ```json
/// { "redirect_to": "https://example.com/long-url" }
/// ```
///
/// # Errors
///
/// Returns 404 Not Found if the short name is not registered.
pub async fn redirect_handler(
    Path(short_name): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let link = state.link_service.resolve(&short_name).await?;
    debug!(%short_name, target = %link.original_url, "Redirecting");

    let location = HeaderValue::from_str(&link.original_url).map_err(|e| {
        AppError::internal(
            "Internal server error",
            json!({ "short_name": short_name, "reason": e.to_string() }),
        )
    })?;

    Ok((
        StatusCode::FOUND,
        [(header::LOCATION, location)],
        Json(RedirectResponse {
            redirect_to: link.original_url,
        }),
    )
        .into_response())
}
