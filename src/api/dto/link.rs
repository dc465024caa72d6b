//! DTOs for the link registry endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;

use crate::domain::entities::{Link, LinkPatch};
use crate::error::AppError;

/// Request body for `POST /api/links`.
///
/// Missing fields deserialize as empty strings so that they are reported by
/// validation instead of as a JSON shape error.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLinkRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "original_url is required"))]
    pub original_url: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "short_name is required"))]
    pub short_name: String,
}

/// Request body for `PUT /api/links/{id}`.
///
/// Each field distinguishes three states:
///
/// - **Absent** → leave the stored value unchanged
/// - **`null`** → rejected, both fields are required on a link
/// - **Value** → replace the stored value
#[derive(Debug, Default, Deserialize)]
pub struct UpdateLinkRequest {
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub original_url: Option<Option<String>>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub short_name: Option<Option<String>>,
}

impl UpdateLinkRequest {
    /// Converts the request into a domain patch.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if a field is explicitly `null`.
    pub fn into_patch(self) -> Result<LinkPatch, AppError> {
        Ok(LinkPatch {
            original_url: non_null("original_url", self.original_url)?,
            short_name: non_null("short_name", self.short_name)?,
        })
    }
}

fn non_null(field: &str, value: Option<Option<String>>) -> Result<Option<String>, AppError> {
    match value {
        Some(None) => Err(AppError::bad_request(
            format!("{field} cannot be null"),
            json!({ "field": field }),
        )),
        Some(Some(v)) => Ok(Some(v)),
        None => Ok(None),
    }
}

/// JSON representation of a link, including its derived short URL.
#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub id: i64,
    pub original_url: String,
    pub short_name: String,
    pub short_url: String,
    pub created_at: DateTime<Utc>,
}

impl LinkResponse {
    /// Projects `link` for the client, deriving `short_url` from `short_url_root`.
    pub fn from_link(link: Link, short_url_root: &str) -> Self {
        let short_url = link.short_url(short_url_root);

        Self {
            id: link.id,
            original_url: link.original_url,
            short_name: link.short_name,
            short_url,
            created_at: link.created_at,
        }
    }
}

/// Response for `GET /api/links`.
#[derive(Debug, Serialize)]
pub struct LinkListResponse {
    pub links: Vec<LinkResponse>,
}

/// Response for `DELETE /api/links/{id}`.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Body of a redirect response.
#[derive(Debug, Serialize)]
pub struct RedirectResponse {
    pub redirect_to: String,
}
