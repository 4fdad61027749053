//! DTOs for link management endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{Link, LinkPatch};
use crate::state::AppState;

/// Request body for `POST /api/links`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLinkRequest {
    /// Destination URL. `https://` is assumed when no scheme is given.
    #[validate(length(min = 1, max = 2048, message = "URL must be 1-2048 characters"))]
    pub url: String,

    /// Optional label; `title` is accepted as an alias.
    #[serde(default, alias = "title")]
    #[validate(length(max = 200, message = "Caption must be at most 200 characters"))]
    pub caption: Option<String>,
}

/// Request body for `PUT /api/links/{id}`.
///
/// Absent fields keep their current value.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateLinkRequest {
    #[validate(length(min = 1, max = 2048, message = "URL must be 1-2048 characters"))]
    pub url: Option<String>,

    #[serde(default, alias = "title")]
    #[validate(length(max = 200, message = "Caption must be at most 200 characters"))]
    pub caption: Option<String>,
}

impl From<UpdateLinkRequest> for LinkPatch {
    fn from(req: UpdateLinkRequest) -> Self {
        LinkPatch {
            caption: req.caption,
            target_url: req.url,
        }
    }
}

/// JSON representation of a link.
#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub id: i64,
    pub caption: String,
    pub target_url: String,
    pub code: String,
    pub short_url: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
}

impl LinkResponse {
    pub fn from_link(link: Link, state: &AppState) -> Self {
        let short_url = state.short_url(&link.code);
        Self {
            id: link.id,
            caption: link.caption,
            target_url: link.target_url,
            code: link.code,
            short_url,
            clicks: link.clicks,
            created_at: link.created_at,
        }
    }
}

/// Paginated list of links.
#[derive(Debug, Serialize)]
pub struct LinkListResponse {
    pub pagination: PaginationMeta,
    pub items: Vec<LinkResponse>,
}

#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_accepts_title_alias() {
        let req: CreateLinkRequest =
            serde_json::from_str(r#"{"url": "https://example.com", "title": "Home"}"#).unwrap();

        assert_eq!(req.caption.as_deref(), Some("Home"));
    }

    #[test]
    fn test_create_request_caption_optional() {
        let req: CreateLinkRequest =
            serde_json::from_str(r#"{"url": "https://example.com"}"#).unwrap();

        assert!(req.caption.is_none());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_create_request_rejects_empty_url() {
        let req: CreateLinkRequest = serde_json::from_str(r#"{"url": ""}"#).unwrap();

        assert!(req.validate().is_err());
    }

    #[test]
    fn test_create_request_rejects_long_caption() {
        let req = CreateLinkRequest {
            url: "https://example.com".to_string(),
            caption: Some("x".repeat(201)),
        };

        assert!(req.validate().is_err());
    }

    #[test]
    fn test_update_request_into_patch() {
        let req: UpdateLinkRequest =
            serde_json::from_str(r#"{"url": "https://new.com"}"#).unwrap();
        let patch: LinkPatch = req.into();

        assert_eq!(patch.target_url.as_deref(), Some("https://new.com"));
        assert!(patch.caption.is_none());
    }
}
