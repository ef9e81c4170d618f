//! DTOs for the link management endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::Link;

/// Request to create a short link.
///
/// Both fields default when absent so that a missing `url` is reported as an
/// invalid URL rather than as a malformed body.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreateLinkRequest {
    /// The URL to redirect to (must be valid HTTP/HTTPS).
    #[serde(default)]
    #[validate(length(max = 2048, message = "URL must be at most 2048 characters"))]
    pub url: String,

    /// Optional custom short code.
    #[serde(default)]
    pub code: Option<String>,
}

/// JSON representation of a stored link.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LinkResponse {
    pub id: i64,
    pub code: String,
    pub target_url: String,
    pub click_count: i64,
    pub last_clicked_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<Link> for LinkResponse {
    fn from(link: Link) -> Self {
        Self {
            id: link.id,
            code: link.code,
            target_url: link.target_url,
            click_count: link.click_count,
            last_clicked_at: link.last_clicked_at,
            created_at: link.created_at,
        }
    }
}

/// Plain confirmation message.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_request_defaults() {
        let req: CreateLinkRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(req.url, "");
        assert!(req.code.is_none());
    }

    #[test]
    fn test_create_request_url_too_long() {
        let req = CreateLinkRequest {
            url: format!("https://example.com/{}", "a".repeat(2048)),
            code: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_link_response_serializes_null_last_clicked() {
        let now = Utc::now();
        let response = LinkResponse::from(Link::new(
            3,
            "abc".to_string(),
            "https://example.com/".to_string(),
            0,
            None,
            now,
        ));

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["id"], 3);
        assert_eq!(value["code"], "abc");
        assert_eq!(value["click_count"], 0);
        assert!(value["last_clicked_at"].is_null());
        assert_eq!(value["created_at"], json!(now));
    }
}
