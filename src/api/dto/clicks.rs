//! DTOs for click ingestion.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::ClickSubmission;
use crate::domain::entities::Click;

/// Body of `POST /button-clicks`.
///
/// Every field is optional at the serde level so that a missing `buttonId`
/// is reported as a validation error rather than a deserialisation failure.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TrackClickRequest {
    #[serde(default)]
    #[validate(length(max = 128, message = "buttonId must be at most 128 characters"))]
    pub button_id: Option<String>,

    #[serde(default)]
    #[validate(length(max = 64, message = "username must be at most 64 characters"))]
    pub username: Option<String>,

    /// Client-side event time (RFC 3339). Server time is used when absent.
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl From<TrackClickRequest> for ClickSubmission {
    fn from(req: TrackClickRequest) -> Self {
        ClickSubmission {
            button_id: req.button_id,
            username: req.username,
            timestamp: req.timestamp,
        }
    }
}

/// Successful ingestion acknowledgment.
#[derive(Debug, Serialize)]
pub struct TrackClickResponse {
    pub success: bool,
    pub message: String,
    pub data: Click,
}

impl TrackClickResponse {
    pub fn tracked(click: Click) -> Self {
        Self {
            success: true,
            message: "Button click tracked successfully".to_string(),
            data: click,
        }
    }
}
