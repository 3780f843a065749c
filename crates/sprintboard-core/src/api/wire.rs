//! JSON records as sent by the backend, and their validation into model types.

use crate::error::FetchError;
use crate::model::issue::{Issue, Priority, Status};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Issue record exactly as it appears on the wire.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireIssue {
    pub id: serde_json::Value,
    pub key: String,
    pub title: String,
    pub status: String,
    pub priority: String,
    #[serde(default)]
    pub assignee_id: Option<String>,
    #[serde(default)]
    pub story_points: Option<f64>,
}

/// Sprint issue listings come either bare or wrapped in an envelope.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum IssueListing {
    Bare(Vec<WireIssue>),
    Wrapped { issues: Vec<WireIssue> },
}

impl IssueListing {
    #[must_use]
    pub fn into_records(self) -> Vec<WireIssue> {
        match self {
            Self::Bare(records) | Self::Wrapped { issues: records } => records,
        }
    }
}

/// Body of a status update request.
#[derive(Debug, Clone, Serialize)]
pub struct StatusUpdate {
    pub status: Status,
}

fn malformed(record: &str, reason: impl Into<String>) -> FetchError {
    FetchError::Malformed {
        record: record.to_string(),
        reason: reason.into(),
    }
}

impl TryFrom<WireIssue> for Issue {
    type Error = FetchError;

    fn try_from(wire: WireIssue) -> Result<Self, Self::Error> {
        // Ids arrive as strings from some endpoints and integers from others.
        let id = match wire.id {
            serde_json::Value::String(s) => s,
            serde_json::Value::Number(n) => n.to_string(),
            other => return Err(malformed(&wire.key, format!("id must be a string or number, got {other}"))),
        };
        if id.trim().is_empty() {
            return Err(malformed(&wire.key, "empty id"));
        }

        let priority: Priority = wire
            .priority
            .parse()
            .map_err(|err: crate::model::ParseEnumError| malformed(&id, err.to_string()))?;

        let status = Status::from_wire(&wire.status);
        let raw_status = (status == Status::Unrecognized).then(|| {
            debug!(issue_id = %id, raw_status = %wire.status, "unrecognized status on the wire");
            wire.status
        });

        if let Some(points) = wire.story_points {
            if !points.is_finite() || points < 0.0 {
                return Err(malformed(&id, format!("storyPoints must be a non-negative number, got {points}")));
            }
        }

        let assignee_id = wire.assignee_id.filter(|a| !a.trim().is_empty());

        Ok(Self {
            id,
            key: wire.key,
            title: wire.title,
            status,
            priority,
            assignee_id,
            story_points: wire.story_points,
            raw_status,
        })
    }
}

/// Validate a full listing; one bad record rejects the whole response.
///
/// # Errors
///
/// The first [`FetchError::Malformed`] encountered.
pub fn validate_listing(listing: IssueListing) -> Result<Vec<Issue>, FetchError> {
    listing.into_records().into_iter().map(Issue::try_from).collect()
}

/// Decode and validate a raw JSON body.
///
/// # Errors
///
/// [`FetchError::Decode`] for bodies of the wrong shape, otherwise as
/// [`validate_listing`].
pub fn decode_issues(url: &str, body: &str) -> Result<Vec<Issue>, FetchError> {
    let listing: IssueListing = serde_json::from_str(body).map_err(|err| FetchError::Decode {
        url: url.to_string(),
        message: err.to_string(),
    })?;
    validate_listing(listing)
}
