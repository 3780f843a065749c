//! Blocking HTTP client for the sprint/issue REST endpoints.

use super::wire::{StatusUpdate, decode_issues};
use super::{SprintApi, SprintRef};
use crate::error::{FetchError, UpdateError};
use crate::model::issue::{Issue, Status};
use std::time::Duration;
use tracing::{debug, instrument};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// [`SprintApi`] backed by the REST service.
#[derive(Debug, Clone)]
pub struct HttpSprintApi {
    agent: ureq::Agent,
    base_url: String,
    token: Option<String>,
}

impl HttpSprintApi {
    #[must_use]
    pub fn new(base_url: &str, token: Option<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .user_agent(concat!("sprintboard/", env!("CARGO_PKG_VERSION")))
            .build();
        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: &str, url: &str) -> ureq::Request {
        let mut request = self
            .agent
            .request(method, url)
            .set("Accept", "application/json");
        if let Some(token) = &self.token {
            request = request.set("Authorization", &format!("Bearer {token}"));
        }
        request
    }

    fn get_body(&self, url: &str) -> Result<String, FetchError> {
        let response = self.request("GET", url).call().map_err(|err| match err {
            ureq::Error::Status(status, _) => FetchError::Status {
                url: url.to_string(),
                status,
            },
            ureq::Error::Transport(transport) => FetchError::Transport {
                url: url.to_string(),
                message: transport.to_string(),
            },
        })?;
        response.into_string().map_err(|err| FetchError::Transport {
            url: url.to_string(),
            message: err.to_string(),
        })
    }
}

impl SprintApi for HttpSprintApi {
    #[instrument(skip(self))]
    fn active_sprint(&self, project_id: &str) -> Result<SprintRef, FetchError> {
        let url = self.url(&format!("projects/{project_id}/sprints/active"));
        let body = match self.get_body(&url) {
            Err(FetchError::Status { status: 404, .. }) => {
                return Err(FetchError::NoActiveSprint {
                    project_id: project_id.to_string(),
                });
            }
            other => other?,
        };
        let sprint: Option<SprintRef> =
            serde_json::from_str(&body).map_err(|err| FetchError::Decode {
                url: url.clone(),
                message: err.to_string(),
            })?;
        sprint.ok_or_else(|| FetchError::NoActiveSprint {
            project_id: project_id.to_string(),
        })
    }

    #[instrument(skip(self))]
    fn sprint_issues(&self, sprint_id: &str) -> Result<Vec<Issue>, FetchError> {
        let url = self.url(&format!("sprints/{sprint_id}/issues"));
        let body = self.get_body(&url)?;
        let issues = decode_issues(&url, &body)?;
        debug!(count = issues.len(), "fetched sprint issues");
        Ok(issues)
    }

    #[instrument(skip(self))]
    fn update_issue_status(&self, issue_id: &str, status: Status) -> Result<(), UpdateError> {
        let url = self.url(&format!("issues/{issue_id}/status"));
        match self.request("PATCH", &url).send_json(StatusUpdate { status }) {
            Ok(_) => Ok(()),
            Err(ureq::Error::Status(code, response)) => {
                // 409/422 carry a human-readable reason from the workflow engine.
                let reason = response
                    .into_json::<serde_json::Value>()
                    .ok()
                    .and_then(|body| body.get("message").and_then(|m| m.as_str()).map(String::from));
                Err(match reason {
                    Some(reason) if matches!(code, 409 | 422) => UpdateError::Rejected { reason },
                    _ => UpdateError::Status { url, status: code },
                })
            }
            Err(ureq::Error::Transport(transport)) => Err(UpdateError::Transport {
                url,
                message: transport.to_string(),
            }),
        }
    }
}
