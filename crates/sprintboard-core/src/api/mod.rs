//! Sprint/Issue API boundary.
//!
//! The board only talks to the backend through [`SprintApi`]. The HTTP
//! implementation lives in [`http`]; tests substitute in-memory fakes.

pub mod http;
pub mod wire;

use crate::error::{FetchError, UpdateError};
use crate::model::issue::{Issue, Status};
use serde::{Deserialize, Serialize};

pub use http::HttpSprintApi;

/// Identifies a sprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SprintRef {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Remote operations the board depends on.
pub trait SprintApi {
    /// Resolve the sprint currently in progress for a project.
    ///
    /// # Errors
    ///
    /// [`FetchError::NoActiveSprint`] when nothing is in progress, or any
    /// transport/decoding failure.
    fn active_sprint(&self, project_id: &str) -> Result<SprintRef, FetchError>;

    /// Fetch every issue in a sprint, in server order.
    ///
    /// # Errors
    ///
    /// Any transport, status, or validation failure. Partial results are
    /// never returned.
    fn sprint_issues(&self, sprint_id: &str) -> Result<Vec<Issue>, FetchError>;

    /// Persist a status change for one issue.
    ///
    /// # Errors
    ///
    /// Any failure to deliver or have the change accepted.
    fn update_issue_status(&self, issue_id: &str, status: Status) -> Result<(), UpdateError>;
}
