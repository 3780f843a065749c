use std::fmt;

/// Machine-readable error codes for scripts and agents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    ProjectNotConfigured,
    NoActiveSprint,
    FetchTransport,
    FetchStatus,
    MalformedResponse,
    UpdateTransport,
    UpdateRejected,
    IssueNotFound,
    InvalidEnumValue,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1001",
            Self::ProjectNotConfigured => "E1002",
            Self::NoActiveSprint => "E2001",
            Self::IssueNotFound => "E2002",
            Self::InvalidEnumValue => "E2003",
            Self::FetchTransport => "E3001",
            Self::FetchStatus => "E3002",
            Self::MalformedResponse => "E3003",
            Self::UpdateTransport => "E4001",
            Self::UpdateRejected => "E4002",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::ProjectNotConfigured => "No project configured",
            Self::NoActiveSprint => "Project has no active sprint",
            Self::IssueNotFound => "Issue not found on board",
            Self::InvalidEnumValue => "Invalid status/priority/lane value",
            Self::FetchTransport => "Could not reach the issue API",
            Self::FetchStatus => "Issue API returned an error status",
            Self::MalformedResponse => "Issue API returned a malformed response",
            Self::UpdateTransport => "Status update could not be sent",
            Self::UpdateRejected => "Status update was rejected",
        }
    }

    /// Optional remediation hint.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix syntax in .sprintboard/config.toml and retry."),
            Self::ProjectNotConfigured => {
                Some("Pass --project, set SPRINTBOARD_PROJECT, or set board.project_id in config.")
            }
            Self::NoActiveSprint => Some("Start a sprint for the project or pass --sprint."),
            Self::IssueNotFound => Some("Run `sb board` to list the issues currently on the board."),
            Self::InvalidEnumValue => Some("Use one of the documented status/priority/lane values."),
            Self::FetchTransport | Self::UpdateTransport => {
                Some("Check api.base_url and network connectivity, then refresh.")
            }
            Self::FetchStatus => Some("Check the API token and that the sprint exists."),
            Self::MalformedResponse => {
                Some("The server sent data this client does not understand; report it with logs.")
            }
            Self::UpdateRejected => None,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Loading sprint data from the API failed.
///
/// The issue store keeps its previous snapshot when this is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The request never produced an HTTP response (DNS, connect, timeout).
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    /// The server answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// The body was not valid JSON of the expected shape.
    #[error("could not decode response from {url}: {message}")]
    Decode { url: String, message: String },

    /// The body decoded but a record failed validation.
    #[error("malformed issue record {record}: {reason}")]
    Malformed { record: String, reason: String },

    /// The project has no sprint in progress.
    #[error("project {project_id} has no active sprint")]
    NoActiveSprint { project_id: String },
}

impl FetchError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Transport { .. } => ErrorCode::FetchTransport,
            Self::Status { .. } => ErrorCode::FetchStatus,
            Self::Decode { .. } | Self::Malformed { .. } => ErrorCode::MalformedResponse,
            Self::NoActiveSprint { .. } => ErrorCode::NoActiveSprint,
        }
    }
}

/// A drag-triggered status update failed remotely.
///
/// Always recovered by rolling back the optimistic change.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UpdateError {
    #[error("status update to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("status update to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// The backend refused the transition with an explanation.
    #[error("status update rejected: {reason}")]
    Rejected { reason: String },
}

impl UpdateError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Transport { .. } => ErrorCode::UpdateTransport,
            Self::Status { .. } | Self::Rejected { .. } => ErrorCode::UpdateRejected,
        }
    }
}
