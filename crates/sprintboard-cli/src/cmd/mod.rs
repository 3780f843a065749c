pub mod assignees;
pub mod board;
pub mod completions;
pub mod move_cmd;
pub mod summary;

use anyhow::Context;
use sprintboard_core::api::{HttpSprintApi, SprintApi};
use sprintboard_core::config::{EffectiveConfig, Overrides, resolve_config};
use sprintboard_core::{Board, ErrorCode};
use std::path::Path;
use tracing::debug;

/// Failure that maps onto a stable error code.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct CommandError {
    pub code: ErrorCode,
    pub message: String,
}

impl CommandError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Resolved configuration plus an API client.
pub struct Session {
    pub config: EffectiveConfig,
    pub api: HttpSprintApi,
}

impl Session {
    pub fn open(project_root: &Path, overrides: &Overrides) -> anyhow::Result<Self> {
        let config = resolve_config(project_root, overrides).map_err(|err| {
            anyhow::Error::new(CommandError::new(ErrorCode::ConfigParseError, format!("{err:#}")))
        })?;
        debug!(base_url = %config.base_url, project = ?config.project_id, "session configured");
        let api = HttpSprintApi::new(&config.base_url, config.token.clone(), config.timeout);
        Ok(Self { config, api })
    }

    /// Pinned sprint if configured, otherwise the project's active sprint.
    pub fn sprint_id(&self) -> anyhow::Result<String> {
        if let Some(sprint_id) = &self.config.sprint_id {
            return Ok(sprint_id.clone());
        }
        let Some(project_id) = &self.config.project_id else {
            return Err(CommandError::new(
                ErrorCode::ProjectNotConfigured,
                "no project or sprint configured",
            )
            .into());
        };
        let sprint = self.api.active_sprint(project_id)?;
        debug!(sprint_id = %sprint.id, name = ?sprint.name, "resolved active sprint");
        Ok(sprint.id)
    }

    /// Load the sprint into a fresh board.
    pub fn load_board(&self) -> anyhow::Result<(Board, String)> {
        let sprint_id = self.sprint_id()?;
        let mut board = Board::default();
        board
            .refresh(&self.api, &sprint_id)
            .with_context(|| format!("failed to load sprint {sprint_id}"))?;
        Ok((board, sprint_id))
    }
}

/// Best error code for an error chain, if any link carries one.
pub fn error_code(err: &anyhow::Error) -> Option<ErrorCode> {
    err.chain().find_map(|cause| {
        if let Some(e) = cause.downcast_ref::<CommandError>() {
            Some(e.code)
        } else if let Some(e) = cause.downcast_ref::<sprintboard_core::FetchError>() {
            Some(e.code())
        } else {
            cause
                .downcast_ref::<sprintboard_core::UpdateError>()
                .map(sprintboard_core::UpdateError::code)
        }
    })
}
