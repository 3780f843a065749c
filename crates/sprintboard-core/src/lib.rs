//! sprintboard-core library.
//!
//! Data flows one way: the [`store::IssueStore`] snapshot is filtered by a
//! [`model::BoardFilter`], grouped into lanes by [`lanes::group`], and the
//! only write path back into the store is [`drag::DragReconciler`].
//!
//! # Conventions
//!
//! - **Errors**: typed `thiserror` enums in [`error`]; `anyhow::Result` for config loading.
//! - **Logging**: `tracing` macros (`info!`, `warn!`, `debug!`).

pub mod api;
pub mod board;
pub mod config;
pub mod drag;
pub mod error;
pub mod lanes;
pub mod model;
pub mod notify;
pub mod store;

pub use board::{Board, SprintSummary};
pub use drag::{DragReconciler, DragState, DropTarget, MoveOutcome, PendingMove};
pub use error::{ErrorCode, FetchError, UpdateError};
pub use lanes::{Lane, LaneColumn, LaneSet};
pub use model::{AssigneeFilter, BoardFilter, Issue, Priority, Status};
pub use store::IssueStore;
