//! Drag-and-drop status changes with optimistic update and rollback.
//!
//! A gesture moves through `Idle -> Dragging` on [`DragReconciler::begin`].
//! [`DragReconciler::drop_on`] either aborts back to `Idle` or applies the
//! status change to the store and hands back a [`PendingMove`], which is
//! the resolving phase of the move. The pending move carries the
//! pre-mutation record, so resolving it with a failed remote result writes
//! that record back.
//!
//! Several pending moves may be outstanding at once. Each one only ever
//! touches the issue id it captured.

use crate::api::SprintApi;
use crate::error::UpdateError;
use crate::lanes::{Lane, LaneSet};
use crate::model::issue::Issue;
use crate::notify::{Notice, Notifier};
use crate::store::IssueStore;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Where a card was released.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    /// A lane container, identified by its lane key.
    Lane(String),
    /// Another card, identified by its issue id.
    Card(String),
}

/// Gesture state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging { issue_id: String, source: Lane },
}

/// How a pending move ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveOutcome {
    /// Server accepted the change; the optimistic state stands.
    Committed,
    /// Server refused or was unreachable; the pre-drag record was restored.
    RolledBack,
}

/// A move whose optimistic mutation is applied but not yet confirmed.
#[derive(Debug, Clone, PartialEq)]
#[must_use = "a pending move must be resolved or the optimistic state is never confirmed"]
pub struct PendingMove {
    pub issue_id: String,
    pub from: Lane,
    pub to: Lane,
    /// Record as it was before the optimistic mutation.
    pub previous: Issue,
}

impl PendingMove {
    /// Finish the move with the remote result.
    pub fn resolve(
        self,
        store: &mut IssueStore,
        result: Result<(), UpdateError>,
        notifier: &dyn Notifier,
    ) -> MoveOutcome {
        match result {
            Ok(()) => {
                info!(issue_id = %self.issue_id, from = %self.from, to = %self.to, "status move committed");
                MoveOutcome::Committed
            }
            Err(err) => {
                warn!(
                    issue_id = %self.issue_id,
                    error = %err,
                    code = %err.code(),
                    "status move failed; rolling back"
                );
                let key = self.previous.key.clone();
                store.replace(&self.issue_id, self.previous);
                notifier.notify(Notice::new(format!(
                    "Could not move {key} to {}: {err}",
                    self.to
                )));
                MoveOutcome::RolledBack
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct DragReconciler {
    state: DragState,
}

impl DragReconciler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn state(&self) -> &DragState {
        &self.state
    }

    /// Start dragging the card for `issue_id`.
    ///
    /// Returns false, staying idle, when the card is not on the board.
    pub fn begin(&mut self, lanes: &LaneSet, issue_id: &str) -> bool {
        match lanes.lane_of(issue_id) {
            Some(source) => {
                debug!(issue_id, %source, "drag started");
                self.state = DragState::Dragging {
                    issue_id: issue_id.to_string(),
                    source,
                };
                true
            }
            None => {
                debug!(issue_id, "drag ignored: card not on board");
                self.state = DragState::Idle;
                false
            }
        }
    }

    /// Abandon the current gesture without any mutation.
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }

    /// Release the dragged card on `target`.
    ///
    /// Returns `None` (and mutates nothing) if nothing is being dragged,
    /// the destination cannot be resolved, or it equals the source lane.
    /// Otherwise the new status is applied to `store` before returning.
    pub fn drop_on(
        &mut self,
        store: &mut IssueStore,
        lanes: &LaneSet,
        target: &DropTarget,
    ) -> Option<PendingMove> {
        let DragState::Dragging { issue_id, source } = std::mem::take(&mut self.state) else {
            debug!("drop ignored: no drag in progress");
            return None;
        };

        let destination = match target {
            DropTarget::Lane(id) => id.parse::<Lane>().ok(),
            DropTarget::Card(card_id) => lanes.lane_of(card_id),
        };
        let Some(destination) = destination else {
            debug!(%issue_id, ?target, "drop ignored: no destination lane");
            return None;
        };
        if destination == source {
            debug!(%issue_id, lane = %source, "drop ignored: same lane");
            return None;
        }

        let Some(previous) = store.get(&issue_id).cloned() else {
            debug!(%issue_id, "drop ignored: issue no longer in snapshot");
            return None;
        };

        store.set_status(&issue_id, destination.target_status());
        Some(PendingMove {
            issue_id,
            from: source,
            to: destination,
            previous,
        })
    }

    /// Run a drop through to completion against `api`.
    ///
    /// The optimistic change lands in `store` before the remote call is
    /// made. Returns `None` when the drop was aborted.
    pub fn complete(
        &mut self,
        store: &mut IssueStore,
        lanes: &LaneSet,
        target: &DropTarget,
        api: &dyn SprintApi,
        notifier: &dyn Notifier,
    ) -> Option<MoveOutcome> {
        let pending = self.drop_on(store, lanes, target)?;
        let result = api.update_issue_status(&pending.issue_id, pending.to.target_status());
        Some(pending.resolve(store, result, notifier))
    }
}
