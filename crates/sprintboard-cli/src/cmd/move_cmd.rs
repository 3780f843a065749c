//! `sb move`: drag one card to another lane.

use super::{CommandError, Session};
use crate::output::{OutputMode, render};
use clap::Args;
use serde::Serialize;
use sprintboard_core::notify::{Notice, RecordingNotifier};
use sprintboard_core::{DragReconciler, DropTarget, ErrorCode, Lane, MoveOutcome};

#[derive(Args, Debug)]
#[command(group(clap::ArgGroup::new("target").required(true).args(["lane", "onto"])))]
pub struct MoveArgs {
    /// Issue id or key to move.
    pub issue: String,

    /// Destination lane (todo, in_progress, in_review, done).
    #[arg(long)]
    pub lane: Option<String>,

    /// Drop onto another card; the issue joins that card's lane.
    #[arg(long)]
    pub onto: Option<String>,
}

#[derive(Debug, Serialize)]
struct MoveReport {
    issue_id: String,
    from: Option<Lane>,
    to: Option<Lane>,
    /// `None` when the drop changed nothing.
    outcome: Option<MoveOutcome>,
    notices: Vec<Notice>,
}

/// Accept either an issue id or its display key.
fn resolve_issue_id(board: &sprintboard_core::Board, needle: &str) -> Option<String> {
    board
        .store
        .issues()
        .iter()
        .find(|issue| issue.id == needle || issue.key.eq_ignore_ascii_case(needle))
        .map(|issue| issue.id.clone())
}

/// Reject unknown or non-lane values such as BLOCKED before touching the network.
fn check_lane(lane: &str) -> Result<Lane, CommandError> {
    lane.parse::<Lane>().map_err(|err| {
        CommandError::new(ErrorCode::InvalidEnumValue, format!("{err}; --lane takes a board lane"))
    })
}

pub fn run_move(args: &MoveArgs, session: &Session, output: OutputMode) -> anyhow::Result<()> {
    if let Some(lane) = &args.lane {
        check_lane(lane)?;
    }
    let (mut board, _sprint_id) = session.load_board()?;
    let lanes = board.lanes();

    let issue_id = resolve_issue_id(&board, &args.issue).ok_or_else(|| {
        CommandError::new(
            ErrorCode::IssueNotFound,
            format!("issue {} is not on the board", args.issue),
        )
    })?;

    let target = if let Some(lane) = &args.lane {
        DropTarget::Lane(lane.clone())
    } else if let Some(card) = &args.onto {
        DropTarget::Card(resolve_issue_id(&board, card).unwrap_or_else(|| card.clone()))
    } else {
        anyhow::bail!("one of --lane or --onto is required");
    };

    let mut drag = DragReconciler::new();
    if !drag.begin(&lanes, &issue_id) {
        return Err(CommandError::new(
            ErrorCode::IssueNotFound,
            format!("issue {} has a status that is not shown on the board", args.issue),
        )
        .into());
    }
    let from = lanes.lane_of(&issue_id);

    let notifier = RecordingNotifier::default();
    let outcome = drag.complete(&mut board.store, &lanes, &target, &session.api, &notifier);
    let to = match outcome {
        Some(MoveOutcome::Committed) => board.lanes().lane_of(&issue_id),
        _ => None,
    };

    let report = MoveReport {
        issue_id,
        from,
        to,
        outcome,
        notices: notifier.notices(),
    };

    render(output, &report, |r, w| {
        match r.outcome {
            Some(MoveOutcome::Committed) => writeln!(
                w,
                "moved {}: {} -> {}",
                r.issue_id,
                r.from.map_or("?", Lane::as_str),
                r.to.map_or("?", Lane::as_str)
            )?,
            Some(MoveOutcome::RolledBack) => {
                writeln!(w, "move of {} failed and was rolled back", r.issue_id)?;
            }
            None => writeln!(w, "no change: {} stays where it is", r.issue_id)?,
        }
        for notice in &r.notices {
            eprintln!("! {}", notice.message);
        }
        Ok(())
    })
}
