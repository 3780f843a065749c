//! `sb summary`: sprint progress by lane.

use super::Session;
use crate::output::{OutputMode, render, section};
use serde::Serialize;
use sprintboard_core::SprintSummary;

#[derive(Debug, Serialize)]
struct SummaryView {
    sprint_id: String,
    #[serde(flatten)]
    summary: SprintSummary,
    completion_ratio: f64,
}

pub fn run_summary(session: &Session, output: OutputMode) -> anyhow::Result<()> {
    let (board, sprint_id) = session.load_board()?;
    let summary = board.summary();
    let view = SummaryView {
        sprint_id,
        completion_ratio: summary.completion_ratio(),
        summary,
    };

    render(output, &view, |v, w| {
        section(w, &format!("Sprint {}", v.sprint_id))?;
        for lane in &v.summary.lanes {
            writeln!(w, "{:<12} {:>4} issues {:>7.1} pts", lane.lane.as_str(), lane.issues, lane.points)?;
        }
        writeln!(
            w,
            "{:<12} {:>4} issues {:>7.1} pts  ({:.0}% done)",
            "TOTAL",
            v.summary.total_issues,
            v.summary.total_points,
            v.completion_ratio * 100.0
        )?;
        if v.summary.dropped > 0 {
            writeln!(w, "{} issue(s) with unrecognized status not counted", v.summary.dropped)?;
        }
        Ok(())
    })
}
