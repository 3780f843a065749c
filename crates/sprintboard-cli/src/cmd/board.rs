//! `sb board`: print the sprint's lanes.

use super::Session;
use crate::output::{OutputMode, render, section};
use clap::Args;
use serde::Serialize;
use sprintboard_core::{AssigneeFilter, BoardFilter, Issue, LaneSet, Priority};
use std::io::{self, Write};

#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Case-insensitive text to match in issue title or key.
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Only issues with this priority (low, medium, high, critical).
    #[arg(long, short = 'p')]
    pub priority: Option<Priority>,

    /// Only issues assigned to this user id, or "unassigned".
    #[arg(long, short = 'a')]
    pub assignee: Option<AssigneeFilter>,
}

impl FilterArgs {
    pub fn to_filter(&self) -> BoardFilter {
        BoardFilter {
            search: self.search.clone().unwrap_or_default(),
            priority: self.priority,
            assignee: self.assignee.clone().unwrap_or_default(),
        }
    }
}

#[derive(Args, Debug)]
pub struct BoardArgs {
    #[command(flatten)]
    pub filter: FilterArgs,
}

#[derive(Debug, Serialize)]
struct BoardView<'a> {
    sprint_id: &'a str,
    filter: &'a BoardFilter,
    lanes: &'a LaneSet,
}

fn format_points(points: f64) -> String {
    if points.fract() == 0.0 {
        format!("{points:.0}")
    } else {
        format!("{points:.1}")
    }
}

fn write_card(w: &mut dyn Write, issue: &Issue) -> io::Result<()> {
    let assignee = issue
        .assignee_id
        .as_deref()
        .map_or_else(|| "-".to_string(), |a| format!("@{a}"));
    let points = issue
        .story_points
        .map_or_else(String::new, |p| format!("  {}pt", format_points(p)));
    let blocked = if issue.status == sprintboard_core::Status::Blocked {
        "  [BLOCKED]"
    } else {
        ""
    };
    writeln!(
        w,
        "  {:<10} {:<8} {:<8} {}{points}{blocked}",
        issue.key, issue.priority, assignee, issue.title
    )
}

pub fn write_lanes(w: &mut dyn Write, lanes: &LaneSet) -> io::Result<()> {
    for column in lanes.columns() {
        section(
            w,
            &format!(
                "{} ({} issues, {} pts)",
                column.lane,
                column.issues.len(),
                format_points(column.points)
            ),
        )?;
        if column.issues.is_empty() {
            writeln!(w, "  (empty)")?;
        }
        for issue in &column.issues {
            write_card(w, issue)?;
        }
        writeln!(w)?;
    }
    if lanes.dropped() > 0 {
        writeln!(w, "{} issue(s) hidden: unrecognized status", lanes.dropped())?;
    }
    Ok(())
}

pub fn run_board(args: &BoardArgs, session: &Session, output: OutputMode) -> anyhow::Result<()> {
    let (mut board, sprint_id) = session.load_board()?;
    board.set_filter(args.filter.to_filter());
    let lanes = board.lanes();

    let view = BoardView {
        sprint_id: &sprint_id,
        filter: board.filter(),
        lanes: &lanes,
    };
    render(output, &view, |v, w| {
        writeln!(w, "Sprint {}", v.sprint_id)?;
        if !v.filter.is_empty() {
            writeln!(
                w,
                "Filter: search={:?} priority={} assignee={}",
                v.filter.search,
                v.filter.priority.map_or("any", Priority::as_str),
                v.filter.assignee
            )?;
        }
        writeln!(w)?;
        write_lanes(w, v.lanes)
    })
}
