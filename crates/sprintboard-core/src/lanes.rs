//! Partition issues into the four board lanes.
//!
//! | Status        | Lane          |
//! |---------------|---------------|
//! | `TODO`        | `TODO`        |
//! | `IN_PROGRESS` | `IN_PROGRESS` |
//! | `IN_REVIEW`   | `IN_REVIEW`   |
//! | `DONE`        | `DONE`        |
//! | `BLOCKED`     | `TODO`        |
//! | anything else | dropped       |

use crate::model::issue::{Issue, ParseEnumError, Status};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use tracing::warn;

/// One of the fixed board columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Lane {
    Todo,
    InProgress,
    InReview,
    Done,
}

impl Lane {
    /// Canonical left-to-right lane order.
    pub const ALL: [Self; 4] = [Self::Todo, Self::InProgress, Self::InReview, Self::Done];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "TODO",
            Self::InProgress => "IN_PROGRESS",
            Self::InReview => "IN_REVIEW",
            Self::Done => "DONE",
        }
    }

    /// Lane an issue with `status` is shown in, if any.
    #[must_use]
    pub const fn for_status(status: Status) -> Option<Self> {
        match status {
            Status::Todo | Status::Blocked => Some(Self::Todo),
            Status::InProgress => Some(Self::InProgress),
            Status::InReview => Some(Self::InReview),
            Status::Done => Some(Self::Done),
            Status::Unrecognized => None,
        }
    }

    /// Status an issue receives when dropped into this lane.
    #[must_use]
    pub const fn target_status(self) -> Status {
        match self {
            Self::Todo => Status::Todo,
            Self::InProgress => Status::InProgress,
            Self::InReview => Status::InReview,
            Self::Done => Status::Done,
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Todo => 0,
            Self::InProgress => 1,
            Self::InReview => 2,
            Self::Done => 3,
        }
    }
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Lane {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<Status>() {
            Ok(status) if status != Status::Blocked => Self::for_status(status).ok_or_else(|| {
                ParseEnumError {
                    expected: "lane",
                    got: s.to_string(),
                }
            }),
            _ => Err(ParseEnumError {
                expected: "lane",
                got: s.to_string(),
            }),
        }
    }
}

/// Issues shown in one lane plus the header aggregate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaneColumn {
    pub lane: Lane,
    pub issues: Vec<Issue>,
    /// Sum of story points, absent estimates counted as zero.
    pub points: f64,
}

impl LaneColumn {
    const fn empty(lane: Lane) -> Self {
        Self {
            lane,
            issues: Vec::new(),
            points: 0.0,
        }
    }

    fn push(&mut self, issue: Issue) {
        self.points += issue.points();
        self.issues.push(issue);
    }

    #[must_use]
    pub fn contains(&self, issue_id: &str) -> bool {
        self.issues.iter().any(|issue| issue.id == issue_id)
    }
}

/// All four lanes, always present, in canonical order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaneSet {
    columns: [LaneColumn; 4],
    dropped: usize,
}

impl Default for LaneSet {
    fn default() -> Self {
        Self {
            columns: Lane::ALL.map(LaneColumn::empty),
            dropped: 0,
        }
    }
}

impl LaneSet {
    #[must_use]
    pub fn columns(&self) -> &[LaneColumn] {
        &self.columns
    }

    #[must_use]
    pub const fn column(&self, lane: Lane) -> &LaneColumn {
        &self.columns[lane.index()]
    }

    /// Lane currently holding the card with `issue_id`.
    #[must_use]
    pub fn lane_of(&self, issue_id: &str) -> Option<Lane> {
        self.columns
            .iter()
            .find(|column| column.contains(issue_id))
            .map(|column| column.lane)
    }

    /// Number of issues left out because their status maps to no lane.
    #[must_use]
    pub const fn dropped(&self) -> usize {
        self.dropped
    }

    #[must_use]
    pub fn total_issues(&self) -> usize {
        self.columns.iter().map(|column| column.issues.len()).sum()
    }
}

/// Group a filtered issue sequence into lanes, preserving input order.
#[must_use]
pub fn group(issues: &[Issue]) -> LaneSet {
    let mut set = LaneSet::default();
    for issue in issues {
        if let Some(lane) = Lane::for_status(issue.status) {
            set.columns[lane.index()].push(issue.clone());
        } else {
            warn!(
                issue_id = %issue.id,
                key = %issue.key,
                raw_status = issue.raw_status.as_deref().unwrap_or("?"),
                "issue has unrecognized status; not shown on board"
            );
            set.dropped += 1;
        }
    }
    set
}
