//! The board pipeline: store -> filter -> lanes.

use crate::api::SprintApi;
use crate::error::FetchError;
use crate::lanes::{Lane, LaneSet, group};
use crate::model::filter::{BoardFilter, assignee_options};
use crate::model::issue::Issue;
use crate::store::IssueStore;
use serde::Serialize;

/// Issue store plus the active filter. Lanes are always re-derived, never
/// stored.
#[derive(Debug, Default)]
pub struct Board {
    pub store: IssueStore,
    filter: BoardFilter,
}

impl Board {
    #[must_use]
    pub fn new(store: IssueStore) -> Self {
        Self {
            store,
            filter: BoardFilter::default(),
        }
    }

    /// Reload the sprint. The previous snapshot survives a failure.
    ///
    /// # Errors
    ///
    /// See [`IssueStore::load`].
    pub fn refresh(&mut self, api: &dyn SprintApi, sprint_id: &str) -> Result<(), FetchError> {
        self.store.load(api, sprint_id).map(|_| ())
    }

    #[must_use]
    pub const fn filter(&self) -> &BoardFilter {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: BoardFilter) {
        self.filter = filter;
    }

    #[must_use]
    pub fn visible_issues(&self) -> Vec<Issue> {
        self.filter.apply(self.store.issues())
    }

    #[must_use]
    pub fn lanes(&self) -> LaneSet {
        group(&self.visible_issues())
    }

    #[must_use]
    pub fn assignee_options(&self) -> Vec<String> {
        assignee_options(self.store.issues())
    }

    /// Progress over the whole sprint, independent of the active filter.
    #[must_use]
    pub fn summary(&self) -> SprintSummary {
        SprintSummary::from_lanes(&group(self.store.issues()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaneTotals {
    pub lane: Lane,
    pub issues: usize,
    pub points: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SprintSummary {
    pub total_issues: usize,
    pub total_points: f64,
    pub done_points: f64,
    pub lanes: Vec<LaneTotals>,
    /// Issues whose status maps to no lane.
    pub dropped: usize,
}

impl SprintSummary {
    #[must_use]
    pub fn from_lanes(lanes: &LaneSet) -> Self {
        let totals: Vec<LaneTotals> = lanes
            .columns()
            .iter()
            .map(|column| LaneTotals {
                lane: column.lane,
                issues: column.issues.len(),
                points: column.points,
            })
            .collect();
        Self {
            total_issues: lanes.total_issues(),
            total_points: totals.iter().map(|t| t.points).sum(),
            done_points: lanes.column(Lane::Done).points,
            lanes: totals,
            dropped: lanes.dropped(),
        }
    }

    /// Share of points in the done lane, `0.0` for an unestimated sprint.
    #[must_use]
    pub fn completion_ratio(&self) -> f64 {
        if self.total_points > 0.0 {
            self.done_points / self.total_points
        } else {
            0.0
        }
    }
}
