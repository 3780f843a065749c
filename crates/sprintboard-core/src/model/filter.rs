//! Board filters.
//!
//! A [`BoardFilter`] is a plain value passed into pure functions; nothing
//! here holds state between calls, so filtering is safe to re-run on every
//! render.

use super::issue::{Issue, Priority};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::{convert::Infallible, fmt, str::FromStr};

/// Assignee predicate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "id")]
pub enum AssigneeFilter {
    /// No filtering by assignee.
    #[default]
    Any,
    /// Only issues without an assignee.
    Unassigned,
    /// Only issues assigned to this user id.
    User(String),
}

impl AssigneeFilter {
    #[must_use]
    pub fn matches(&self, assignee_id: Option<&str>) -> bool {
        match self {
            Self::Any => true,
            Self::Unassigned => assignee_id.is_none(),
            Self::User(id) => assignee_id == Some(id.as_str()),
        }
    }
}

impl FromStr for AssigneeFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("any") {
            Ok(Self::Any)
        } else if trimmed.eq_ignore_ascii_case("unassigned") {
            Ok(Self::Unassigned)
        } else {
            Ok(Self::User(trimmed.to_string()))
        }
    }
}

impl fmt::Display for AssigneeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("any"),
            Self::Unassigned => f.write_str("unassigned"),
            Self::User(id) => f.write_str(id),
        }
    }
}

/// Filter criteria applied to the sprint's issues.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardFilter {
    /// Free-text search (case-insensitive substring on title or key).
    pub search: String,
    /// Exact priority match.
    pub priority: Option<Priority>,
    pub assignee: AssigneeFilter,
}

impl BoardFilter {
    /// Returns true if no filter criteria are active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.search.is_empty()
            && self.priority.is_none()
            && self.assignee == AssigneeFilter::Any
    }

    /// Apply this filter to a list of issues.
    ///
    /// Returns a new vec containing only issues that match all active
    /// criteria, in their original relative order.
    #[must_use]
    pub fn apply(&self, issues: &[Issue]) -> Vec<Issue> {
        let query = self.normalized_search();
        issues
            .iter()
            .filter(|issue| self.matches_with(issue, query.as_deref()))
            .cloned()
            .collect()
    }

    /// Returns true if the issue satisfies all active filter criteria.
    #[must_use]
    pub fn matches(&self, issue: &Issue) -> bool {
        self.matches_with(issue, self.normalized_search().as_deref())
    }

    fn normalized_search(&self) -> Option<String> {
        (!self.search.is_empty()).then(|| self.search.to_lowercase())
    }

    fn matches_with(&self, issue: &Issue, query: Option<&str>) -> bool {
        if let Some(q) = query {
            if !issue.title.to_lowercase().contains(q) && !issue.key.to_lowercase().contains(q) {
                return false;
            }
        }
        if let Some(priority) = self.priority {
            if issue.priority != priority {
                return false;
            }
        }
        self.assignee.matches(issue.assignee_id.as_deref())
    }
}

/// Distinct assignee ids present in `issues`, sorted, for an assignee picker.
#[must_use]
pub fn assignee_options(issues: &[Issue]) -> Vec<String> {
    issues
        .iter()
        .filter_map(|issue| issue.assignee_id.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
