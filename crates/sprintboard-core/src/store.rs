//! Last-known-good snapshot of the active sprint's issues.
//!
//! The snapshot is an `Arc<[Issue]>` that is never edited in place: every
//! mutation builds a new slice and swaps it in. Anything derived from an
//! older snapshot keeps seeing a consistent set of records.

use crate::api::SprintApi;
use crate::error::FetchError;
use crate::model::issue::{Issue, Status};
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct IssueStore {
    snapshot: Arc<[Issue]>,
}

impl Default for IssueStore {
    fn default() -> Self {
        Self::new()
    }
}

impl IssueStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            snapshot: Arc::from(Vec::new()),
        }
    }

    #[must_use]
    pub fn from_issues(issues: Vec<Issue>) -> Self {
        Self {
            snapshot: Arc::from(issues),
        }
    }

    /// Fetch the sprint's issues and replace the snapshot wholesale.
    ///
    /// # Errors
    ///
    /// Returns the API's [`FetchError`]; the previous snapshot is kept.
    pub fn load(&mut self, api: &dyn SprintApi, sprint_id: &str) -> Result<Arc<[Issue]>, FetchError> {
        match api.sprint_issues(sprint_id) {
            Ok(issues) => {
                info!(sprint_id, count = issues.len(), "loaded sprint issues");
                self.snapshot = Arc::from(issues);
                Ok(self.snapshot())
            }
            Err(err) => {
                warn!(sprint_id, error = %err, "sprint load failed; keeping previous snapshot");
                Err(err)
            }
        }
    }

    /// Current snapshot (cheap clone of the shared slice).
    #[must_use]
    pub fn snapshot(&self) -> Arc<[Issue]> {
        Arc::clone(&self.snapshot)
    }

    #[must_use]
    pub fn issues(&self) -> &[Issue] {
        &self.snapshot
    }

    #[must_use]
    pub fn get(&self, issue_id: &str) -> Option<&Issue> {
        self.snapshot.iter().find(|issue| issue.id == issue_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshot.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshot.is_empty()
    }

    /// Set one issue's status. Unknown ids leave the snapshot untouched and
    /// return the same `Arc`.
    pub fn set_status(&mut self, issue_id: &str, status: Status) -> Arc<[Issue]> {
        self.rewrite(issue_id, |issue| issue.with_status(status))
    }

    /// Replace one issue's full record by id. Unknown ids are a no-op.
    pub fn replace(&mut self, issue_id: &str, issue: Issue) -> Arc<[Issue]> {
        self.rewrite(issue_id, move |_| issue.clone())
    }

    fn rewrite(&mut self, issue_id: &str, update: impl Fn(&Issue) -> Issue) -> Arc<[Issue]> {
        let Some(position) = self.snapshot.iter().position(|issue| issue.id == issue_id) else {
            debug!(issue_id, "issue not in snapshot; nothing to update");
            return self.snapshot();
        };

        let next: Vec<Issue> = self
            .snapshot
            .iter()
            .enumerate()
            .map(|(idx, issue)| if idx == position { update(issue) } else { issue.clone() })
            .collect();
        self.snapshot = Arc::from(next);
        self.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::SprintRef;
    use crate::error::UpdateError;
    use crate::model::issue::Priority;

    fn make_issue(id: &str, status: Status) -> Issue {
        Issue {
            id: id.to_string(),
            key: format!("PROJ-{id}"),
            title: format!("issue {id}"),
            status,
            priority: Priority::Medium,
            assignee_id: None,
            story_points: Some(1.0),
            raw_status: None,
        }
    }

    struct FixedApi(Result<Vec<Issue>, FetchError>);

    impl SprintApi for FixedApi {
        fn active_sprint(&self, _project_id: &str) -> Result<SprintRef, FetchError> {
            Ok(SprintRef {
                id: "s1".into(),
                name: None,
            })
        }

        fn sprint_issues(&self, _sprint_id: &str) -> Result<Vec<Issue>, FetchError> {
            self.0.clone()
        }

        fn update_issue_status(&self, _issue_id: &str, _status: Status) -> Result<(), UpdateError> {
            Ok(())
        }
    }

    #[test]
    fn load_replaces_snapshot() {
        let mut store = IssueStore::from_issues(vec![make_issue("old", Status::Todo)]);
        let api = FixedApi(Ok(vec![make_issue("1", Status::Todo), make_issue("2", Status::Done)]));
        let loaded = store.load(&api, "s1").unwrap();
        assert_eq!(loaded.len(), 2);
        assert!(store.get("old").is_none());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn failed_load_keeps_previous_snapshot() {
        let mut store = IssueStore::from_issues(vec![make_issue("1", Status::Todo)]);
        let before = store.snapshot();
        let api = FixedApi(Err(FetchError::Status {
            url: "http://api/sprints/s1/issues".into(),
            status: 500,
        }));
        assert!(store.load(&api, "s1").is_err());
        assert!(Arc::ptr_eq(&before, &store.snapshot()));
    }

    #[test]
    fn set_status_changes_one_field_and_keeps_order() {
        let mut store = IssueStore::from_issues(vec![
            make_issue("1", Status::Todo),
            make_issue("2", Status::Todo),
            make_issue("3", Status::Todo),
        ]);
        let before = store.snapshot();
        let after = store.set_status("2", Status::InReview);

        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(before[1].status, Status::Todo, "old snapshot is untouched");
        let ids: Vec<_> = after.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert_eq!(after[1], before[1].with_status(Status::InReview));
        assert_eq!(after[0], before[0]);
    }

    #[test]
    fn set_status_on_unknown_id_returns_same_reference() {
        let mut store = IssueStore::from_issues(vec![make_issue("1", Status::Todo)]);
        let before = store.snapshot();
        let after = store.set_status("missing", Status::Done);
        assert!(Arc::ptr_eq(&before, &after));
    }

    #[test]
    fn replace_restores_full_record() {
        let mut store = IssueStore::from_issues(vec![make_issue("1", Status::Todo)]);
        let original = store.get("1").cloned().unwrap();
        store.set_status("1", Status::Done);
        store.replace("1", original.clone());
        assert_eq!(store.get("1"), Some(&original));
    }

    #[test]
    fn replace_on_unknown_id_is_noop() {
        let mut store = IssueStore::from_issues(vec![make_issue("1", Status::Todo)]);
        let before = store.snapshot();
        let after = store.replace("9", make_issue("9", Status::Done));
        assert!(Arc::ptr_eq(&before, &after));
    }
}
