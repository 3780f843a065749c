//! User-visible notices raised by the board (toasts in a UI, stderr in the CLI).

use serde::Serialize;
use std::cell::RefCell;

/// A message the user should see, such as a failed move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub message: String,
}

impl Notice {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Sink for user-facing notices.
pub trait Notifier {
    fn notify(&self, notice: Notice);
}

/// Keeps every notice in memory; useful for embedding and tests.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: RefCell<Vec<Notice>>,
}

impl RecordingNotifier {
    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.borrow().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.borrow_mut().push(notice);
    }
}
