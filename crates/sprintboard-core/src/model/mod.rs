pub mod filter;
pub mod issue;

pub use filter::{AssigneeFilter, BoardFilter, assignee_options};
pub use issue::{Issue, ParseEnumError, Priority, Status};
