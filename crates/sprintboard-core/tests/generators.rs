#![allow(dead_code)]

use proptest::prelude::*;
use sprintboard_core::{AssigneeFilter, BoardFilter, Issue, Priority, Status};

const USERS: [&str; 3] = ["ana", "ben", "chen"];

pub fn arb_status() -> impl Strategy<Value = Status> {
    prop_oneof![
        4 => Just(Status::Todo),
        3 => Just(Status::InProgress),
        2 => Just(Status::InReview),
        3 => Just(Status::Done),
        2 => Just(Status::Blocked),
        1 => Just(Status::Unrecognized),
    ]
}

pub fn arb_priority() -> impl Strategy<Value = Priority> {
    prop::sample::select(Priority::ALL.to_vec())
}

fn arb_assignee() -> impl Strategy<Value = Option<String>> {
    prop::option::of(prop::sample::select(USERS.to_vec()).prop_map(String::from))
}

/// Issues with unique ids `0..n` in generation order.
pub fn arb_issues(max: usize) -> impl Strategy<Value = Vec<Issue>> {
    prop::collection::vec(
        (
            "[a-zA-Z ]{0,16}",
            prop::sample::select(vec!["WEB", "API", "ops"]),
            arb_status(),
            arb_priority(),
            arb_assignee(),
            prop::option::of(0u8..=13),
        ),
        0..max,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(idx, (title, project, status, priority, assignee_id, points))| Issue {
                id: idx.to_string(),
                key: format!("{project}-{idx}"),
                title,
                status,
                priority,
                assignee_id,
                story_points: points.map(f64::from),
                raw_status: None,
            })
            .collect()
    })
}

pub fn arb_filter() -> impl Strategy<Value = BoardFilter> {
    let assignee = prop_oneof![
        Just(AssigneeFilter::Any),
        Just(AssigneeFilter::Unassigned),
        prop::sample::select(USERS.to_vec()).prop_map(|u| AssigneeFilter::User(u.to_string())),
    ];
    ("[a-zA-Z]{0,2}", prop::option::of(arb_priority()), assignee).prop_map(
        |(search, priority, assignee)| BoardFilter {
            search,
            priority,
            assignee,
        },
    )
}
