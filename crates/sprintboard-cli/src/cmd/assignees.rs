//! `sb assignees`: values accepted by `--assignee`.

use super::Session;
use crate::output::{OutputMode, render};

pub fn run_assignees(session: &Session, output: OutputMode) -> anyhow::Result<()> {
    let (board, _sprint_id) = session.load_board()?;
    let options = board.assignee_options();
    render(output, &options, |opts, w| {
        writeln!(w, "unassigned")?;
        for id in opts {
            writeln!(w, "{id}")?;
        }
        Ok(())
    })
}
