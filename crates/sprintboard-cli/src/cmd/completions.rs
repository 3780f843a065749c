//! `sb completions`: shell completion scripts.

use anyhow::Result;
use clap::Args;
use clap_complete::{Shell, generate};
use std::io::{self, Write};

/// Arguments for `sb completions`.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell for completion script generation.
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Generate the completion script for `args.shell` on stdout.
///
/// # Errors
///
/// Returns an error if writing to stdout fails.
pub fn run_completions(args: &CompletionsArgs, command: &mut clap::Command) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_completions(args.shell, command, &mut out)?;
    out.flush()?;
    Ok(())
}

fn write_completions(shell: Shell, command: &mut clap::Command, out: &mut dyn Write) -> io::Result<()> {
    let bin_name = command.get_name().to_string();
    generate(shell, command, bin_name, out);
    Ok(())
}
