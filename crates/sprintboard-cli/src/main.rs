#![forbid(unsafe_code)]

mod cmd;
mod output;

use clap::{CommandFactory, Parser, Subcommand};
use cmd::Session;
use output::{CliError, OutputMode, render_error};
use sprintboard_core::config::Overrides;
use std::env;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    name = "sb",
    author,
    version,
    about = "sprintboard: sprint board from the terminal",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Base URL of the issue API (overrides config and SPRINTBOARD_API_URL).
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,

    /// Project whose active sprint is shown (overrides config and SPRINTBOARD_PROJECT).
    #[arg(long, global = true, value_name = "ID")]
    project: Option<String>,

    /// Use this sprint instead of the project's active one.
    #[arg(long, global = true, value_name = "ID")]
    sprint: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    const fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        }
    }

    fn overrides(&self) -> Overrides {
        Overrides {
            api_url: self.api_url.clone(),
            project_id: self.project.clone(),
            sprint_id: self.sprint.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Show the sprint board",
        long_about = "Show the active sprint's issues grouped into TODO, IN_PROGRESS, IN_REVIEW and DONE lanes.",
        after_help = "EXAMPLES:\n    # Whole board\n    sb board\n\n    # High-priority work for one person\n    sb board --priority high --assignee ana\n\n    # Unassigned issues mentioning login\n    sb board --search login --assignee unassigned --json"
    )]
    Board(cmd::board::BoardArgs),

    #[command(
        about = "Move an issue to another lane",
        long_about = "Move an issue to another lane. The change is applied locally first and rolled back if the server rejects it.",
        after_help = "EXAMPLES:\n    # Move to a lane\n    sb move PROJ-12 --lane done\n\n    # Drop onto another card's lane\n    sb move PROJ-12 --onto PROJ-40"
    )]
    Move(cmd::move_cmd::MoveArgs),

    #[command(about = "Show sprint progress by lane")]
    Summary,

    #[command(about = "List assignee filter values for the sprint")]
    Assignees,

    #[command(
        about = "Generate shell completion scripts",
        after_help = "EXAMPLES:\n    # Generate bash completions\n    sb completions bash"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("SPRINTBOARD_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "sprintboard=debug,sb=debug,info"
        } else {
            "sprintboard=info,sb=info,warn"
        })
    });

    let format = env::var("SPRINTBOARD_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let output = cli.output_mode();
    if let Commands::Completions(args) = &cli.command {
        return cmd::completions::run_completions(args, &mut Cli::command());
    }

    let project_root = env::current_dir()?;
    let session = Session::open(&project_root, &cli.overrides())?;

    match &cli.command {
        Commands::Board(args) => cmd::board::run_board(args, &session, output),
        Commands::Move(args) => cmd::move_cmd::run_move(args, &session, output),
        Commands::Summary => cmd::summary::run_summary(&session, output),
        Commands::Assignees => cmd::assignees::run_assignees(&session, output),
        Commands::Completions(_) => Ok(()),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    if cli.verbose {
        info!("Verbose mode enabled");
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            debug!(error = ?err, "command failed");
            let cli_error = match cmd::error_code(&err) {
                Some(code) => CliError::from_code(format!("{err:#}"), code),
                None => CliError::new(format!("{err:#}")),
            };
            if let Err(render_err) = render_error(cli.output_mode(), &cli_error) {
                eprintln!("error: {err:#} ({render_err})");
            }
            ExitCode::FAILURE
        }
    }
}
