use crate::flow::{run_evaluate, run_fill, run_flatten, run_resolve, FillArgs};
use apply_assist::error::AppError;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "apply-assist",
    about = "Screen job postings and fill application forms from a personal profile",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decide whether a posting is worth applying to and print the verdict
    Evaluate(EvaluateArgs),
    /// Print the canonical profile key a control's signal text resolves to
    Resolve {
        /// Label, name, placeholder or other identifying text of the control
        signal: String,
    },
    /// Screen the posting, fill the form fixture, then ask before submitting
    Fill(FillArgs),
    /// Print the flattened profile
    Flatten(ProfileArgs),
}

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Plain-text dump of the posting page
    #[arg(long)]
    pub(crate) page: PathBuf,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ProfileArgs {
    /// Profile JSON; overrides ASSIST_PROFILE_PATH
    #[arg(long)]
    pub(crate) profile: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Evaluate(args) => run_evaluate(args),
        Command::Resolve { signal } => run_resolve(&signal),
        Command::Fill(args) => run_fill(args).await,
        Command::Flatten(args) => run_flatten(args),
    }
}
