use crate::demo::{run_demo, run_members, run_process, DemoArgs, MembersArgs, ProcessArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use medicaid_assist::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Medicaid Assist",
    about = "Run the Medicaid member workflow from the command line or as an HTTP service",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Run the workflow for one stored member and print the result
    Process(ProcessArgs),
    /// List stored members, optionally filtered by eligibility status
    Members(MembersArgs),
    /// Process every sample scenario and render the final state of each
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Stop a run at the first failing step instead of continuing
    #[arg(long)]
    pub(crate) halt_on_error: bool,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Process(args) => run_process(args),
        Command::Members(args) => run_members(args),
        Command::Demo(args) => run_demo(args),
    }
}
