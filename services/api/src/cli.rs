use crate::server;
use crate::submit::{run_catalog, run_submit, SubmitArgs};
use clap::{Args, Parser, Subcommand};
use place_preference::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Place Preference",
    about = "Capture employee place preferences and serve the submission endpoints",
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
    /// Print the domestic and foreign option-set tables
    Catalog,
    /// Look up an employee, apply selections and submit them
    Submit(SubmitArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Catalog => {
            run_catalog();
            Ok(())
        }
        Command::Submit(args) => run_submit(args).await,
    }
}
