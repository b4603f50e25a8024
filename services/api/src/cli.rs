use crate::demo::{run_dashboard, run_demo, DashboardArgs, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use rentroll::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "rentroll",
    about = "Serve and inspect the property portfolio dashboard",
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
    /// Print dashboard metrics and the portfolio report for an empty deployment
    Dashboard(DashboardArgs),
    /// Seed the demo portfolio, activate an upcoming lease, and show the metrics change
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
    /// Return empty listings instead of demo rows when a table has no records
    #[arg(long)]
    pub(crate) no_demo_listings: bool,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Dashboard(args) => run_dashboard(args),
        Command::Demo(args) => run_demo(args),
    }
}
