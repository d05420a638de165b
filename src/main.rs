use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use dashfolio::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display holdings with profit/loss and portfolio totals
    Summary {
        /// Print the portfolio as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Look up display names for ticker symbols
    Names {
        #[arg(required = true)]
        symbols: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => dashfolio::cli::setup::setup(),
        Some(Commands::Summary { json }) => {
            dashfolio::run_command(
                dashfolio::AppCommand::Summary { json },
                cli.config_path.as_deref(),
            )
            .await
        }
        Some(Commands::Names { symbols }) => {
            dashfolio::run_command(
                dashfolio::AppCommand::Names { symbols },
                cli.config_path.as_deref(),
            )
            .await
        }
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
