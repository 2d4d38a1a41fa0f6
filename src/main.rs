use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use ratesapi::core::log::init_logging;
use std::path::PathBuf;

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
    /// Show exchange rates for a day
    Rates {
        /// "latest" or a date as YYYY-MM-DD
        #[arg(short, long, default_value = "latest")]
        date: String,
        /// Currency to quote rates against
        #[arg(short, long)]
        base: Option<String>,
        /// Always ask the service, ignoring cached rates
        #[arg(long)]
        no_cache: bool,
        /// Cache file to use instead of the configured one
        #[arg(long)]
        cache_path: Option<PathBuf>,
    },
    /// List the accepted base currencies
    Currencies,
}

impl From<Commands> for ratesapi::AppCommand {
    fn from(cmd: Commands) -> ratesapi::AppCommand {
        match cmd {
            Commands::Rates {
                date,
                base,
                no_cache,
                cache_path,
            } => ratesapi::AppCommand::Rates {
                date,
                base,
                no_cache,
                cache_path,
            },
            Commands::Currencies => ratesapi::AppCommand::Currencies,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => ratesapi::cli::setup::setup(),
        Some(cmd) => ratesapi::run_command(cmd.into(), cli.config_path.as_deref()).await,
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
