pub mod cli;
pub mod client;
pub mod core;
pub mod providers;
pub mod store;

use crate::client::{RatesClient, RatesOutcome};
use crate::core::RatesError;
use crate::core::config::AppConfig;
use anyhow::Result;
use std::path::PathBuf;
use tracing::{debug, info};

pub use crate::core::accepted_rates;

/// Commands the binary dispatches to the library.
#[derive(Debug, Clone)]
pub enum AppCommand {
    Rates {
        /// "latest" or `YYYY-MM-DD`
        date: String,
        base: Option<String>,
        no_cache: bool,
        cache_path: Option<PathBuf>,
    },
    Currencies,
}

/// One-shot rate lookup with an explicit configuration.
pub async fn get_rates(
    config: &AppConfig,
    from_when: &str,
    base_currency: Option<&str>,
) -> Result<RatesOutcome, RatesError> {
    RatesClient::from_config(config)?
        .get_rates(from_when, base_currency)
        .await
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("ratesapi starting...");

    match command {
        AppCommand::Currencies => {
            cli::currencies::display_accepted_rates();
            Ok(())
        }
        AppCommand::Rates {
            date,
            base,
            no_cache,
            cache_path,
        } => {
            let mut config = match config_path {
                Some(path) => AppConfig::load_from_path(path)?,
                None => AppConfig::load()?,
            };
            if no_cache {
                config.cache.enabled = false;
            }
            if let Some(path) = cache_path {
                config.cache.path = path;
            }
            debug!("Loaded config: {config:#?}");

            cli::rates::run(&config, &date, base.as_deref()).await
        }
    }
}
