use anyhow::{Context, Result};
use comfy_table::Table;

use crate::cli::ui::{self, StyleType};
use crate::client::{RatesClient, RatesOutcome};
use crate::core::RateRecord;
use crate::core::config::AppConfig;

/// Builds the table of quoted rates, one row per currency.
pub fn rates_table(record: &RateRecord) -> Table {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Currency"),
        ui::header_cell(&format!("Rate ({})", record.base)),
    ]);
    for (code, rate) in &record.rates {
        table.add_row(vec![comfy_table::Cell::new(code), ui::rate_cell(*rate)]);
    }
    table
}

pub fn display_outcome(outcome: &RatesOutcome) {
    let record = outcome.record();
    let title = format!("Rates for {} in {}", record.date, record.base);
    let source = if outcome.is_cached() {
        "(from cache)"
    } else {
        "(from service)"
    };
    println!(
        "\n{} {}",
        ui::style_text(&title, StyleType::Title),
        ui::style_text(source, StyleType::Subtle)
    );
    println!("{}", rates_table(record));
}

/// Looks up rates for `from_when` and prints them.
pub async fn run(config: &AppConfig, from_when: &str, base_currency: Option<&str>) -> Result<()> {
    let client = RatesClient::from_config(config).context("Failed to create rates client")?;

    match client.get_rates(from_when, base_currency).await {
        Ok(outcome) => {
            display_outcome(&outcome);
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", ui::style_text(&e.to_string(), StyleType::Error));
            Err(e).with_context(|| format!("Failed to get rates for {from_when}"))
        }
    }
}
