use crate::cli::ui::{self, StyleType};
use crate::core::currency::ACCEPTED_CURRENCIES;

/// Lines listing every accepted base currency.
pub fn accepted_rates_lines() -> Vec<String> {
    ACCEPTED_CURRENCIES
        .iter()
        .map(|code| format!("\t{code}"))
        .collect()
}

/// Prints the accepted base currencies.
pub fn display_accepted_rates() {
    println!(
        "{}",
        ui::style_text("The following rates are accepted:", StyleType::Title)
    );
    for line in accepted_rates_lines() {
        println!("{line}");
    }
}
