//! Currency codes accepted as a base currency by the rates service

use std::collections::BTreeSet;
use std::fmt::Display;
use std::str::FromStr;

use super::error::InvalidInput;

/// Codes the service accepts for the `base` query parameter, as at 2021-04-15.
pub const ACCEPTED_CURRENCIES: [&str; 33] = [
    "EUR", "GBP", "HKD", "IDR", "ILS", "DKK", "INR", "CHF", "MXN", "CZK", "SGD", "THB", "HRK",
    "MYR", "NOK", "CNY", "BGN", "PHP", "SEK", "PLN", "ZAR", "CAD", "ISK", "BRL", "RON", "NZD",
    "TRY", "JPY", "RUB", "KRW", "USD", "HUF", "AUD",
];

/// Returns the set of accepted base currency codes.
pub fn accepted_rates() -> BTreeSet<&'static str> {
    ACCEPTED_CURRENCIES.iter().copied().collect()
}

/// A base currency code that passed the allow-list check.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Currency(&'static str);

impl Currency {
    pub fn code(&self) -> &'static str {
        self.0
    }
}

impl Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

impl FromStr for Currency {
    type Err = InvalidInput;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ACCEPTED_CURRENCIES
            .iter()
            .copied()
            .find(|code| *code == s)
            .map(Currency)
            .ok_or_else(|| InvalidInput::UnsupportedCurrency(s.to_string()))
    }
}
