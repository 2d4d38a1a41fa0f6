use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// One day's reference rates as returned by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateRecord {
    /// `YYYY-MM-DD`
    pub date: String,
    pub base: String,
    pub rates: BTreeMap<String, f64>,
    /// Any other fields from the response, kept so the cache reproduces it.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RateRecord {
    pub fn new(date: &str, base: &str, rates: BTreeMap<String, f64>) -> Self {
        Self {
            date: date.to_string(),
            base: base.to_string(),
            rates,
            extra: Map::new(),
        }
    }

    pub fn rate(&self, code: &str) -> Option<f64> {
        self.rates.get(code).copied()
    }

    pub(crate) fn matches(&self, date: &str, base: &str) -> bool {
        self.date == date && self.base == base
    }
}
