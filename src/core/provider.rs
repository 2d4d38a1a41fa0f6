//! Remote rates abstraction

use async_trait::async_trait;

use super::error::RatesError;
use super::record::RateRecord;

#[async_trait]
pub trait RatesProvider: Send + Sync {
    /// Fetches and decodes the record served at `url`.
    async fn fetch_rates(&self, url: &str) -> Result<RateRecord, RatesError>;
}
