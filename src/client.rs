//! Cache-then-fetch orchestration of rate requests.

use std::path::Path;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::core::config::{AppConfig, DEFAULT_BASE_CURRENCY};
use crate::core::{
    Clock, Currency, LocalClock, RateDate, RateRecord, RatesError, RatesProvider, RatesRequest,
};
use crate::providers::HttpRatesProvider;
use crate::store::{CacheFile, CacheKey, Lookup, lookup};

/// A successful rate lookup, tagged with where the record came from.
#[derive(Debug, Clone, PartialEq)]
pub enum RatesOutcome {
    Cached(RateRecord),
    Fetched(RateRecord),
}

impl RatesOutcome {
    pub fn record(&self) -> &RateRecord {
        match self {
            RatesOutcome::Cached(record) | RatesOutcome::Fetched(record) => record,
        }
    }

    pub fn into_record(self) -> RateRecord {
        match self {
            RatesOutcome::Cached(record) | RatesOutcome::Fetched(record) => record,
        }
    }

    pub fn is_cached(&self) -> bool {
        matches!(self, RatesOutcome::Cached(_))
    }
}

pub struct RatesClient<P: RatesProvider = HttpRatesProvider> {
    provider: P,
    cache: CacheFile,
    use_cache: bool,
    base_url: String,
    clock: Box<dyn Clock>,
    // Serializes the load, update and persist cycle on the cache file
    write_lock: Mutex<()>,
}

impl RatesClient<HttpRatesProvider> {
    pub fn from_config(config: &AppConfig) -> Result<Self, RatesError> {
        let provider = HttpRatesProvider::new(&config.provider)?;
        Self::new(provider, config)
    }
}

impl<P: RatesProvider> RatesClient<P> {
    pub fn new(provider: P, config: &AppConfig) -> Result<Self, RatesError> {
        Ok(Self {
            provider,
            cache: CacheFile::new(&config.cache.path)?,
            use_cache: config.cache.enabled,
            base_url: config.provider.base_url.clone(),
            clock: Box::new(LocalClock),
            write_lock: Mutex::new(()),
        })
    }

    /// Replaces the clock used to resolve "latest".
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn cache_path(&self) -> &Path {
        self.cache.path()
    }

    /// Returns the rates for `from_when` ("latest" or `YYYY-MM-DD`), from the
    /// cache file when it already holds them and from the service otherwise.
    #[instrument(skip(self))]
    pub async fn get_rates(
        &self,
        from_when: &str,
        base_currency: Option<&str>,
    ) -> Result<RatesOutcome, RatesError> {
        let _guard = self.write_lock.lock().await;

        let mut contents = self.cache.load()?;

        let request = RatesRequest::parse(from_when, base_currency).inspect_err(|e| {
            warn!(error = %e, "Invalid rates request");
        })?;
        // Without a base the service quotes against its own default
        let base = request
            .base
            .as_ref()
            .map_or(DEFAULT_BASE_CURRENCY, Currency::code);

        if self.use_cache {
            let key = CacheKey::resolve(&request.when, base, self.clock.today());
            if let Lookup::Hit(record) = lookup(&contents, &key) {
                return Ok(RatesOutcome::Cached(record.clone()));
            }
        } else {
            debug!("Cache lookup disabled");
        }

        let url = request.url(&self.base_url);
        match request.when {
            RateDate::Latest => info!("Getting latest rates data from API in {base}..."),
            RateDate::On(_) => info!("Getting rates data for {from_when} in {base}..."),
        }

        let record = self.provider.fetch_rates(&url).await?;

        if contents.anomalies > 0 {
            warn!(
                dropped = contents.anomalies,
                "Dropping unreadable entries from rates cache"
            );
        }
        contents.upsert(record.clone());
        self.cache.persist(&contents.records)?;
        info!("Rates data retrieved and cached! ({from_when})");

        Ok(RatesOutcome::Fetched(record))
    }
}
