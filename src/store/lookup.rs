use chrono::NaiveDate;
use tracing::{debug, warn};

use super::json_file::CacheContents;
use crate::core::{RateDate, RateRecord};

/// The identity of a cached record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKey {
    pub date: String,
    pub base: String,
}

impl CacheKey {
    /// `Latest` resolves to `today`.
    pub fn resolve(when: &RateDate, base: &str, today: NaiveDate) -> Self {
        Self {
            date: when.resolve(today),
            base: base.to_string(),
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum Lookup<'a> {
    Hit(&'a RateRecord),
    Miss,
}

#[cfg(test)]
impl Lookup<'_> {
    fn is_hit(&self) -> bool {
        matches!(self, Lookup::Hit(_))
    }
}

/// Finds the first record stored under `key`.
///
/// Contents with unreadable entries never produce a hit, so the caller
/// re-fetches and rewrites the file.
pub fn lookup<'a>(contents: &'a CacheContents, key: &CacheKey) -> Lookup<'a> {
    if contents.anomalies > 0 {
        warn!(
            date = %key.date,
            anomalies = contents.anomalies,
            "Unreadable entries in rates cache, forcing a refetch"
        );
        return Lookup::Miss;
    }

    match contents
        .records
        .iter()
        .find(|record| record.matches(&key.date, &key.base))
    {
        Some(record) => {
            debug!(date = %key.date, base = %key.base, "Cache HIT");
            Lookup::Hit(record)
        }
        None => {
            debug!(date = %key.date, base = %key.base, "Cache MISS");
            Lookup::Miss
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn record(date: &str, base: &str) -> RateRecord {
        RateRecord::new(date, base, BTreeMap::from([("GBP".to_string(), 0.86)]))
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 4, 15).unwrap()
    }

    #[test]
    fn test_empty_cache_misses() {
        let contents = CacheContents::default();
        for when in ["latest", "2021-04-13", "2000-01-01"] {
            let key = CacheKey::resolve(&when.parse().unwrap(), "EUR", today());
            assert_eq!(lookup(&contents, &key), Lookup::Miss);
        }
    }

    #[test]
    fn test_hit_by_date_and_base() {
        let contents = CacheContents {
            records: vec![record("2021-04-13", "EUR"), record("2021-04-13", "USD")],
            anomalies: 0,
        };
        let on: RateDate = "2021-04-13".parse().unwrap();

        match lookup(&contents, &CacheKey::resolve(&on, "USD", today())) {
            Lookup::Hit(found) => assert_eq!(found.base, "USD"),
            Lookup::Miss => panic!("Expected a cache hit"),
        }
        assert!(!lookup(&contents, &CacheKey::resolve(&on, "GBP", today())).is_hit());
    }

    #[test]
    fn test_latest_hits_only_for_today() {
        let stale = CacheContents {
            records: vec![record("2021-04-14", "EUR")],
            anomalies: 0,
        };
        let key = CacheKey::resolve(&RateDate::Latest, "EUR", today());
        assert!(!lookup(&stale, &key).is_hit());

        let fresh = CacheContents {
            records: vec![record("2021-04-14", "EUR"), record("2021-04-15", "EUR")],
            anomalies: 0,
        };
        assert_eq!(
            lookup(&fresh, &key),
            Lookup::Hit(&record("2021-04-15", "EUR"))
        );
    }

    #[test]
    fn test_anomalies_force_miss() {
        let contents = CacheContents {
            records: vec![record("2021-04-13", "EUR")],
            anomalies: 1,
        };
        let key = CacheKey::resolve(&"2021-04-13".parse().unwrap(), "EUR", today());
        assert_eq!(lookup(&contents, &key), Lookup::Miss);
    }
}
