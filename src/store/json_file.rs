//! The on-disk JSON cache of fetched rate records.

use serde::Serialize;
use serde_json::Value;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::core::{RateRecord, RatesError};

/// Appends `.json` when missing and anchors relative paths at the working directory.
pub fn normalize_cache_path(path: &Path) -> Result<PathBuf, RatesError> {
    let has_json_suffix = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let path = if has_json_suffix {
        path.to_path_buf()
    } else {
        let mut with_suffix = path.as_os_str().to_owned();
        with_suffix.push(".json");
        PathBuf::from(with_suffix)
    };

    if path.is_absolute() {
        return Ok(path);
    }
    let cwd = std::env::current_dir().map_err(|e| RatesError::io(&path, e))?;
    Ok(cwd.join(path))
}

/// Records read from the cache, plus a count of entries that could not be read.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CacheContents {
    pub records: Vec<RateRecord>,
    /// Entries missing required fields, or a top-level shape that is neither
    /// a list nor an object.
    pub anomalies: usize,
}

impl CacheContents {
    fn from_value(value: Value) -> Self {
        if is_falsy(&value) {
            warn!("Invalid contents - resetting rates cache");
            return Self::default();
        }

        let entries = match value {
            Value::Array(items) => items,
            // Older caches may hold a single bare record
            Value::Object(map) => vec![Value::Object(map)],
            other => {
                warn!(contents = %other, "Unrecognized rates cache format");
                return Self {
                    records: Vec::new(),
                    anomalies: 1,
                };
            }
        };

        let total = entries.len();
        let records: Vec<RateRecord> = entries.into_iter().filter_map(record_from_value).collect();
        Self {
            anomalies: total - records.len(),
            records,
        }
    }

    /// Replaces the record with the same date and base, or appends it.
    pub fn upsert(&mut self, record: RateRecord) {
        match self
            .records
            .iter_mut()
            .find(|existing| existing.matches(&record.date, &record.base))
        {
            Some(existing) => {
                debug!(date = %record.date, base = %record.base, "Replacing cached record");
                *existing = record;
            }
            None => self.records.push(record),
        }
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

fn record_from_value(value: Value) -> Option<RateRecord> {
    match serde_json::from_value(value) {
        Ok(record) => Some(record),
        Err(e) => {
            warn!(error = %e, "Unreadable record in rates cache");
            None
        }
    }
}

/// Handle on the cache file at a normalized, absolute path.
#[derive(Debug, Clone)]
pub struct CacheFile {
    path: PathBuf,
}

impl CacheFile {
    pub fn new(path: &Path) -> Result<Self, RatesError> {
        Ok(Self {
            path: normalize_cache_path(path)?,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the cache, creating an empty file when none exists.
    pub fn load(&self) -> Result<CacheContents, RatesError> {
        if !self.path.exists() {
            if let Some(parent) = self.path.parent() {
                fs::create_dir_all(parent).map_err(|e| RatesError::io(parent, e))?;
            }
            fs::File::create(&self.path).map_err(|e| RatesError::io(&self.path, e))?;
            debug!(path = %self.path.display(), "Created empty rates cache");
            return Ok(CacheContents::default());
        }

        let bytes = fs::read(&self.path).map_err(|e| RatesError::io(&self.path, e))?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            fs::remove_file(&self.path).map_err(|e| RatesError::io(&self.path, e))?;
            debug!(path = %self.path.display(), "Removed blank rates cache");
            return Ok(CacheContents::default());
        }

        let value: Value =
            serde_json::from_slice(&bytes).map_err(|source| RatesError::CacheCorrupt {
                path: self.path.clone(),
                source,
            })?;
        let contents = CacheContents::from_value(value);
        debug!(
            path = %self.path.display(),
            records = contents.records.len(),
            anomalies = contents.anomalies,
            "Loaded rates cache"
        );
        Ok(contents)
    }

    /// Overwrites the file with `records` as a JSON array.
    pub fn persist(&self, records: &[RateRecord]) -> Result<(), RatesError> {
        let mut buf = Vec::new();
        let mut ser =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        records
            .serialize(&mut ser)
            .map_err(|e| RatesError::io(&self.path, e.into()))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| RatesError::io(parent, e))?;
        }
        fs::write(&self.path, buf).map_err(|e| RatesError::io(&self.path, e))?;
        debug!(path = %self.path.display(), records = records.len(), "Persisted rates cache");
        Ok(())
    }
}
