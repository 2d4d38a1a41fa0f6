pub mod json_file;
pub mod lookup;

pub use json_file::{CacheContents, CacheFile, normalize_cache_path};
pub use lookup::{CacheKey, Lookup, lookup};
