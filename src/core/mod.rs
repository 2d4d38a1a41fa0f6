//! Core types and abstractions

pub mod clock;
pub mod config;
pub mod currency;
pub mod error;
pub mod log;
pub mod provider;
pub mod record;
pub mod request;

// Re-export main types for cleaner imports
pub use clock::{Clock, FixedClock, LocalClock};
pub use currency::{Currency, accepted_rates};
pub use error::{InvalidInput, RatesError};
pub use provider::RatesProvider;
pub use record::RateRecord;
pub use request::{RateDate, RatesRequest, build_url};
