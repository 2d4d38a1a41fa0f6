pub mod ratesapi;

pub use ratesapi::HttpRatesProvider;
