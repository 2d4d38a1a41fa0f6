//! Command handlers and terminal rendering for the binary

pub mod currencies;
pub mod rates;
pub mod setup;
pub mod ui;
