//! Provider adapters. Alpha Vantage is the only upstream today.

pub mod alphavantage;

pub use alphavantage::{daily_series_url, normalize_daily_series, DAILY_SERIES_KEY};
