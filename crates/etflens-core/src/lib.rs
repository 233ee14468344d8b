//! # etflens-core
//!
//! Data acquisition, caching, retry, and temporal aggregation pipeline for
//! daily ETF price series.
//!
//! ## Overview
//!
//! The crate fetches `TIME_SERIES_DAILY` payloads from Alpha Vantage,
//! caches them in memory with a one-hour TTL, retries transient failures
//! with a bounded fixed-delay policy, normalizes the raw nested payload
//! into a canonical daily OHLCV series, and rolls that series up into
//! weekly/monthly/quarterly/yearly calendar buckets for charting.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Alpha Vantage wire format, URL building, normalization |
//! | [`aggregate`] | Calendar-period roll-up of a daily series |
//! | [`cache`] | In-memory TTL response cache |
//! | [`domain`] | Canonical domain types (bars, resolutions, symbols) |
//! | [`error`] | Validation and pipeline error types |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`retry`] | Bounded retry with injectable backoff |
//! | [`service`] | Cache-fronted ETF data service |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use etflens_core::{
//!     aggregate, AlphaVantageConfig, EtfDataService, OutputSize,
//!     ReqwestHttpClient, Resolution, Symbol,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AlphaVantageConfig::from_env()?;
//!     let service = EtfDataService::new(config, Arc::new(ReqwestHttpClient::new()));
//!
//!     let symbol = Symbol::parse("GLD")?;
//!     let bars = service.fetch_daily_bars(&symbol, OutputSize::Full).await?;
//!     let monthly = aggregate(&bars, Resolution::Monthly);
//!
//!     for period in &monthly {
//!         println!("{}: close {:.2}", period.period_key, period.close);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Control flow
//!
//! ```text
//! ┌──────────────────┐
//! │ Caller (CLI/UI)  │
//! └────────┬─────────┘
//!          │ fetch_series / fetch_daily_bars
//!          ▼
//! ┌──────────────────┐ hit  ┌──────────────────┐
//! │ EtfDataService   │─────▶│ CacheStore (TTL) │
//! └────────┬─────────┘      └──────────────────┘
//!          │ miss
//!          ▼
//! ┌──────────────────┐      ┌──────────────────┐
//! │ RetryingFetcher  │─────▶│ HttpClient       │
//! └────────┬─────────┘      │ (reqwest/mock)   │
//!          │                └──────────────────┘
//!          ▼
//! ┌──────────────────┐      ┌──────────────────┐
//! │ Normalizer       │─────▶│ aggregate()      │
//! │ (Vec<DailyBar>)  │      │ (Vec<PeriodBar>) │
//! └──────────────────┘      └──────────────────┘
//! ```
//!
//! ## Error handling
//!
//! The service boundary is result-based: transport failures and
//! non-success statuses are retried inside the fetcher and surface as
//! [`FetchError`] values once the bound is exhausted, never as panics.
//! Domain construction returns [`ValidationError`].
//!
//! ## Security
//!
//! The API key is read from the environment and rides the query string;
//! request targets are therefore never logged.

pub mod adapters;
pub mod aggregate;
pub mod cache;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod retry;
pub mod service;

// Re-export commonly used types at the crate root.

pub use adapters::{daily_series_url, normalize_daily_series};

pub use aggregate::{aggregate, period_key};

pub use cache::{CacheStore, DEFAULT_TTL};

pub use domain::{DailyBar, OutputSize, PeriodBar, Resolution, Symbol, TradingDate};

pub use error::{FetchError, ValidationError};

pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};

pub use retry::{Backoff, RetryConfig, RetryingFetcher};

pub use service::{AlphaVantageConfig, EtfDataService, API_KEY_ENV, DEFAULT_BASE_URL};
