//! ETF data service: cache-fronted Alpha Vantage daily series fetches.

use std::sync::Arc;

use crate::adapters::alphavantage::{daily_series_url, normalize_daily_series};
use crate::cache::CacheStore;
use crate::domain::{DailyBar, OutputSize, Symbol};
use crate::error::FetchError;
use crate::http_client::HttpClient;
use crate::retry::{RetryConfig, RetryingFetcher};

/// Production provider host.
pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co";

/// Environment variable carrying the API key.
pub const API_KEY_ENV: &str = "ETFLENS_ALPHAVANTAGE_API_KEY";

/// Provider configuration: API key plus an overridable base URL.
#[derive(Debug, Clone)]
pub struct AlphaVantageConfig {
    api_key: String,
    base_url: String,
}

impl AlphaVantageConfig {
    /// Build a configuration from an explicit key. An empty key is a
    /// configuration error, not a deferred request failure.
    pub fn new(api_key: impl Into<String>) -> Result<Self, FetchError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(FetchError::Configuration(String::from(
                "alphavantage api key is empty",
            )));
        }

        Ok(Self {
            api_key,
            base_url: String::from(DEFAULT_BASE_URL),
        })
    }

    /// Read the API key from the process environment.
    ///
    /// A missing key fails here, at startup, rather than producing
    /// confusing malformed requests downstream.
    pub fn from_env() -> Result<Self, FetchError> {
        let api_key = std::env::var(API_KEY_ENV).map_err(|_| {
            FetchError::Configuration(format!("missing {API_KEY_ENV} in the environment"))
        })?;
        Self::new(api_key)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Serves daily series for ETF symbols, checking the cache before going
/// to the network and caching only successful payloads.
#[derive(Clone)]
pub struct EtfDataService {
    fetcher: RetryingFetcher,
    cache: CacheStore,
    config: AlphaVantageConfig,
}

impl EtfDataService {
    /// Service with the standard policy: 3 fixed-delay retries and a
    /// one-hour cache TTL.
    pub fn new(config: AlphaVantageConfig, client: Arc<dyn HttpClient>) -> Self {
        Self {
            fetcher: RetryingFetcher::new(client, RetryConfig::default()),
            cache: CacheStore::with_default_ttl(),
            config,
        }
    }

    pub fn with_retry_config(mut self, retry: RetryConfig) -> Self {
        self.fetcher = RetryingFetcher::new(self.fetcher.client(), retry);
        self
    }

    pub fn with_cache(mut self, cache: CacheStore) -> Self {
        self.cache = cache;
        self
    }

    fn cache_key(symbol: &Symbol, output_size: OutputSize) -> String {
        format!("{}-{}", symbol.as_str(), output_size.as_str())
    }

    /// Raw daily series payload for `symbol`.
    ///
    /// A cache hit returns immediately with no network call or retries.
    /// On a miss the retrying fetcher is consulted, and only a successful
    /// payload is stored; failures are always retried fresh on the next
    /// call.
    pub async fn fetch_series(
        &self,
        symbol: &Symbol,
        output_size: OutputSize,
    ) -> Result<String, FetchError> {
        let key = Self::cache_key(symbol, output_size);

        if let Some(body) = self.cache.get(&key).await {
            tracing::debug!(symbol = %symbol, key = %key, "serving daily series from cache");
            return Ok(body);
        }

        tracing::debug!(symbol = %symbol, key = %key, "cache miss, fetching daily series");
        let url = daily_series_url(
            &self.config.base_url,
            symbol,
            output_size,
            &self.config.api_key,
        );

        let body = self.fetcher.fetch(&url).await?;
        self.cache.put(key, body.clone()).await;
        Ok(body)
    }

    /// Typed convenience: fetch and normalize in one step.
    pub async fn fetch_daily_bars(
        &self,
        symbol: &Symbol,
        output_size: OutputSize,
    ) -> Result<Vec<DailyBar>, FetchError> {
        let body = self.fetch_series(symbol, output_size).await?;
        normalize_daily_series(&body)
    }
}
