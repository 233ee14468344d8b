//! Alpha Vantage `TIME_SERIES_DAILY` wire format and normalization.
//!
//! The upstream payload is a JSON object whose `"Time Series (Daily)"` key
//! maps `YYYY-MM-DD` date strings to objects with string-encoded OHLCV
//! fields (`"1. open"` .. `"5. volume"`). Normalization turns that nested
//! shape into an ordered `Vec<DailyBar>`.
//!
//! Malformed-record policy: a record whose date or numeric fields fail to
//! parse (or whose OHLC bounds are inconsistent) is skipped with a warning
//! and normalization continues. Silent NaN propagation into aggregation is
//! never possible because [`DailyBar::new`] rejects non-finite values.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::domain::{DailyBar, OutputSize, Symbol, TradingDate};
use crate::error::{FetchError, ValidationError};

/// Top-level key carrying the daily series.
pub const DAILY_SERIES_KEY: &str = "Time Series (Daily)";

#[derive(Debug, Deserialize)]
struct DailySeriesResponse {
    // BTreeMap keyed by the zero-padded date string keeps iteration
    // date-ascending with unique dates, which is exactly the series
    // invariant the normalizer must guarantee.
    #[serde(rename = "Time Series (Daily)")]
    series: Option<BTreeMap<String, RawDailyEntry>>,
}

#[derive(Debug, Deserialize)]
struct RawDailyEntry {
    #[serde(rename = "1. open")]
    open: String,
    #[serde(rename = "2. high")]
    high: String,
    #[serde(rename = "3. low")]
    low: String,
    #[serde(rename = "4. close")]
    close: String,
    #[serde(rename = "5. volume")]
    volume: String,
}

/// Build the provider query URL for a daily series request.
///
/// The API key rides as a query parameter; callers must take care not to
/// log the resulting URL.
pub fn daily_series_url(
    base_url: &str,
    symbol: &Symbol,
    output_size: OutputSize,
    api_key: &str,
) -> String {
    format!(
        "{base_url}/query?function=TIME_SERIES_DAILY&symbol={}&outputsize={}&apikey={}",
        urlencoding::encode(symbol.as_str()),
        output_size.as_str(),
        api_key
    )
}

/// Convert a raw provider payload into a date-ascending daily series.
///
/// - A body that is not valid JSON is a [`FetchError::MalformedPayload`].
/// - A parseable body without the series key, or with an empty series,
///   yields an empty vec: upstream legitimately returned no data.
/// - Individual malformed records are skipped with a warning.
pub fn normalize_daily_series(body: &str) -> Result<Vec<DailyBar>, FetchError> {
    let response: DailySeriesResponse = serde_json::from_str(body).map_err(|e| {
        FetchError::MalformedPayload(format!("daily series payload did not parse: {e}"))
    })?;

    let Some(series) = response.series else {
        tracing::warn!(
            key = DAILY_SERIES_KEY,
            "payload carries no daily series key, treating as empty series"
        );
        return Ok(Vec::new());
    };

    let mut bars = Vec::with_capacity(series.len());
    for (date, entry) in &series {
        match parse_daily_entry(date, entry) {
            Ok(bar) => bars.push(bar),
            Err(error) => {
                tracing::warn!(date = %date, %error, "skipping malformed daily record");
            }
        }
    }

    Ok(bars)
}

fn parse_daily_entry(date: &str, entry: &RawDailyEntry) -> Result<DailyBar, ValidationError> {
    let date = TradingDate::parse(date)?;
    let open = parse_price("open", &entry.open)?;
    let high = parse_price("high", &entry.high)?;
    let low = parse_price("low", &entry.low)?;
    let close = parse_price("close", &entry.close)?;
    let volume = entry
        .volume
        .trim()
        .parse::<u64>()
        .map_err(|_| ValidationError::UnparseableField { field: "volume" })?;

    DailyBar::new(date, open, high, low, close, volume)
}

fn parse_price(field: &'static str, raw: &str) -> Result<f64, ValidationError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| ValidationError::UnparseableField { field })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_DAY_PAYLOAD: &str = r#"{
        "Meta Data": {"2. Symbol": "GLD"},
        "Time Series (Daily)": {
            "2024-01-03": {
                "1. open": "11", "2. high": "13", "3. low": "10",
                "4. close": "12.5", "5. volume": "2000"
            },
            "2024-01-02": {
                "1. open": "10", "2. high": "12", "3. low": "9",
                "4. close": "11", "5. volume": "1000"
            }
        }
    }"#;

    #[test]
    fn normalizes_and_sorts_ascending_by_date() {
        let bars = normalize_daily_series(TWO_DAY_PAYLOAD).expect("must normalize");

        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].date.format_iso(), "2024-01-02");
        assert_eq!(bars[0].close, 11.0);
        assert_eq!(bars[0].volume, 1_000);
        assert_eq!(bars[1].date.format_iso(), "2024-01-03");
        assert_eq!(bars[1].close, 12.5);
        assert_eq!(bars[1].volume, 2_000);
    }

    #[test]
    fn missing_series_key_yields_empty_series() {
        let bars = normalize_daily_series(r#"{"Meta Data": {}}"#).expect("must normalize");
        assert!(bars.is_empty());
    }

    #[test]
    fn empty_series_object_yields_empty_series() {
        let bars = normalize_daily_series(r#"{"Time Series (Daily)": {}}"#)
            .expect("must normalize");
        assert!(bars.is_empty());
    }

    #[test]
    fn unparseable_body_is_a_malformed_payload_error() {
        let error = normalize_daily_series("<html>rate limited</html>").expect_err("must fail");
        assert!(matches!(error, FetchError::MalformedPayload(_)));
    }

    #[test]
    fn malformed_record_is_skipped_and_the_rest_survive() {
        let payload = r#"{
            "Time Series (Daily)": {
                "2024-01-02": {
                    "1. open": "10", "2. high": "12", "3. low": "9",
                    "4. close": "11", "5. volume": "1000"
                },
                "2024-01-03": {
                    "1. open": "not-a-number", "2. high": "13", "3. low": "10",
                    "4. close": "12.5", "5. volume": "2000"
                }
            }
        }"#;

        let bars = normalize_daily_series(payload).expect("must normalize");
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].date.format_iso(), "2024-01-02");
    }

    #[test]
    fn nan_field_never_reaches_the_series() {
        let payload = r#"{
            "Time Series (Daily)": {
                "2024-01-02": {
                    "1. open": "NaN", "2. high": "12", "3. low": "9",
                    "4. close": "11", "5. volume": "1000"
                }
            }
        }"#;

        let bars = normalize_daily_series(payload).expect("must normalize");
        assert!(bars.is_empty());
    }

    #[test]
    fn builds_query_url_with_symbol_size_and_key() {
        let symbol = Symbol::parse("GLD").expect("valid");
        let url = daily_series_url(
            "https://www.alphavantage.co",
            &symbol,
            OutputSize::Compact,
            "SECRET",
        );

        assert_eq!(
            url,
            "https://www.alphavantage.co/query?function=TIME_SERIES_DAILY&symbol=GLD&outputsize=compact&apikey=SECRET"
        );
    }
}
