use thiserror::Error;

/// Validation and contract errors exposed by `etflens-core` domain types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol must start with an ASCII letter: '{ch}'")]
    SymbolInvalidStart { ch: char },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error(
        "invalid resolution '{value}', expected one of daily, weekly, monthly, quarterly, yearly"
    )]
    InvalidResolution { value: String },
    #[error("invalid output size '{value}', expected full or compact")]
    InvalidOutputSize { value: String },

    #[error("date must be YYYY-MM-DD: '{value}'")]
    InvalidDate { value: String },

    #[error("field '{field}' is not a parseable number")]
    UnparseableField { field: &'static str },
    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be non-negative")]
    NegativeValue { field: &'static str },

    #[error("bar high must be >= low")]
    InvalidBarRange,
    #[error("bar open/close must be within high/low range")]
    InvalidBarBounds,
}

/// Pipeline error taxonomy for the fetch/cache/normalize path.
///
/// `Network` and `HttpStatus` are retried inside [`crate::retry::RetryingFetcher`]
/// up to the configured bound; past the bound they surface to the caller as a
/// plain `Err` value, never a panic. Failures are never cached.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure: DNS, connection, timeout, body read.
    #[error("network error: {0}")]
    Network(String),

    /// Upstream answered with a non-success HTTP status.
    #[error("upstream returned status {status}")]
    HttpStatus { status: u16 },

    /// Response body did not match the expected wire shape.
    ///
    /// Distinct from an upstream that legitimately returned an empty
    /// series, which normalization reports as `Ok` with no bars.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// Missing or empty API key. Fatal at service construction.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl FetchError {
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::HttpStatus { .. })
    }
}
