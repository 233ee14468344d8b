//! Canonical domain types for the etflens pipeline.
//!
//! All types validate their invariants at construction time:
//!
//! | Type | Description |
//! |------|-------------|
//! | [`DailyBar`] | One normalized daily OHLCV record |
//! | [`PeriodBar`] | One aggregated calendar bucket |
//! | [`Resolution`] | Aggregation granularity (daily..yearly) |
//! | [`OutputSize`] | Alpha Vantage `outputsize` parameter |
//! | [`Symbol`] | Validated ETF/ticker symbol |
//! | [`TradingDate`] | Calendar date, `YYYY-MM-DD` |

mod date;
mod models;
mod resolution;
mod symbol;

pub use date::TradingDate;
pub use models::{DailyBar, PeriodBar};
pub use resolution::{OutputSize, Resolution};
pub use symbol::Symbol;
