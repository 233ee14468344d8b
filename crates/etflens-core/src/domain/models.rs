use serde::{Deserialize, Serialize};

use crate::{TradingDate, ValidationError};

/// Canonical daily OHLCV record produced by normalization.
///
/// Instances are immutable once constructed; within a normalized series,
/// dates are strictly increasing and unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyBar {
    pub date: TradingDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl DailyBar {
    pub fn new(
        date: TradingDate,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: u64,
    ) -> Result<Self, ValidationError> {
        validate_non_negative("open", open)?;
        validate_non_negative("high", high)?;
        validate_non_negative("low", low)?;
        validate_non_negative("close", close)?;

        if high < low {
            return Err(ValidationError::InvalidBarRange);
        }

        if open < low || open > high || close < low || close > high {
            return Err(ValidationError::InvalidBarBounds);
        }

        Ok(Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        })
    }
}

/// One aggregated calendar bucket of a daily series.
///
/// `period_key` identifies the bucket (`2024-W05`, `2024-01`, `2024-Q1`,
/// `2024`, or the plain date for daily); keys sort lexicographically into
/// chronological order. `representative_date` is the date of the member
/// that produced the final close, used for chart x-positioning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodBar {
    pub period_key: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
    pub member_count: usize,
    pub representative_date: TradingDate,
}

impl PeriodBar {
    /// Single-member bucket carrying a daily bar through unchanged.
    pub fn from_daily(bar: &DailyBar) -> Self {
        Self {
            period_key: bar.date.format_iso(),
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            volume: bar.volume,
            member_count: 1,
            representative_date: bar.date,
        }
    }
}

fn validate_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(input: &str) -> TradingDate {
        TradingDate::parse(input).expect("valid date")
    }

    #[test]
    fn builds_valid_daily_bar() {
        let bar = DailyBar::new(date("2024-01-02"), 10.0, 12.0, 9.0, 11.0, 1_000)
            .expect("must construct");
        assert_eq!(bar.volume, 1_000);
    }

    #[test]
    fn rejects_high_below_low() {
        let err = DailyBar::new(date("2024-01-02"), 10.0, 9.0, 12.0, 11.0, 1_000)
            .expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidBarRange));
    }

    #[test]
    fn rejects_close_outside_range() {
        let err = DailyBar::new(date("2024-01-02"), 10.0, 12.0, 9.0, 12.5, 1_000)
            .expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidBarBounds));
    }

    #[test]
    fn rejects_non_finite_price() {
        let err = DailyBar::new(date("2024-01-02"), f64::NAN, 12.0, 9.0, 11.0, 1_000)
            .expect_err("must fail");
        assert!(matches!(
            err,
            ValidationError::NonFiniteValue { field: "open" }
        ));
    }

    #[test]
    fn daily_period_bar_mirrors_the_bar() {
        let bar = DailyBar::new(date("2024-01-02"), 10.0, 12.0, 9.0, 11.0, 1_000)
            .expect("must construct");
        let period = PeriodBar::from_daily(&bar);

        assert_eq!(period.period_key, "2024-01-02");
        assert_eq!(period.member_count, 1);
        assert_eq!(period.representative_date, bar.date);
        assert_eq!(period.close, bar.close);
        assert_eq!(period.volume, bar.volume);
    }
}
