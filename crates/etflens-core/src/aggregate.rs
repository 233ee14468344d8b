//! Calendar-period roll-up of a daily series.
//!
//! Grouping is an explicit map from period key to accumulator; output
//! ordering is the map's lexicographic key order, which is chronological
//! for every key shape this module emits (weekly ISO week numbers are
//! zero-padded to two digits precisely so that holds across year
//! boundaries).

use std::collections::BTreeMap;

use crate::domain::{DailyBar, PeriodBar, Resolution, TradingDate};

/// Roll a date-ascending daily series up into `resolution` buckets.
///
/// Bucket membership partitions the input: every bar lands in exactly one
/// `PeriodBar`, so volume is conserved across the roll-up. Members fold in
/// input order: open comes from the first member, close and
/// `representative_date` from the last, high/low are the extremes, volume
/// the sum. `Resolution::Daily` carries each bar through unchanged.
pub fn aggregate(bars: &[DailyBar], resolution: Resolution) -> Vec<PeriodBar> {
    if bars.is_empty() {
        return Vec::new();
    }

    if resolution == Resolution::Daily {
        return bars.iter().map(PeriodBar::from_daily).collect();
    }

    let mut buckets: BTreeMap<String, PeriodAccumulator> = BTreeMap::new();
    for bar in bars {
        let key = period_key(bar.date, resolution);
        match buckets.get_mut(&key) {
            Some(accumulator) => accumulator.fold(bar),
            None => {
                buckets.insert(key, PeriodAccumulator::seed(bar));
            }
        }
    }

    buckets
        .into_iter()
        .map(|(key, accumulator)| accumulator.into_period_bar(key))
        .collect()
}

/// Bucket label for `date` at `resolution`.
///
/// - weekly: `{ISO week-numbering year}-W{week:02}`
/// - monthly: `{year:04}-{month:02}`
/// - quarterly: `{year:04}-Q{1-4}`
/// - yearly: `{year:04}`
pub fn period_key(date: TradingDate, resolution: Resolution) -> String {
    match resolution {
        Resolution::Daily => date.format_iso(),
        Resolution::Weekly => {
            let (iso_year, week) = date.iso_year_week();
            format!("{iso_year}-W{week:02}")
        }
        Resolution::Monthly => format!("{:04}-{:02}", date.year(), date.month()),
        Resolution::Quarterly => {
            let quarter = (date.month() - 1) / 3 + 1;
            format!("{:04}-Q{quarter}", date.year())
        }
        Resolution::Yearly => format!("{:04}", date.year()),
    }
}

struct PeriodAccumulator {
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: u64,
    member_count: usize,
    representative_date: TradingDate,
}

impl PeriodAccumulator {
    fn seed(bar: &DailyBar) -> Self {
        Self {
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            volume: bar.volume,
            member_count: 1,
            representative_date: bar.date,
        }
    }

    fn fold(&mut self, bar: &DailyBar) {
        self.high = self.high.max(bar.high);
        self.low = self.low.min(bar.low);
        self.close = bar.close;
        self.volume += bar.volume;
        self.member_count += 1;
        self.representative_date = bar.date;
    }

    fn into_period_bar(self, period_key: String) -> PeriodBar {
        PeriodBar {
            period_key,
            open: self.open,
            high: self.high,
            low: self.low,
            close: self.close,
            volume: self.volume,
            member_count: self.member_count,
            representative_date: self.representative_date,
        }
    }
}
