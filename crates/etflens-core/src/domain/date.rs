use std::fmt::{Display, Formatter};

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::Date;

use crate::ValidationError;

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Calendar date of a trading day, no time component.
///
/// Parses and formats as `YYYY-MM-DD`, the Alpha Vantage daily series key
/// format. `Ord` follows calendar order, so a series sorted by `TradingDate`
/// is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TradingDate(Date);

impl TradingDate {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        Date::parse(input, DATE_FORMAT)
            .map(Self)
            .map_err(|_| ValidationError::InvalidDate {
                value: input.to_owned(),
            })
    }

    pub const fn from_date(date: Date) -> Self {
        Self(date)
    }

    pub const fn into_inner(self) -> Date {
        self.0
    }

    pub const fn year(self) -> i32 {
        self.0.year()
    }

    /// Calendar month, 1-12.
    pub fn month(self) -> u8 {
        self.0.month() as u8
    }

    /// ISO-8601 week-numbering year and week (1-53).
    ///
    /// The week-numbering year can differ from the calendar year near
    /// January 1st; weeks are Monday-start and anchored to the week
    /// containing the first Thursday of January.
    pub fn iso_year_week(self) -> (i32, u8) {
        let (year, week, _) = self.0.to_iso_week_date();
        (year, week)
    }

    pub fn format_iso(self) -> String {
        self.0
            .format(DATE_FORMAT)
            .expect("TradingDate must be YYYY-MM-DD formattable")
    }
}

impl Display for TradingDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format_iso())
    }
}

impl Serialize for TradingDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.format_iso())
    }
}

impl<'de> Deserialize<'de> for TradingDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_formats_iso_date() {
        let date = TradingDate::parse("2024-01-02").expect("must parse");
        assert_eq!(date.format_iso(), "2024-01-02");
        assert_eq!(date.year(), 2024);
        assert_eq!(date.month(), 1);
    }

    #[test]
    fn rejects_unpadded_date() {
        assert!(matches!(
            TradingDate::parse("2024-1-2"),
            Err(ValidationError::InvalidDate { .. })
        ));
    }

    #[test]
    fn orders_chronologically() {
        let earlier = TradingDate::parse("2024-01-02").expect("must parse");
        let later = TradingDate::parse("2024-01-03").expect("must parse");
        assert!(earlier < later);
    }

    #[test]
    fn iso_week_year_shifts_at_year_boundary() {
        // 2024-12-31 is a Tuesday in the week containing 2025's first Thursday.
        let date = TradingDate::parse("2024-12-31").expect("must parse");
        assert_eq!(date.iso_year_week(), (2025, 1));

        // 2021-01-01 is a Friday still inside 2020's last ISO week.
        let date = TradingDate::parse("2021-01-01").expect("must parse");
        assert_eq!(date.iso_year_week(), (2020, 53));
    }
}
