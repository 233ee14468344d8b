use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Aggregation granularity for a daily series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
}

impl Resolution {
    pub const ALL: [Self; 5] = [
        Self::Daily,
        Self::Weekly,
        Self::Monthly,
        Self::Quarterly,
        Self::Yearly,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Yearly => "yearly",
        }
    }
}

impl Display for Resolution {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resolution {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "quarterly" => Ok(Self::Quarterly),
            "yearly" => Ok(Self::Yearly),
            other => Err(ValidationError::InvalidResolution {
                value: other.to_owned(),
            }),
        }
    }
}

/// Alpha Vantage `outputsize` query parameter.
///
/// `Full` returns the complete daily history, `Compact` the latest 100
/// records. Full is the default so aggregation has enough history for
/// yearly buckets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputSize {
    #[default]
    Full,
    Compact,
}

impl OutputSize {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Compact => "compact",
        }
    }
}

impl Display for OutputSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputSize {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(Self::Full),
            "compact" => Ok(Self::Compact),
            other => Err(ValidationError::InvalidOutputSize {
                value: other.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_resolution() {
        let resolution = Resolution::from_str("Quarterly").expect("must parse");
        assert_eq!(resolution, Resolution::Quarterly);
    }

    #[test]
    fn rejects_invalid_resolution() {
        let err = Resolution::from_str("hourly").expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidResolution { .. }));
    }

    #[test]
    fn output_size_defaults_to_full() {
        assert_eq!(OutputSize::default(), OutputSize::Full);
        assert_eq!(OutputSize::default().as_str(), "full");
    }
}
