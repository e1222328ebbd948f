//! Cleaned numeric values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A cleaned numeric cell.
///
/// Construction always goes through the parse-or-missing combinators
/// ([`Amount::parse`], [`Amount::from_f64`]), so a `Number` is always finite
/// and rounded to two decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum Amount {
    Number(f64),
    #[default]
    Missing,
}

impl Amount {
    /// Wraps a float, rounding to two decimals. NaN and infinities become missing.
    pub fn from_f64(value: f64) -> Self {
        if value.is_finite() {
            Self::Number(round2(value))
        } else {
            Self::Missing
        }
    }

    /// Parses text as a number. Blank or malformed text becomes missing.
    ///
    /// ```
    /// use taxmap_model::Amount;
    ///
    /// assert_eq!(Amount::parse(" 12.344 "), Amount::Number(12.34));
    /// assert_eq!(Amount::parse("n/a"), Amount::Missing);
    /// assert_eq!(Amount::parse(""), Amount::Missing);
    /// ```
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::Missing;
        }
        trimmed
            .parse::<f64>()
            .map_or(Self::Missing, Self::from_f64)
    }

    pub fn value(self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(value),
            Self::Missing => None,
        }
    }

    pub fn is_missing(self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Returns the value only when it is strictly positive.
    pub fn positive(self) -> Option<f64> {
        self.value().filter(|value| *value > 0.0)
    }

    /// Re-applies two-decimal rounding. Idempotent.
    #[must_use]
    pub fn rounded(self) -> Self {
        match self {
            Self::Number(value) => Self::from_f64(value),
            Self::Missing => Self::Missing,
        }
    }
}

impl From<Option<f64>> for Amount {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Missing, Self::from_f64)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value:.2}"),
            Self::Missing => f.write_str("-"),
        }
    }
}

/// Rounds to two decimals, ties to even.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
