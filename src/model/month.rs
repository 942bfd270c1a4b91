use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A calendar month key, ordered by (year, month).
/// Serializes to a string format like "2024-03" for JSON compatibility.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    /// The month a date falls in.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Month {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Expected format: "2024-03"
        let s = s.trim();
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| anyhow::anyhow!("Month must be in format 'YYYY-MM', got: {s}"))?;

        let year = year
            .parse::<i32>()
            .map_err(|e| anyhow::anyhow!("Invalid year: {e}"))?;
        let month = month
            .parse::<u32>()
            .map_err(|e| anyhow::anyhow!("Invalid month: {e}"))?;

        if !(1..=12).contains(&month) {
            anyhow::bail!("Month must be between 1 and 12, got: {month}");
        }

        Ok(Month { year, month })
    }
}

impl Serialize for Month {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Month {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Month::from_str(&s).map_err(serde::de::Error::custom)
    }
}
