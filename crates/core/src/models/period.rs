use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::CoreError;

/// A calendar month (`YYYY-MM`), the window every period aggregate is scoped to.
///
/// Stored as the month's first day, so ordering is chronological and
/// "strictly before the period" is a plain date comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PeriodKey {
    start: NaiveDate,
}

impl PeriodKey {
    /// Build a key from a year (0..=9999) and a month (1..=12).
    pub fn new(year: i32, month: u32) -> Result<Self, CoreError> {
        if !(0..=9999).contains(&year) {
            return Err(CoreError::InvalidPeriod(format!("{year}-{month:02}")));
        }
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|start| Self { start })
            .ok_or_else(|| CoreError::InvalidPeriod(format!("{year:04}-{month:02}")))
    }

    /// Parse exactly `YYYY-MM`.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let bytes = raw.as_bytes();
        let well_formed = bytes.len() == 7
            && bytes
                .iter()
                .enumerate()
                .all(|(i, b)| if i == 4 { *b == b'-' } else { b.is_ascii_digit() });
        if !well_formed {
            return Err(CoreError::InvalidPeriod(raw.to_string()));
        }

        let year: i32 = raw[0..4]
            .parse()
            .map_err(|_| CoreError::InvalidPeriod(raw.to_string()))?;
        let month: u32 = raw[5..7]
            .parse()
            .map_err(|_| CoreError::InvalidPeriod(raw.to_string()))?;

        Self::new(year, month).map_err(|_| CoreError::InvalidPeriod(raw.to_string()))
    }

    /// The month containing `date`.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            start: date - chrono::Duration::days(i64::from(date.day0())),
        }
    }

    /// The month containing today's UTC date.
    pub fn current() -> Self {
        Self::from_date(Utc::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.start.year()
    }

    pub fn month(&self) -> u32 {
        self.start.month()
    }

    /// First day of the month.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Whether `date` falls inside this month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.start.year() && date.month() == self.start.month()
    }

    /// Whether `date` is strictly before the first day of this month.
    pub fn is_before_start(&self, date: NaiveDate) -> bool {
        date < self.start
    }
}

impl std::fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.start.year(), self.start.month())
    }
}

impl FromStr for PeriodKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PeriodKey {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PeriodKey> for String {
    fn from(key: PeriodKey) -> Self {
        key.to_string()
    }
}
