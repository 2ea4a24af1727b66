// SPDX-License-Identifier: MIT

//!
//! Real-world dates and instants
//!
//! Only whole-day dates at UTC are needed, plus instants to place things
//! within a day.  [`RealDate`] counts days since 1970-01-01, [`Timestamp`]
//! counts milliseconds since 1970-01-01T00:00:00Z and [`Span`] is a signed
//! number of milliseconds.
//!

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::ops::{Add, Sub};
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// Milliseconds in one day
pub const MILLIS_PER_DAY: i64 = 86_400_000;

/// Seconds in one day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Errors that can arise in relation to a [`RealDate`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RealDateError {
    #[error("Month `{0}` is not allowed")]
    InvalidMonth(u32),

    #[error("Day `{day}` is not in month {month} of {year}")]
    InvalidDay { year: i32, month: u32, day: u32 },

    /// The text is not a `YYYY-MM-DD` date
    #[error("`{0}` is not a YYYY-MM-DD date")]
    Unparseable(String),
}

/// A calendar date (no time of day) in the proleptic Gregorian calendar
#[derive(Eq, PartialEq, Clone, Copy, Debug, Hash, PartialOrd, Ord)]
pub struct RealDate {
    days_since_epoch: i64,
}

/// An instant, in milliseconds since the Unix epoch (UTC)
#[derive(Eq, PartialEq, Clone, Copy, Debug, Hash, PartialOrd, Ord)]
pub struct Timestamp {
    millis: i64,
}

/// A signed length of time, in milliseconds
#[derive(Eq, PartialEq, Clone, Copy, Debug, Hash, PartialOrd, Ord, Default)]
pub struct Span {
    millis: i64,
}

fn is_gregorian_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 if is_gregorian_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

// Days since 1970-01-01 of a civil date (valid for any i32 year)
fn days_from_civil(year: i32, month: u32, day: u32) -> i64 {
    let year = i64::from(year) - i64::from(month <= 2);
    let era = year.div_euclid(400);
    let year_of_era = year - era * 400;
    let month = i64::from(month);
    let shifted_month = if month > 2 { month - 3 } else { month + 9 };
    let day_of_year = (153 * shifted_month + 2) / 5 + i64::from(day) - 1;
    let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;
    era * 146_097 + day_of_era - 719_468
}

// Inverse of `days_from_civil`
fn civil_from_days(days: i64) -> (i32, u32, u32) {
    let days = days + 719_468;
    let era = days.div_euclid(146_097);
    let day_of_era = days - era * 146_097;
    let year_of_era =
        (day_of_era - day_of_era / 1460 + day_of_era / 36_524 - day_of_era / 146_096) / 365;
    let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let shifted_month = (5 * day_of_year + 2) / 153;
    let day = (day_of_year - (153 * shifted_month + 2) / 5 + 1) as u32;
    let month = match shifted_month {
        0..=9 => shifted_month + 3,
        _ => shifted_month - 9,
    };
    let year = year_of_era + era * 400 + i64::from(month <= 2);
    (year as i32, month as u32, day)
}

impl RealDate {
    /// Create a date if the result will be valid
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, RealDateError> {
        if !(1..=12).contains(&month) {
            return Err(RealDateError::InvalidMonth(month));
        }
        if day == 0 || day > days_in_month(year, month) {
            return Err(RealDateError::InvalidDay { year, month, day });
        }
        Ok(RealDate {
            days_since_epoch: days_from_civil(year, month, day),
        })
    }

    /// The date `days` days after 1970-01-01
    pub fn from_days_since_epoch(days: i64) -> Self {
        RealDate {
            days_since_epoch: days,
        }
    }

    pub fn days_since_epoch(&self) -> i64 {
        self.days_since_epoch
    }

    /// Whole days from `earlier` to `self` (negative if `self` is earlier)
    pub fn days_since(&self, earlier: RealDate) -> i64 {
        self.days_since_epoch - earlier.days_since_epoch
    }

    /// The date `days` days later (or earlier if negative)
    pub fn add_days(&self, days: i64) -> Self {
        RealDate {
            days_since_epoch: self.days_since_epoch + days,
        }
    }

    /// Get the (year, month, day) parts
    pub fn ymd(&self) -> (i32, u32, u32) {
        civil_from_days(self.days_since_epoch)
    }

    pub fn year(&self) -> i32 {
        self.ymd().0
    }

    pub fn month(&self) -> u32 {
        self.ymd().1
    }

    pub fn day(&self) -> u32 {
        self.ymd().2
    }

    /// The English name of the month (e.g. September)
    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[(self.month() - 1) as usize]
    }

    /// Midnight (UTC) at the start of the date
    pub fn midnight(&self) -> Timestamp {
        Timestamp {
            millis: self.days_since_epoch.saturating_mul(MILLIS_PER_DAY),
        }
    }

    /// e.g. 03 September 2023 format
    pub fn as_long_date_format(&self) -> String {
        format!("{:02} {} {}", self.day(), self.month_name(), self.year())
    }
}

impl std::fmt::Display for RealDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (year, month, day) = self.ymd();
        write!(f, "{year:04}-{month:02}-{day:02}")
    }
}

impl FromStr for RealDate {
    type Err = RealDateError;
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let unparseable = || RealDateError::Unparseable(text.to_string());
        let mut parts = text.trim().splitn(3, '-');
        let (Some(year), Some(month), Some(day)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(unparseable());
        };
        if year.len() != 4 || month.len() != 2 || day.len() != 2 {
            return Err(unparseable());
        }
        let year = year.parse().map_err(|_| unparseable())?;
        let month = month.parse().map_err(|_| unparseable())?;
        let day = day.parse().map_err(|_| unparseable())?;
        RealDate::from_ymd(year, month, day)
    }
}

impl Serialize for RealDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RealDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

impl Timestamp {
    /// The current instant, from the system clock
    pub fn now() -> Self {
        let millis = match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(since) => since.as_millis() as i64,
            Err(before) => -(before.duration().as_millis() as i64),
        };
        Timestamp { millis }
    }

    pub fn from_millis(millis: i64) -> Self {
        Timestamp { millis }
    }

    pub fn millis(&self) -> i64 {
        self.millis
    }

    /// The date (UTC) the instant falls on, i.e. with the time of day stripped
    pub fn date(&self) -> RealDate {
        RealDate::from_days_since_epoch(self.millis.div_euclid(MILLIS_PER_DAY))
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let millis_of_day = self.millis.rem_euclid(MILLIS_PER_DAY);
        let hours = millis_of_day / 3_600_000;
        let minutes = (millis_of_day / 60_000) % 60;
        let seconds = (millis_of_day / 1000) % 60;
        let millis = millis_of_day % 1000;
        write!(
            f,
            "{}T{hours:02}:{minutes:02}:{seconds:02}.{millis:03}Z",
            self.date()
        )
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl Span {
    pub fn from_millis(millis: i64) -> Self {
        Span { millis }
    }

    /// A span of whole days
    pub fn days(days: i64) -> Self {
        Span {
            millis: days.saturating_mul(MILLIS_PER_DAY),
        }
    }

    pub fn millis(&self) -> i64 {
        self.millis
    }

    pub fn is_zero(&self) -> bool {
        self.millis == 0
    }

    /// The span as a (fractional) number of days
    pub fn as_days(&self) -> f64 {
        self.millis as f64 / MILLIS_PER_DAY as f64
    }

    /// Multiply by a factor, rounding to the nearest millisecond.  Saturates
    /// at the ends of the range (and NaN gives zero).
    pub fn scale(&self, factor: f64) -> Span {
        Span {
            millis: (self.millis as f64 * factor).round() as i64,
        }
    }

    /// How many times `other` goes into this span
    pub fn ratio(&self, other: Span) -> f64 {
        self.millis as f64 / other.millis as f64
    }
}

// Saturates at the ends of the range
impl Add<Span> for Timestamp {
    type Output = Timestamp;
    fn add(self, span: Span) -> Timestamp {
        Timestamp {
            millis: self.millis.saturating_add(span.millis),
        }
    }
}

impl Sub for Timestamp {
    type Output = Span;
    fn sub(self, other: Timestamp) -> Span {
        Span {
            millis: self.millis.saturating_sub(other.millis),
        }
    }
}
