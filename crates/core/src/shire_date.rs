// SPDX-License-Identifier: MIT

//!
//! The Shire calendar and the story-day index
//!
//! A Shire year is twelve months of 30 days plus intercalary days: one Yule
//! day at each end of the year and the Lithedays between months 6 and 7
//! (1 Lithe, Mid-year's Day, Overlithe in leap years only, 2 Lithe).  Every
//! valid date maps to a [`StoryDayIndex`], a count of days since the start
//! of the era.
//!

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::str::FromStr;
use thiserror::Error;

/// The minimum Shire year allowed
pub const MIN_YEAR: i64 = 0;

/// The maximum Shire year allowed
pub const MAX_YEAR: i64 = 10000;

/// Every Shire month has exactly this many days
pub const DAYS_PER_MONTH: i64 = 30;

/// Number of Shire months (the Lithedays and Yuledays are outside them)
pub const MONTHS_PER_YEAR: i64 = 12;

/// Names of the Shire months, in order
const MONTH_NAMES: [&str; 12] = [
    "Afteryule",
    "Solmath",
    "Rethe",
    "Astron",
    "Thrimidge",
    "Forelithe",
    "Afterlithe",
    "Wedmath",
    "Halimath",
    "Winterfilth",
    "Blotmath",
    "Foreyule",
];

/// Errors that can arise in relation to a [`ShireDate`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShireDateError {
    /// The day number is not allowed (must be 1 <= day <= 30)
    #[error("Day `{0}` is not allowed")]
    InvalidDay(i64),

    /// The month number is not allowed (must be 1 <= month <= 12)
    #[error("Month `{0}` is not allowed")]
    InvalidMonth(i64),

    /// The year is not allowed (must be [`MIN_YEAR`] <= year <= [`MAX_YEAR`])
    #[error("Year `{0}` is not allowed")]
    InvalidYear(i64),

    /// The special day tag is not one of the known tags
    #[error("Special day `{0}` is not recognised")]
    UnknownSpecialDay(String),

    /// Overlithe only exists in leap years
    #[error("Overlithe does not exist in the common year {0}")]
    OverlitheInCommonYear(i64),

    /// Invalid field combination.  e.g. a day without a month, or both a month
    /// and a special day
    #[error("e.g. can't set a day without a month, or a month and a special day")]
    InvalidFields,
}

/// A Shire day of the month
#[rustfmt::skip]
#[derive(derive_more::Display, Serialize, Eq, PartialEq, Clone, Copy, Debug, Hash, PartialOrd, Ord)]
pub struct Day(u8);

/// A Shire month
#[rustfmt::skip]
#[derive(derive_more::Display, Serialize, Eq, PartialEq, Clone, Copy, Debug, Hash, PartialOrd, Ord)]
pub struct Month(u8);

/// A Shire year
///
/// The minimum year allowed is [`MIN_YEAR`].  The maximum year allowed is
/// [`MAX_YEAR`]
#[rustfmt::skip]
#[derive(derive_more::Display, Serialize, Eq, PartialEq, Clone, Copy, Debug, Hash, PartialOrd, Ord)]
pub struct Year(i32);

impl Day {
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl Month {
    pub fn value(&self) -> u8 {
        self.0
    }

    /// The Shire name of the month (e.g. Halimath)
    pub fn name(&self) -> &'static str {
        MONTH_NAMES[usize::from(self.0 - 1)]
    }
}

impl Year {
    pub fn value(&self) -> i32 {
        self.0
    }

    /// Whether the year has an Overlithe
    pub fn is_leap(&self) -> bool {
        is_leap_year(i64::from(self.0))
    }
}

const fn is_valid_day(value: i64) -> bool {
    1 <= value && value <= DAYS_PER_MONTH
}

const fn is_valid_month(value: i64) -> bool {
    1 <= value && value <= MONTHS_PER_YEAR
}

const fn is_valid_year(value: i64) -> bool {
    MIN_YEAR <= value && value <= MAX_YEAR
}

// The `checked` constructors back the `day!`, `month!` and `year!` macros,
// which evaluate them in a const block so out of range literals fail to
// compile

impl Day {
    pub const fn checked(value: i64) -> Day {
        assert!(is_valid_day(value), "a Shire day must be between 1 and 30");
        Day(value as u8)
    }
}

impl Month {
    pub const fn checked(value: i64) -> Month {
        assert!(is_valid_month(value), "a Shire month must be between 1 and 12");
        Month(value as u8)
    }
}

impl Year {
    pub const fn checked(value: i64) -> Year {
        assert!(is_valid_year(value), "a Shire year must be between MIN_YEAR and MAX_YEAR");
        Year(value as i32)
    }
}

impl TryFrom<i64> for Day {
    type Error = ShireDateError;
    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if is_valid_day(value) {
            Ok(Day(value as u8))
        } else {
            Err(ShireDateError::InvalidDay(value))
        }
    }
}

impl TryFrom<i64> for Month {
    type Error = ShireDateError;
    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if is_valid_month(value) {
            Ok(Month(value as u8))
        } else {
            Err(ShireDateError::InvalidMonth(value))
        }
    }
}

impl TryFrom<i64> for Year {
    type Error = ShireDateError;
    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if is_valid_year(value) {
            Ok(Year(value as i32))
        } else {
            Err(ShireDateError::InvalidYear(value))
        }
    }
}

/// Whether the Shire year is a leap year (and so has an Overlithe)
pub fn is_leap_year(year: i64) -> bool {
    year % 4 == 0 && year % 100 != 0
}

/// The days outside of the months
#[derive(Serialize, Deserialize, Eq, PartialEq, Clone, Copy, Debug, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SpecialDay {
    /// 2 Yule, the first day of the year
    YearStartYule,
    /// 1 Lithe, after the sixth month
    OneLithe,
    /// Mid-year's Day
    Midyear,
    /// Only in leap years, after Mid-year's Day
    Overlithe,
    /// 2 Lithe, before the seventh month
    TwoLithe,
    /// 1 Yule, the last day of the year
    YearEndYule,
}

impl SpecialDay {
    /// The tag used for this special day in reference data
    pub fn tag(&self) -> &'static str {
        match self {
            SpecialDay::YearStartYule => "year_start_yule",
            SpecialDay::OneLithe => "one_lithe",
            SpecialDay::Midyear => "midyear",
            SpecialDay::Overlithe => "overlithe",
            SpecialDay::TwoLithe => "two_lithe",
            SpecialDay::YearEndYule => "year_end_yule",
        }
    }

    /// The Shire name of the special day
    pub fn name(&self) -> &'static str {
        match self {
            SpecialDay::YearStartYule => "2 Yule",
            SpecialDay::OneLithe => "1 Lithe",
            SpecialDay::Midyear => "Mid-year's Day",
            SpecialDay::Overlithe => "Overlithe",
            SpecialDay::TwoLithe => "2 Lithe",
            SpecialDay::YearEndYule => "1 Yule",
        }
    }

    /// Day of the year (1-based) of the special day
    fn day_of_year(&self, leap: bool) -> i64 {
        let leap_day = i64::from(leap);
        match self {
            SpecialDay::YearStartYule => 1,
            SpecialDay::OneLithe => 182,
            SpecialDay::Midyear => 183,
            SpecialDay::Overlithe => 184,
            SpecialDay::TwoLithe => 184 + leap_day,
            SpecialDay::YearEndYule => 365 + leap_day,
        }
    }
}

impl FromStr for SpecialDay {
    type Err = ShireDateError;
    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "year_start_yule" => Ok(SpecialDay::YearStartYule),
            "one_lithe" => Ok(SpecialDay::OneLithe),
            "midyear" => Ok(SpecialDay::Midyear),
            "overlithe" => Ok(SpecialDay::Overlithe),
            "two_lithe" => Ok(SpecialDay::TwoLithe),
            "year_end_yule" => Ok(SpecialDay::YearEndYule),
            _ => Err(ShireDateError::UnknownSpecialDay(tag.to_string())),
        }
    }
}

/// Which day within the year a [`ShireDate`] refers to
#[derive(Eq, PartialEq, Clone, Copy, Debug, Hash)]
pub enum ShireDay {
    /// Only used by the "no date" sentinel
    Unset,
    /// A day in one of the twelve months
    MonthDay { month: Month, day: Day },
    /// A day outside the months
    Special(SpecialDay),
}

/// A valid date in the Shire calendar
///
/// Either a month & day or a special day is set.  The only date with neither
/// is the "no date" sentinel (year 0), whose index is 0.
#[derive(Eq, PartialEq, Clone, Copy, Debug, Hash)]
pub struct ShireDate {
    year: Year,
    day: ShireDay,
}

/// Canonical integer day count since the start of the Shire era
#[rustfmt::skip]
#[derive(derive_more::Display, Serialize, Deserialize, Eq, PartialEq, Clone, Copy, Debug, Hash, PartialOrd, Ord)]
pub struct StoryDayIndex(i64);

impl StoryDayIndex {
    pub fn new(value: i64) -> Self {
        StoryDayIndex(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    /// Number of days from `earlier` to `self` (negative if `self` is earlier)
    pub fn days_since(&self, earlier: StoryDayIndex) -> i64 {
        self.0 - earlier.0
    }
}

impl ShireDate {
    /// The "no date" sentinel
    pub fn none() -> Self {
        ShireDate {
            year: Year(0),
            day: ShireDay::Unset,
        }
    }

    /// Create a date in one of the months if the result will be valid
    pub fn from(year: i64, month: i64, day: i64) -> Result<Self, ShireDateError> {
        Ok(Self::from_parts(
            Year::try_from(year)?,
            Month::try_from(month)?,
            Day::try_from(day)?,
        ))
    }

    /// Create a date in one of the months from already valid parts
    pub fn from_parts(year: Year, month: Month, day: Day) -> Self {
        ShireDate {
            year,
            day: ShireDay::MonthDay { month, day },
        }
    }

    /// Create a special day if the result will be valid (Overlithe must be
    /// in a leap year)
    pub fn special(year: i64, special_day: SpecialDay) -> Result<Self, ShireDateError> {
        let year = Year::try_from(year)?;
        if special_day == SpecialDay::Overlithe && !year.is_leap() {
            return Err(ShireDateError::OverlitheInCommonYear(i64::from(year.value())));
        }
        Ok(ShireDate {
            year,
            day: ShireDay::Special(special_day),
        })
    }

    /// Get the date's year
    pub fn year(&self) -> Year {
        self.year
    }

    /// Get which day of the year this is
    pub fn shire_day(&self) -> ShireDay {
        self.day
    }

    /// Get the date's month (if it is not a special day)
    pub fn month(&self) -> Option<Month> {
        match self.day {
            ShireDay::MonthDay { month, .. } => Some(month),
            _ => None,
        }
    }

    /// Get the date's day of the month (if it is not a special day)
    pub fn day(&self) -> Option<Day> {
        match self.day {
            ShireDay::MonthDay { day, .. } => Some(day),
            _ => None,
        }
    }

    /// Get the special day (if it is one)
    pub fn special_day(&self) -> Option<SpecialDay> {
        match self.day {
            ShireDay::Special(special_day) => Some(special_day),
            _ => None,
        }
    }

    /// Whether this is the "no date" sentinel
    pub fn is_none(&self) -> bool {
        self.day == ShireDay::Unset
    }

    /// Convert to a count of days since the start of the era
    pub fn story_day_index(&self) -> StoryDayIndex {
        let year = i64::from(self.year.value());
        let leap = self.year.is_leap();
        let day_of_year = match self.day {
            ShireDay::Unset => return StoryDayIndex(0),
            ShireDay::Special(special_day) => special_day.day_of_year(leap),
            ShireDay::MonthDay { month, day } => {
                let month = i64::from(month.value());
                let lithedays = match (month > 6, leap) {
                    (false, _) => 0,
                    (true, false) => 3,
                    (true, true) => 4,
                };
                1 + DAYS_PER_MONTH * (month - 1) + lithedays + i64::from(day.value())
            }
        };
        StoryDayIndex(days_before_year(year) + day_of_year)
    }
}

/// Days in all the years before `year`
fn days_before_year(year: i64) -> i64 {
    let prior = year - 1;
    year * 365 + prior.div_euclid(4) - prior.div_euclid(100)
}

impl Ord for ShireDate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.story_day_index().cmp(&other.story_day_index())
    }
}

impl PartialOrd for ShireDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for ShireDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.day {
            ShireDay::Unset => write!(f, "-"),
            ShireDay::MonthDay { month, day } => {
                write!(f, "{day} {} {}", month.name(), self.year)
            }
            ShireDay::Special(special_day) => write!(f, "{} {}", special_day.name(), self.year),
        }
    }
}

/// A Shire date as it appears in a reference table row, before validation
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct RawShireDate {
    pub year: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_day: Option<String>,
}

impl TryFrom<&RawShireDate> for ShireDate {
    type Error = ShireDateError;
    fn try_from(raw: &RawShireDate) -> Result<Self, Self::Error> {
        match (raw.month, raw.day, raw.special_day.as_deref()) {
            (Some(month), Some(day), None) => ShireDate::from(raw.year, month, day),
            (None, None, Some(tag)) => ShireDate::special(raw.year, tag.parse()?),
            (None, None, None) if raw.year == 0 => Ok(ShireDate::none()),
            _ => Err(ShireDateError::InvalidFields),
        }
    }
}

impl From<ShireDate> for RawShireDate {
    fn from(date: ShireDate) -> Self {
        RawShireDate {
            year: i64::from(date.year.value()),
            month: date.month().map(|month| i64::from(month.value())),
            day: date.day().map(|day| i64::from(day.value())),
            special_day: date.special_day().map(|special| special.tag().to_string()),
        }
    }
}

/// Convert a reference table date to its story-day index, failing if the date
/// is malformed
pub fn to_story_day_index(raw: &RawShireDate) -> Result<StoryDayIndex, ShireDateError> {
    Ok(ShireDate::try_from(raw)?.story_day_index())
}

impl Serialize for ShireDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        RawShireDate::from(*self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ShireDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawShireDate::deserialize(deserializer)?;
        ShireDate::try_from(&raw).map_err(serde::de::Error::custom)
    }
}
