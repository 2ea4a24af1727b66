// SPDX-License-Identifier: MIT

//!
//! The user's real-world journey interval, and mapping between it and
//! completion fractions
//!

use crate::{RealDate, Span, Timestamp};
use log::debug;
use serde::Serialize;
use thiserror::Error;

/// Errors that can arise in relation to a [`JourneyInterval`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntervalError {
    #[error("The end date `{end}` is before the start date `{start}`")]
    EndBeforeStart { start: RealDate, end: RealDate },
}

/// The real-world dates (both inclusive) the journey is spread over
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct JourneyInterval {
    start: RealDate,
    end: RealDate,
}

impl JourneyInterval {
    /// Create a valid interval (the end cannot be before the start)
    pub fn from(start: RealDate, end: RealDate) -> Result<Self, IntervalError> {
        if end < start {
            return Err(IntervalError::EndBeforeStart { start, end });
        }
        Ok(JourneyInterval { start, end })
    }

    pub fn start(&self) -> RealDate {
        self.start
    }

    pub fn end(&self) -> RealDate {
        self.end
    }

    /// Number of days in the interval (a single date is 1 day)
    pub fn total_days(&self) -> i64 {
        duration_days(self.start, self.end)
    }

    /// Time from midnight on the start date to midnight on the end date
    pub fn span(&self) -> Span {
        self.end.midnight() - self.start.midnight()
    }

    /// How far `moment` is through the interval.  Not clamped, so it is
    /// negative before the start and greater than 1 after the end.  A single
    /// date interval is measured against one day.
    pub fn fraction_at(&self, moment: Timestamp) -> f64 {
        let elapsed = moment - self.start.midnight();
        let span = self.span();
        if span.is_zero() {
            elapsed.as_days()
        } else {
            elapsed.ratio(span)
        }
    }
}

/// Inclusive number of days from `date_a` to `date_b`
pub fn duration_days(date_a: RealDate, date_b: RealDate) -> i64 {
    date_b.days_since(date_a) + 1
}

/// Where "now" (or an explicitly chosen day) falls within the interval
#[derive(Serialize, Clone, Copy, Debug, PartialEq)]
pub struct ResolvedPosition {
    /// 1-based day of the journey, `None` if it hasn't started yet
    pub current_day: Option<i64>,

    /// Set (instead of `current_day`) when the journey hasn't started yet
    pub days_until_start: Option<i64>,

    /// Number of days in the interval
    pub total_days: i64,

    /// How far through the interval the position is.  Not clamped.
    pub completion_fraction: f64,

    /// The real instant the position corresponds to
    pub current_moment: Timestamp,
}

/// Resolve the current position within the interval, either from an explicit
/// 1-based day or from `now`
pub fn resolve_position(
    interval: &JourneyInterval,
    explicit_day: Option<i64>,
    now: Timestamp,
) -> ResolvedPosition {
    let total_days = interval.total_days();

    let (completion_fraction, current_moment, day) = match explicit_day {
        // Centre on midday of the chosen day
        Some(day) => {
            let fraction = (day as f64 - 0.5) / total_days as f64;
            (fraction, map_fraction_to_real_date(fraction, interval), day)
        }
        None => (
            interval.fraction_at(now),
            now,
            duration_days(interval.start, now.date()),
        ),
    };

    let (current_day, days_until_start) = if day <= 0 {
        (None, Some(day.saturating_sub(1).saturating_abs()))
    } else {
        (Some(day), None)
    };

    let position = ResolvedPosition {
        current_day,
        days_until_start,
        total_days,
        completion_fraction,
        current_moment,
    };
    debug!("Resolved position {position:?}");
    position
}

/// The real instant that is `fraction` of the way through the interval
pub fn map_fraction_to_real_date(fraction: f64, interval: &JourneyInterval) -> Timestamp {
    interval.start.midnight() + interval.span().scale(fraction)
}
