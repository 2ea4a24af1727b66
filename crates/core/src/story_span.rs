// SPDX-License-Identifier: MIT

//!
//! The span of story days the journey covers
//!

use crate::{Day, JourneyInterval, Month, SECONDS_PER_DAY, ShireDate, Span, StoryDayIndex, Year};
use frodo_journey_macros::{day, month, year};
use serde::Serialize;

/// The first and last story days (inclusive) that are spread over the user's
/// interval
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StorySpan {
    start: StoryDayIndex,
    end: StoryDayIndex,
}

impl StorySpan {
    /// Frodo leaves Bag End on 23 Halimath 3018; the Ring is destroyed on
    /// 25 Rethe 3019
    pub fn canonical() -> Self {
        StorySpan::between(
            ShireDate::from_parts(year!(3018), month!(9), day!(23)),
            ShireDate::from_parts(year!(3019), month!(3), day!(25)),
        )
    }

    /// The span from `first` to `last` (swapped if given the wrong way round)
    pub fn between(first: ShireDate, last: ShireDate) -> Self {
        let (start, end) = (first.story_day_index(), last.story_day_index());
        StorySpan {
            start: start.min(end),
            end: start.max(end),
        }
    }

    pub fn start(&self) -> StoryDayIndex {
        self.start
    }

    pub fn end(&self) -> StoryDayIndex {
        self.end
    }

    /// Number of story days in the span
    pub fn length(&self) -> i64 {
        self.end.days_since(self.start) + 1
    }

    /// The story day that is `fraction` of the way through the span (rounded
    /// down).  Fractions outside [0, 1] give days outside the span.
    pub fn index_at(&self, fraction: f64) -> StoryDayIndex {
        let index = self.start.value() as f64 + self.length() as f64 * fraction;
        StoryDayIndex::new(index.floor() as i64)
    }

    /// How far through the span the start of the story day is
    pub fn fraction_of(&self, index: StoryDayIndex) -> f64 {
        index.days_since(self.start) as f64 / self.length() as f64
    }

    /// The real time corresponding to one second less than one story day when
    /// the span is spread over `interval`
    pub fn almost_one_story_day_span(&self, interval: &JourneyInterval) -> Span {
        interval
            .span()
            .scale((1.0 - 1.0 / SECONDS_PER_DAY) / self.length() as f64)
    }
}
