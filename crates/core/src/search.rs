// SPDX-License-Identifier: MIT

//!
//! Locating a story day within reference records sorted by story day
//!

use crate::{HasShireDate, ShireDateError, StoryDayIndex, to_story_day_index};
use std::ops::Range;

/// How a sorted sequence of story-day indexes splits around one index
///
/// `past` holds the positions of the indexes before it, `current` those equal
/// to it, and everything from `current.end` onwards is after it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexPartition {
    pub past: Range<usize>,
    pub current: Range<usize>,
    pub len: usize,
}

impl IndexPartition {
    /// Positions of the indexes after the one searched for
    pub fn future(&self) -> Range<usize> {
        self.current.end..self.len
    }

    /// Position of the last index at or before the one searched for, or `0`
    /// if there is none (or the sequence is empty)
    pub fn last_at_or_before(&self) -> usize {
        self.current.end.saturating_sub(1)
    }
}

/// Binary search the (ascending) `indexes` for `target`
pub fn partition_by_index(indexes: &[StoryDayIndex], target: StoryDayIndex) -> IndexPartition {
    let before = indexes.partition_point(|index| *index < target);
    let through = before + indexes[before..].partition_point(|index| *index == target);
    IndexPartition {
        past: 0..before,
        current: before..through,
        len: indexes.len(),
    }
}

/// The story-day index of every record, failing on the first malformed date
pub fn story_day_indexes<T: HasShireDate>(
    records: &[T],
) -> Result<Vec<StoryDayIndex>, ShireDateError> {
    records
        .iter()
        .map(|record| to_story_day_index(record.shire_date()))
        .collect()
}

/// Position of the first record that is out of ascending order, if any
pub fn first_unsorted(indexes: &[StoryDayIndex]) -> Option<usize> {
    indexes
        .windows(2)
        .position(|pair| pair[1] < pair[0])
        .map(|position| position + 1)
}
