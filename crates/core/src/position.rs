// SPDX-License-Identifier: MIT

//!
//! Resolve where in the story the user currently is
//!

use crate::{
    JourneyError, JourneyInterval, ResolvedPosition, StoryDayIndex, StorySpan, StoryStep,
    Timestamp, partition_by_index, resolve_position, story_day_indexes,
};
use log::debug;

/// The user's position, both in their interval and in the story
#[derive(Clone, Debug, PartialEq)]
pub struct StoryPosition<'a> {
    /// Where the user is in their own interval
    pub position: ResolvedPosition,

    /// The story day that corresponds to
    pub story_day_index: StoryDayIndex,

    /// The step in effect on that story day
    pub active_step: &'a StoryStep,
}

/// Resolve the user's position in the story, and the step in effect
///
/// The active step is the last one starting on or before the current story
/// day, or the first step if the story day is before all of them.
pub fn resolve_story_position<'a>(
    interval: &JourneyInterval,
    explicit_day: Option<i64>,
    now: Timestamp,
    span: &StorySpan,
    steps: &'a [StoryStep],
) -> Result<StoryPosition<'a>, JourneyError> {
    if steps.is_empty() {
        return Err(JourneyError::NoStepsAvailable);
    }
    let indexes = story_day_indexes(steps)?;

    let position = resolve_position(interval, explicit_day, now);
    let story_day_index = span.index_at(position.completion_fraction);

    let active = partition_by_index(&indexes, story_day_index).last_at_or_before();
    debug!("Story day {story_day_index} uses step {active} of {}", steps.len());

    Ok(StoryPosition {
        position,
        story_day_index,
        active_step: &steps[active],
    })
}
