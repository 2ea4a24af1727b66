// SPDX-License-Identifier: MIT

//!
//! Story events and the window of events around the current story day
//!

use crate::{
    HasShireDate, JourneyError, JourneyInterval, RawShireDate, StoryDayIndex, StorySpan, Timestamp,
    map_fraction_to_real_date, partition_by_index, story_day_indexes,
};
use log::debug;
use serde::{Deserialize, Serialize};

/// How many past (and future) events to show by default
pub const DEFAULT_MAX_PAST_FUTURE: usize = 5;

/// One row of the event reference table
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct StoryEvent {
    /// The Shire date of the event
    #[serde(flatten)]
    pub date: RawShireDate,

    pub description: String,
}

impl HasShireDate for StoryEvent {
    fn shire_date(&self) -> &RawShireDate {
        &self.date
    }
}

/// An event near the current story day, mapped onto the user's interval
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct WindowedEvent {
    pub description: String,

    /// When the event's story day starts in the user's interval
    pub start: Timestamp,

    /// Just before the next story day starts
    pub end: Timestamp,

    /// Whether the event is on the current story day
    pub is_current: bool,

    /// Only the first of the current events (front ends scroll to it)
    pub is_first_current: bool,
}

impl WindowedEvent {
    /// The real dates the event covers, with shared parts not repeated
    ///
    /// e.g. `23 September 2023`, `23 - 24 September 2023`,
    /// `30 September - 01 October 2023`,
    /// `31 December 2023 - 01 January 2024`
    pub fn date_range(&self) -> String {
        let (start, end) = (self.start.date(), self.end.date());
        if start.year() != end.year() {
            format!(
                "{} - {}",
                start.as_long_date_format(),
                end.as_long_date_format()
            )
        } else if start.month() != end.month() {
            format!(
                "{:02} {} - {}",
                start.day(),
                start.month_name(),
                end.as_long_date_format()
            )
        } else if start.day() != end.day() {
            format!("{:02} - {}", start.day(), end.as_long_date_format())
        } else {
            start.as_long_date_format()
        }
    }
}

/// Select the events around `current`: up to `max_past_future` before the
/// current run, the current run, and up to `max_past_future` after it
///
/// The current run is every event on the `current` story day.  If there are
/// none, the next event after it stands in as the (sole) current event.  The
/// events must be sorted by story day; if any event date is malformed the
/// whole selection fails.
pub fn select_event_window(
    events: &[StoryEvent],
    current: StoryDayIndex,
    interval: &JourneyInterval,
    span: &StorySpan,
    max_past_future: usize,
) -> Result<Vec<WindowedEvent>, JourneyError> {
    let indexes = story_day_indexes(events)?;
    let partition = partition_by_index(&indexes, current);

    // Fall back to the next event as the anchor
    let current_run = if partition.current.is_empty() && partition.current.start < events.len() {
        partition.current.start..partition.current.start + 1
    } else {
        partition.current.clone()
    };

    let first = current_run.start.saturating_sub(max_past_future);
    let last = current_run
        .end
        .saturating_add(max_past_future)
        .min(events.len());
    debug!(
        "Event window for story day {current}: {first}..{last} (current {current_run:?}) of {}",
        events.len()
    );

    let almost_one_day = span.almost_one_story_day_span(interval);
    let window = (first..last)
        .map(|position| {
            let fraction = span.fraction_of(indexes[position]);
            let start = map_fraction_to_real_date(fraction, interval);
            WindowedEvent {
                description: events[position].description.clone(),
                start,
                end: start + almost_one_day,
                is_current: current_run.contains(&position),
                is_first_current: position == current_run.start && !current_run.is_empty(),
            }
        })
        .collect();

    Ok(window)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{RealDate, ShireDate, ShireDateError, Span};

    fn event(year: i64, month: i64, day: i64, description: &str) -> StoryEvent {
        StoryEvent {
            date: RawShireDate {
                year,
                month: Some(month),
                day: Some(day),
                special_day: None,
            },
            description: description.to_string(),
        }
    }

    /// One event a day from 18 Halimath, with two on the 23rd
    fn events() -> Vec<StoryEvent> {
        vec![
            event(3018, 9, 18, "Gandalf escapes from Orthanc"),
            event(3018, 9, 19, "Gandalf comes to Edoras"),
            event(3018, 9, 20, "Gandalf gains entrance to Edoras"),
            event(3018, 9, 21, "Gandalf meets Shadowfax"),
            event(3018, 9, 22, "The Black Riders reach Sarn Ford"),
            event(3018, 9, 23, "Four Riders enter the Shire"),
            event(3018, 9, 23, "Frodo leaves Bag End"),
            event(3018, 9, 24, "Gandalf crosses the Isen"),
            event(3018, 9, 26, "The Old Forest"),
            event(3018, 9, 27, "Gandalf crosses Greyflood"),
            event(3018, 9, 28, "The Hobbits captured by a Barrow-wight"),
        ]
    }

    fn interval() -> JourneyInterval {
        JourneyInterval::from(
            RealDate::from_ymd(2023, 9, 23).unwrap(),
            RealDate::from_ymd(2024, 3, 25).unwrap(),
        )
        .unwrap()
    }

    fn index(year: i64, month: i64, day: i64) -> StoryDayIndex {
        ShireDate::from(year, month, day).unwrap().story_day_index()
    }

    fn descriptions(window: &[WindowedEvent]) -> Vec<&str> {
        window.iter().map(|event| event.description.as_str()).collect()
    }

    #[test]
    fn current_run() {
        let span = StorySpan::canonical();
        let window =
            select_event_window(&events(), index(3018, 9, 23), &interval(), &span, 2).unwrap();
        assert_eq!(
            descriptions(&window),
            vec![
                "Gandalf meets Shadowfax",
                "The Black Riders reach Sarn Ford",
                "Four Riders enter the Shire",
                "Frodo leaves Bag End",
                "Gandalf crosses the Isen",
                "The Old Forest",
            ]
        );
        let current: Vec<bool> = window.iter().map(|event| event.is_current).collect();
        assert_eq!(current, vec![false, false, true, true, false, false]);
        let first: Vec<bool> = window.iter().map(|event| event.is_first_current).collect();
        assert_eq!(first, vec![false, false, true, false, false, false]);
    }

    #[test]
    fn no_exact_match_anchors_on_next_event() {
        let span = StorySpan::canonical();
        let window =
            select_event_window(&events(), index(3018, 9, 25), &interval(), &span, 1).unwrap();
        assert_eq!(
            descriptions(&window),
            vec!["Gandalf crosses the Isen", "The Old Forest", "Gandalf crosses Greyflood"]
        );
        assert!(window[1].is_current && window[1].is_first_current);
        assert!(!window[0].is_current && !window[2].is_current);
    }

    #[test]
    fn window_bounds_at_the_edges() {
        let span = StorySpan::canonical();
        let events = events();

        // Before every event
        let window = select_event_window(&events, index(3018, 1, 1), &interval(), &span, 3).unwrap();
        assert_eq!(window.len(), 4);
        assert!(window[0].is_first_current);

        // After every event (nothing is current)
        let window = select_event_window(&events, index(3019, 1, 1), &interval(), &span, 3).unwrap();
        assert_eq!(window.len(), 3);
        assert!(window.iter().all(|event| !event.is_current));
        assert_eq!(window[2].description, "The Hobbits captured by a Barrow-wight");

        // Large windows are limited by the events available
        let window =
            select_event_window(&events, index(3018, 9, 20), &interval(), &span, 100).unwrap();
        assert_eq!(window.len(), events.len());
        let window =
            select_event_window(&events, index(3018, 9, 20), &interval(), &span, usize::MAX)
                .unwrap();
        assert_eq!(window.len(), events.len());
    }

    #[test]
    fn never_more_than_max_either_side() {
        let span = StorySpan::canonical();
        let events = events();
        for day in 15..=30 {
            for max in 0..4 {
                let window =
                    select_event_window(&events, index(3018, 9, day), &interval(), &span, max)
                        .unwrap();
                let first_current = window.iter().position(|event| event.is_current);
                let past = first_current.unwrap_or(window.len());
                let current = window.iter().filter(|event| event.is_current).count();
                assert!(past <= max);
                assert!(window.len() - past - current <= max);
                if day <= 28 {
                    assert!(current >= 1);
                }
            }
        }
    }

    #[test]
    fn real_date_ranges() {
        let span = StorySpan::canonical();

        // One real day per story day
        let start = RealDate::from_ymd(2023, 9, 23).unwrap();
        let interval = JourneyInterval::from(start, start.add_days(185)).unwrap();
        let window = select_event_window(&events(), index(3018, 9, 23), &interval, &span, 1).unwrap();

        let frodo = &window[2];
        assert_eq!(frodo.description, "Frodo leaves Bag End");
        assert_eq!(frodo.start, start.midnight());
        assert_eq!(frodo.end - frodo.start, Span::from_millis(86_399_000));
        assert_eq!(frodo.date_range(), "23 September 2023");

        let sarn_ford = &window[0];
        assert_eq!(sarn_ford.start.date(), start.add_days(-1));
    }

    #[test]
    fn date_range_formats() {
        let event = |start: &str, end: &str| WindowedEvent {
            description: String::new(),
            start: start.parse::<RealDate>().unwrap().midnight(),
            end: end.parse::<RealDate>().unwrap().midnight(),
            is_current: false,
            is_first_current: false,
        };
        assert_eq!(
            event("2023-09-23", "2023-09-24").date_range(),
            "23 - 24 September 2023"
        );
        assert_eq!(
            event("2023-09-30", "2023-10-01").date_range(),
            "30 September - 01 October 2023"
        );
        assert_eq!(
            event("2023-12-31", "2024-01-01").date_range(),
            "31 December 2023 - 01 January 2024"
        );
    }

    #[test]
    fn malformed_date_fails_the_whole_window() {
        let span = StorySpan::canonical();
        let mut events = events();
        events[9].date.month = Some(13);
        let result = select_event_window(&events, index(3018, 9, 23), &interval(), &span, 1);
        assert_eq!(
            result,
            Err(JourneyError::InvalidDate(ShireDateError::InvalidMonth(13)))
        );
    }

    #[test]
    fn idempotent() {
        let span = StorySpan::canonical();
        let events = events();
        let first = select_event_window(&events, index(3018, 9, 22), &interval(), &span, 3).unwrap();
        let second =
            select_event_window(&events, index(3018, 9, 22), &interval(), &span, 3).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
