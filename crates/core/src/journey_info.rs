// SPDX-License-Identifier: MIT

//!
//! The whole journey: validated input in, everything a front end shows out
//!

use crate::{
    ImageInfo, JourneyError, JourneyInterval, MapCoordinates, Reading, RealDate, StoryEvent,
    StorySpan, StoryStep, Timestamp, WindowedEvent, resolve_story_position, select_event_window,
};
use log::{debug, info, warn};
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Longest title accepted, in characters
pub const MAX_TITLE_CHARS: usize = 100;

/// Errors that can arise in relation to a [`Title`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TitleError {
    #[error("The title is required")]
    Empty,

    #[error("The title must be at most {max} characters")]
    TooLong { max: usize },
}

/// The title the user gives their journey, shown in the share quote.  Runs of
/// whitespace (including newlines) become a single space so it stays on one
/// line.
#[derive(derive_more::Display, Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(try_from = "String")]
pub struct Title(String);

impl Title {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Title {
    type Err = TitleError;
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let title = text.split_whitespace().collect::<Vec<_>>().join(" ");
        match title.chars().count() {
            0 => Err(TitleError::Empty),
            chars if chars > MAX_TITLE_CHARS => Err(TitleError::TooLong {
                max: MAX_TITLE_CHARS,
            }),
            _ => Ok(Title(title)),
        }
    }
}

impl TryFrom<String> for Title {
    type Error = TitleError;
    fn try_from(text: String) -> Result<Self, Self::Error> {
        text.parse()
    }
}

/// The user's choices: a title, the real dates to spread the journey over,
/// and optionally which day of it to show (otherwise "now" is used)
#[derive(Serialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct JourneyParams {
    title: Title,
    interval: JourneyInterval,
    day: Option<i64>,
}

impl JourneyParams {
    /// Create from already valid parts
    pub fn from(title: Title, interval: JourneyInterval, day: Option<i64>) -> Self {
        JourneyParams {
            title,
            interval,
            day,
        }
    }

    /// Validate the user's raw input.  Dates must be `YYYY-MM-DD`.  The day is
    /// read from its leading integer (so `3.7` and `3rd` are day 3); a day
    /// without one is ignored.
    pub fn parse(
        title: &str,
        start: &str,
        end: &str,
        day: Option<&str>,
    ) -> Result<Self, JourneyError> {
        let title: Title = title.parse()?;
        let start: RealDate = start.parse()?;
        let end: RealDate = end.parse()?;
        let interval = JourneyInterval::from(start, end)?;
        let day = day.and_then(|text| {
            let day = leading_integer(text);
            match day {
                None if !text.trim().is_empty() => {
                    warn!("Ignoring day `{text}` as it is not an integer")
                }
                Some(day) if day.to_string() != text.trim() => {
                    debug!("Reading day `{text}` as {day}")
                }
                _ => (),
            }
            day
        });
        Ok(JourneyParams::from(title, interval, day))
    }

    pub fn title(&self) -> &Title {
        &self.title
    }

    pub fn interval(&self) -> &JourneyInterval {
        &self.interval
    }

    pub fn day(&self) -> Option<i64> {
        self.day
    }
}

#[derive(Deserialize)]
struct RawJourneyParams {
    title: String,
    start: String,
    end: String,
    #[serde(default)]
    day: Option<String>,
}

impl<'de> Deserialize<'de> for JourneyParams {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawJourneyParams::deserialize(deserializer)?;
        JourneyParams::parse(&raw.title, &raw.start, &raw.end, raw.day.as_deref())
            .map_err(serde::de::Error::custom)
    }
}

/// Everything a front end needs to show the journey
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct JourneyInfo {
    pub title: Title,

    /// 1-based day of the journey, `None` if it hasn't started yet
    pub current_day: Option<i64>,

    /// Set (instead of `current_day`) when the journey hasn't started yet
    pub days_until_start: Option<i64>,

    pub total_days: i64,

    /// Not clamped (see [`JourneyInfo::progress_percent`])
    pub completion_fraction: f64,

    pub message: String,
    pub reading: Reading,
    pub map_coordinates: MapCoordinates,
    pub spotify_id: String,
    pub image: ImageInfo,

    /// Events around the current story day, in story order
    pub events: Vec<WindowedEvent>,
}

impl JourneyInfo {
    /// e.g. `Day 12 of 185`, or `3 days until the journey begins`
    pub fn day_message(&self) -> String {
        match (self.current_day, self.days_until_start) {
            (Some(current_day), _) => format!(
                "Day {} of {}",
                group_thousands(current_day),
                group_thousands(self.total_days)
            ),
            (None, days_until_start) => {
                let days_until_start = days_until_start.unwrap_or_default();
                let plural = if days_until_start > 1 { "s" } else { "" };
                format!(
                    "{} day{plural} until the journey begins",
                    group_thousands(days_until_start)
                )
            }
        }
    }

    /// Text to accompany a link to the journey
    pub fn share_quote(&self) -> String {
        format!(
            "{} - {} - See my progress on Journey with Frodo!",
            self.title,
            self.day_message()
        )
    }

    /// Progress as a percentage, clamped to 0-100 for display
    pub fn progress_percent(&self) -> f64 {
        (self.completion_fraction * 100.0).clamp(0.0, 100.0)
    }
}

/// Resolve the whole journey for `params` against the reference tables
pub fn journey_info(
    params: &JourneyParams,
    now: Timestamp,
    span: &StorySpan,
    steps: &[StoryStep],
    events: &[StoryEvent],
    max_past_future: usize,
) -> Result<JourneyInfo, JourneyError> {
    info!("Resolving journey `{}`", params.title);
    let resolved = resolve_story_position(&params.interval, params.day, now, span, steps)?;
    let events = select_event_window(
        events,
        resolved.story_day_index,
        &params.interval,
        span,
        max_past_future,
    )?;
    let step = resolved.active_step;

    Ok(JourneyInfo {
        title: params.title.clone(),
        current_day: resolved.position.current_day,
        days_until_start: resolved.position.days_until_start,
        total_days: resolved.position.total_days,
        completion_fraction: resolved.position.completion_fraction,
        message: step.message.clone(),
        reading: step.reading.clone(),
        map_coordinates: step.map_coordinates,
        spotify_id: step.spotify_id.clone(),
        image: step.image.clone(),
        events,
    })
}

/// The integer at the start of `text` (after any whitespace), ignoring
/// whatever follows it.  `None` if there isn't one or it doesn't fit.
fn leading_integer(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    let digits = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    if digits == 0 {
        return None;
    }
    let sign_len = text.len() - unsigned.len();
    text[..sign_len + digits].parse().ok()
}

/// e.g. 1234567 -> 1,234,567
fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (position, digit) in digits.chars().enumerate() {
        if position > 0 && (digits.len() - position) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{IntervalError, RawShireDate};

    fn shire(year: i64, month: i64, day: i64) -> RawShireDate {
        RawShireDate {
            year,
            month: Some(month),
            day: Some(day),
            special_day: None,
        }
    }

    fn steps() -> Vec<StoryStep> {
        let step = |date: RawShireDate, message: &str| StoryStep {
            date,
            message: message.to_string(),
            reading: Reading {
                volume: String::from("The Fellowship of the Ring"),
                book: Some(String::from("I")),
                chapter_number: Some(3),
                chapter_title: String::from("Three is Company"),
            },
            map_coordinates: MapCoordinates { y: 660, x: 821 },
            spotify_id: String::from("6zW80jVqLtgSF1yCtGHiiD"),
            image: ImageInfo {
                src: String::from("journey-images/frodo-shire.jpg"),
                copyright: String::from("© New Line Cinema"),
            },
        };
        vec![
            step(shire(3018, 9, 23), "Frodo leaves Bag End"),
            step(shire(3018, 10, 6), "Frodo is wounded on Weathertop"),
        ]
    }

    fn events() -> Vec<StoryEvent> {
        let event = |date: RawShireDate, description: &str| StoryEvent {
            date,
            description: description.to_string(),
        };
        vec![
            event(shire(3018, 9, 22), "The Black Riders reach Sarn Ford"),
            event(shire(3018, 9, 23), "Four Riders enter the Shire"),
            event(shire(3018, 9, 23), "Frodo leaves Bag End"),
            event(shire(3018, 9, 24), "Gandalf crosses the Isen"),
        ]
    }

    fn info_for(day: Option<&str>) -> JourneyInfo {
        let params = JourneyParams::parse("There and back", "2023-09-23", "2024-03-25", day).unwrap();
        journey_info(
            &params,
            Timestamp::from_millis(0),
            &StorySpan::canonical(),
            &steps(),
            &events(),
            5,
        )
        .unwrap()
    }

    #[test]
    fn parse() {
        let params = JourneyParams::parse(" Walk ", "2024-01-01", "2024-02-01", Some("3")).unwrap();
        assert_eq!(params.title().as_str(), "Walk");
        assert_eq!(params.interval().total_days(), 32);
        assert_eq!(params.day(), Some(3));

        // A day without a leading integer means "now"
        for day in ["x", "", " ", "-", "x3", "99999999999999999999"] {
            let params =
                JourneyParams::parse("Walk", "2024-01-01", "2024-02-01", Some(day)).unwrap();
            assert_eq!(params.day(), None, "day `{day}`");
        }

        // Otherwise the leading integer is used
        for (day, expected) in [("3.7", 3), ("3abc", 3), (" -2 days", -2), ("+5", 5)] {
            let params =
                JourneyParams::parse("Walk", "2024-01-01", "2024-02-01", Some(day)).unwrap();
            assert_eq!(params.day(), Some(expected), "day `{day}`");
        }

        assert_eq!(
            JourneyParams::parse(" ", "2024-01-01", "2024-02-01", None),
            Err(JourneyError::InvalidTitle(TitleError::Empty))
        );
        assert!(matches!(
            JourneyParams::parse("Walk", "2024-02-01", "2024-01-01", None),
            Err(JourneyError::InvalidInterval(IntervalError::EndBeforeStart { .. }))
        ));
        assert!(matches!(
            JourneyParams::parse("Walk", "1 Jan 2024", "2024-01-01", None),
            Err(JourneyError::InvalidRealDate(_))
        ));
    }

    #[test]
    fn title() {
        let title: Title = " Walking\n to   work ".parse().unwrap();
        assert_eq!(title.as_str(), "Walking to work");
        assert_eq!("".parse::<Title>(), Err(TitleError::Empty));
        assert_eq!(" \t ".parse::<Title>(), Err(TitleError::Empty));

        let longest = "a".repeat(MAX_TITLE_CHARS);
        assert!(longest.parse::<Title>().is_ok());
        assert_eq!(
            format!("{longest}b").parse::<Title>(),
            Err(TitleError::TooLong {
                max: MAX_TITLE_CHARS
            })
        );
        // Characters, not bytes
        assert!("é".repeat(MAX_TITLE_CHARS).parse::<Title>().is_ok());

        let title: Title = serde_json::from_str(r#"" Walk ""#).unwrap();
        assert_eq!(serde_json::to_string(&title).unwrap(), r#""Walk""#);
        assert!(serde_json::from_str::<Title>(r#""  ""#).is_err());
    }

    #[test]
    fn deserialise() {
        let params: JourneyParams = serde_json::from_str(
            r#"{"title": "Walk", "start": "2024-01-01", "end": "2024-01-31", "day": "7"}"#,
        )
        .unwrap();
        assert_eq!(params.day(), Some(7));

        let invalid = serde_json::from_str::<JourneyParams>(
            r#"{"title": "Walk", "start": "2024-01-31", "end": "2024-01-01"}"#,
        );
        assert!(invalid.is_err());
    }

    #[test]
    fn first_day_of_the_journey() {
        let info = info_for(Some("1"));
        assert_eq!(info.current_day, Some(1));
        assert_eq!(info.days_until_start, None);
        assert_eq!(info.total_days, 185);
        assert!((info.completion_fraction - 0.5 / 185.0).abs() < 1e-12);
        assert!((info.completion_fraction - 0.0027).abs() < 0.0001);
        assert_eq!(info.message, "Frodo leaves Bag End");

        let current: Vec<&str> = info
            .events
            .iter()
            .filter(|event| event.is_current)
            .map(|event| event.description.as_str())
            .collect();
        assert_eq!(current, vec!["Four Riders enter the Shire", "Frodo leaves Bag End"]);
        assert_eq!(info.events.len(), 4);

        assert_eq!(info.day_message(), "Day 1 of 185");
        assert_eq!(
            info.share_quote(),
            "There and back - Day 1 of 185 - See my progress on Journey with Frodo!"
        );
    }

    #[test]
    fn before_the_journey() {
        let info = info_for(Some("-2"));
        assert_eq!(info.current_day, None);
        assert_eq!(info.days_until_start, Some(3));
        assert_eq!(info.day_message(), "3 days until the journey begins");
        assert_eq!(info.progress_percent(), 0.0);

        let info = info_for(Some("0"));
        assert_eq!(info.day_message(), "1 day until the journey begins");
    }

    #[test]
    fn after_the_journey() {
        let info = info_for(Some("1000"));
        assert_eq!(info.day_message(), "Day 1,000 of 185");
        assert_eq!(info.progress_percent(), 100.0);
        assert_eq!(info.message, "Frodo is wounded on Weathertop");
    }

    #[test]
    fn extreme_days() {
        let info = info_for(Some("-9223372036854775808"));
        assert_eq!(info.current_day, None);
        assert_eq!(info.days_until_start, Some(i64::MAX));
        assert_eq!(info.progress_percent(), 0.0);
        assert_eq!(info.message, "Frodo leaves Bag End");
        assert!(info.events[0].is_first_current);

        let info = info_for(Some("1000000000000000"));
        assert_eq!(info.current_day, Some(1_000_000_000_000_000));
        assert_eq!(info.progress_percent(), 100.0);
        assert_eq!(info.message, "Frodo is wounded on Weathertop");
        assert!(info.events.iter().all(|event| !event.is_current));
        assert!(serde_json::to_string(&info).is_ok());
    }

    #[test]
    fn large_window() {
        let params =
            JourneyParams::parse("There and back", "2023-09-23", "2024-03-25", Some("1")).unwrap();
        let info = journey_info(
            &params,
            Timestamp::from_millis(0),
            &StorySpan::canonical(),
            &steps(),
            &events(),
            usize::MAX,
        )
        .unwrap();
        assert_eq!(info.events.len(), events().len());
    }

    #[test]
    fn grouping() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
        assert_eq!(group_thousands(-12_345), "-12,345");
    }

    #[test]
    fn serialise() {
        let info = info_for(Some("1"));
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["title"], "There and back");
        assert_eq!(json["current_day"], 1);
        assert!(json["days_until_start"].is_null());
        assert_eq!(json["events"][1]["is_first_current"], true);
        assert_eq!(json["events"][1]["start"], "2023-09-23T00:00:00.000Z");
    }
}
