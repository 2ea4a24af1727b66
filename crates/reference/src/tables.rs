// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! Load & validate the step and event reference tables from JSON
//!

use crate::ReferenceError;
use frodo_journey_core::{
    HasShireDate, JourneyError, JourneyInfo, JourneyParams, StoryEvent, StorySpan, StoryStep,
    Timestamp, first_unsorted, journey_info, to_story_day_index,
};
use log::{info, warn};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// File name of the step table within a data dir
pub const STEPS_FILE_NAME: &str = "steps.json";

/// File name of the event table within a data dir
pub const EVENTS_FILE_NAME: &str = "events.json";

/// The two reference tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Steps,
    Events,
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Table::Steps => write!(f, "steps"),
            Table::Events => write!(f, "events"),
        }
    }
}

/// The validated reference tables.  Every date is well formed, each table is
/// sorted by story day, and there is at least one step.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceTables {
    steps: Vec<StoryStep>,
    events: Vec<StoryEvent>,
}

impl ReferenceTables {
    /// Create the tables if they're valid
    pub fn from(steps: Vec<StoryStep>, events: Vec<StoryEvent>) -> Result<Self, ReferenceError> {
        if steps.is_empty() {
            return Err(ReferenceError::NoSteps);
        }
        check_table(Table::Steps, &steps)?;
        check_table(Table::Events, &events)?;
        Ok(ReferenceTables { steps, events })
    }

    /// Load `steps.json` and `events.json` from the dir
    pub fn load(data_dir: &Path) -> Result<Self, ReferenceError> {
        info!("Loading reference tables from {data_dir:?}");
        let steps: Vec<StoryStep> = read_table(&data_dir.join(STEPS_FILE_NAME))?;
        let events: Vec<StoryEvent> = read_table(&data_dir.join(EVENTS_FILE_NAME))?;
        info!("Loaded {} steps and {} events", steps.len(), events.len());
        ReferenceTables::from(steps, events)
    }

    pub fn steps(&self) -> &[StoryStep] {
        &self.steps
    }

    pub fn events(&self) -> &[StoryEvent] {
        &self.events
    }

    /// Resolve the journey for `params` over the canonical story span
    pub fn journey_info(
        &self,
        params: &JourneyParams,
        now: Timestamp,
        max_past_future: usize,
    ) -> Result<JourneyInfo, JourneyError> {
        journey_info(
            params,
            now,
            &StorySpan::canonical(),
            &self.steps,
            &self.events,
            max_past_future,
        )
    }
}

/// Check every date in the table converts, and that the rows are in order
fn check_table<T: HasShireDate>(table: Table, rows: &[T]) -> Result<(), ReferenceError> {
    let mut indexes = Vec::with_capacity(rows.len());
    for (row, record) in rows.iter().enumerate() {
        let index = to_story_day_index(record.shire_date())
            .map_err(|source| ReferenceError::InvalidDate { table, row, source })?;
        indexes.push(index);
    }
    match first_unsorted(&indexes) {
        Some(row) => Err(ReferenceError::Unsorted { table, row }),
        None => Ok(()),
    }
}

/// Read a JSON array of rows.  An empty file is an empty table.
fn read_table<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, ReferenceError> {
    let metadata = std::fs::metadata(path)?;
    if metadata.len() == 0 {
        warn!("No rows to load: {path:?} is empty");
        return Ok(Vec::new());
    }
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}
