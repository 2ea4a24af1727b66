// SPDX-License-Identifier: MIT

//!
//! *Part of the wider Journey with Frodo project*
//!
//! This crate maps Frodo's journey onto a real-world date range chosen by the
//! user.  It converts between three kinds of time: dates in the Shire
//! calendar, a linear count of story days, and the user's real dates.  From
//! those it works out where Frodo is "now" and which story events are nearby.
//!
//! Everything here is a pure function of its inputs.  The reference tables
//! (steps and events) and the current time are supplied by the caller.
//!
//! This crate aims to provide APIs for each type so that if a type is
//! instantiated, the developer can be sure it's valid.
//!

mod event;
mod interval;
mod journey_info;
mod position;
mod real_date;
mod search;
mod shire_date;
mod step;
mod story_span;

pub use event::*;
pub use interval::*;
pub use journey_info::*;
pub use position::*;
pub use real_date::*;
pub use search::*;
pub use shire_date::*;
pub use step::*;
pub use story_span::*;

use thiserror::Error;

/// Errors that can be returned when resolving a journey
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JourneyError {
    /// A reference record has a malformed Shire date
    #[error("Invalid Shire date: {0}")]
    InvalidDate(#[from] ShireDateError),

    #[error("Invalid journey dates: {0}")]
    InvalidInterval(#[from] IntervalError),

    /// The step reference table is empty
    #[error("There are no story steps")]
    NoStepsAvailable,

    #[error("Invalid journey title: {0}")]
    InvalidTitle(#[from] TitleError),

    #[error("Invalid date: {0}")]
    InvalidRealDate(#[from] RealDateError),
}

/// Mark that a reference record is dated in the Shire calendar
pub trait HasShireDate {
    /// Get the record's date, as loaded (i.e. possibly malformed)
    fn shire_date(&self) -> &RawShireDate;
}
