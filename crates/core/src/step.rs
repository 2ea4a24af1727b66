// SPDX-License-Identifier: MIT

//!
//! Story steps: what is happening to Frodo from a given story day onwards
//!

use crate::{HasShireDate, RawShireDate};
use serde::{Deserialize, Serialize};

/// One row of the step reference table
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct StoryStep {
    /// The Shire date the step starts on
    #[serde(flatten)]
    pub date: RawShireDate,

    /// Narrative text
    pub message: String,

    /// Where to read about it
    pub reading: Reading,

    /// Frodo's position on the map image
    pub map_coordinates: MapCoordinates,

    /// Music track
    pub spotify_id: String,

    /// Illustration
    pub image: ImageInfo,
}

impl HasShireDate for StoryStep {
    fn shire_date(&self) -> &RawShireDate {
        &self.date
    }
}

/// A reference to a chapter of the book
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Reading {
    pub volume: String,
    #[serde(default)]
    pub book: Option<String>,
    #[serde(default)]
    pub chapter_number: Option<u32>,
    pub chapter_title: String,
}

/// e.g. The Fellowship of the Ring - Book I - Chapter 1: A Long Expected Party
impl std::fmt::Display for Reading {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.volume)?;
        if let Some(book) = &self.book {
            write!(f, " - Book {book}")?;
        }
        if let Some(chapter_number) = self.chapter_number {
            write!(f, " - Chapter {chapter_number}")?;
        }
        write!(f, ": {}", self.chapter_title)
    }
}

/// Pixel position (from the top left) on the map image
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MapCoordinates {
    pub y: i32,
    pub x: i32,
}

/// An image and its copyright notice
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub src: String,
    pub copyright: String,
}
