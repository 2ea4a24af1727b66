// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! Print where Frodo is on a journey
//!

use clap::Parser;
use frodo_journey_bins::{init_logging, load_config};
use frodo_journey_core::{JourneyInfo, JourneyParams, Timestamp};
use frodo_journey_reference::ReferenceTables;
use std::path::PathBuf;

#[macro_use]
extern crate log;

/// Journey entry point
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();
    init_logging(args.verbose)?;

    let mut config = load_config(args.config.as_deref(), args.data)?;
    if let Some(window) = args.window {
        config.set_max_past_future(window);
    }

    let tables = ReferenceTables::load(config.data_dir())?;
    let params = JourneyParams::parse(&args.title, &args.start, &args.end, args.day.as_deref())?;
    let info = tables.journey_info(&params, Timestamp::now(), config.max_past_future())?;
    info!("Resolved journey `{}`", info.title);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        print_journey(&info);
    }

    Ok(())
}

/// Print the journey as text
fn print_journey(info: &JourneyInfo) {
    println!("{}", info.title);
    println!("{} ({:.1}%)", info.day_message(), info.progress_percent());
    println!();
    println!("{}", info.message);
    println!("Read: {}", info.reading);
    println!(
        "Map: ({}, {})",
        info.map_coordinates.y, info.map_coordinates.x
    );
    println!("Image: {} ({})", info.image.src, info.image.copyright);
    println!("Spotify: {}", info.spotify_id);

    if !info.events.is_empty() {
        println!();
        println!("Events:");
    }
    for event in &info.events {
        let marker = if event.is_current { "*" } else { " " };
        println!("{marker} {}: {}", event.date_range(), event.description);
    }
}

/// Journey CLI args using [clap]
#[derive(Parser, Debug)]
#[command(
    version,
    about = "Show where Frodo is on a journey spread over your own dates"
)]
pub struct Cli {
    /// The journey's title
    #[arg(long)]
    pub title: String,

    /// The first real day of the journey (YYYY-MM-DD)
    #[arg(long)]
    pub start: String,

    /// The last real day of the journey (YYYY-MM-DD)
    #[arg(long)]
    pub end: String,

    /// Which day of the journey to show (1 is the first), otherwise today
    #[arg(long, allow_hyphen_values = true)]
    pub day: Option<String>,

    /// How many past (and future) events to show
    #[arg(long)]
    pub window: Option<usize>,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Path to the config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Path to the dir holding the reference tables
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,
}
