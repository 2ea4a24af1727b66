// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! Setup shared by the Journey with Frodo binaries
//!

use frodo_journey_reference::{Config, ReferenceError};
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, LevelFilter, TermLogger, TerminalMode,
};
use std::path::{Path, PathBuf};

/// Log targets shown: the workspace crates, and the API's request tracing
pub const LOG_TARGETS: [&str; 2] = ["frodo_journey", "tower_http::trace"];

/// Setup logging (to stderr, so stdout is left for output)
pub fn init_logging(verbose: bool) -> Result<(), log::SetLoggerError> {
    let mut builder = ConfigBuilder::new();
    for target in LOG_TARGETS {
        builder.add_filter_allow_str(target);
    }
    let config_log = builder.build();

    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    CombinedLogger::init(vec![TermLogger::new(
        level,
        config_log,
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )])
}

/// Load the config, then let the command line override the data dir
pub fn load_config(
    config_path: Option<&Path>,
    data_dir: Option<PathBuf>,
) -> Result<Config, ReferenceError> {
    let mut config = Config::load_or_default(config_path)?;
    if let Some(data_dir) = data_dir {
        config.set_data_dir(data_dir);
    }
    Ok(config)
}
