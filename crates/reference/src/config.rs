// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! Journey with Frodo config, and the errors for everything read from disk
//!

use crate::Table;
use directories_next::ProjectDirs;
use frodo_journey_core::{DEFAULT_MAX_PAST_FUTURE, ShireDateError};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;

const PROJECT_QUALIFIER: &str = "org";
const ORG_NAME: &str = "JourneyWithFrodo";
const APPLICATION_NAME: &str = "JourneyWithFrodo";
const CONFIG_FILE_NAME: &str = "config.json";
const DEFAULT_DATA_DIR: &str = "data";

/// Where the API listens unless configured otherwise
pub const DEFAULT_ADDRESS: &str = "0.0.0.0:2408";

/// Errors that can occur when loading the reference tables or the config
#[derive(Debug, Error)]
pub enum ReferenceError {
    /// An error occured when reading a file
    #[error(transparent)]
    StdIo(#[from] std::io::Error),

    /// A JSON error occured (most likely when reading a JSON file)
    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),

    /// A row has a malformed Shire date
    #[error("The {table} table has an invalid date in row {row}: {source}")]
    InvalidDate {
        table: Table,
        row: usize,
        source: ShireDateError,
    },

    /// A row is dated before the one above it
    #[error("The {table} table is out of order at row {row}")]
    Unsorted { table: Table, row: usize },

    /// The step table is empty
    #[error("The steps table is empty")]
    NoSteps,

    /// The platform's config directory could not be found
    #[error("Could not find the config directory")]
    Config,
}

/// The config shared by the binaries (saved as JSON)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Dir holding `steps.json` and `events.json`
    data_dir: PathBuf,

    /// How many past (and future) events to show around the current one
    max_past_future: usize,

    /// Address the API listens on
    address: String,

    /// Dir of front end files to serve alongside the API (if any)
    static_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            max_past_future: DEFAULT_MAX_PAST_FUTURE,
            address: DEFAULT_ADDRESS.to_string(),
            static_dir: None,
        }
    }
}

impl Config {
    /// Load the config from a JSON file.  Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self, ReferenceError> {
        info!("Loading config from {path:?}");
        let reader = BufReader::new(File::open(path)?);
        let config: Config = serde_json::from_reader(reader)?;
        info!("Config loaded = {config:?}");
        Ok(config)
    }

    /// Load the config from `path` if given, otherwise from the default
    /// location if there is a config file there, otherwise use the defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ReferenceError> {
        if let Some(path) = path {
            return Config::load(path);
        }
        let default_path = default_config_file_path()?;
        if default_path.exists() {
            Config::load(&default_path)
        } else {
            info!("No config file found, using the defaults");
            Ok(Config::default())
        }
    }

    /// Save the config as JSON (creating the parent dir if needed)
    pub fn save(&self, path: &Path) -> Result<(), ReferenceError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        info!("Saving config to {path:?}");
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        info!("Config saved");
        Ok(())
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn set_data_dir(&mut self, data_dir: PathBuf) {
        self.data_dir = data_dir;
    }

    pub fn max_past_future(&self) -> usize {
        self.max_past_future
    }

    pub fn set_max_past_future(&mut self, max_past_future: usize) {
        self.max_past_future = max_past_future;
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn set_address(&mut self, address: String) {
        self.address = address;
    }

    pub fn static_dir(&self) -> Option<&Path> {
        self.static_dir.as_deref()
    }

    pub fn set_static_dir(&mut self, static_dir: Option<PathBuf>) {
        self.static_dir = static_dir;
    }
}

/// Get the project directories (e.g. where the config is stored)
#[cfg(debug_assertions)]
fn project_dirs() -> Result<ProjectDirs, ReferenceError> {
    ProjectDirs::from(
        PROJECT_QUALIFIER,
        ORG_NAME,
        &format!("{APPLICATION_NAME} Dev"),
    )
    .ok_or(ReferenceError::Config)
}

/// Get the project directories (e.g. where the config is stored)
#[cfg(not(debug_assertions))]
fn project_dirs() -> Result<ProjectDirs, ReferenceError> {
    ProjectDirs::from(PROJECT_QUALIFIER, ORG_NAME, APPLICATION_NAME).ok_or(ReferenceError::Config)
}

/// Get the path to the default config file
pub fn default_config_file_path() -> Result<PathBuf, ReferenceError> {
    let config_file = project_dirs()?.config_dir().join(CONFIG_FILE_NAME);
    info!("Config file path = {config_file:?}");
    Ok(config_file)
}

#[cfg(test)]
mod test {
    use super::*;
    use tempdir::TempDir;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.data_dir(), Path::new("data"));
        assert_eq!(config.max_past_future(), DEFAULT_MAX_PAST_FUTURE);
        assert_eq!(config.address(), DEFAULT_ADDRESS);
        assert_eq!(config.static_dir(), None);
    }

    #[test]
    fn partial_file_uses_defaults() {
        let dir = TempDir::new("frodo-journey-config").unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, r#"{"max_past_future": 2, "static_dir": "www"}"#).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.max_past_future(), 2);
        assert_eq!(config.static_dir(), Some(Path::new("www")));
        assert_eq!(config.address(), DEFAULT_ADDRESS);
    }

    #[test]
    fn save_and_load() {
        let dir = TempDir::new("frodo-journey-config").unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);

        let mut config = Config::default();
        config.set_data_dir(PathBuf::from("/srv/frodo"));
        config.set_address(String::from("127.0.0.1:8080"));
        config.save(&path).unwrap();

        assert_eq!(Config::load_or_default(Some(&path)).unwrap(), config);
    }

    #[test]
    fn explicit_path_must_exist() {
        let dir = TempDir::new("frodo-journey-config").unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        assert!(matches!(
            Config::load_or_default(Some(&path)),
            Err(ReferenceError::StdIo(_))
        ));
    }
}
