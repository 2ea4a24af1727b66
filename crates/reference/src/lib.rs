// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! *Part of the wider Journey with Frodo project*
//!
//! This library crate is responsible for everything read from disk:
//!
//! - Loads and validates the step and event reference tables (JSON)
//! - Loads the configuration shared by the binaries
//!
//! This crate makes use of the `core` crate for the journey types, and is
//! itself used by the `www-api` crate and the binaries.
//!

mod config;
mod tables;

pub use config::*;
pub use tables::*;

#[cfg(test)]
pub mod test {
    use std::path::PathBuf;

    /// The reference tables shipped with the project
    pub fn path_to_sample_data() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("data")
    }
}
