// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! The Journey with Frodo www API
//!

use clap::Parser;
use frodo_journey_bins::{init_logging, load_config};
use frodo_journey_reference::{ReferenceTables, default_config_file_path};
use frodo_journey_www_api::prepare_api_router;
use std::path::PathBuf;

#[macro_use]
extern crate log;

/// Journey with Frodo www API entry point (serve the www JSON API)
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();
    init_logging(args.verbose)?;

    // A config file that is about to be written needn't exist yet
    let config_path = args
        .config
        .as_deref()
        .filter(|path| path.exists() || !args.save_config);
    let mut config = load_config(config_path, args.data)?;
    if let Some(address) = args.address {
        config.set_address(address);
    }
    if args.static_dir.is_some() {
        config.set_static_dir(args.static_dir);
    }

    if args.save_config {
        let path = match args.config {
            Some(path) => path,
            None => default_config_file_path()?,
        };
        config.save(&path)?;
        println!("Saved config to {}", path.display());
        return Ok(());
    }

    // Fail now rather than on the first request
    let tables = ReferenceTables::load(config.data_dir())?;

    // Get the router
    let api_router = prepare_api_router(tables, config.max_past_future(), config.static_dir());

    // Bind the listener for new connections
    let listener = tokio::net::TcpListener::bind(config.address()).await?;

    // Print the address
    info!("Listening on http://{}", config.address());

    // Serve the server
    axum::serve(listener, api_router).await?;

    Ok(())
}

/// Journey with Frodo CLI args using [clap]
#[derive(Parser, Debug)]
#[command(
    version,
    about = "Journey with Frodo www API server",
    after_help = "This is intended for use when deploying to a server"
)]
pub struct Cli {
    /// Path to the config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Path to the dir holding the reference tables
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Address to listen on (e.g. 0.0.0.0:2408)
    #[arg(long)]
    pub address: Option<String>,

    /// Dir of front end files to serve
    #[arg(long)]
    pub static_dir: Option<PathBuf>,

    /// Save the config (with the other options applied) to `--config`, or
    /// the default location, then exit
    #[arg(long)]
    pub save_config: bool,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,
}
