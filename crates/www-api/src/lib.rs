// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! *Part of the wider Journey with Frodo project*
//!
//! This crate provides the web API.  Given a title and the real dates a user
//! wants to spread Frodo's journey over, it says where Frodo is today, what
//! to read, and which events are nearby.  The reference tables can also be
//! fetched as they are.
//!
//! A front end may optionally be served from the same address.
//!

mod consts;
mod error;
mod handlers;
mod helpers;
mod queries;

pub use consts::*;
pub use error::*;

use axum::Router;
use frodo_journey_reference::ReferenceTables;
use log::info;
use std::path::Path;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// What every handler has access to
#[derive(Debug)]
pub struct ApiState {
    pub tables: ReferenceTables,

    /// Default number of past (and future) events per journey response
    pub max_past_future: usize,
}

/// Set up the API (and the static front end, if there is one)
pub fn prepare_api_router(
    tables: ReferenceTables,
    max_past_future: usize,
    static_dir: Option<&Path>,
) -> Router {
    // Get the router
    let apiv1 = handlers::router();

    // Add the state
    let apiv1 = apiv1.with_state(Arc::new(ApiState {
        tables,
        max_past_future,
    }));

    // Add URL path prefix
    let api = Router::new().nest("/api/v1", apiv1);

    // Serve the front end for everything else
    let api = match static_dir {
        Some(static_dir) => {
            info!("Serving static files from {static_dir:?}");
            api.fallback_service(ServeDir::new(static_dir))
        }
        None => api,
    };

    // Request tracing goes out through `log` (target `tower_http::trace`)
    let trace = TraceLayer::new_for_http()
        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    api.layer(trace)
}
