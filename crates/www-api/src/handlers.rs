// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! All handlers
//!

use crate::ApiState;
use axum::{Router, routing::get};
use std::sync::Arc;

mod journey;
mod tables;

/// The API v1 routes (all GET)
pub fn router() -> Router<Arc<ApiState>> {
    #[rustfmt::skip]
    let apiv1 = Router::new()
        .route("/journey", get(journey::handle_get_journey))
        .route("/steps",   get(tables::handle_get_steps))
        .route("/events",  get(tables::handle_get_events));
    apiv1
}
