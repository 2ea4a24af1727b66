// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! Web API for a user's journey
//!

use crate::queries::{journey_params, window};
use crate::{ApiError, ApiState};
use axum::Json;
use axum::extract::{Query, State};
use frodo_journey_core::{JourneyInfo, Timestamp};
use log::debug;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

/// The journey plus the text a front end shows with it
#[derive(Serialize, Debug)]
pub struct JourneyResponse {
    #[serde(flatten)]
    pub info: JourneyInfo,
    pub day_message: String,
    pub share_quote: String,
    pub progress_percent: f64,
}

impl From<JourneyInfo> for JourneyResponse {
    fn from(info: JourneyInfo) -> Self {
        JourneyResponse {
            day_message: info.day_message(),
            share_quote: info.share_quote(),
            progress_percent: info.progress_percent(),
            info,
        }
    }
}

/// Handle a request to resolve a journey
/// (`?title=..&start=YYYY-MM-DD&end=YYYY-MM-DD[&day=N][&window=N]`)
pub async fn handle_get_journey(
    State(state): State<Arc<ApiState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<JourneyResponse>, ApiError> {
    debug!("Journey requested with {params:?}");
    let journey = journey_params(&params)?;
    let max_past_future = window(&params, state.max_past_future);
    let info = state
        .tables
        .journey_info(&journey, Timestamp::now(), max_past_future)?;
    Ok(Json(info.into()))
}
