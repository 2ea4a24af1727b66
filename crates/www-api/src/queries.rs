// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! Query parameters for the journey request
//!

use crate::helpers::required_param;
use crate::{ApiError, MAX_LIMIT_PAST_FUTURE};
use frodo_journey_core::JourneyParams;
use std::collections::HashMap;

/// Validate the journey query params (`title`, `start`, `end` and the
/// optional `day`)
pub fn journey_params(params: &HashMap<String, String>) -> Result<JourneyParams, ApiError> {
    let title = required_param(params, "title")?;
    let start = required_param(params, "start")?;
    let end = required_param(params, "end")?;
    let day = params.get("day").map(String::as_str);
    Ok(JourneyParams::parse(title, start, end, day)?)
}

/// How many past & future events to return (`window`), capped
pub fn window(params: &HashMap<String, String>, default: usize) -> usize {
    params
        .get("window")
        .and_then(|window| window.parse().ok())
        .map_or(default, |value: usize| value.min(MAX_LIMIT_PAST_FUTURE))
}
