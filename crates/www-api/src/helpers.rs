// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! Generic helpers
//!

use crate::ApiError;
use axum::{Json, http::StatusCode};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Serialize, Debug)]
pub struct ErrorMsg {
    pub error_msg: String,
}

/// Build an error response
pub fn api_error(status: StatusCode, error_msg: impl Into<String>) -> ApiError {
    ApiError((
        status,
        Json(ErrorMsg {
            error_msg: error_msg.into(),
        }),
    ))
}

/// Get a query param that must be present
pub fn required_param<'a>(
    params: &'a HashMap<String, String>,
    key: &str,
) -> Result<&'a str, ApiError> {
    params.get(key).map(String::as_str).ok_or_else(|| {
        api_error(
            StatusCode::BAD_REQUEST,
            format!("No '{key}' in query params"),
        )
    })
}
