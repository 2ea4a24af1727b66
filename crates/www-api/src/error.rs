// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! API error response
//!

use crate::helpers::{ErrorMsg, api_error};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use frodo_journey_core::JourneyError;
use log::error;

/// Container for API errors.  Can be sent back to the client
#[derive(Debug)]
pub struct ApiError(pub (StatusCode, Json<ErrorMsg>));

impl ApiError {
    pub fn status(&self) -> StatusCode {
        self.0.0
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.0.into_response()
    }
}

impl From<JourneyError> for ApiError {
    fn from(value: JourneyError) -> Self {
        match value {
            // The reference data is at fault, not the request
            JourneyError::InvalidDate(_) | JourneyError::NoStepsAvailable => {
                error!("Reference data error: {value}");
                api_error(StatusCode::INTERNAL_SERVER_ERROR, value.to_string())
            }
            JourneyError::InvalidInterval(_)
            | JourneyError::InvalidTitle(_)
            | JourneyError::InvalidRealDate(_) => {
                api_error(StatusCode::BAD_REQUEST, value.to_string())
            }
        }
    }
}
