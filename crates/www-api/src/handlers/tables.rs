// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! Web API for the reference tables as loaded
//!

use crate::ApiState;
use axum::Json;
use axum::extract::State;
use frodo_journey_core::{StoryEvent, StoryStep};
use std::sync::Arc;

/// Handle a request to fetch every step
pub async fn handle_get_steps(State(state): State<Arc<ApiState>>) -> Json<Vec<StoryStep>> {
    Json(state.tables.steps().to_vec())
}

/// Handle a request to fetch every event
pub async fn handle_get_events(State(state): State<Arc<ApiState>>) -> Json<Vec<StoryEvent>> {
    Json(state.tables.events().to_vec())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test::sample_tables;

    #[tokio::test]
    async fn tables_as_loaded() {
        let tables = sample_tables();
        let state = Arc::new(ApiState {
            tables: tables.clone(),
            max_past_future: 5,
        });

        let Json(steps) = handle_get_steps(State(state.clone())).await;
        assert_eq!(steps, tables.steps());

        let Json(events) = handle_get_events(State(state)).await;
        assert_eq!(events, tables.events());
    }
}
