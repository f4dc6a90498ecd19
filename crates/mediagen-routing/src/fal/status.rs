//! Fal queue status decoding.

use mediagen_types::{ProviderId, TaskState};
use serde_json::Value;

use crate::error::ParseError;

/// Map a Fal queue status string to the unified task state.
pub fn map_task_state(raw: &str) -> TaskState {
    match raw {
        "IN_QUEUE" => TaskState::Queued,
        "IN_PROGRESS" => TaskState::Processing,
        "COMPLETED" => TaskState::Succeeded,
        "FAILED" => TaskState::Failed,
        _ => TaskState::Processing,
    }
}

/// Decoded queue status response.
#[derive(Debug, Clone)]
pub struct FalQueueStatus {
    pub state: TaskState,
    pub queue_position: Option<u32>,
}

pub fn parse_queue_status(response: &Value) -> Result<FalQueueStatus, ParseError> {
    let state = response
        .get("status")
        .and_then(Value::as_str)
        .map(map_task_state)
        .ok_or_else(|| ParseError::MalformedResponse {
            provider: ProviderId::Fal,
            detail: "missing status field".to_string(),
        })?;

    Ok(FalQueueStatus {
        state,
        queue_position: response
            .get("queue_position")
            .and_then(Value::as_u64)
            .map(|p| p as u32),
    })
}
