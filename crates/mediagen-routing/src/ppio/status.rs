//! PPIO task status decoding.

use mediagen_types::{ProviderId, TaskState};
use serde_json::Value;

use crate::error::ParseError;

/// Map a PPIO `TASK_STATUS_*` string to the unified task state.
///
/// The API spells success both `SUCCEED` and `SUCCEEDED` depending on the
/// endpoint; both are accepted.
pub fn map_task_state(raw: &str) -> TaskState {
    match raw {
        "TASK_STATUS_QUEUED" => TaskState::Queued,
        "TASK_STATUS_PROCESSING" => TaskState::Processing,
        "TASK_STATUS_SUCCEED" | "TASK_STATUS_SUCCEEDED" => TaskState::Succeeded,
        "TASK_STATUS_FAILED" => TaskState::Failed,
        _ => TaskState::Processing,
    }
}

/// Decoded task-result envelope.
#[derive(Debug, Clone)]
pub struct PpioTaskStatus {
    pub task_id: String,
    pub state: TaskState,
    pub progress_percent: Option<u32>,
    /// Vendor failure reason, present on failure.
    pub reason: Option<String>,
}

/// Decode the `task` object of a task-result response.
pub fn parse_task_status(response: &Value) -> Result<PpioTaskStatus, ParseError> {
    let task = response
        .get("task")
        .ok_or_else(|| ParseError::MalformedResponse {
            provider: ProviderId::Ppio,
            detail: "missing task object".to_string(),
        })?;

    let task_id = task
        .get("task_id")
        .and_then(Value::as_str)
        .ok_or_else(|| ParseError::MalformedResponse {
            provider: ProviderId::Ppio,
            detail: "missing task_id".to_string(),
        })?
        .to_string();

    let state = task
        .get("status")
        .and_then(Value::as_str)
        .map(map_task_state)
        .ok_or_else(|| ParseError::MalformedResponse {
            provider: ProviderId::Ppio,
            detail: "missing status".to_string(),
        })?;

    Ok(PpioTaskStatus {
        task_id,
        state,
        progress_percent: task
            .get("progress_percent")
            .and_then(Value::as_u64)
            .map(|p| p as u32),
        reason: task
            .get("reason")
            .and_then(Value::as_str)
            .map(str::to_string),
    })
}
