//! KIE task status decoding.

use mediagen_types::{ProviderId, TaskState};
use serde_json::Value;

use crate::error::ParseError;

/// Map a KIE record state string to the unified task state.
///
/// Unknown states count as processing so pollers keep waiting instead of
/// failing on new vendor states.
pub fn map_task_state(raw: &str) -> TaskState {
    match raw {
        "waiting" | "queuing" => TaskState::Queued,
        "generating" => TaskState::Processing,
        "success" => TaskState::Succeeded,
        "fail" => TaskState::Failed,
        _ => TaskState::Processing,
    }
}

/// Decoded recordInfo payload.
#[derive(Debug, Clone)]
pub struct KieTaskRecord {
    pub state: TaskState,
    /// Parsed `resultJson` payload, present on success.
    pub result: Option<Value>,
    /// Vendor failure message, present on failure.
    pub failure: Option<String>,
}

/// Decode the `data` object of a recordInfo response.
///
/// The vendor double-encodes results: `resultJson` is a JSON string whose
/// decoded object feeds the response parsers.
pub fn parse_task_record(data: &Value) -> Result<KieTaskRecord, ParseError> {
    let state = data
        .get("state")
        .and_then(Value::as_str)
        .map(map_task_state)
        .ok_or_else(|| ParseError::MalformedResponse {
            provider: ProviderId::Kie,
            detail: "missing state field".to_string(),
        })?;

    let result = match data.get("resultJson").and_then(Value::as_str) {
        Some(raw) if !raw.is_empty() => {
            Some(
                serde_json::from_str(raw).map_err(|e| ParseError::MalformedResponse {
                    provider: ProviderId::Kie,
                    detail: format!("invalid resultJson: {e}"),
                })?,
            )
        }
        _ => None,
    };

    let failure = data
        .get("failMsg")
        .and_then(Value::as_str)
        .map(str::to_string);

    Ok(KieTaskRecord {
        state,
        result,
        failure,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_state_mapping() {
        assert_eq!(map_task_state("waiting"), TaskState::Queued);
        assert_eq!(map_task_state("queuing"), TaskState::Queued);
        assert_eq!(map_task_state("generating"), TaskState::Processing);
        assert_eq!(map_task_state("success"), TaskState::Succeeded);
        assert_eq!(map_task_state("fail"), TaskState::Failed);
        assert_eq!(map_task_state("anything-new"), TaskState::Processing);
    }

    #[test]
    fn test_parse_success_record() {
        let data = json!({
            "state": "success",
            "resultJson": "{\"resultUrls\":[\"https://a/1.png\"]}",
        });
        let record = parse_task_record(&data).unwrap();
        assert_eq!(record.state, TaskState::Succeeded);
        assert_eq!(
            record.result.unwrap()["resultUrls"][0],
            "https://a/1.png"
        );
    }

    #[test]
    fn test_parse_failed_record() {
        let data = json!({ "state": "fail", "failMsg": "content rejected" });
        let record = parse_task_record(&data).unwrap();
        assert_eq!(record.state, TaskState::Failed);
        assert_eq!(record.failure.as_deref(), Some("content rejected"));
    }

    #[test]
    fn test_malformed_result_json_is_an_error() {
        let data = json!({ "state": "success", "resultJson": "{nope" });
        assert!(parse_task_record(&data).is_err());
    }

    #[test]
    fn test_missing_state_is_an_error() {
        assert!(parse_task_record(&json!({})).is_err());
    }
}
