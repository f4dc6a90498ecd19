//! ModelScope response parsers.
//!
//! The generation endpoint answers in one of three shapes, probed in
//! order: a queued task (`task_id`), the current synchronous shape
//! (`images[].url`), or the legacy `output_images` string array.

use mediagen_types::{ImageResult, MediaKind, ProviderId, TaskState, join_result_urls};
use serde_json::Value;

use crate::error::ParseError;

pub fn parse_image_response(response: &Value) -> Result<ImageResult, ParseError> {
    if let Some(task_id) = response.get("task_id").and_then(Value::as_str) {
        return Ok(ImageResult {
            task_id: Some(task_id.to_string()),
            status: Some(TaskState::Queued),
            ..Default::default()
        });
    }

    if let Some(images) = response.get("images").and_then(Value::as_array) {
        let urls: Vec<&str> = images
            .iter()
            .filter_map(|img| img.get("url").and_then(Value::as_str))
            .collect();
        if !urls.is_empty() {
            return Ok(ImageResult {
                url: Some(join_result_urls(&urls)),
                status: Some(TaskState::Succeeded),
                ..Default::default()
            });
        }
    }

    if let Some(urls) = response.get("output_images").and_then(Value::as_array) {
        let urls: Vec<&str> = urls.iter().filter_map(Value::as_str).collect();
        if !urls.is_empty() {
            return Ok(ImageResult {
                url: Some(join_result_urls(&urls)),
                status: Some(TaskState::Succeeded),
                ..Default::default()
            });
        }
    }

    Err(ParseError::no_result(
        ProviderId::ModelScope,
        MediaKind::Image,
    ))
}
