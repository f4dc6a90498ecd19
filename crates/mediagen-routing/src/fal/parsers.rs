//! Fal response parsers.
//!
//! The official client wraps results in a `data` envelope
//! (`{data: {...}, requestId}`); the raw queue API returns the inner
//! object directly. Both shapes are accepted, envelope first.

use mediagen_types::{
    ImageResult, MediaKind, MediaSink, ProviderId, TaskState, VideoResult, join_result_urls,
};
use serde_json::Value;

use crate::error::ParseError;

fn unwrap_envelope(response: &Value) -> &Value {
    response.get("data").unwrap_or(response)
}

/// Parse a Fal image result: `images[].url`.
pub fn parse_image_response(response: &Value) -> Result<ImageResult, ParseError> {
    let data = unwrap_envelope(response);

    let urls: Vec<&str> = data
        .get("images")
        .and_then(Value::as_array)
        .map(|images| {
            images
                .iter()
                .filter_map(|img| img.get("url").and_then(Value::as_str))
                .collect()
        })
        .unwrap_or_default();

    if urls.is_empty() {
        return Err(ParseError::no_result(ProviderId::Fal, MediaKind::Image));
    }

    Ok(ImageResult {
        url: Some(join_result_urls(&urls)),
        status: Some(TaskState::Succeeded),
        created_at: Some(chrono::Utc::now()),
        ..Default::default()
    })
}

/// Parse a Fal video result: `video.url`, persisted through the sink with
/// a remote-URL fallback.
pub async fn parse_video_response(
    response: &Value,
    sink: &dyn MediaSink,
) -> Result<VideoResult, ParseError> {
    let data = unwrap_envelope(response);

    let video_url = data
        .get("video")
        .and_then(|video| video.get("url"))
        .and_then(Value::as_str)
        .ok_or_else(|| ParseError::no_result(ProviderId::Fal, MediaKind::Video))?;

    match sink.save_media(video_url, MediaKind::Video).await {
        Ok(saved) => Ok(VideoResult {
            url: Some(saved.url),
            file_path: saved.file_path,
            status: Some(TaskState::Succeeded),
            ..Default::default()
        }),
        Err(e) => {
            tracing::warn!("local video save failed, falling back to remote URL: {e}");
            Ok(VideoResult {
                url: Some(video_url.to_string()),
                status: Some(TaskState::Succeeded),
                ..Default::default()
            })
        }
    }
}
