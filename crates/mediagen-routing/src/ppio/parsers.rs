//! PPIO response parsers.

use mediagen_types::{
    AudioResult, ImageResult, MediaKind, MediaSink, ProviderId, TaskState, VideoResult,
    join_result_urls,
};
use serde_json::Value;

use crate::error::ParseError;

/// Parse a PPIO image result: an `images` array of plain URL strings.
pub fn parse_image_response(response: &Value) -> Result<ImageResult, ParseError> {
    let urls: Vec<&str> = response
        .get("images")
        .and_then(Value::as_array)
        .map(|images| images.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    if urls.is_empty() {
        return Err(ParseError::no_result(ProviderId::Ppio, MediaKind::Image));
    }

    Ok(ImageResult {
        url: Some(join_result_urls(&urls)),
        status: Some(TaskState::Succeeded),
        created_at: Some(chrono::Utc::now()),
        ..Default::default()
    })
}

/// Parse a PPIO video result: `videos[0].video_url`, persisted through
/// the sink with a remote-URL fallback.
pub async fn parse_video_response(
    response: &Value,
    sink: &dyn MediaSink,
) -> Result<VideoResult, ParseError> {
    let video_url = response
        .get("videos")
        .and_then(Value::as_array)
        .and_then(|videos| videos.first())
        .and_then(|video| video.get("video_url"))
        .and_then(Value::as_str)
        .ok_or_else(|| ParseError::no_result(ProviderId::Ppio, MediaKind::Video))?;

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

/// Parse a PPIO audio result.
///
/// Minimax Speech returns `{audio: "url"}`; other audio models return
/// `{audios: [{audio_url: "url"}]}`. Both shapes are probed in that order.
pub fn parse_audio_response(response: &Value) -> Result<AudioResult, ParseError> {
    if let Some(url) = response.get("audio").and_then(Value::as_str) {
        return Ok(AudioResult {
            url: url.to_string(),
            ..Default::default()
        });
    }

    if let Some(url) = response
        .get("audios")
        .and_then(Value::as_array)
        .and_then(|audios| audios.first())
        .and_then(|audio| audio.get("audio_url"))
        .and_then(Value::as_str)
    {
        return Ok(AudioResult {
            url: url.to_string(),
            ..Default::default()
        });
    }

    Err(ParseError::no_result(ProviderId::Ppio, MediaKind::Audio))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mediagen_types::NoopMediaSink;
    use serde_json::json;

    #[test]
    fn test_image_urls_joined() {
        let response = json!({ "images": ["https://a/1.png", "https://a/2.png"] });
        let result = parse_image_response(&response).unwrap();
        assert_eq!(
            result.url.as_deref(),
            Some("https://a/1.png|||https://a/2.png")
        );
        assert!(result.created_at.is_some());
    }

    #[test]
    fn test_image_empty_is_no_result() {
        assert!(parse_image_response(&json!({ "images": [] })).is_err());
        assert!(parse_image_response(&json!({})).is_err());
    }

    #[tokio::test]
    async fn test_video_first_entry_with_fallback() {
        let response = json!({ "videos": [{ "video_url": "https://a/clip.mp4" }] });
        let result = parse_video_response(&response, &NoopMediaSink).await.unwrap();
        assert_eq!(result.url.as_deref(), Some("https://a/clip.mp4"));
        assert_eq!(result.status, Some(TaskState::Succeeded));
    }

    #[tokio::test]
    async fn test_video_missing_is_no_result() {
        let err = parse_video_response(&json!({ "videos": [] }), &NoopMediaSink)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("no video result"));
    }

    #[test]
    fn test_audio_shape_priority() {
        let result = parse_audio_response(&json!({ "audio": "https://a/tts.mp3" })).unwrap();
        assert_eq!(result.url, "https://a/tts.mp3");

        let result =
            parse_audio_response(&json!({ "audios": [{ "audio_url": "https://a/alt.mp3" }] }))
                .unwrap();
        assert_eq!(result.url, "https://a/alt.mp3");

        assert!(parse_audio_response(&json!({})).is_err());
    }
}
