//! KIE response parsers.
//!
//! Successful recordInfo payloads carry a `resultUrls` string array; the
//! parsers normalize that into the shared result types, persisting media
//! through the injected sink when possible.

use futures::future::try_join_all;
use mediagen_types::{
    ImageResult, MediaKind, MediaSink, ProviderId, TaskState, VideoResult, join_result_urls,
};
use serde_json::Value;

use crate::error::ParseError;

fn result_urls(response: &Value) -> Option<Vec<&str>> {
    let urls: Vec<&str> = response
        .get("resultUrls")?
        .as_array()?
        .iter()
        .filter_map(Value::as_str)
        .collect();
    Some(urls)
}

/// Parse a KIE image result.
///
/// All returned images are saved through the sink; if any save fails the
/// whole batch falls back to the remote URLs.
pub async fn parse_image_response(
    response: &Value,
    sink: &dyn MediaSink,
) -> Result<ImageResult, ParseError> {
    let urls = result_urls(response)
        .filter(|urls| !urls.is_empty())
        .ok_or_else(|| ParseError::no_result(ProviderId::Kie, MediaKind::Image))?;

    match try_join_all(urls.iter().map(|url| sink.save_media(url, MediaKind::Image))).await {
        Ok(saved) => {
            let display_urls: Vec<&str> = saved.iter().map(|s| s.url.as_str()).collect();
            let paths: Vec<&str> = saved
                .iter()
                .filter_map(|s| s.file_path.as_deref())
                .collect();
            Ok(ImageResult {
                url: Some(join_result_urls(&display_urls)),
                file_path: (paths.len() == saved.len()).then(|| join_result_urls(&paths)),
                status: Some(TaskState::Succeeded),
                ..Default::default()
            })
        }
        Err(e) => {
            tracing::warn!("local image save failed, falling back to remote URLs: {e}");
            Ok(ImageResult {
                url: Some(join_result_urls(&urls)),
                status: Some(TaskState::Succeeded),
                ..Default::default()
            })
        }
    }
}

/// Parse a KIE video result; only the first URL is meaningful.
pub async fn parse_video_response(
    response: &Value,
    sink: &dyn MediaSink,
) -> Result<VideoResult, ParseError> {
    let urls = result_urls(response)
        .filter(|urls| !urls.is_empty())
        .ok_or_else(|| ParseError::no_result(ProviderId::Kie, MediaKind::Video))?;

    let video_url = urls[0];
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

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mediagen_types::{NoopMediaSink, SavedMedia};
    use serde_json::json;

    struct SavingSink;

    #[async_trait]
    impl MediaSink for SavingSink {
        async fn save_media(&self, url: &str, kind: MediaKind) -> anyhow::Result<SavedMedia> {
            Ok(SavedMedia {
                url: format!("local://{url}"),
                file_path: Some(format!("/tmp/{}/{url}", kind.as_str())),
            })
        }
    }

    #[tokio::test]
    async fn test_image_multi_result_joined() {
        let response = json!({ "resultUrls": ["https://a/1.png", "https://a/2.png"] });
        let result = parse_image_response(&response, &NoopMediaSink).await.unwrap();
        assert_eq!(result.url.as_deref(), Some("https://a/1.png|||https://a/2.png"));
        assert_eq!(result.status, Some(TaskState::Succeeded));
        assert!(result.file_path.is_none());
    }

    #[tokio::test]
    async fn test_image_saved_locally() {
        let response = json!({ "resultUrls": ["https://a/1.png"] });
        let result = parse_image_response(&response, &SavingSink).await.unwrap();
        assert_eq!(result.url.as_deref(), Some("local://https://a/1.png"));
        assert!(result.file_path.is_some());
    }

    #[tokio::test]
    async fn test_image_empty_is_no_result() {
        let err = parse_image_response(&json!({ "resultUrls": [] }), &NoopMediaSink)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("no image result"));

        let err = parse_image_response(&json!({ "other": 1 }), &NoopMediaSink)
            .await
            .unwrap_err();
        assert!(matches!(err, ParseError::NoResult { .. }));
    }

    #[tokio::test]
    async fn test_video_save_failure_falls_back_to_remote() {
        let response = json!({ "resultUrls": ["https://a/clip.mp4"] });
        let result = parse_video_response(&response, &NoopMediaSink).await.unwrap();
        assert_eq!(result.url.as_deref(), Some("https://a/clip.mp4"));
        assert!(result.file_path.is_none());
    }

    #[tokio::test]
    async fn test_video_uses_first_url_only() {
        let response = json!({ "resultUrls": ["https://a/1.mp4", "https://a/2.mp4"] });
        let result = parse_video_response(&response, &SavingSink).await.unwrap();
        assert_eq!(result.url.as_deref(), Some("local://https://a/1.mp4"));
    }
}
