//! Fal Veo 3.1 video route.

use async_trait::async_trait;
use mediagen_geometry::{match_closest_aspect_ratio, parse_aspect_ratio};
use mediagen_types::{BuiltRequest, GenerateVideoParams, ProviderId, VideoMode};
use serde_json::json;

use crate::error::RouteError;
use crate::registry::{ModelRoute, RouteContext};

const MODEL_ID: &str = "fal-ai/veo3.1";
const PRESET_RATIOS: &[&str] = &["16:9", "9:16", "1:1"];

/// Veo 3.1: endpoint per mode, with fast variants.
///
/// - text-image-to-video: `fal-ai/veo3.1[/fast][/image-to-video]`
/// - start-end-frame:     `fal-ai/veo3.1[/fast]/first-last-frame-to-video`
/// - reference-to-video:  `fal-ai/veo3.1/reference-to-video` (no fast tier)
///
/// Status queries always use the bare model ID.
#[derive(Debug)]
pub struct FalVeo31Route;

impl FalVeo31Route {
    fn resolve_auto_ratio(params: &GenerateVideoParams) -> String {
        match params.extra_f64("source_aspect_ratio") {
            Some(measured) => {
                match_closest_aspect_ratio(measured, PRESET_RATIOS, |r| parse_aspect_ratio(r))
                    .map(|r| (*r).to_string())
                    .unwrap_or_else(|| "16:9".to_string())
            }
            None => "16:9".to_string(),
        }
    }
}

#[async_trait]
impl ModelRoute for FalVeo31Route {
    fn name(&self) -> &'static str {
        "fal-veo-3.1"
    }

    fn provider(&self) -> ProviderId {
        ProviderId::Fal
    }

    fn matches(&self, model_id: &str) -> bool {
        model_id.contains("veo3.1") || model_id.contains("veo-3.1")
    }

    async fn build_video_request(
        &self,
        params: &GenerateVideoParams,
        _ctx: &RouteContext<'_>,
    ) -> Result<BuiltRequest, RouteError> {
        let mode = params.mode.unwrap_or_default();
        let images = &params.images;
        let has_images = !images.is_empty();
        let fast = params.fast_mode.unwrap_or(false);
        let duration = params.duration.unwrap_or(8);

        let endpoint = match mode {
            VideoMode::StartEndFrame => {
                if images.len() < 2 {
                    return Err(RouteError::invalid(
                        "start-end-frame mode requires at least two images",
                    ));
                }
                if fast {
                    "fal-ai/veo3.1/fast/first-last-frame-to-video"
                } else {
                    "fal-ai/veo3.1/first-last-frame-to-video"
                }
            }
            VideoMode::ReferenceToVideo => {
                if images.is_empty() {
                    return Err(RouteError::invalid(
                        "reference-to-video mode requires at least one image",
                    ));
                }
                "fal-ai/veo3.1/reference-to-video"
            }
            VideoMode::TextImageToVideo => match (has_images, fast) {
                (true, true) => "fal-ai/veo3.1/fast/image-to-video",
                (true, false) => "fal-ai/veo3.1/image-to-video",
                (false, true) => "fal-ai/veo3.1/fast",
                (false, false) => "fal-ai/veo3.1",
            },
            other => return Err(RouteError::UnsupportedMode(other.to_string())),
        };

        let mut request_data = json!({
            "prompt": params.prompt,
            "duration": format!("{duration}s"),
        });

        let mut aspect_ratio = params.aspect_ratio.clone();
        if aspect_ratio.as_deref() == Some("auto") && has_images {
            aspect_ratio = Some(Self::resolve_auto_ratio(params));
        }
        if let Some(ratio) = aspect_ratio.filter(|r| r != "auto") {
            request_data["aspect_ratio"] = json!(ratio);
        }

        if let Some(resolution) = &params.resolution {
            request_data["resolution"] = json!(resolution);
        }

        if let Some(enhance) = params.extra_bool("enhance_prompt") {
            request_data["enhance_prompt"] = json!(enhance);
        }

        if let Some(generate_audio) = params.audio {
            request_data["generate_audio"] = json!(generate_audio);
        }

        if let Some(auto_fix) = params.extra_bool("auto_fix") {
            request_data["auto_fix"] = json!(auto_fix);
        }

        if has_images {
            match mode {
                VideoMode::StartEndFrame => {
                    request_data["first_frame_url"] = json!(images[0]);
                    request_data["last_frame_url"] = json!(images[1]);
                }
                VideoMode::ReferenceToVideo => {
                    request_data["image_urls"] = json!(images);
                }
                _ => {
                    request_data["image_url"] = json!(images[0]);
                }
            }
        }

        Ok(BuiltRequest {
            endpoint: Some(endpoint.to_string()),
            model_id: Some(MODEL_ID.to_string()),
            request_data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_params() -> GenerateVideoParams {
        GenerateVideoParams {
            prompt: "hot air balloons at sunrise".into(),
            model: "fal-ai-veo-3.1".into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_endpoint_matrix() {
        let ctx = RouteContext::default();
        let one = vec!["https://x.test/a.png".to_string()];
        let two = vec![
            "https://x.test/a.png".to_string(),
            "https://x.test/b.png".to_string(),
        ];
        let cases: &[(VideoMode, &[String], bool, &str)] = &[
            (VideoMode::TextImageToVideo, &[], false, "fal-ai/veo3.1"),
            (VideoMode::TextImageToVideo, &[], true, "fal-ai/veo3.1/fast"),
            (
                VideoMode::TextImageToVideo,
                &one,
                false,
                "fal-ai/veo3.1/image-to-video",
            ),
            (
                VideoMode::TextImageToVideo,
                &one,
                true,
                "fal-ai/veo3.1/fast/image-to-video",
            ),
            (
                VideoMode::StartEndFrame,
                &two,
                false,
                "fal-ai/veo3.1/first-last-frame-to-video",
            ),
            (
                VideoMode::StartEndFrame,
                &two,
                true,
                "fal-ai/veo3.1/fast/first-last-frame-to-video",
            ),
            (
                VideoMode::ReferenceToVideo,
                &two,
                false,
                "fal-ai/veo3.1/reference-to-video",
            ),
        ];

        for (mode, images, fast, expected) in cases {
            let mut params = base_params();
            params.mode = Some(*mode);
            params.images = images.to_vec();
            params.fast_mode = Some(*fast);
            let built = FalVeo31Route
                .build_video_request(&params, &ctx)
                .await
                .unwrap();
            assert_eq!(built.endpoint.as_deref(), Some(*expected), "{mode} fast={fast}");
            assert_eq!(built.model_id.as_deref(), Some(MODEL_ID));
        }
    }

    #[tokio::test]
    async fn test_duration_rendered_with_seconds_suffix() {
        let built = FalVeo31Route
            .build_video_request(&base_params(), &RouteContext::default())
            .await
            .unwrap();
        assert_eq!(built.request_data["duration"], "8s");
    }

    #[tokio::test]
    async fn test_start_end_frame_urls() {
        let mut params = base_params();
        params.mode = Some(VideoMode::StartEndFrame);
        params.images = vec![
            "https://x.test/a.png".into(),
            "https://x.test/b.png".into(),
        ];
        let built = FalVeo31Route
            .build_video_request(&params, &RouteContext::default())
            .await
            .unwrap();
        assert_eq!(built.request_data["first_frame_url"], "https://x.test/a.png");
        assert_eq!(built.request_data["last_frame_url"], "https://x.test/b.png");
    }

    #[tokio::test]
    async fn test_auto_ratio_matched_from_measurement() {
        let mut params = base_params();
        params.images = vec!["https://x.test/a.png".into()];
        params.aspect_ratio = Some("auto".into());
        params
            .extra
            .insert("source_aspect_ratio".into(), json!(0.57));
        let built = FalVeo31Route
            .build_video_request(&params, &RouteContext::default())
            .await
            .unwrap();
        assert_eq!(built.request_data["aspect_ratio"], "9:16");
    }

    #[tokio::test]
    async fn test_auto_ratio_without_measurement_defaults() {
        let mut params = base_params();
        params.images = vec!["https://x.test/a.png".into()];
        params.aspect_ratio = Some("auto".into());
        let built = FalVeo31Route
            .build_video_request(&params, &RouteContext::default())
            .await
            .unwrap();
        assert_eq!(built.request_data["aspect_ratio"], "16:9");
    }

    #[tokio::test]
    async fn test_start_end_frame_requires_two_images() {
        let mut params = base_params();
        params.mode = Some(VideoMode::StartEndFrame);
        params.images = vec!["https://x.test/a.png".into()];
        assert!(
            FalVeo31Route
                .build_video_request(&params, &RouteContext::default())
                .await
                .is_err()
        );
    }
}
