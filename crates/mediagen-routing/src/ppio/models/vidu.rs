//! PPIO Vidu Q1 video route.

use async_trait::async_trait;
use mediagen_types::{BuiltRequest, GenerateVideoParams, ProviderId, VideoMode};
use serde_json::json;

use crate::error::RouteError;
use crate::registry::{ModelRoute, RouteContext};

const MAX_REFERENCE_IMAGES: usize = 7;

/// Vidu Q1: text/image, start-end-frame and reference modes.
///
/// Style and aspect ratio only apply to text-to-video; reference mode
/// keeps the aspect ratio but drops style.
#[derive(Debug)]
pub struct PpioViduQ1Route;

#[async_trait]
impl ModelRoute for PpioViduQ1Route {
    fn name(&self) -> &'static str {
        "ppio-vidu-q1"
    }

    fn provider(&self) -> ProviderId {
        ProviderId::Ppio
    }

    fn matches(&self, model_id: &str) -> bool {
        model_id.contains("vidu-q1")
    }

    async fn build_video_request(
        &self,
        params: &GenerateVideoParams,
        _ctx: &RouteContext<'_>,
    ) -> Result<BuiltRequest, RouteError> {
        let mode = params.mode.unwrap_or_default();
        let images = &params.images;

        let mut request_data = json!({
            "prompt": params.prompt,
            "duration": params.duration.unwrap_or(5),
            "resolution": params.resolution.as_deref().unwrap_or("1080p"),
            "movement_amplitude": params.movement_amplitude.as_deref().unwrap_or("auto"),
            "bgm": params.bgm.unwrap_or(false),
        });

        if let Some(seed) = params.seed {
            request_data["seed"] = json!(seed);
        }

        let endpoint = match mode {
            VideoMode::TextImageToVideo => {
                if let Some(first) = images.first() {
                    request_data["images"] = json!([first]);
                    "/async/vidu-q1-img2video"
                } else {
                    request_data["aspect_ratio"] =
                        json!(params.aspect_ratio.as_deref().unwrap_or("16:9"));
                    request_data["style"] = json!(params.style.as_deref().unwrap_or("general"));
                    "/async/vidu-q1-text2video"
                }
            }
            VideoMode::StartEndFrame => {
                if images.len() < 2 {
                    return Err(RouteError::invalid(
                        "start-end-frame mode requires at least two images",
                    ));
                }
                request_data["images"] = json!([&images[0], &images[1]]);
                "/async/vidu-q1-startend2video"
            }
            VideoMode::ReferenceToVideo => {
                if images.is_empty() || images.len() > MAX_REFERENCE_IMAGES {
                    return Err(RouteError::invalid(
                        "reference-to-video mode requires 1 to 7 images",
                    ));
                }
                if params.prompt.trim().is_empty() {
                    return Err(RouteError::invalid(
                        "reference-to-video mode requires a non-empty prompt",
                    ));
                }
                let refs: Vec<&String> = images.iter().take(MAX_REFERENCE_IMAGES).collect();
                request_data["images"] = json!(refs);
                request_data["aspect_ratio"] =
                    json!(params.aspect_ratio.as_deref().unwrap_or("16:9"));
                "/async/vidu-q1-reference2video"
            }
            other => return Err(RouteError::UnsupportedMode(other.to_string())),
        };

        Ok(BuiltRequest::with_endpoint(endpoint, request_data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_params() -> GenerateVideoParams {
        GenerateVideoParams {
            prompt: "autumn leaves falling".into(),
            model: "vidu-q1".into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_text_to_video_gets_style_and_ratio() {
        let built = PpioViduQ1Route
            .build_video_request(&base_params(), &RouteContext::default())
            .await
            .unwrap();
        assert_eq!(built.endpoint.as_deref(), Some("/async/vidu-q1-text2video"));
        assert_eq!(built.request_data["style"], "general");
        assert_eq!(built.request_data["aspect_ratio"], "16:9");
        assert_eq!(built.request_data["movement_amplitude"], "auto");
    }

    #[tokio::test]
    async fn test_image_to_video_takes_first_image_only() {
        let mut params = base_params();
        params.images = vec![
            "https://x.test/a.png".into(),
            "https://x.test/b.png".into(),
        ];
        let built = PpioViduQ1Route
            .build_video_request(&params, &RouteContext::default())
            .await
            .unwrap();
        assert_eq!(built.endpoint.as_deref(), Some("/async/vidu-q1-img2video"));
        assert_eq!(built.request_data["images"], json!(["https://x.test/a.png"]));
        assert!(built.request_data.get("style").is_none());
        assert!(built.request_data.get("aspect_ratio").is_none());
    }

    #[tokio::test]
    async fn test_start_end_frame_needs_two_images() {
        let mut params = base_params();
        params.mode = Some(VideoMode::StartEndFrame);
        params.images = vec!["https://x.test/a.png".into()];
        assert!(
            PpioViduQ1Route
                .build_video_request(&params, &RouteContext::default())
                .await
                .is_err()
        );

        params.images.push("https://x.test/b.png".into());
        let built = PpioViduQ1Route
            .build_video_request(&params, &RouteContext::default())
            .await
            .unwrap();
        assert_eq!(
            built.endpoint.as_deref(),
            Some("/async/vidu-q1-startend2video")
        );
    }

    #[tokio::test]
    async fn test_reference_mode_bounds_and_prompt() {
        let mut params = base_params();
        params.mode = Some(VideoMode::ReferenceToVideo);
        assert!(
            PpioViduQ1Route
                .build_video_request(&params, &RouteContext::default())
                .await
                .is_err()
        );

        params.images = vec!["https://x.test/a.png".into()];
        params.prompt = " ".into();
        let err = PpioViduQ1Route
            .build_video_request(&params, &RouteContext::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("non-empty prompt"));

        params.prompt = "woodland spirit".into();
        let built = PpioViduQ1Route
            .build_video_request(&params, &RouteContext::default())
            .await
            .unwrap();
        assert_eq!(
            built.endpoint.as_deref(),
            Some("/async/vidu-q1-reference2video")
        );
        assert_eq!(built.request_data["aspect_ratio"], "16:9");
    }

    #[tokio::test]
    async fn test_unsupported_mode() {
        let mut params = base_params();
        params.mode = Some(VideoMode::VideoEdit);
        let err = PpioViduQ1Route
            .build_video_request(&params, &RouteContext::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("video-edit"));
    }
}
