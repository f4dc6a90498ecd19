//! PPIO Kling O1 video route.

use async_trait::async_trait;
use mediagen_types::{BuiltRequest, GenerateVideoParams, ProviderId, VideoMode};
use serde_json::json;

use crate::error::RouteError;
use crate::registry::{ModelRoute, RouteContext};
use crate::util::required_prompt;

const PROMPT_MAX_LEN: usize = 2500;
const MAX_REFERENCE_IMAGES: usize = 7;
const MAX_EDIT_IMAGES: usize = 4;

/// Kling O1: four modes over three endpoints.
///
/// - text-image-to-video splits into t2v/i2v on image count, the second
///   image becoming the end frame;
/// - start-end-frame demands two images;
/// - reference-to-video and video-edit demand an uploaded video, pushed
///   through the Fal CDN when it is not already a URL.
#[derive(Debug)]
pub struct PpioKlingO1Route;

#[async_trait]
impl ModelRoute for PpioKlingO1Route {
    fn name(&self) -> &'static str {
        "ppio-kling-o1"
    }

    fn provider(&self) -> ProviderId {
        ProviderId::Ppio
    }

    fn matches(&self, model_id: &str) -> bool {
        model_id == "kling-o1"
    }

    async fn build_video_request(
        &self,
        params: &GenerateVideoParams,
        ctx: &RouteContext<'_>,
    ) -> Result<BuiltRequest, RouteError> {
        let prompt = required_prompt(&params.prompt, PROMPT_MAX_LEN, "video generation")?;
        let mode = params.mode.unwrap_or_default();
        let images = &params.images;
        let aspect_ratio = params.aspect_ratio.as_deref().unwrap_or("16:9");
        let keep_audio = params.extra_bool("keep_audio").unwrap_or(true);

        let mut request_data = json!({
            "prompt": prompt,
            "duration": params.duration.unwrap_or(5),
        });

        let endpoint = match mode {
            VideoMode::TextImageToVideo => {
                if let Some(first) = images.first() {
                    request_data["image"] = json!(first);
                    if let Some(second) = images.get(1) {
                        request_data["last_image"] = json!(second);
                    }
                    request_data["aspect_ratio"] = json!(aspect_ratio);
                    "/async/kling-o1-i2v"
                } else {
                    request_data["aspect_ratio"] = json!(aspect_ratio);
                    "/async/kling-o1-t2v"
                }
            }
            VideoMode::StartEndFrame => {
                if images.len() < 2 {
                    return Err(RouteError::invalid(
                        "start-end-frame mode requires two images",
                    ));
                }
                request_data["image"] = json!(images[0]);
                request_data["last_image"] = json!(images[1]);
                request_data["aspect_ratio"] = json!(aspect_ratio);
                "/async/kling-o1-i2v"
            }
            VideoMode::ReferenceToVideo => {
                let video_url = upload_video(params, ctx).await?;
                request_data["video"] = json!(video_url);
                request_data["aspect_ratio"] = json!(aspect_ratio);
                request_data["keep_original_sound"] = json!(keep_audio);
                if !images.is_empty() {
                    let refs: Vec<&String> =
                        images.iter().take(MAX_REFERENCE_IMAGES).collect();
                    request_data["images"] = json!(refs);
                }
                "/async/kling-o1-ref2v"
            }
            VideoMode::VideoEdit => {
                let video_url = upload_video(params, ctx).await?;
                request_data["video"] = json!(video_url);
                request_data["fast_mode"] = json!(params.fast_mode.unwrap_or(false));
                request_data["keep_original_sound"] = json!(keep_audio);
                if !images.is_empty() {
                    let refs: Vec<&String> = images.iter().take(MAX_EDIT_IMAGES).collect();
                    request_data["images"] = json!(refs);
                }
                request_data["aspect_ratio"] = json!(aspect_ratio);
                "/async/kling-o1-video-edit"
            }
            other => return Err(RouteError::UnsupportedMode(other.to_string())),
        };

        Ok(BuiltRequest::with_endpoint(endpoint, request_data))
    }
}

async fn upload_video(
    params: &GenerateVideoParams,
    ctx: &RouteContext<'_>,
) -> Result<String, RouteError> {
    let Some(video) = params.video.as_deref() else {
        return Err(RouteError::invalid(format!(
            "{} mode requires a video",
            params.mode.unwrap_or_default()
        )));
    };
    let uploader = ctx.require_fal_uploader()?;
    uploader.upload(video).await.map_err(RouteError::Upload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mediagen_upload::MediaUploader;

    struct StubUploader;

    #[async_trait]
    impl MediaUploader for StubUploader {
        fn id(&self) -> &str {
            "stub"
        }

        async fn upload(&self, media: &str) -> anyhow::Result<String> {
            if media.starts_with("http") {
                Ok(media.to_string())
            } else {
                Ok("https://cdn.test/video.mp4".to_string())
            }
        }
    }

    fn base_params() -> GenerateVideoParams {
        GenerateVideoParams {
            prompt: "time-lapse of clouds".into(),
            model: "kling-o1".into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_text_image_split_and_end_frame() {
        let ctx = RouteContext::default();

        let built = PpioKlingO1Route
            .build_video_request(&base_params(), &ctx)
            .await
            .unwrap();
        assert_eq!(built.endpoint.as_deref(), Some("/async/kling-o1-t2v"));

        let mut params = base_params();
        params.images = vec![
            "https://x.test/a.png".into(),
            "https://x.test/b.png".into(),
        ];
        let built = PpioKlingO1Route
            .build_video_request(&params, &ctx)
            .await
            .unwrap();
        assert_eq!(built.endpoint.as_deref(), Some("/async/kling-o1-i2v"));
        assert_eq!(built.request_data["last_image"], "https://x.test/b.png");
    }

    #[tokio::test]
    async fn test_start_end_frame_requires_two_images() {
        let mut params = base_params();
        params.mode = Some(VideoMode::StartEndFrame);
        params.images = vec!["https://x.test/a.png".into()];
        let err = PpioKlingO1Route
            .build_video_request(&params, &RouteContext::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("two images"));
    }

    #[tokio::test]
    async fn test_reference_mode_uploads_and_caps_images() {
        let mut params = base_params();
        params.mode = Some(VideoMode::ReferenceToVideo);
        params.video = Some("data:video/mp4;base64,QUJD".into());
        params.images = (0..9).map(|i| format!("https://x.test/{i}.png")).collect();

        let ctx = RouteContext::with_fal_uploader(&StubUploader);
        let built = PpioKlingO1Route
            .build_video_request(&params, &ctx)
            .await
            .unwrap();
        assert_eq!(built.endpoint.as_deref(), Some("/async/kling-o1-ref2v"));
        assert_eq!(built.request_data["video"], "https://cdn.test/video.mp4");
        assert_eq!(built.request_data["images"].as_array().unwrap().len(), 7);
        assert_eq!(built.request_data["keep_original_sound"], true);
    }

    #[tokio::test]
    async fn test_video_edit_mode() {
        let mut params = base_params();
        params.mode = Some(VideoMode::VideoEdit);
        params.video = Some("https://x.test/clip.mp4".into());
        params.fast_mode = Some(true);
        params.images = (0..6).map(|i| format!("https://x.test/{i}.png")).collect();

        let ctx = RouteContext::with_fal_uploader(&StubUploader);
        let built = PpioKlingO1Route
            .build_video_request(&params, &ctx)
            .await
            .unwrap();
        assert_eq!(
            built.endpoint.as_deref(),
            Some("/async/kling-o1-video-edit")
        );
        assert_eq!(built.request_data["fast_mode"], true);
        assert_eq!(built.request_data["images"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_video_modes_require_video() {
        let mut params = base_params();
        params.mode = Some(VideoMode::ReferenceToVideo);
        let err = PpioKlingO1Route
            .build_video_request(&params, &RouteContext::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("requires a video"));
    }

    #[tokio::test]
    async fn test_unsupported_mode_named_in_error() {
        let mut params = base_params();
        params.mode = Some(VideoMode::MotionControl);
        let err = PpioKlingO1Route
            .build_video_request(&params, &RouteContext::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("motion-control"));
    }
}
