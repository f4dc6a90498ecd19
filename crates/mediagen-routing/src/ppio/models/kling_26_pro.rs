//! PPIO Kling 2.6 Pro video route.

use async_trait::async_trait;
use mediagen_types::{BuiltRequest, GenerateVideoParams, ProviderId, VideoMode};
use serde_json::json;

use crate::error::RouteError;
use crate::registry::{ModelRoute, RouteContext};
use crate::util::required_prompt;

const PROMPT_MAX_LEN: usize = 2500;

/// Kling 2.6 Pro: text/image-to-video and motion control.
///
/// Motion control only takes public URLs, so the reference video and image
/// are pushed through the Fal CDN first; an upload failure fails the
/// request.
#[derive(Debug)]
pub struct PpioKling26ProRoute;

#[async_trait]
impl ModelRoute for PpioKling26ProRoute {
    fn name(&self) -> &'static str {
        "ppio-kling-2.6-pro"
    }

    fn provider(&self) -> ProviderId {
        ProviderId::Ppio
    }

    fn matches(&self, model_id: &str) -> bool {
        model_id == "kling-2.6-pro"
    }

    async fn build_video_request(
        &self,
        params: &GenerateVideoParams,
        ctx: &RouteContext<'_>,
    ) -> Result<BuiltRequest, RouteError> {
        let prompt = required_prompt(&params.prompt, PROMPT_MAX_LEN, "video generation")?;
        let mode = params.mode.unwrap_or_default();
        let aspect_ratio = params.aspect_ratio.as_deref().unwrap_or("16:9");

        if mode == VideoMode::MotionControl {
            let Some(video) = params.video.as_deref() else {
                return Err(RouteError::invalid("motion control requires a video"));
            };
            let Some(image) = params.images.first() else {
                return Err(RouteError::invalid("motion control requires an image"));
            };

            let uploader = ctx.require_fal_uploader()?;
            let video_url = uploader.upload(video).await.map_err(RouteError::Upload)?;
            let image_url = uploader.upload(image).await.map_err(RouteError::Upload)?;

            let orientation = params
                .extra_str("character_orientation")
                .unwrap_or("video");
            let keep_original_sound = params.extra_bool("keep_original_sound").unwrap_or(true);

            return Ok(BuiltRequest::with_endpoint(
                "/async/kling-v2.6-pro-motion-control",
                json!({
                    "prompt": prompt,
                    "video": video_url,
                    "image": image_url,
                    "character_orientation": orientation,
                    "keep_original_sound": keep_original_sound,
                }),
            ));
        }

        let mut request_data = json!({
            "prompt": prompt,
            "duration": params.duration.unwrap_or(5),
            "sound": params.audio.unwrap_or(false),
            "aspect_ratio": aspect_ratio,
        });

        if let Some(cfg_scale) = params.cfg_scale {
            request_data["cfg_scale"] = json!(cfg_scale);
        }

        let endpoint = if let Some(first) = params.images.first() {
            request_data["image"] = json!(first);
            "/async/kling-v2.6-pro-i2v"
        } else {
            "/async/kling-v2.6-pro-t2v"
        };

        Ok(BuiltRequest::with_endpoint(endpoint, request_data))
    }
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
                Ok(format!("https://cdn.test/{}", media.len()))
            }
        }
    }

    fn base_params() -> GenerateVideoParams {
        GenerateVideoParams {
            prompt: "street market in motion".into(),
            model: "kling-2.6-pro".into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_text_and_image_to_video_endpoints() {
        let ctx = RouteContext::default();

        let built = PpioKling26ProRoute
            .build_video_request(&base_params(), &ctx)
            .await
            .unwrap();
        assert_eq!(built.endpoint.as_deref(), Some("/async/kling-v2.6-pro-t2v"));
        assert_eq!(built.request_data["sound"], false);
        assert_eq!(built.request_data["duration"], 5);

        let mut params = base_params();
        params.images = vec!["https://x.test/a.png".into()];
        params.cfg_scale = Some(0.7);
        let built = PpioKling26ProRoute
            .build_video_request(&params, &ctx)
            .await
            .unwrap();
        assert_eq!(built.endpoint.as_deref(), Some("/async/kling-v2.6-pro-i2v"));
        assert_eq!(built.request_data["cfg_scale"], 0.7);
        assert_eq!(built.request_data["image"], "https://x.test/a.png");
    }

    #[tokio::test]
    async fn test_motion_control_uploads_media() {
        let mut params = base_params();
        params.mode = Some(VideoMode::MotionControl);
        params.video = Some("data:video/mp4;base64,QUJD".into());
        params.images = vec!["https://x.test/a.png".into()];

        let ctx = RouteContext::with_fal_uploader(&StubUploader);
        let built = PpioKling26ProRoute
            .build_video_request(&params, &ctx)
            .await
            .unwrap();
        assert_eq!(
            built.endpoint.as_deref(),
            Some("/async/kling-v2.6-pro-motion-control")
        );
        assert!(
            built.request_data["video"]
                .as_str()
                .unwrap()
                .starts_with("https://cdn.test/")
        );
        assert_eq!(built.request_data["image"], "https://x.test/a.png");
        assert_eq!(built.request_data["keep_original_sound"], true);
    }

    #[tokio::test]
    async fn test_motion_control_without_uploader_fails() {
        let mut params = base_params();
        params.mode = Some(VideoMode::MotionControl);
        params.video = Some("data:video/mp4;base64,QUJD".into());
        params.images = vec!["https://x.test/a.png".into()];

        let err = PpioKling26ProRoute
            .build_video_request(&params, &RouteContext::default())
            .await
            .unwrap_err();
        assert!(matches!(err, RouteError::UploaderUnavailable(_)));
    }

    #[tokio::test]
    async fn test_motion_control_requires_inputs() {
        let mut params = base_params();
        params.mode = Some(VideoMode::MotionControl);
        let err = PpioKling26ProRoute
            .build_video_request(&params, &RouteContext::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("requires a video"));
    }
}
