//! PPIO Kling 2.5 Turbo video route.

use async_trait::async_trait;
use mediagen_types::{BuiltRequest, GenerateVideoParams, ModelTier, ProviderId};
use serde_json::json;

use crate::error::RouteError;
use crate::registry::{ModelRoute, RouteContext};
use crate::util::{required_prompt, strip_data_uri_prefix};

const PROMPT_MAX_LEN: usize = 2500;
const VALID_ASPECT_RATIOS: &[&str] = &["16:9", "9:16", "1:1"];

/// Kling 2.5 Turbo: text/image-to-video with clamped cfg scale.
///
/// The image endpoint takes bare base64, not a data URI.
#[derive(Debug)]
pub struct PpioKling25TurboRoute;

#[async_trait]
impl ModelRoute for PpioKling25TurboRoute {
    fn name(&self) -> &'static str {
        "ppio-kling-2.5-turbo"
    }

    fn provider(&self) -> ProviderId {
        ProviderId::Ppio
    }

    fn matches(&self, model_id: &str) -> bool {
        model_id == "kling-2.5-turbo"
    }

    async fn build_video_request(
        &self,
        params: &GenerateVideoParams,
        _ctx: &RouteContext<'_>,
    ) -> Result<BuiltRequest, RouteError> {
        let prompt = required_prompt(&params.prompt, PROMPT_MAX_LEN, "video generation")?;
        let negative_prompt: Option<String> = params
            .negative_prompt
            .as_deref()
            .map(|p| p.chars().take(PROMPT_MAX_LEN).collect());

        let cfg_scale = params.cfg_scale.unwrap_or(0.5).clamp(0.0, 1.0);
        let duration = if params.duration == Some(10) { 10 } else { 5 };
        let mode = match params.tier {
            Some(ModelTier::Standard) => "std",
            _ => "pro",
        };

        let aspect_ratio = params
            .aspect_ratio
            .as_deref()
            .filter(|ar| VALID_ASPECT_RATIOS.contains(ar))
            .unwrap_or("16:9");

        let (endpoint, mut request_data) = if let Some(first) = params.images.first() {
            (
                "/async/kling-2.5-turbo-i2v",
                json!({
                    "image": strip_data_uri_prefix(first),
                    "prompt": prompt,
                    "duration": duration.to_string(),
                    "cfg_scale": cfg_scale,
                    "mode": mode,
                }),
            )
        } else {
            (
                "/async/kling-2.5-turbo-t2v",
                json!({
                    "prompt": prompt,
                    "duration": duration.to_string(),
                    "aspect_ratio": aspect_ratio,
                    "cfg_scale": cfg_scale,
                    "mode": mode,
                }),
            )
        };

        if let Some(negative) = negative_prompt {
            request_data["negative_prompt"] = json!(negative);
        }

        Ok(BuiltRequest::with_endpoint(endpoint, request_data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_params() -> GenerateVideoParams {
        GenerateVideoParams {
            prompt: "koi pond ripples".into(),
            model: "kling-2.5-turbo".into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_empty_prompt_fails_fast() {
        let mut params = base_params();
        params.prompt = "  ".into();
        let err = PpioKling25TurboRoute
            .build_video_request(&params, &RouteContext::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("non-empty prompt"));
    }

    #[tokio::test]
    async fn test_text_to_video_defaults() {
        let built = PpioKling25TurboRoute
            .build_video_request(&base_params(), &RouteContext::default())
            .await
            .unwrap();
        assert_eq!(built.endpoint.as_deref(), Some("/async/kling-2.5-turbo-t2v"));
        assert_eq!(built.request_data["duration"], "5");
        assert_eq!(built.request_data["aspect_ratio"], "16:9");
        assert_eq!(built.request_data["cfg_scale"], 0.5);
        assert_eq!(built.request_data["mode"], "pro");
        assert!(built.request_data.get("negative_prompt").is_none());
    }

    #[tokio::test]
    async fn test_invalid_aspect_ratio_replaced() {
        let mut params = base_params();
        params.aspect_ratio = Some("21:9".into());
        let built = PpioKling25TurboRoute
            .build_video_request(&params, &RouteContext::default())
            .await
            .unwrap();
        assert_eq!(built.request_data["aspect_ratio"], "16:9");
    }

    #[tokio::test]
    async fn test_cfg_scale_clamped() {
        let mut params = base_params();
        params.cfg_scale = Some(3.5);
        let built = PpioKling25TurboRoute
            .build_video_request(&params, &RouteContext::default())
            .await
            .unwrap();
        assert_eq!(built.request_data["cfg_scale"], 1.0);
    }

    #[tokio::test]
    async fn test_image_to_video_strips_data_uri() {
        let mut params = base_params();
        params.images = vec!["data:image/png;base64,QUJD".into()];
        params.duration = Some(10);
        let built = PpioKling25TurboRoute
            .build_video_request(&params, &RouteContext::default())
            .await
            .unwrap();
        assert_eq!(built.endpoint.as_deref(), Some("/async/kling-2.5-turbo-i2v"));
        assert_eq!(built.request_data["image"], "QUJD");
        assert_eq!(built.request_data["duration"], "10");
        assert!(built.request_data.get("aspect_ratio").is_none());
    }
}
