//! PPIO Seedance video routes (V1 lite/pro and 1.5 Pro).

use async_trait::async_trait;
use mediagen_types::{BuiltRequest, GenerateVideoParams, ModelTier, ProviderId};
use serde_json::json;

use crate::error::RouteError;
use crate::registry::{ModelRoute, RouteContext};

/// Seedance V1: lite and pro variants resolved from the model ID (or the
/// tier param for the bare `seedance-v1` ID).
#[derive(Debug)]
pub struct PpioSeedanceV1Route;

impl PpioSeedanceV1Route {
    fn variant(params: &GenerateVideoParams) -> &'static str {
        if params.model == "seedance-v1-pro" {
            return "pro";
        }
        if params.model == "seedance-v1" && params.tier == Some(ModelTier::Pro) {
            return "pro";
        }
        "lite"
    }
}

#[async_trait]
impl ModelRoute for PpioSeedanceV1Route {
    fn name(&self) -> &'static str {
        "ppio-seedance-v1"
    }

    fn provider(&self) -> ProviderId {
        ProviderId::Ppio
    }

    fn matches(&self, model_id: &str) -> bool {
        model_id == "seedance-v1-lite"
            || model_id == "seedance-v1-pro"
            || model_id == "seedance-v1"
    }

    async fn build_video_request(
        &self,
        params: &GenerateVideoParams,
        _ctx: &RouteContext<'_>,
    ) -> Result<BuiltRequest, RouteError> {
        let variant = Self::variant(params);
        let resolution = params.resolution.as_deref().unwrap_or("720p");
        let aspect_ratio = params.aspect_ratio.as_deref().unwrap_or("16:9");
        let duration = params.duration.unwrap_or(5);
        let camera_fixed = params.camera_fixed.unwrap_or(false);

        let (endpoint, mut request_data) = if let Some(first) = params.images.first() {
            (
                format!("/async/seedance-v1-{variant}-i2v"),
                json!({
                    "prompt": params.prompt,
                    "image": first,
                    "resolution": resolution,
                    "aspect_ratio": aspect_ratio,
                    "camera_fixed": camera_fixed,
                    "seed": -1,
                    "duration": duration,
                }),
            )
        } else {
            (
                format!("/async/seedance-v1-{variant}-t2v"),
                json!({
                    "prompt": params.prompt,
                    "resolution": resolution,
                    "aspect_ratio": aspect_ratio,
                    "duration": duration,
                    "camera_fixed": camera_fixed,
                    "seed": -1,
                }),
            )
        };

        if !params.images.is_empty() {
            if let Some(last_image) = &params.last_image {
                request_data["last_image"] = json!(last_image);
            }
        }

        Ok(BuiltRequest::with_endpoint(endpoint, request_data))
    }
}

/// Seedance 1.5 Pro: adds service tiers, audio generation and start/end
/// frames; the smart ratio resolves through the pre-matched ratio param.
#[derive(Debug)]
pub struct PpioSeedance15ProRoute;

#[async_trait]
impl ModelRoute for PpioSeedance15ProRoute {
    fn name(&self) -> &'static str {
        "ppio-seedance-v1.5-pro"
    }

    fn provider(&self) -> ProviderId {
        ProviderId::Ppio
    }

    fn matches(&self, model_id: &str) -> bool {
        model_id == "seedance-v1.5-pro"
    }

    async fn build_video_request(
        &self,
        params: &GenerateVideoParams,
        _ctx: &RouteContext<'_>,
    ) -> Result<BuiltRequest, RouteError> {
        let resolution = params.resolution.as_deref().unwrap_or("720p");
        let duration = params.duration.unwrap_or(5);
        let camera_fixed = params.camera_fixed.unwrap_or(false);
        let service_tier = params.extra_str("service_tier").unwrap_or("default");
        let generate_audio = params.extra_bool("generate_audio").unwrap_or(false);

        let mut ratio = params.aspect_ratio.as_deref().unwrap_or("1:1");
        if ratio == "smart" {
            if let Some(matched) = params.extra_str("smart_matched_ratio") {
                ratio = matched;
            }
        }

        let (endpoint, mut request_data) = if let Some(first) = params.images.first() {
            (
                "/async/seedance-v1.5-pro-i2v",
                json!({
                    "prompt": params.prompt,
                    "image": first,
                    "resolution": resolution,
                    "ratio": ratio,
                    "duration": duration,
                    "camera_fixed": camera_fixed,
                    "service_tier": service_tier,
                    "generate_audio": generate_audio,
                }),
            )
        } else {
            (
                "/async/seedance-v1.5-pro-t2v",
                json!({
                    "prompt": params.prompt,
                    "resolution": resolution,
                    "ratio": ratio,
                    "duration": duration,
                    "camera_fixed": camera_fixed,
                    "service_tier": service_tier,
                    "generate_audio": generate_audio,
                }),
            )
        };

        if params.images.len() >= 2 {
            request_data["last_image"] = json!(params.images[1]);
        }

        Ok(BuiltRequest::with_endpoint(endpoint, request_data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_params(model: &str) -> GenerateVideoParams {
        GenerateVideoParams {
            prompt: "glassblowing workshop".into(),
            model: model.into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_v1_variant_from_model_id() {
        let ctx = RouteContext::default();

        let built = PpioSeedanceV1Route
            .build_video_request(&base_params("seedance-v1-lite"), &ctx)
            .await
            .unwrap();
        assert_eq!(built.endpoint.as_deref(), Some("/async/seedance-v1-lite-t2v"));

        let built = PpioSeedanceV1Route
            .build_video_request(&base_params("seedance-v1-pro"), &ctx)
            .await
            .unwrap();
        assert_eq!(built.endpoint.as_deref(), Some("/async/seedance-v1-pro-t2v"));

        let mut params = base_params("seedance-v1");
        params.tier = Some(ModelTier::Pro);
        let built = PpioSeedanceV1Route
            .build_video_request(&params, &ctx)
            .await
            .unwrap();
        assert_eq!(built.endpoint.as_deref(), Some("/async/seedance-v1-pro-t2v"));
        assert_eq!(built.request_data["seed"], -1);
    }

    #[tokio::test]
    async fn test_v1_image_to_video_with_last_image() {
        let mut params = base_params("seedance-v1-lite");
        params.images = vec!["https://x.test/a.png".into()];
        params.last_image = Some("https://x.test/z.png".into());
        let built = PpioSeedanceV1Route
            .build_video_request(&params, &RouteContext::default())
            .await
            .unwrap();
        assert_eq!(built.endpoint.as_deref(), Some("/async/seedance-v1-lite-i2v"));
        assert_eq!(built.request_data["last_image"], "https://x.test/z.png");
    }

    #[tokio::test]
    async fn test_15_pro_smart_ratio_resolution() {
        let mut params = base_params("seedance-v1.5-pro");
        params.aspect_ratio = Some("smart".into());
        params
            .extra
            .insert("smart_matched_ratio".into(), json!("4:3"));
        let built = PpioSeedance15ProRoute
            .build_video_request(&params, &RouteContext::default())
            .await
            .unwrap();
        assert_eq!(built.request_data["ratio"], "4:3");
        assert_eq!(built.request_data["service_tier"], "default");
        assert_eq!(built.request_data["generate_audio"], false);
    }

    #[tokio::test]
    async fn test_15_pro_start_end_frames() {
        let mut params = base_params("seedance-v1.5-pro");
        params.images = vec![
            "https://x.test/a.png".into(),
            "https://x.test/b.png".into(),
        ];
        let built = PpioSeedance15ProRoute
            .build_video_request(&params, &RouteContext::default())
            .await
            .unwrap();
        assert_eq!(
            built.endpoint.as_deref(),
            Some("/async/seedance-v1.5-pro-i2v")
        );
        assert_eq!(built.request_data["image"], "https://x.test/a.png");
        assert_eq!(built.request_data["last_image"], "https://x.test/b.png");
    }
}
