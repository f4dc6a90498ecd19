//! KIE Hailuo video routes.

use async_trait::async_trait;
use mediagen_types::{BuiltRequest, GenerateVideoParams, ModelTier, ProviderId};
use serde_json::json;

use crate::error::RouteError;
use crate::registry::{ModelRoute, RouteContext};

/// Hailuo 02: text- and image-to-video.
///
/// The pro endpoints are selected implicitly (duration 6 at 1080P) and
/// take no duration/resolution parameters at all. Standard endpoints take
/// the duration as a string, and resolution only for image-to-video. Up to
/// two images: the second becomes the end frame.
#[derive(Debug)]
pub struct KieHailuo02Route;

#[async_trait]
impl ModelRoute for KieHailuo02Route {
    fn name(&self) -> &'static str {
        "kie-hailuo-02"
    }

    fn provider(&self) -> ProviderId {
        ProviderId::Kie
    }

    fn matches(&self, model_id: &str) -> bool {
        model_id == "kie-hailuo-02" || model_id == "hailuo-02-kie"
    }

    async fn build_video_request(
        &self,
        params: &GenerateVideoParams,
        _ctx: &RouteContext<'_>,
    ) -> Result<BuiltRequest, RouteError> {
        let images = &params.images;
        let duration = params.duration.unwrap_or(6);
        let resolution = params.resolution.as_deref().unwrap_or("768P");
        let prompt_optimizer = params.extra_bool("prompt_optimizer").unwrap_or(false);

        let use_pro = duration == 6 && resolution == "1080P";

        let model = match (images.is_empty(), use_pro) {
            (true, true) => "hailuo/02-text-to-video-pro",
            (true, false) => "hailuo/02-text-to-video-standard",
            (false, true) => "hailuo/02-image-to-video-pro",
            (false, false) => "hailuo/02-image-to-video-standard",
        };

        let mut input = json!({ "prompt": params.prompt });

        if let Some(first) = images.first() {
            input["image_url"] = json!(first);
            if let Some(second) = images.get(1) {
                input["end_image_url"] = json!(second);
            }
        }

        if !use_pro {
            input["duration"] = json!(duration.to_string());
            if !images.is_empty() {
                input["resolution"] = json!(resolution);
            }
        }

        if prompt_optimizer {
            input["prompt_optimizer"] = json!(true);
        }

        Ok(BuiltRequest::new(json!({ "model": model, "input": input })))
    }
}

/// Hailuo 2.3: image-to-video only, standard and pro tiers.
#[derive(Debug)]
pub struct KieHailuo23Route;

#[async_trait]
impl ModelRoute for KieHailuo23Route {
    fn name(&self) -> &'static str {
        "kie-hailuo-2-3"
    }

    fn provider(&self) -> ProviderId {
        ProviderId::Kie
    }

    fn matches(&self, model_id: &str) -> bool {
        model_id == "kie-hailuo-2-3" || model_id == "hailuo-2-3-kie"
    }

    async fn build_video_request(
        &self,
        params: &GenerateVideoParams,
        _ctx: &RouteContext<'_>,
    ) -> Result<BuiltRequest, RouteError> {
        let model = match params.tier {
            Some(ModelTier::Pro) => "hailuo/2-3-image-to-video-pro",
            _ => "hailuo/2-3-image-to-video-standard",
        };

        let duration = params.duration.unwrap_or(6);
        let resolution = params.resolution.as_deref().unwrap_or("768P");

        Ok(BuiltRequest::new(json!({
            "model": model,
            "input": {
                "prompt": params.prompt,
                "image_url": params.images.first().map(String::as_str).unwrap_or(""),
                "duration": duration.to_string(),
                "resolution": resolution,
            }
        })))
    }
}
