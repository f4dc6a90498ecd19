//! KIE Sora 2 video route.

use async_trait::async_trait;
use mediagen_types::{BuiltRequest, GenerateVideoParams, ModelTier, ProviderId};
use serde_json::json;

use crate::error::RouteError;
use crate::registry::{ModelRoute, RouteContext};
use crate::util::is_smart_ratio;

/// Sora 2: standard and pro tiers, text- or image-to-video on image count.
///
/// Duration travels as `n_frames`, the pro tier adds a `size` quality
/// field, and `remove_watermark` is always sent.
#[derive(Debug)]
pub struct KieSora2Route;

#[async_trait]
impl ModelRoute for KieSora2Route {
    fn name(&self) -> &'static str {
        "kie-sora-2"
    }

    fn provider(&self) -> ProviderId {
        ProviderId::Kie
    }

    fn matches(&self, model_id: &str) -> bool {
        model_id == "kie-sora-2" || model_id == "sora-2-kie"
    }

    async fn build_video_request(
        &self,
        params: &GenerateVideoParams,
        _ctx: &RouteContext<'_>,
    ) -> Result<BuiltRequest, RouteError> {
        let images = &params.images;
        let use_pro = params.tier == Some(ModelTier::Pro);
        let duration = params
            .duration
            .map(|d| d.to_string())
            .unwrap_or_else(|| "10".to_string());
        let aspect_ratio = params.aspect_ratio.as_deref().unwrap_or("16:9");
        let quality = params.extra_str("quality").unwrap_or("standard");

        let model = match (images.is_empty(), use_pro) {
            (true, true) => "sora-2-pro-text-to-video",
            (true, false) => "sora-2-text-to-video",
            (false, true) => "sora-2-pro-image-to-video",
            (false, false) => "sora-2-image-to-video",
        };

        let mut input = json!({ "prompt": params.prompt });

        if !is_smart_ratio(aspect_ratio) {
            input["aspect_ratio"] = json!(aspect_ratio);
        }

        input["n_frames"] = json!(duration);

        if use_pro {
            input["size"] = json!(quality);
        }

        input["remove_watermark"] = json!(true);

        if let Some(first) = images.first() {
            input["image_urls"] = json!([first]);
        }

        Ok(BuiltRequest::new(json!({ "model": model, "input": input })))
    }
}
