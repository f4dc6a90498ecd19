//! KIE Seedance V3 video route.

use async_trait::async_trait;
use mediagen_types::{BuiltRequest, GenerateVideoParams, ModelTier, ProviderId};
use serde_json::json;

use crate::error::RouteError;
use crate::registry::{ModelRoute, RouteContext};
use crate::util::is_smart_ratio;

const VALID_RESOLUTIONS: &[&str] = &["480p", "720p", "1080p"];

/// Seedance V3: lite/pro tiers, with a fast variant of the pro
/// image-to-video endpoint.
///
/// Endpoint table:
/// - no image, lite:  bytedance/v1-lite-text-to-video
/// - no image, pro:   bytedance/v1-pro-text-to-video
/// - image, lite:     bytedance/v1-lite-image-to-video
/// - image, pro:      bytedance/v1-pro-image-to-video
/// - image, pro+fast: bytedance/v1-pro-fast-image-to-video
#[derive(Debug)]
pub struct KieSeedanceV3Route;

#[async_trait]
impl ModelRoute for KieSeedanceV3Route {
    fn name(&self) -> &'static str {
        "kie-seedance-v3"
    }

    fn provider(&self) -> ProviderId {
        ProviderId::Kie
    }

    fn matches(&self, model_id: &str) -> bool {
        model_id == "kie-seedance-v3" || model_id == "seedance-v3-kie"
    }

    async fn build_video_request(
        &self,
        params: &GenerateVideoParams,
        _ctx: &RouteContext<'_>,
    ) -> Result<BuiltRequest, RouteError> {
        let images = &params.images;
        let pro = params.tier == Some(ModelTier::Pro);
        let fast = params.fast_mode.unwrap_or(true);
        let aspect_ratio = params.aspect_ratio.as_deref().unwrap_or("16:9");
        let duration = params.duration.unwrap_or(5);
        let camera_fixed = params.camera_fixed.unwrap_or(false);

        // 2K/4K and friends are not valid here; substitute the default
        // instead of forwarding them.
        let mut resolution = params.resolution.as_deref().unwrap_or("720p");
        if !VALID_RESOLUTIONS.contains(&resolution) {
            resolution = "720p";
        }

        let model = if images.is_empty() {
            if pro {
                "bytedance/v1-pro-text-to-video"
            } else {
                "bytedance/v1-lite-text-to-video"
            }
        } else if pro {
            if fast {
                "bytedance/v1-pro-fast-image-to-video"
            } else {
                "bytedance/v1-pro-image-to-video"
            }
        } else {
            "bytedance/v1-lite-image-to-video"
        };

        let mut input = json!({ "prompt": params.prompt });

        if images.is_empty() && !is_smart_ratio(aspect_ratio) {
            input["aspect_ratio"] = json!(aspect_ratio);
        }

        input["resolution"] = json!(resolution);
        input["duration"] = json!(duration.to_string());

        // The pro fast image-to-video endpoint rejects camera_fixed; this
        // is specific to that one variant.
        if !(pro && fast && !images.is_empty()) {
            input["camera_fixed"] = json!(camera_fixed);
        }

        if let Some(first) = images.first() {
            input["image_url"] = json!(first);
        }

        input["enable_safety_checker"] = json!(false);

        Ok(BuiltRequest::new(json!({ "model": model, "input": input })))
    }
}
