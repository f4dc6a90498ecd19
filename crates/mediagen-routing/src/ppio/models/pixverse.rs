//! PPIO PixVerse V4.5 video route.

use async_trait::async_trait;
use mediagen_types::{BuiltRequest, GenerateVideoParams, ProviderId};
use serde_json::json;

use crate::error::RouteError;
use crate::registry::{ModelRoute, RouteContext};
use crate::util::strip_data_uri_prefix;

const VALID_RESOLUTIONS: &[&str] = &["360p", "540p", "720p", "1080p"];

fn normalize_resolution(resolution: Option<&str>) -> &'static str {
    let lower = resolution.map(str::to_lowercase).unwrap_or_default();
    match VALID_RESOLUTIONS.iter().find(|r| **r == lower) {
        Some(r) => r,
        None => "540p",
    }
}

/// PixVerse V4.5: text/image-to-video; fast mode caps resolution at 720p.
#[derive(Debug)]
pub struct PpioPixverse45Route;

#[async_trait]
impl ModelRoute for PpioPixverse45Route {
    fn name(&self) -> &'static str {
        "ppio-pixverse-v4.5"
    }

    fn provider(&self) -> ProviderId {
        ProviderId::Ppio
    }

    fn matches(&self, model_id: &str) -> bool {
        model_id == "pixverse-v4.5"
    }

    async fn build_video_request(
        &self,
        params: &GenerateVideoParams,
        _ctx: &RouteContext<'_>,
    ) -> Result<BuiltRequest, RouteError> {
        let fast = params.fast_mode.unwrap_or(false);
        let resolution = normalize_resolution(params.resolution.as_deref());
        // fast mode does not support 1080p
        let resolution = if fast && resolution == "1080p" {
            "720p"
        } else {
            resolution
        };

        let (endpoint, mut request_data) = if let Some(first) = params.images.first() {
            (
                "/async/pixverse-v4.5-i2v",
                json!({
                    "prompt": params.prompt,
                    "image": strip_data_uri_prefix(first),
                    "resolution": resolution,
                    "fast_mode": fast,
                }),
            )
        } else {
            (
                "/async/pixverse-v4.5-t2v",
                json!({
                    "prompt": params.prompt,
                    "aspect_ratio": params.aspect_ratio.as_deref().unwrap_or("16:9"),
                    "resolution": resolution,
                    "fast_mode": fast,
                }),
            )
        };

        if let Some(negative) = &params.negative_prompt {
            request_data["negative_prompt"] = json!(negative);
        }

        Ok(BuiltRequest::with_endpoint(endpoint, request_data))
    }
}
