//! PPIO Minimax Hailuo video routes.

use async_trait::async_trait;
use mediagen_types::{BuiltRequest, GenerateVideoParams, ProviderId};
use serde_json::json;

use crate::error::RouteError;
use crate::registry::{ModelRoute, RouteContext};

/// Coerce Hailuo parameters into what the vendor accepts: duration is 6
/// or 10, and 1080P is only available at 6 seconds.
fn normalize_hailuo(duration: Option<u32>, resolution: Option<&str>) -> (u32, &'static str) {
    let duration = if duration == Some(10) { 10 } else { 6 };
    let wants_1080 = resolution
        .map(|r| r.eq_ignore_ascii_case("1080P"))
        .unwrap_or(false);
    let resolution = if duration == 10 {
        "768P"
    } else if wants_1080 {
        "1080P"
    } else {
        "768P"
    };
    (duration, resolution)
}

/// Hailuo 2.3, including the fast image-to-video variant.
#[derive(Debug)]
pub struct PpioHailuo23Route;

#[async_trait]
impl ModelRoute for PpioHailuo23Route {
    fn name(&self) -> &'static str {
        "ppio-minimax-hailuo-2.3"
    }

    fn provider(&self) -> ProviderId {
        ProviderId::Ppio
    }

    fn matches(&self, model_id: &str) -> bool {
        model_id == "minimax-hailuo-2.3" || model_id == "minimax-hailuo-2.3-fast"
    }

    async fn build_video_request(
        &self,
        params: &GenerateVideoParams,
        _ctx: &RouteContext<'_>,
    ) -> Result<BuiltRequest, RouteError> {
        let (duration, resolution) =
            normalize_hailuo(params.duration, params.resolution.as_deref());
        let enable_expansion = params.prompt_extend.unwrap_or(true);
        let has_images = !params.images.is_empty();

        // The fast endpoint only exists for image-to-video.
        let is_fast = params.model == "minimax-hailuo-2.3-fast"
            || (params.fast_mode.unwrap_or(false) && has_images);

        let mut request_data = json!({
            "prompt": params.prompt,
            "duration": duration,
            "resolution": resolution,
            "enable_prompt_expansion": enable_expansion,
        });

        let endpoint = if has_images {
            request_data["image"] = json!(params.images[0]);
            if is_fast {
                "/async/minimax-hailuo-2.3-fast-i2v"
            } else {
                "/async/minimax-hailuo-2.3-i2v"
            }
        } else {
            "/async/minimax-hailuo-2.3-t2v"
        };

        Ok(BuiltRequest::with_endpoint(endpoint, request_data))
    }
}

/// Hailuo 02: one endpoint, payload shaped by image count (0/1/2, the
/// second image being the end frame).
#[derive(Debug)]
pub struct PpioHailuo02Route;

#[async_trait]
impl ModelRoute for PpioHailuo02Route {
    fn name(&self) -> &'static str {
        "ppio-minimax-hailuo-02"
    }

    fn provider(&self) -> ProviderId {
        ProviderId::Ppio
    }

    fn matches(&self, model_id: &str) -> bool {
        model_id == "minimax-hailuo-02"
    }

    async fn build_video_request(
        &self,
        params: &GenerateVideoParams,
        _ctx: &RouteContext<'_>,
    ) -> Result<BuiltRequest, RouteError> {
        let (duration, resolution) =
            normalize_hailuo(params.duration, params.resolution.as_deref());
        let enable_expansion = params.prompt_extend.unwrap_or(true);

        let mut request_data = json!({
            "prompt": params.prompt,
            "duration": duration,
            "resolution": resolution,
            "enable_prompt_expansion": enable_expansion,
        });

        if let Some(first) = params.images.first() {
            request_data["image"] = json!(first);
            if let Some(second) = params.images.get(1) {
                request_data["end_image"] = json!(second);
            }
        }

        Ok(BuiltRequest::with_endpoint(
            "/async/minimax-hailuo-02",
            request_data,
        ))
    }
}
