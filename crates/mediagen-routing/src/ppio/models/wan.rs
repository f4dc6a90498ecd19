//! PPIO Wan 2.5 Preview video route.

use async_trait::async_trait;
use mediagen_types::{BuiltRequest, GenerateVideoParams, ProviderId};
use serde_json::json;

use crate::error::RouteError;
use crate::registry::{ModelRoute, RouteContext};
use crate::util::ensure_data_uri;

/// Wan 2.5 Preview: nested `{input, parameters}` payload.
///
/// Text-to-video sizes with a `WxH` string, image-to-video with a
/// resolution label; the watermark is always off.
#[derive(Debug)]
pub struct PpioWan25PreviewRoute;

#[async_trait]
impl ModelRoute for PpioWan25PreviewRoute {
    fn name(&self) -> &'static str {
        "ppio-wan-2.5-preview"
    }

    fn provider(&self) -> ProviderId {
        ProviderId::Ppio
    }

    fn matches(&self, model_id: &str) -> bool {
        model_id == "wan-2.5-preview"
    }

    async fn build_video_request(
        &self,
        params: &GenerateVideoParams,
        _ctx: &RouteContext<'_>,
    ) -> Result<BuiltRequest, RouteError> {
        let duration = params.duration.unwrap_or(5);
        let prompt_extend = params.prompt_extend.unwrap_or(true);
        let audio = params.audio.unwrap_or(true);

        let (endpoint, request_data) = if let Some(first) = params.images.first() {
            (
                "/async/wan-2.5-i2v-preview",
                json!({
                    "input": {
                        "prompt": params.prompt,
                        "negative_prompt": params.negative_prompt,
                        "img_url": ensure_data_uri(first),
                    },
                    "parameters": {
                        "resolution": params.resolution.as_deref().unwrap_or("1080P"),
                        "duration": duration,
                        "prompt_extend": prompt_extend,
                        "watermark": false,
                        "audio": audio,
                    }
                }),
            )
        } else {
            (
                "/async/wan-2.5-t2v-preview",
                json!({
                    "input": {
                        "prompt": params.prompt,
                        "negative_prompt": params.negative_prompt,
                    },
                    "parameters": {
                        "size": params.size.as_deref().unwrap_or("1920*1080"),
                        "duration": duration,
                        "prompt_extend": prompt_extend,
                        "watermark": false,
                        "audio": audio,
                    }
                }),
            )
        };

        Ok(BuiltRequest::with_endpoint(endpoint, request_data))
    }
}
