//! KIE Kling V2.6 video route.

use async_trait::async_trait;
use mediagen_types::{BuiltRequest, GenerateVideoParams, ProviderId, VideoMode};
use serde_json::json;

use crate::error::RouteError;
use crate::registry::{ModelRoute, RouteContext};

/// Kling V2.6: text/image-to-video plus a motion-control mode.
///
/// Motion control requires one reference image and one reference video and
/// sends the selected resolution through the vendor's `mode` field.
/// Image-to-video takes no aspect ratio. negative_prompt, cfg_scale and
/// seed are never forwarded.
#[derive(Debug)]
pub struct KieKlingV26Route;

#[async_trait]
impl ModelRoute for KieKlingV26Route {
    fn name(&self) -> &'static str {
        "kie-kling-v2-6"
    }

    fn provider(&self) -> ProviderId {
        ProviderId::Kie
    }

    fn matches(&self, model_id: &str) -> bool {
        model_id == "kie-kling-v2-6" || model_id == "kling-v2-6-kie"
    }

    async fn build_video_request(
        &self,
        params: &GenerateVideoParams,
        _ctx: &RouteContext<'_>,
    ) -> Result<BuiltRequest, RouteError> {
        let images = &params.images;
        let resolution = params.resolution.as_deref().unwrap_or("720p");
        let orientation = params
            .extra_str("character_orientation")
            .unwrap_or("video");

        if params.mode == Some(VideoMode::MotionControl) {
            if images.is_empty() {
                return Err(RouteError::invalid(
                    "motion control requires a reference image",
                ));
            }
            let Some(video_url) = params.video.as_deref() else {
                return Err(RouteError::invalid(
                    "motion control requires a reference video",
                ));
            };

            return Ok(BuiltRequest::new(json!({
                "model": "kling-2.6/motion-control",
                "input": {
                    "prompt": params.prompt,
                    "input_urls": images,
                    "video_urls": [video_url],
                    "character_orientation": orientation,
                    "mode": resolution,
                }
            })));
        }

        let model = if images.is_empty() {
            "kling-2.6/text-to-video"
        } else {
            "kling-2.6/image-to-video"
        };

        let mut input = json!({
            "prompt": params.prompt,
            "duration": params.duration.map(|d| d.to_string()).unwrap_or_else(|| "5".to_string()),
            "sound": params.audio.unwrap_or(false),
        });

        if images.is_empty() {
            input["aspect_ratio"] = json!(params.aspect_ratio.as_deref().unwrap_or("16:9"));
        } else {
            input["image_urls"] = json!(images);
        }

        Ok(BuiltRequest::new(json!({ "model": model, "input": input })))
    }
}
