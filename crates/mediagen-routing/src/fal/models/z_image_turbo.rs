//! Fal Z-Image Turbo image route.

use async_trait::async_trait;
use mediagen_types::{BuiltRequest, GenerateImageParams, ProviderId};
use serde_json::{Value, json};

use crate::error::RouteError;
use crate::registry::ModelRoute;

const SUBMIT_PATH: &str = "fal-ai/z-image/turbo";

/// Translate a `"1760*1168"` size into the API's `{width, height}` object;
/// preset names pass through as strings.
fn image_size_value(size: Option<&str>) -> Value {
    let Some(size) = size else {
        return json!("landscape_4_3");
    };

    if let Some((w, h)) = size.split_once('*') {
        if let (Ok(width), Ok(height)) = (w.parse::<u32>(), h.parse::<u32>()) {
            return json!({ "width": width, "height": height });
        }
    }

    json!(size)
}

/// Z-Image Turbo: one path for both text-to-image and editing.
#[derive(Debug)]
pub struct FalZImageTurboRoute;

#[async_trait]
impl ModelRoute for FalZImageTurboRoute {
    fn name(&self) -> &'static str {
        "fal-z-image-turbo"
    }

    fn provider(&self) -> ProviderId {
        ProviderId::Fal
    }

    fn matches(&self, model_id: &str) -> bool {
        model_id == "fal-ai-z-image-turbo" || model_id == "fal-ai/z-image/turbo"
    }

    fn build_image_request(
        &self,
        params: &GenerateImageParams,
    ) -> Result<BuiltRequest, RouteError> {
        let mut request_data = json!({
            "prompt": params.prompt,
            "image_size": image_size_value(params.image_size.as_deref()),
            "num_inference_steps": params.steps.unwrap_or(8),
            "num_images": params.num_images.unwrap_or(1),
            "enable_safety_checker": false,
            "output_format": "png",
            "enable_prompt_expansion": params.extra_bool("enable_prompt_expansion").unwrap_or(false),
            "acceleration": params.extra_str("acceleration").unwrap_or("none"),
        });

        if !params.images.is_empty() {
            request_data["image_urls"] = json!(params.images);
        }

        Ok(BuiltRequest {
            endpoint: Some(SUBMIT_PATH.to_string()),
            model_id: Some(SUBMIT_PATH.to_string()),
            request_data,
        })
    }
}
