//! Fal Kling Image O1 route.

use async_trait::async_trait;
use mediagen_geometry::format_aspect_ratio;
use mediagen_types::{BuiltRequest, GenerateImageParams, ProviderId};
use serde_json::json;

use crate::error::RouteError;
use crate::registry::ModelRoute;

const SUBMIT_PATH: &str = "fal-ai/kling-image/o1";

/// Kling Image O1: multi-reference image editing; images are mandatory.
///
/// An `auto` aspect ratio is resolved from the measured ratio of the
/// first image (`source_aspect_ratio`), falling back to 1:1 when no
/// measurement is available.
#[derive(Debug)]
pub struct FalKlingImageO1Route;

#[async_trait]
impl ModelRoute for FalKlingImageO1Route {
    fn name(&self) -> &'static str {
        "fal-kling-image-o1"
    }

    fn provider(&self) -> ProviderId {
        ProviderId::Fal
    }

    fn matches(&self, model_id: &str) -> bool {
        model_id == "fal-ai/kling-image/o1"
            || model_id == "fal-ai-kling-image-o1"
            || model_id == "kling-o1"
    }

    fn build_image_request(
        &self,
        params: &GenerateImageParams,
    ) -> Result<BuiltRequest, RouteError> {
        if params.images.is_empty() {
            return Err(RouteError::invalid(
                "Kling Image O1 requires at least one uploaded image",
            ));
        }

        let mut request_data = json!({
            "prompt": params.prompt,
            "image_urls": params.images,
        });

        if let Some(num_images) = params.num_images.filter(|n| *n > 0) {
            request_data["num_images"] = json!(num_images);
        }

        let aspect_ratio = match params.aspect_ratio.as_deref() {
            Some("auto") => match params.extra_f64("source_aspect_ratio") {
                Some(ratio) => Some(format_aspect_ratio(ratio)),
                None => Some("1:1".to_string()),
            },
            Some(other) if !other.trim().is_empty() => Some(other.to_string()),
            _ => None,
        };
        if let Some(aspect_ratio) = aspect_ratio {
            request_data["aspect_ratio"] = json!(aspect_ratio);
        }

        if let Some(resolution) = params.resolution.as_deref().filter(|r| !r.trim().is_empty()) {
            request_data["resolution"] = json!(resolution);
        }

        Ok(BuiltRequest {
            endpoint: Some(SUBMIT_PATH.to_string()),
            model_id: Some(SUBMIT_PATH.to_string()),
            request_data,
        })
    }
}
