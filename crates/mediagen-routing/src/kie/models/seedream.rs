//! KIE Seedream image routes (4.0 and 4.5).

use async_trait::async_trait;
use mediagen_types::{BuiltRequest, GenerateImageParams, ProviderId};
use serde_json::json;

use crate::error::RouteError;
use crate::registry::ModelRoute;
use crate::util::is_smart_ratio;

/// Seedream 4.0: text-to-image, or the edit endpoint when images are
/// attached. The `image_size` value arrives pre-mapped to the vendor's
/// preset names (e.g. `landscape_16_9`).
#[derive(Debug)]
pub struct KieSeedream40Route;

#[async_trait]
impl ModelRoute for KieSeedream40Route {
    fn name(&self) -> &'static str {
        "kie-seedream-4.0"
    }

    fn provider(&self) -> ProviderId {
        ProviderId::Kie
    }

    fn matches(&self, model_id: &str) -> bool {
        model_id == "kie-seedream-4.0" || model_id == "seedream-4.0-kie"
    }

    fn build_image_request(
        &self,
        params: &GenerateImageParams,
    ) -> Result<BuiltRequest, RouteError> {
        let model = if params.images.is_empty() {
            "bytedance/seedream-v4-text-to-image"
        } else {
            "bytedance/seedream-v4-edit"
        };

        let mut input = json!({ "prompt": params.prompt });

        if let Some(image_size) = &params.image_size {
            if !is_smart_ratio(image_size) {
                input["image_size"] = json!(image_size);
            }
        }

        if let Some(image_resolution) = &params.image_resolution {
            input["image_resolution"] = json!(image_resolution);
        }

        if let Some(max_images) = params.max_images {
            input["max_images"] = json!(max_images);
        }

        if !params.images.is_empty() {
            input["image_urls"] = json!(params.images);
        }

        Ok(BuiltRequest::new(json!({ "model": model, "input": input })))
    }
}

/// Seedream 4.5: same split as 4.0, with aspect ratio and a basic/high
/// quality switch instead of the preset size names.
#[derive(Debug)]
pub struct KieSeedream45Route;

#[async_trait]
impl ModelRoute for KieSeedream45Route {
    fn name(&self) -> &'static str {
        "kie-seedream-4.5"
    }

    fn provider(&self) -> ProviderId {
        ProviderId::Kie
    }

    fn matches(&self, model_id: &str) -> bool {
        model_id == "kie-seedream-4.5" || model_id == "seedream-4.5-kie"
    }

    fn build_image_request(
        &self,
        params: &GenerateImageParams,
    ) -> Result<BuiltRequest, RouteError> {
        let model = if params.images.is_empty() {
            "seedream/4.5-text-to-image"
        } else {
            "seedream/4.5-edit"
        };

        let mut input = json!({ "prompt": params.prompt });

        if let Some(aspect_ratio) = &params.aspect_ratio {
            if !is_smart_ratio(aspect_ratio) {
                input["aspect_ratio"] = json!(aspect_ratio);
            }
        }

        if let Some(quality) = &params.quality {
            input["quality"] = json!(quality);
        }

        if !params.images.is_empty() {
            input["image_urls"] = json!(params.images);
        }

        Ok(BuiltRequest::new(json!({ "model": model, "input": input })))
    }
}
