//! KIE Z-Image route.

use async_trait::async_trait;
use mediagen_types::{BuiltRequest, GenerateImageParams, ProviderId};
use serde_json::json;

use crate::error::RouteError;
use crate::registry::ModelRoute;
use crate::util::is_smart_ratio;

/// Z-Image: text-to-image only.
#[derive(Debug)]
pub struct KieZImageRoute;

#[async_trait]
impl ModelRoute for KieZImageRoute {
    fn name(&self) -> &'static str {
        "kie-z-image"
    }

    fn provider(&self) -> ProviderId {
        ProviderId::Kie
    }

    fn matches(&self, model_id: &str) -> bool {
        model_id == "kie-z-image" || model_id == "z-image-kie"
    }

    fn build_image_request(
        &self,
        params: &GenerateImageParams,
    ) -> Result<BuiltRequest, RouteError> {
        let mut input = json!({ "prompt": params.prompt });

        if let Some(aspect_ratio) = &params.aspect_ratio {
            if !is_smart_ratio(aspect_ratio) {
                input["aspect_ratio"] = json!(aspect_ratio);
            }
        }

        Ok(BuiltRequest::new(json!({
            "model": "z-image",
            "input": input,
        })))
    }
}
