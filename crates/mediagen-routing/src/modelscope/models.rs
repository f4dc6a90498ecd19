//! ModelScope unified image route.

use async_trait::async_trait;
use mediagen_types::{BuiltRequest, GenerateImageParams, ProviderId};
use serde_json::json;

use crate::error::RouteError;
use crate::modelscope::config::{GENERATION_ENDPOINT, IMAGE_EDIT_MODEL};
use crate::registry::ModelRoute;

const MAX_EDIT_IMAGES: usize = 3;

/// Unified route for every ModelScope model.
///
/// Matches any `namespace/model` ID plus the custom-model sentinel. The
/// image-edit model rejects negative prompts and guidance, and `image_url`
/// is always an array even for a single image.
#[derive(Debug)]
pub struct ModelScopeUnifiedRoute;

#[async_trait]
impl ModelRoute for ModelScopeUnifiedRoute {
    fn name(&self) -> &'static str {
        "modelscope-unified"
    }

    fn provider(&self) -> ProviderId {
        ProviderId::ModelScope
    }

    fn matches(&self, model_id: &str) -> bool {
        model_id.contains('/') || model_id == "modelscope-custom"
    }

    fn build_image_request(
        &self,
        params: &GenerateImageParams,
    ) -> Result<BuiltRequest, RouteError> {
        let is_edit_model = params.model == IMAGE_EDIT_MODEL;

        let mut request_data = json!({
            "model": params.model,
            "prompt": params.prompt,
        });

        if let (Some(width), Some(height)) = (params.width, params.height) {
            request_data["size"] = json!(format!("{width}x{height}"));
        }

        if let Some(steps) = params.steps {
            request_data["steps"] = json!(steps);
        }

        if !is_edit_model {
            if let Some(negative) = &params.negative_prompt {
                request_data["negative_prompt"] = json!(negative);
            }
            if let Some(guidance) = params.guidance {
                request_data["guidance"] = json!(guidance);
            }
        }

        // Several models reject an explicit seed, so it is only ever sent
        // when the caller asked for one.
        if let Some(seed) = params.seed {
            request_data["seed"] = json!(seed);
        }

        if !params.images.is_empty() {
            let urls: Vec<&String> = params.images.iter().take(MAX_EDIT_IMAGES).collect();
            request_data["image_url"] = json!(urls);
        }

        Ok(BuiltRequest::with_endpoint(GENERATION_ENDPOINT, request_data))
    }
}

/// Every ModelScope route, for registry construction.
pub fn routes() -> Vec<Box<dyn ModelRoute>> {
    vec![Box::new(ModelScopeUnifiedRoute)]
}
