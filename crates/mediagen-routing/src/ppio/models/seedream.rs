//! PPIO Seedream 4.0 image route.

use async_trait::async_trait;
use mediagen_types::{BuiltRequest, GenerateImageParams, ProviderId};
use serde_json::json;

use crate::error::RouteError;
use crate::registry::ModelRoute;

/// Seedream 4.0 on PPIO: one synchronous image endpoint.
#[derive(Debug)]
pub struct PpioSeedream40Route;

#[async_trait]
impl ModelRoute for PpioSeedream40Route {
    fn name(&self) -> &'static str {
        "ppio-seedream-4.0"
    }

    fn provider(&self) -> ProviderId {
        ProviderId::Ppio
    }

    fn matches(&self, model_id: &str) -> bool {
        model_id.contains("seedream") && !model_id.contains("seedance")
    }

    fn build_image_request(
        &self,
        params: &GenerateImageParams,
    ) -> Result<BuiltRequest, RouteError> {
        let mut request_data = json!({
            "prompt": params.prompt,
            // No watermark unless the caller asks for one.
            "watermark": false,
        });

        if !params.images.is_empty() {
            request_data["images"] = json!(params.images);
        }

        if let Some(size) = &params.size {
            request_data["size"] = json!(size);
        }

        if params.model == "seedream-4.0" {
            if let Some(sequential) = &params.sequential_image_generation {
                request_data["sequential_image_generation"] = json!(sequential);
            }
            if let Some(max_images) = params.max_images {
                request_data["max_images"] = json!(max_images);
            }
            if let Some(watermark) = params.watermark {
                request_data["watermark"] = json!(watermark);
            }
        }

        Ok(BuiltRequest::with_endpoint("/seedream-4.0", request_data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = GenerateImageParams {
            prompt: "origami crane".into(),
            model: "seedream-4.0".into(),
            ..Default::default()
        };
        let built = PpioSeedream40Route.build_image_request(&params).unwrap();
        assert_eq!(built.endpoint.as_deref(), Some("/seedream-4.0"));
        assert_eq!(built.request_data["watermark"], false);
        assert!(built.request_data.get("images").is_none());
    }

    #[test]
    fn test_model_specific_fields() {
        let params = GenerateImageParams {
            prompt: "origami crane".into(),
            model: "seedream-4.0".into(),
            images: vec!["https://x.test/a.png".into()],
            size: Some("2048*2048".into()),
            sequential_image_generation: Some("auto".into()),
            max_images: Some(3),
            watermark: Some(true),
            ..Default::default()
        };
        let built = PpioSeedream40Route.build_image_request(&params).unwrap();
        assert_eq!(built.request_data["sequential_image_generation"], "auto");
        assert_eq!(built.request_data["max_images"], 3);
        assert_eq!(built.request_data["watermark"], true);
        assert_eq!(built.request_data["size"], "2048*2048");
    }
}
