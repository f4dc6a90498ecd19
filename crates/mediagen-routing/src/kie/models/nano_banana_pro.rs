//! KIE Nano Banana Pro image route.

use async_trait::async_trait;
use mediagen_types::{BuiltRequest, GenerateImageParams, ProviderId};
use serde_json::json;

use crate::error::RouteError;
use crate::registry::ModelRoute;
use crate::util::is_smart_ratio;

#[derive(Debug)]
pub struct KieNanoBananaProRoute;

#[async_trait]
impl ModelRoute for KieNanoBananaProRoute {
    fn name(&self) -> &'static str {
        "kie-nano-banana-pro"
    }

    fn provider(&self) -> ProviderId {
        ProviderId::Kie
    }

    fn matches(&self, model_id: &str) -> bool {
        model_id == "kie-nano-banana-pro" || model_id == "nano-banana-pro"
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

        if let Some(resolution) = &params.resolution {
            input["resolution"] = json!(resolution);
        }

        if !params.images.is_empty() {
            input["image_input"] = json!(params.images);
        }

        Ok(BuiltRequest::new(json!({
            "model": "nano-banana-pro",
            "input": input,
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_request_with_references() {
        let params = GenerateImageParams {
            prompt: "sticker sheet".into(),
            model: "kie-nano-banana-pro".into(),
            aspect_ratio: Some("1:1".into()),
            resolution: Some("4K".into()),
            images: vec!["https://x.test/a.png".into(), "https://x.test/b.png".into()],
            ..Default::default()
        };
        let built = KieNanoBananaProRoute.build_image_request(&params).unwrap();
        assert_eq!(built.request_data["model"], "nano-banana-pro");
        assert_eq!(built.request_data["input"]["aspect_ratio"], "1:1");
        assert_eq!(built.request_data["input"]["resolution"], "4K");
        assert_eq!(
            built.request_data["input"]["image_input"],
            json!(["https://x.test/a.png", "https://x.test/b.png"])
        );
    }

    #[test]
    fn test_video_generation_unsupported() {
        let params = mediagen_types::GenerateVideoParams {
            prompt: "x".into(),
            model: "kie-nano-banana-pro".into(),
            ..Default::default()
        };
        let rt = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();
        let err = rt
            .block_on(KieNanoBananaProRoute.build_video_request(
                &params,
                &crate::registry::RouteContext::default(),
            ))
            .unwrap_err();
        assert!(err.to_string().contains("does not support video"));
    }
}
