//! Fal Nano Banana image routes.

use async_trait::async_trait;
use mediagen_types::{BuiltRequest, GenerateImageParams, ProviderId};
use serde_json::json;

use crate::error::RouteError;
use crate::registry::ModelRoute;
use crate::util::{ensure_data_uri, is_smart_ratio};

fn build_request(
    params: &GenerateImageParams,
    base_path: &str,
    with_resolution: bool,
) -> BuiltRequest {
    let has_images = !params.images.is_empty();

    // The edit subpath only exists for submission; status queries go to
    // the bare model ID.
    let submit_path = if has_images {
        format!("{base_path}/edit")
    } else {
        base_path.to_string()
    };

    let mut request_data = json!({ "prompt": params.prompt });

    if let Some(num_images) = params.num_images {
        request_data["num_images"] = json!(num_images);
    }

    if let Some(aspect_ratio) = &params.aspect_ratio {
        if !is_smart_ratio(aspect_ratio) {
            request_data["aspect_ratio"] = json!(aspect_ratio);
        }
    }

    if with_resolution {
        if let Some(resolution) = &params.resolution {
            request_data["resolution"] = json!(resolution);
        }
    }

    if has_images {
        let urls: Vec<String> = params.images.iter().map(|i| ensure_data_uri(i)).collect();
        request_data["image_urls"] = json!(urls);
    }

    BuiltRequest {
        endpoint: Some(submit_path),
        model_id: Some(base_path.to_string()),
        request_data,
    }
}

/// Nano Banana: text-to-image, or `/edit` when images are attached.
#[derive(Debug)]
pub struct FalNanoBananaRoute;

#[async_trait]
impl ModelRoute for FalNanoBananaRoute {
    fn name(&self) -> &'static str {
        "fal-nano-banana"
    }

    fn provider(&self) -> ProviderId {
        ProviderId::Fal
    }

    fn matches(&self, model_id: &str) -> bool {
        model_id == "fal-ai/nano-banana" || model_id == "nano-banana"
    }

    fn build_image_request(
        &self,
        params: &GenerateImageParams,
    ) -> Result<BuiltRequest, RouteError> {
        Ok(build_request(params, "fal-ai/nano-banana", false))
    }
}

/// Nano Banana Pro: same split, plus a resolution knob.
#[derive(Debug)]
pub struct FalNanoBananaProRoute;

#[async_trait]
impl ModelRoute for FalNanoBananaProRoute {
    fn name(&self) -> &'static str {
        "fal-nano-banana-pro"
    }

    fn provider(&self) -> ProviderId {
        ProviderId::Fal
    }

    fn matches(&self, model_id: &str) -> bool {
        model_id == "fal-ai/nano-banana-pro"
            || model_id == "nano-banana-pro"
            || model_id == "fal-ai-nano-banana-pro"
    }

    fn build_image_request(
        &self,
        params: &GenerateImageParams,
    ) -> Result<BuiltRequest, RouteError> {
        Ok(build_request(params, "fal-ai/nano-banana-pro", true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_to_image_path() {
        let params = GenerateImageParams {
            prompt: "clay figurines".into(),
            model: "fal-ai/nano-banana".into(),
            num_images: Some(2),
            aspect_ratio: Some("16:9".into()),
            ..Default::default()
        };
        let built = FalNanoBananaRoute.build_image_request(&params).unwrap();
        assert_eq!(built.endpoint.as_deref(), Some("fal-ai/nano-banana"));
        assert_eq!(built.model_id.as_deref(), Some("fal-ai/nano-banana"));
        assert_eq!(built.request_data["num_images"], 2);
        assert_eq!(built.request_data["aspect_ratio"], "16:9");
    }

    #[test]
    fn test_edit_path_with_images() {
        let params = GenerateImageParams {
            prompt: "clay figurines".into(),
            model: "fal-ai/nano-banana".into(),
            images: vec!["QUJD".into(), "https://x.test/a.png".into()],
            aspect_ratio: Some("auto".into()),
            ..Default::default()
        };
        let built = FalNanoBananaRoute.build_image_request(&params).unwrap();
        assert_eq!(built.endpoint.as_deref(), Some("fal-ai/nano-banana/edit"));
        assert_eq!(built.model_id.as_deref(), Some("fal-ai/nano-banana"));
        assert!(built.request_data.get("aspect_ratio").is_none());
        assert_eq!(
            built.request_data["image_urls"],
            json!([
                "data:image/jpeg;base64,QUJD",
                "https://x.test/a.png"
            ])
        );
    }

    #[test]
    fn test_pro_adds_resolution() {
        let params = GenerateImageParams {
            prompt: "clay figurines".into(),
            model: "fal-ai-nano-banana-pro".into(),
            resolution: Some("4K".into()),
            ..Default::default()
        };
        let built = FalNanoBananaProRoute.build_image_request(&params).unwrap();
        assert_eq!(built.endpoint.as_deref(), Some("fal-ai/nano-banana-pro"));
        assert_eq!(built.request_data["resolution"], "4K");
    }
}
