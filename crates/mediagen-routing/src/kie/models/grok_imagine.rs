//! KIE Grok Imagine routes (image and video).

use async_trait::async_trait;
use mediagen_types::{
    BuiltRequest, GenerateImageParams, GenerateVideoParams, ProviderId,
};
use serde_json::json;

use crate::error::RouteError;
use crate::registry::{ModelRoute, RouteContext};
use crate::util::is_smart_ratio;

/// Grok Imagine video: text/image-to-video on image count.
///
/// Image-to-video takes no aspect ratio and does not support the spicy
/// style, which is silently downgraded to normal. task_id, index, seed
/// and negative_prompt are never forwarded.
#[derive(Debug)]
pub struct KieGrokImagineVideoRoute;

#[async_trait]
impl ModelRoute for KieGrokImagineVideoRoute {
    fn name(&self) -> &'static str {
        "kie-grok-imagine-video"
    }

    fn provider(&self) -> ProviderId {
        ProviderId::Kie
    }

    fn matches(&self, model_id: &str) -> bool {
        model_id == "kie-grok-imagine-video" || model_id == "grok-imagine-video-kie"
    }

    async fn build_video_request(
        &self,
        params: &GenerateVideoParams,
        _ctx: &RouteContext<'_>,
    ) -> Result<BuiltRequest, RouteError> {
        let has_images = !params.images.is_empty();

        let model = if has_images {
            "grok-imagine/image-to-video"
        } else {
            "grok-imagine/text-to-video"
        };

        let mut input = json!({ "prompt": params.prompt });

        if !has_images {
            if let Some(aspect_ratio) = &params.aspect_ratio {
                input["aspect_ratio"] = json!(aspect_ratio);
            }
        } else {
            input["image_urls"] = json!([params.images[0]]);
        }

        // Grok's normal/fun/spicy switch rides the style field.
        if let Some(style) = &params.style {
            if has_images && style == "spicy" {
                input["mode"] = json!("normal");
            } else {
                input["mode"] = json!(style);
            }
        }

        Ok(BuiltRequest::new(json!({ "model": model, "input": input })))
    }
}

/// Grok Imagine image: text-to-image only.
#[derive(Debug)]
pub struct KieGrokImagineImageRoute;

#[async_trait]
impl ModelRoute for KieGrokImagineImageRoute {
    fn name(&self) -> &'static str {
        "kie-grok-imagine"
    }

    fn provider(&self) -> ProviderId {
        ProviderId::Kie
    }

    fn matches(&self, model_id: &str) -> bool {
        model_id == "kie-grok-imagine" || model_id == "grok-imagine-kie"
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

        // Text-to-image only: uploaded images are ignored by this model.
        Ok(BuiltRequest::new(json!({
            "model": "grok-imagine/text-to-image",
            "input": input,
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_video_text_to_video() {
        let params = GenerateVideoParams {
            prompt: "neon alley".into(),
            model: "kie-grok-imagine-video".into(),
            aspect_ratio: Some("9:16".into()),
            ..Default::default()
        };
        let built = KieGrokImagineVideoRoute
            .build_video_request(&params, &RouteContext::default())
            .await
            .unwrap();
        assert_eq!(built.request_data["model"], "grok-imagine/text-to-video");
        assert_eq!(built.request_data["input"]["aspect_ratio"], "9:16");
    }

    #[tokio::test]
    async fn test_video_spicy_downgraded_on_image_input() {
        let params = GenerateVideoParams {
            prompt: "neon alley".into(),
            model: "kie-grok-imagine-video".into(),
            images: vec!["https://x.test/a.png".into()],
            aspect_ratio: Some("9:16".into()),
            style: Some("spicy".into()),
            ..Default::default()
        };
        let built = KieGrokImagineVideoRoute
            .build_video_request(&params, &RouteContext::default())
            .await
            .unwrap();
        assert_eq!(built.request_data["model"], "grok-imagine/image-to-video");
        assert_eq!(built.request_data["input"]["mode"], "normal");
        assert!(built.request_data["input"].get("aspect_ratio").is_none());
        assert_eq!(
            built.request_data["input"]["image_urls"],
            json!(["https://x.test/a.png"])
        );
    }

    #[test]
    fn test_image_route_filters_sentinel_ratio() {
        let params = GenerateImageParams {
            prompt: "poster art".into(),
            model: "kie-grok-imagine".into(),
            aspect_ratio: Some("auto".into()),
            ..Default::default()
        };
        let built = KieGrokImagineImageRoute.build_image_request(&params).unwrap();
        assert_eq!(built.request_data["model"], "grok-imagine/text-to-image");
        assert!(built.request_data["input"].get("aspect_ratio").is_none());
    }
}
